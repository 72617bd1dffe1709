use clap::Parser;
use ibm0::{
    em::{Phase, TrainOptions, Trainer},
    error::Result,
    io::{json, text, tsv},
};
use indicatif::ProgressBar;

/// Estimate word translation probabilities t(f|e) of IBM model 0 by EM
#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// Source-language corpus, one sentence per line
    source: std::path::PathBuf,
    /// Target-language corpus, aligned line by line to the source
    target: std::path::PathBuf,
    /// Number of EM iterations (including the uniform initialization)
    #[clap(short = 'n', long)]
    iterations: usize,
    /// Output TSV filename. Written to stdout if not specified.
    #[clap(short, long)]
    output: Option<std::path::PathBuf>,
    /// Output JSON filename
    #[clap(long)]
    json: Option<std::path::PathBuf>,
    /// Run the E-step in parallel
    #[clap(long)]
    parallel: bool,
    /// Keep the case of the input sentences
    #[clap(long)]
    no_lowercase: bool,
    /// Print the table after each step of each iteration
    #[clap(long)]
    verbose_tables: bool,
}

fn run(opts: &Opts) -> Result<()> {
    let options = TrainOptions::new(opts.iterations)?.parallel(opts.parallel);
    let corpus = text::read_parallel(&opts.source, &opts.target, !opts.no_lowercase)?;
    eprintln!("# n_sentence_pairs={}", corpus.len());

    let mut trainer = Trainer::new(&corpus, options)?;
    let pb = ProgressBar::new(opts.iterations as u64);
    let verbose_tables = opts.verbose_tables;
    let logs = trainer.run_with(&mut |phase, table| {
        if verbose_tables {
            let label = match phase {
                Phase::Initialized => "[initialize]",
                Phase::Updated => "[update]",
                Phase::Normalized => "[normalize]",
            };
            pb.println(format!("{}\n{}", label, table));
        }
        if phase == Phase::Normalized {
            pb.inc(1);
        }
    });
    pb.finish_and_clear();
    for log in logs.iter() {
        eprintln!("# iteration\t{}", log);
    }
    let table = trainer.into_table();

    match &opts.output {
        Some(path) => tsv::write_tsv_file(&table, path)?,
        None => {
            let stdout = std::io::stdout();
            tsv::write_tsv(&table, stdout.lock())?
        }
    }
    if let Some(path) = &opts.json {
        json::write_json_file(&table, path)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    eprintln!("# started_at={}", chrono::Local::now());
    eprintln!("# n_threads={}", rayon::current_num_threads());
    eprintln!("# opts={:?}", opts);
    if let Err(e) = run(&opts) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    eprintln!("# finished_at={}", chrono::Local::now());
}
