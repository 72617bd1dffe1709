//!
//! EM training of IBM model 0 `t(f|e)`
//!
//! ## first iteration
//!
//! Seed the table with the uniform `1/|f|` of each sentence pair, then normalize.
//!
//! ## later iterations
//!
//! * E-step: collect soft counts of `(e, f)` into a fresh table using the
//!   current estimate (`update`).
//! * M-step: normalize the soft counts into `t(f|e)` (`normalize`).
//!
//! The loop runs for exactly the requested number of iterations.
//! There is no convergence check.
//!
pub mod initialize;
pub mod normalize;
pub mod update;

use crate::corpus::Corpus;
use crate::error::{Ibm0Error, Result};
use crate::table::ProbTable;
use derive_new::new;
use log::{debug, info};

///
/// Configuration of a training run
///
#[derive(Clone, Debug, PartialEq)]
pub struct TrainOptions {
    /// number of EM iterations, including the initialization
    pub iterations: usize,
    /// run the E-step with rayon
    pub parallel: bool,
}

impl TrainOptions {
    ///
    /// Sequential training with `iterations` (>= 1) iterations.
    ///
    pub fn new(iterations: usize) -> Result<Self> {
        if iterations == 0 {
            return Err(Ibm0Error::InvalidIterationCount(iterations));
        }
        Ok(TrainOptions {
            iterations,
            parallel: false,
        })
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

///
/// What the iteration did before normalizing
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// uniform seeding (first iteration)
    Initialize,
    /// E-step soft counting (later iterations)
    Update,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Step::Initialize => write!(f, "initialize"),
            Step::Update => write!(f, "update"),
        }
    }
}

///
/// State of the training loop
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainState {
    /// the next iteration is the first one (index 0)
    Initialize,
    /// the next iteration is an update with the given index (>= 1)
    Update(usize),
    /// all the iterations are finished
    Done,
}

///
/// Points in an iteration where the working table can be observed
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// after the uniform seeding, before normalization
    Initialized,
    /// after the soft counting, before normalization
    Updated,
    /// after normalization (end of the iteration)
    Normalized,
}

///
/// Log information of each iteration
///
#[derive(new, Clone, Debug, PartialEq)]
pub struct IterationLog {
    /// 0-origin index of the iteration
    pub iteration: usize,
    pub step: Step,
    /// number of source words with at least one entry
    pub n_sources: usize,
    /// number of stored `(e, f)` cells
    pub n_entries: usize,
    /// largest absolute change of a cell from the previous iteration
    pub max_delta: f64,
}

impl std::fmt::Display for IterationLog {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.iteration, self.step, self.n_sources, self.n_entries, self.max_delta
        )
    }
}

///
/// Iteration driver holding the working table
///
pub struct Trainer<'a> {
    corpus: &'a Corpus,
    /// every source word of the corpus, used by normalization
    source_words: Vec<&'a str>,
    options: TrainOptions,
    state: TrainState,
    table: ProbTable,
}

impl<'a> Trainer<'a> {
    ///
    /// Check the corpus and create a trainer in the `Initialize` state.
    ///
    pub fn new(corpus: &'a Corpus, options: TrainOptions) -> Result<Self> {
        if options.iterations == 0 {
            return Err(Ibm0Error::InvalidIterationCount(options.iterations));
        }
        corpus.validate()?;
        let mut source_words: Vec<&str> = corpus.source_words().into_iter().collect();
        source_words.sort_unstable();
        Ok(Trainer {
            corpus,
            source_words,
            options,
            state: TrainState::Initialize,
            table: ProbTable::new(),
        })
    }
    pub fn state(&self) -> TrainState {
        self.state
    }
    pub fn options(&self) -> &TrainOptions {
        &self.options
    }
    /// the current working table
    pub fn table(&self) -> &ProbTable {
        &self.table
    }
    /// finish and take the working table
    pub fn into_table(self) -> ProbTable {
        self.table
    }
    ///
    /// Run a single iteration. Returns `None` if already `Done`.
    ///
    pub fn step(&mut self) -> Option<IterationLog> {
        self.step_with(&mut |_: Phase, _: &ProbTable| {})
    }
    ///
    /// Run a single iteration, calling `observer` with the working table
    /// before and after normalization.
    ///
    pub fn step_with<F>(&mut self, observer: &mut F) -> Option<IterationLog>
    where
        F: FnMut(Phase, &ProbTable),
    {
        let (iteration, step) = match self.state {
            TrainState::Initialize => (0, Step::Initialize),
            TrainState::Update(i) => (i, Step::Update),
            TrainState::Done => return None,
        };
        info!(
            "iteration {}/{} ({})",
            iteration + 1,
            self.options.iterations,
            step
        );

        let mut table = match step {
            Step::Initialize => {
                let table = initialize::initialize_corpus(self.corpus);
                observer(Phase::Initialized, &table);
                table
            }
            Step::Update => {
                let counts = if self.options.parallel {
                    update::update_corpus_parallel(self.corpus, &self.table)
                } else {
                    update::update_corpus(self.corpus, &self.table)
                };
                observer(Phase::Updated, &counts);
                counts
            }
        };
        normalize::normalize(self.source_words.iter().copied(), &mut table);
        observer(Phase::Normalized, &table);

        let log = IterationLog::new(
            iteration,
            step,
            table.n_sources(),
            table.n_entries(),
            table.max_abs_diff(&self.table),
        );
        debug!(
            "n_sources={} n_entries={} max_delta={}",
            log.n_sources, log.n_entries, log.max_delta
        );

        // the previous table is discarded here
        self.table = table;
        self.state = if iteration + 1 < self.options.iterations {
            TrainState::Update(iteration + 1)
        } else {
            TrainState::Done
        };
        Some(log)
    }
    ///
    /// Run all the remaining iterations.
    ///
    pub fn run_with<F>(&mut self, observer: &mut F) -> Vec<IterationLog>
    where
        F: FnMut(Phase, &ProbTable),
    {
        let mut logs = Vec::new();
        while let Some(log) = self.step_with(observer) {
            logs.push(log);
        }
        logs
    }
}

///
/// Train `t(f|e)` on the corpus with `iterations` EM iterations.
///
/// ```
/// use ibm0::{corpus::Corpus, em::train};
/// let corpus = Corpus::from_texts(&[("the house", "la maison")]);
/// let table = train(1, &corpus).unwrap();
/// assert_eq!(table.get("the", "la"), 0.5);
/// ```
///
pub fn train(iterations: usize, corpus: &Corpus) -> Result<ProbTable> {
    train_with_options(&TrainOptions::new(iterations)?, corpus)
}

///
/// `train` with options
///
pub fn train_with_options(options: &TrainOptions, corpus: &Corpus) -> Result<ProbTable> {
    let (table, _) = train_with_logs(options, corpus)?;
    Ok(table)
}

///
/// `train` returning the log of each iteration as well
///
pub fn train_with_logs(
    options: &TrainOptions,
    corpus: &Corpus,
) -> Result<(ProbTable, Vec<IterationLog>)> {
    let mut trainer = Trainer::new(corpus, options.clone())?;
    let logs = trainer.run_with(&mut |_: Phase, _: &ProbTable| {});
    info!("finished training");
    Ok((trainer.into_table(), logs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0 ; "zero iterations")]
    fn invalid_iteration_count(iterations: usize) {
        let corpus = Corpus::from_texts(&[("a", "b")]);
        assert!(matches!(
            train(iterations, &corpus),
            Err(Ibm0Error::InvalidIterationCount(0))
        ));
    }

    #[test]
    fn invalid_iterations_reported_before_malformed_input() {
        let corpus = Corpus::from_texts(&[("a", "")]);
        assert!(matches!(
            train(0, &corpus),
            Err(Ibm0Error::InvalidIterationCount(_))
        ));
        assert!(matches!(
            train(1, &corpus),
            Err(Ibm0Error::MalformedInput { index: 0, .. })
        ));
    }

    #[test]
    fn state_machine_transitions() {
        let corpus = Corpus::from_texts(&[("the house", "la maison")]);
        let mut trainer = Trainer::new(&corpus, TrainOptions::new(3).unwrap()).unwrap();
        assert_eq!(trainer.state(), TrainState::Initialize);
        assert_eq!(trainer.step().unwrap().step, Step::Initialize);
        assert_eq!(trainer.state(), TrainState::Update(1));
        assert_eq!(trainer.step().unwrap().iteration, 1);
        assert_eq!(trainer.state(), TrainState::Update(2));
        assert_eq!(trainer.step().unwrap().step, Step::Update);
        assert_eq!(trainer.state(), TrainState::Done);
        assert!(trainer.step().is_none());
    }

    #[test]
    fn single_iteration_goes_straight_to_done() {
        let corpus = Corpus::from_texts(&[("a", "b")]);
        let mut trainer = Trainer::new(&corpus, TrainOptions::new(1).unwrap()).unwrap();
        trainer.step();
        assert_eq!(trainer.state(), TrainState::Done);
    }

    #[test]
    fn observer_sees_every_phase() {
        let corpus = Corpus::from_texts(&[("the house", "la maison"), ("the", "la")]);
        let mut trainer = Trainer::new(&corpus, TrainOptions::new(2).unwrap()).unwrap();
        let mut phases = Vec::new();
        trainer.run_with(&mut |phase, table: &ProbTable| {
            phases.push((phase, table.get("the", "la")));
        });
        let kinds: Vec<Phase> = phases.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            kinds,
            vec![
                Phase::Initialized,
                Phase::Normalized,
                Phase::Updated,
                Phase::Normalized
            ]
        );
        // unnormalized seed 0.5 + 1.0
        assert_abs_diff_eq!(phases[0].1, 1.5);
        // normalized over 1.5 + 0.5
        assert_abs_diff_eq!(phases[1].1, 0.75);
    }

    #[test]
    fn logs_are_recorded_per_iteration() {
        let corpus = Corpus::from_texts(&[("the house", "la maison")]);
        let (_, logs) = train_with_logs(&TrainOptions::new(3).unwrap(), &corpus).unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].step, Step::Initialize);
        assert_eq!(logs[0].n_sources, 2);
        assert_eq!(logs[0].n_entries, 4);
        assert_abs_diff_eq!(logs[0].max_delta, 0.5);
        // fixed point
        assert_abs_diff_eq!(logs[2].max_delta, 0.0);
        assert_eq!(logs[1].to_string(), "1\tupdate\t2\t4\t0");
    }

    #[test]
    fn parallel_training_matches_sequential() {
        let corpus = Corpus::from_texts(&[
            ("the house", "das haus"),
            ("the book", "das buch"),
            ("a book", "ein buch"),
        ]);
        let seq = train(5, &corpus).unwrap();
        let par =
            train_with_options(&TrainOptions::new(5).unwrap().parallel(true), &corpus).unwrap();
        assert_abs_diff_eq!(seq.max_abs_diff(&par), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_corpus_gives_empty_table() {
        let table = train(3, &Corpus::default()).unwrap();
        assert!(table.is_empty());
    }
}
