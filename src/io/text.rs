//!
//! Plain-text parallel corpus loader
//!
//! Two files with one sentence per line; line `i` of the source file is
//! aligned to line `i` of the target file.
//!
use crate::corpus::{tokenize, Corpus, SentencePair};
use crate::error::{Ibm0Error, Result};
use crate::io::read_string;
use log::{info, warn};
use std::path::Path;

///
/// Build a corpus from the contents of the two files.
///
/// * lines are lower-cased if `lowercase`, and tokenized on whitespace.
/// * trailing blank lines of each file are ignored.
/// * the remaining line counts must match.
/// * a line pair where either side is blank is dropped from both sides.
///
pub fn parse_parallel(source: &str, target: &str, lowercase: bool) -> Result<Corpus> {
    let source_lines = lines(source);
    let target_lines = lines(target);
    if source_lines.len() != target_lines.len() {
        return Err(Ibm0Error::LengthMismatch {
            source_lines: source_lines.len(),
            target_lines: target_lines.len(),
        });
    }

    let mut pairs = Vec::with_capacity(source_lines.len());
    for (i, (e, f)) in source_lines.iter().zip(target_lines.iter()).enumerate() {
        let pair = if lowercase {
            SentencePair::new(tokenize(&e.to_lowercase()), tokenize(&f.to_lowercase()))
        } else {
            SentencePair::new(tokenize(e), tokenize(f))
        };
        if pair.source.is_empty() || pair.target.is_empty() {
            warn!("dropped line {}: empty sentence", i + 1);
            continue;
        }
        pairs.push(pair);
    }
    Ok(Corpus::from(pairs))
}

///
/// Read the source and target files into a corpus (see `parse_parallel`).
///
pub fn read_parallel<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    target: Q,
    lowercase: bool,
) -> Result<Corpus> {
    let corpus = parse_parallel(&read_string(source)?, &read_string(target)?, lowercase)?;
    info!("n_sentence_pairs={}", corpus.len());
    Ok(corpus)
}

fn lines(s: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = s.lines().collect();
    while lines.last().map_or(false, |l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}
