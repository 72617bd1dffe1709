//!
//! Tab-separated model format
//!
//! ```text
//! source_word<TAB>target_word<TAB>probability
//! ```
//!
//! one record per stored cell, sorted by source word then target word.
//!
use crate::error::{Ibm0Error, Result};
use crate::io::{create_file, io_error, open_file};
use crate::table::ProbTable;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

///
/// Write the records of the table into the writer.
///
pub fn write_tsv<W: Write>(table: &ProbTable, mut writer: W) -> Result<()> {
    for (e, f, p) in table.sorted_entries() {
        writeln!(writer, "{}\t{}\t{}", e, f, p)?;
    }
    writer.flush()?;
    Ok(())
}

///
/// Write the table into a file.
///
pub fn write_tsv_file<P: AsRef<Path>>(table: &ProbTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = create_file(path)?;
    write_tsv(table, BufWriter::new(file)).map_err(|e| match e {
        Ibm0Error::Stream(err) => io_error(path, err),
        e => e,
    })
}

///
/// Read a table from records. Blank lines are skipped.
///
pub fn read_tsv<R: BufRead>(reader: R) -> Result<ProbTable> {
    let mut table = ProbTable::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            return Err(Ibm0Error::Parse {
                line: i + 1,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        let p: f64 = fields[2].trim().parse().map_err(|_| Ibm0Error::Parse {
            line: i + 1,
            reason: format!("bad probability `{}`", fields[2]),
        })?;
        if !(p >= 0.0) {
            return Err(Ibm0Error::Parse {
                line: i + 1,
                reason: format!("negative probability `{}`", fields[2]),
            });
        }
        table.set(fields[0], fields[1], p);
    }
    Ok(table)
}

///
/// Read a table from a file.
///
pub fn read_tsv_file<P: AsRef<Path>>(path: P) -> Result<ProbTable> {
    let path = path.as_ref();
    let file = open_file(path)?;
    read_tsv(BufReader::new(file)).map_err(|e| match e {
        Ibm0Error::Stream(err) => io_error(path, err),
        e => e,
    })
}
