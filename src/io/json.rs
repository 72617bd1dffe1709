//!
//! JSON model format
//!
//! `{"source": {"target": probability, ...}, ...}` with sorted keys.
//!
use crate::error::Result;
use crate::io::{read_string, write_string};
use crate::table::ProbTable;
use std::collections::BTreeMap;
use std::path::Path;

type SortedTable<K> = BTreeMap<K, BTreeMap<K, f64>>;

fn to_sorted(table: &ProbTable) -> SortedTable<&str> {
    let mut sorted: SortedTable<&str> = BTreeMap::new();
    for (e, f, p) in table.iter() {
        sorted.entry(e).or_default().insert(f, p);
    }
    sorted
}

///
/// Serialize the table into a pretty-printed JSON string
///
pub fn to_json_string(table: &ProbTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_sorted(table))?)
}

///
/// Deserialize the table from a JSON string
///
pub fn from_json_str(s: &str) -> Result<ProbTable> {
    let sorted: SortedTable<String> = serde_json::from_str(s)?;
    let mut table = ProbTable::new();
    for (e, row) in sorted.iter() {
        for (f, &p) in row.iter() {
            table.set(e, f, p);
        }
    }
    Ok(table)
}

pub fn write_json_file<P: AsRef<Path>>(table: &ProbTable, path: P) -> Result<()> {
    write_string(path, &to_json_string(table)?)
}

pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<ProbTable> {
    from_json_str(&read_string(path)?)
}
