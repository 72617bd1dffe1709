pub mod json;
pub mod text;
pub mod tsv;

use crate::error::{Ibm0Error, Result};
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

///
/// write string into a file
///
pub fn write_string<P: AsRef<Path>>(path: P, string: &str) -> Result<()> {
    let path = path.as_ref();
    let mut file = create_file(path)?;
    file.write_all(string.as_bytes()).map_err(|err| io_error(path, err))?;
    Ok(())
}

///
/// read the whole file as a string
///
pub fn read_string<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| io_error(path, err))
}

pub(crate) fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|err| io_error(path, err))
}

pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| io_error(path, err))
}

pub(crate) fn io_error(path: &Path, err: std::io::Error) -> Ibm0Error {
    Ibm0Error::Io {
        path: path.to_path_buf(),
        err,
    }
}
