//! Gzip compression of rotated log files

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Path of the gzip archive for `file_path`: the full file name plus `.gz`
pub fn compressed_path(file_path: &Path) -> PathBuf {
    let mut name = file_path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

/// Compress `file_path` into `<file_path>.gz` and remove the original.
///
/// # Returns
/// The path of the compressed archive
pub fn compress_file(file_path: &Path) -> io::Result<PathBuf> {
    let target = compressed_path(file_path);

    let mut input = BufReader::new(File::open(file_path)?);
    let output = BufWriter::new(File::create(&target)?);
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(file_path)?;
    Ok(target)
}
