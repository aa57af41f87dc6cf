//! Module archives
//!
//! A module ships as a zip of its source tree with paths relative to the
//! module root. Packing is deterministic: entries are written in sorted
//! order with a fixed timestamp and fixed permissions, hidden entries and
//! build caches are left out, so packing an unchanged tree twice yields
//! byte-identical archives.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::{Error, Result, constants::is_excluded_entry};

/// Pack the tree under `source_dir` into a zip at `zip_path`.
///
/// Returns the archive-relative names of the packed files, in the order
/// they were written.
pub fn pack_dir(source_dir: &Path, zip_path: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    collect_files(source_dir, "", &mut files)?;

    if let Some(parent) = zip_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let out = File::create(zip_path).map_err(|e| Error::io(zip_path, e))?;
    let mut writer = ZipWriter::new(out);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut names = Vec::with_capacity(files.len());
    for (name, path) in files {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| Error::archive(zip_path, e))?;
        let mut input = File::open(&path).map_err(|e| Error::io(&path, e))?;
        std::io::copy(&mut input, &mut writer).map_err(|e| Error::io(&path, e))?;
        names.push(name);
    }
    writer.finish().map_err(|e| Error::archive(zip_path, e))?;

    tracing::debug!(
        source = %source_dir.display(),
        archive = %zip_path.display(),
        files = names.len(),
        "packed module archive"
    );
    Ok(names)
}

/// Extract the zip at `zip_path` into `dest_dir`, creating it if needed.
///
/// Entries that would escape `dest_dir` are rejected by the zip reader.
pub fn unpack(zip_path: &Path, dest_dir: &Path) -> Result<()> {
    let input = File::open(zip_path).map_err(|e| Error::io(zip_path, e))?;
    let mut archive = ZipArchive::new(input).map_err(|e| Error::archive(zip_path, e))?;
    fs::create_dir_all(dest_dir).map_err(|e| Error::io(dest_dir, e))?;
    archive
        .extract(dest_dir)
        .map_err(|e| Error::archive(zip_path, e))?;

    tracing::debug!(
        archive = %zip_path.display(),
        dest = %dest_dir.display(),
        entries = archive.len(),
        "extracted module archive"
    );
    Ok(())
}

fn collect_files(dir: &Path, prefix: &str, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_excluded_entry(&name) {
            continue;
        }
        let path = entry.path();
        let rel = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if file_type.is_dir() {
            collect_files(&path, &rel, out)?;
        } else if file_type.is_file() {
            out.push((rel, path));
        }
    }
    Ok(())
}
