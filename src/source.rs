//! Report inputs: plain report files, zip archives and directory discovery.
//!
//! A report is always decoded to text before parsing. Stray non-UTF-8 bytes
//! are replaced rather than rejected since GROUP output occasionally carries
//! code-page characters in free-text fields.

use crate::constants::ARCHIVE_EXTENSION;
use crate::error::{Result, SolummaaError};
use crate::version::{ReportVersion, resolve_version};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::ZipArchive;

/// One report loaded into memory
#[derive(Debug, Clone)]
pub struct ReportSource {
    /// Report file name; decides the version
    pub filename: String,
    pub version: ReportVersion,
    pub text: String,
    /// File the report was read from, when it came from disk
    pub path: Option<PathBuf>,
}

impl ReportSource {
    /// Wrap report text already in memory
    pub fn from_text(filename: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let filename = filename.into();
        let version = resolve_version(&filename)?;
        Ok(Self {
            filename,
            version,
            text: text.into(),
            path: None,
        })
    }

    /// Read a report file or a zip archive holding one
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SolummaaError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        if is_archive(path) {
            return read_archive(path);
        }

        let filename = file_name(path);
        let version = resolve_version(&filename)?;
        let bytes = std::fs::read(path)?;
        debug!("Read {} ({} bytes, {})", path.display(), bytes.len(), version);

        Ok(Self {
            filename,
            version,
            text: String::from_utf8_lossy(&bytes).into_owned(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Base name for output files
    pub fn stem(&self) -> String {
        let name = match &self.path {
            Some(path) => file_name(path),
            None => self.filename.clone(),
        };
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => name,
        }
    }
}

/// Read the first entry of a zip archive; the entry name decides the version
fn read_archive(path: &Path) -> Result<ReportSource> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    if archive.is_empty() {
        return Err(SolummaaError::EmptyArchive {
            path: path.to_path_buf(),
        });
    }
    if archive.len() > 1 {
        debug!(
            "{} holds {} entries, reading only the first",
            path.display(),
            archive.len()
        );
    }

    let mut entry = archive.by_index(0)?;
    let filename = entry
        .name()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let version = resolve_version(&filename)?;

    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    debug!(
        "Read {} from {} ({} bytes, {})",
        filename,
        path.display(),
        bytes.len(),
        version
    );

    Ok(ReportSource {
        filename,
        version,
        text: String::from_utf8_lossy(&bytes).into_owned(),
        path: Some(path.to_path_buf()),
    })
}

/// Collect report inputs under `root`, sorted by path.
///
/// A file is returned as-is so an explicitly named input with an unknown
/// extension still fails with a version error instead of being skipped.
pub fn discover_inputs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(SolummaaError::InputNotFound {
            path: root.to_path_buf(),
        });
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut inputs: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_report_input(path))
        .collect();
    inputs.sort();

    debug!("Discovered {} inputs under {}", inputs.len(), root.display());
    Ok(inputs)
}

/// Whether a path looks like a GROUP report or an archive of one
pub fn is_report_input(path: &Path) -> bool {
    is_archive(path) || resolve_version(path).is_ok()
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
