use crate::error::{Error, Result};
use crate::filter::PathFilter;
use crate::parsers::text::utc_date;
use chrono::NaiveDate;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A page read from disk
#[derive(Debug, Clone)]
pub struct Page {
    /// Path on disk
    pub path: PathBuf,
    /// Path relative to the site root; drives derived canonical URLs
    pub rel_path: PathBuf,
    /// Text as read, with invalid UTF-8 replaced
    pub content: String,
    /// Last-modification date of the file (UTC)
    pub modified: NaiveDate,
}

impl Page {
    /// Build a page from in-memory content
    pub fn new(
        path: impl Into<PathBuf>,
        rel_path: impl Into<PathBuf>,
        content: impl Into<String>,
        modified: NaiveDate,
    ) -> Self {
        Self {
            path: path.into(),
            rel_path: rel_path.into(),
            content: content.into(),
            modified,
        }
    }

    /// Read a page, resolving its path relative to `site_root`
    pub fn read(path: &Path, site_root: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| Error::io(path, e))?;

        let rel_path = path.strip_prefix(site_root).unwrap_or(path).to_path_buf();

        Ok(Self {
            path: path.to_path_buf(),
            rel_path,
            content: String::from_utf8_lossy(&bytes).into_owned(),
            modified: utc_date(modified),
        })
    }

    /// Path of this page's backup: the file name with `backup_ext` appended
    pub fn backup_path(&self, backup_ext: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(backup_ext);
        self.path.with_file_name(name)
    }

    /// Keep the original content as a backup, unless one already exists
    ///
    /// Returns whether a backup was created by this call.
    pub fn ensure_backup(&self, backup_ext: &str) -> Result<bool> {
        let backup = self.backup_path(backup_ext);
        let file = OpenOptions::new().write(true).create_new(true).open(&backup);
        match file {
            Ok(mut file) => {
                file.write_all(self.content.as_bytes())
                    .map_err(|e| Error::io(&backup, e))?;
                ::log::debug!("Backup written: {}", backup.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(Error::io(&backup, e)),
        }
    }

    /// Back up the original once, then overwrite the file with `updated`
    pub fn commit(&self, updated: &str, backup_ext: &str) -> Result<()> {
        self.ensure_backup(backup_ext)?;
        fs::write(&self.path, updated).map_err(|e| Error::io(&self.path, e))
    }
}

/// Collect all pages under `content_root` accepted by `filter`, sorted by path
pub fn discover(content_root: &Path, site_root: &Path, filter: &PathFilter) -> Result<Vec<PathBuf>> {
    if !content_root.is_dir() {
        return Err(Error::io(
            content_root,
            std::io::Error::new(ErrorKind::NotFound, "content directory not found"),
        ));
    }

    let pages = WalkDir::new(content_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                ::log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| filter.should_process(path.strip_prefix(site_root).unwrap_or(path)))
        .collect::<Vec<_>>();

    ::log::debug!("Discovered {} pages under {}", pages.len(), content_root.display());
    Ok(pages)
}
