//! Temporary properties files for loader tests.
//!
//! ```
//! use test_helpers::properties::PropertiesFile;
//!
//! let file = PropertiesFile::new("conf1=file-1\n").expect("write fixture");
//! assert!(file.path().as_str().ends_with(".properties"));
//! ```

use std::io::Write as _;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;
use url::Url;

/// A properties file deleted when dropped.
#[derive(Debug)]
pub struct PropertiesFile {
    file: NamedTempFile,
    path: Utf8PathBuf,
}

impl PropertiesFile {
    /// Write `contents` to a fresh `.properties` file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or written, or its
    /// path is not UTF-8.
    pub fn new(contents: impl AsRef<[u8]>) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("propstack-")
            .suffix(".properties")
            .tempfile()
            .context("create temporary properties file")?;
        file.write_all(contents.as_ref())
            .context("write temporary properties file")?;
        file.flush().context("flush temporary properties file")?;
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf())
            .map_err(|p| anyhow!("temporary path is not UTF-8: {}", p.display()))?;
        Ok(Self { file, path })
    }

    /// Write `key=value` lines for each entry.
    ///
    /// Keys and values are written as given, so they must not need escaping.
    ///
    /// # Errors
    ///
    /// As [`PropertiesFile::new`].
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let contents: String = entries
            .into_iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();
        Self::new(contents)
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// `file:` URL naming the file.
    ///
    /// # Errors
    ///
    /// Returns an error when the path cannot be expressed as a URL.
    pub fn url(&self) -> Result<Url> {
        Url::from_file_path(self.file.path())
            .map_err(|()| anyhow!("cannot express {} as a file URL", self.path))
    }
}
