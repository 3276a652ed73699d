//! Snapshot adapter over parsed properties text.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use camino::Utf8PathBuf;
use url::Url;

use super::{Origin, Source};
use crate::{KeyNotFound, LoadCause, SourceLoadError};

mod parser;

/// Key/value pairs parsed from UTF-8 properties text.
///
/// Data is captured when the source is created; later changes to the file
/// or URL are not observed. When a key is defined more than once in the same
/// document, the first definition wins.
#[derive(Clone, Debug)]
pub struct PropertiesSource {
    values: BTreeMap<String, String>,
    origin: Origin,
}

impl PropertiesSource {
    /// Parse properties text supplied inline.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when the text is malformed.
    pub fn parse(text: &str) -> Result<Self, SourceLoadError> {
        Self::from_text(text, Origin::Inline)
    }

    /// Parse UTF-8 properties data supplied inline.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when the data is not UTF-8 or is
    /// malformed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SourceLoadError> {
        Self::from_data(bytes, Origin::Inline)
    }

    /// Read a stream of UTF-8 properties data to its end and parse it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when reading fails or the data is not
    /// valid properties text.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SourceLoadError> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|err| SourceLoadError::new(Origin::Stream, err.into()))?;
        Self::from_data(&data, Origin::Stream)
    }

    /// Read and parse a UTF-8 properties file.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] naming `path` when the file cannot be
    /// read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceLoadError> {
        let file = path.as_ref();
        let origin = Origin::File(to_utf8_path(file));
        let data = fs::read(file).map_err(|err| SourceLoadError::new(origin.clone(), err.into()))?;
        Self::from_data(&data, origin)
    }

    /// Fetch and parse UTF-8 properties data from `url`.
    ///
    /// `file:` URLs are read from disk. `http` and `https` URLs are fetched
    /// with a blocking client when the `http` feature is enabled.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] naming `url` when the scheme is not
    /// supported or the data cannot be fetched or parsed.
    pub fn from_url(url: &Url) -> Result<Self, SourceLoadError> {
        let origin = Origin::Url(url.clone());
        let data = fetch(url).map_err(|cause| SourceLoadError::new(origin.clone(), cause))?;
        Self::from_data(&data, origin)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the document defined no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn from_data(data: &[u8], origin: Origin) -> Result<Self, SourceLoadError> {
        match std::str::from_utf8(data) {
            Ok(text) => Self::from_text(text, origin),
            Err(err) => Err(SourceLoadError::new(origin, err.into())),
        }
    }

    fn from_text(text: &str, origin: Origin) -> Result<Self, SourceLoadError> {
        let entries = match parser::parse(text) {
            Ok(entries) => entries,
            Err(cause) => return Err(SourceLoadError::new(origin, cause)),
        };
        let mut values = BTreeMap::new();
        for (key, value) in entries {
            values.entry(key).or_insert(value);
        }
        Ok(Self { values, origin })
    }
}

/// Convert a path to UTF-8, falling back to lossy conversion.
fn to_utf8_path(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .unwrap_or_else(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
}

fn fetch(url: &Url) -> Result<Vec<u8>, LoadCause> {
    match url.scheme() {
        "file" => {
            let path = url.to_file_path().map_err(|()| LoadCause::NotLocalFile)?;
            Ok(fs::read(path)?)
        }
        #[cfg(feature = "http")]
        "http" | "https" => fetch_remote(url),
        scheme => Err(LoadCause::UnsupportedScheme {
            scheme: scheme.to_owned(),
        }),
    }
}

#[cfg(feature = "http")]
fn fetch_remote(url: &Url) -> Result<Vec<u8>, LoadCause> {
    let response = reqwest::blocking::get(url.as_str())?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

impl Source for PropertiesSource {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str) -> Result<Cow<'_, str>, KeyNotFound> {
        self.values
            .get(key)
            .map(|v| Cow::Borrowed(v.as_str()))
            .ok_or_else(|| KeyNotFound::new(key))
    }

    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len())
    }
}
