//! Quote files on disk.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ratescope_common::Quote;
use ratescope_fx::{FxError, FxResult, QuoteSource};
use tracing::{info, instrument};

use crate::csv_reader::read_csv;
use crate::error::{LoadError, LoadResult};
use crate::json::read_json;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// Format from a path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(FileFormat::Json),
            "csv" => Ok(FileFormat::Csv),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Json => write!(f, "json"),
            FileFormat::Csv => write!(f, "csv"),
        }
    }
}

/// A quote file whose format has been detected.
#[derive(Debug, Clone)]
pub struct QuoteFile {
    path: PathBuf,
    name: String,
    format: FileFormat,
}

impl QuoteFile {
    /// Detect the format of `path`. The file is not read until [`load`].
    ///
    /// [`load`]: QuoteFile::load
    pub fn open(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref().to_path_buf();
        let format = FileFormat::from_path(&path)?;

        Ok(Self {
            name: path.display().to_string(),
            path,
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Read every quote record in the file.
    #[instrument(skip(self), fields(path = %self.name, format = %self.format))]
    pub fn load(&self) -> LoadResult<Vec<Quote>> {
        if !self.path.exists() {
            return Err(LoadError::NotFound(self.path.clone()));
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let quotes = match self.format {
            FileFormat::Json => read_json(reader)?,
            FileFormat::Csv => read_csv(reader)?,
        };

        if quotes.is_empty() {
            return Err(LoadError::Empty(self.path.clone()));
        }

        info!(quotes = quotes.len(), "Loaded quote file");
        Ok(quotes)
    }
}

impl QuoteSource for QuoteFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> FxResult<Vec<Quote>> {
        self.load().map_err(|e| match e {
            LoadError::Empty(_) => FxError::EmptyDataset(self.name.clone()),
            other => FxError::SourceError(other.to_string()),
        })
    }
}

/// Load quotes from `path`, picking the reader from the extension.
pub fn load_quotes(path: impl AsRef<Path>) -> LoadResult<Vec<Quote>> {
    QuoteFile::open(path)?.load()
}
