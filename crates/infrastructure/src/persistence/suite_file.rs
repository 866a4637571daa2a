//! Suite file loading.
//!
//! A suite file is YAML (`.yaml`, `.yml`) or JSON (`.json`) holding
//! `{ name, config, cases }`.

use std::io;
use std::path::{Path, PathBuf};

use testlang_domain::{DomainError, HarnessConfig, TestSuite};
use tokio::fs;

use crate::serialization::{SerializationError, from_json};

/// Maximum accepted suite file size (10 MB).
const MAX_SUITE_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Errors raised while loading a suite file.
#[derive(Debug, thiserror::Error)]
pub enum SuiteLoadError {
    /// The file does not exist.
    #[error("suite file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exceeds the maximum allowed size.
    #[error("suite file too large: {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge {
        /// Actual file size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// The extension names no supported format.
    #[error("unsupported suite file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Reading the file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The YAML document does not describe a suite.
    #[error("invalid YAML suite: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document does not describe a suite.
    #[error("invalid JSON suite: {0}")]
    Json(#[from] SerializationError),

    /// The suite parsed but fails startup validation.
    #[error("invalid suite: {0}")]
    Validation(#[from] DomainError),
}

/// On-disk suite formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl SuiteFormat {
    /// Detects the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parses suite text in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a well-formed suite document.
    pub fn parse(self, contents: &str) -> Result<TestSuite, SuiteLoadError> {
        match self {
            Self::Yaml => Ok(serde_yaml::from_str(contents)?),
            Self::Json => Ok(from_json(contents)?),
        }
    }
}

/// Reads and parses a suite file without validating it.
///
/// # Errors
///
/// Returns an error if the file is missing, too large, has an unknown
/// extension, or does not parse.
pub async fn read_suite(path: &Path) -> Result<TestSuite, SuiteLoadError> {
    let format = SuiteFormat::from_path(path)
        .ok_or_else(|| SuiteLoadError::UnsupportedFormat(path.to_path_buf()))?;

    let metadata = fs::metadata(path).await.map_err(|e| not_found(e, path))?;
    if metadata.len() > MAX_SUITE_FILE_SIZE {
        return Err(SuiteLoadError::FileTooLarge {
            size: metadata.len(),
            max: MAX_SUITE_FILE_SIZE,
        });
    }

    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| not_found(e, path))?;
    format.parse(&contents)
}

/// Reads a suite file, lets `configure` adjust its configuration, and runs
/// startup validation on the result.
///
/// # Errors
///
/// Returns any [`read_suite`] error, or `SuiteLoadError::Validation` when the
/// adjusted suite is not runnable.
pub async fn load_suite<F>(path: &Path, configure: F) -> Result<TestSuite, SuiteLoadError>
where
    F: FnOnce(&mut HarnessConfig),
{
    let mut suite = read_suite(path).await?;
    configure(&mut suite.config);
    suite.validate()?;

    tracing::debug!(
        path = %path.display(),
        suite = %suite.name,
        cases = suite.len(),
        "loaded suite file"
    );
    Ok(suite)
}

fn not_found(error: io::Error, path: &Path) -> SuiteLoadError {
    if error.kind() == io::ErrorKind::NotFound {
        SuiteLoadError::NotFound(path.to_path_buf())
    } else {
        SuiteLoadError::Io(error)
    }
}
