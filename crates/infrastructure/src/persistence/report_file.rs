//! Writing rendered reports to disk.

use std::io;
use std::path::Path;

use tokio::fs;

/// Writes a rendered report to `path`, creating parent directories first.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written.
pub async fn write_report(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, contents).await?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}
