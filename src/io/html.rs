//! Write rendered charts to `<output_dir>/<name>.html`.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const PLOT_FILE_EXTENSION: &str = "html";

/// Page written when no chart content is supplied.
pub const PLACEHOLDER_HTML: &str = "<html>
    <head>
        <title>No Plot Content</title>
    </head>
    <body>
        <h1>This plot file contains no content.</h1>
        <h2>Pass rendered chart HTML as the file content.</h2>
    </body>
</html>";

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Characters (not bytes) written.
    pub chars: usize,
}

/// `<dir>/<file_name>.html`
pub fn plot_file_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{file_name}.{PLOT_FILE_EXTENSION}"))
}

/// Create `dir` if needed and write `content` (or the placeholder page) to
/// `<dir>/<file_name>.html`, replacing any existing file.
pub fn write_plot_html(dir: &Path, file_name: &str, content: Option<&str>) -> Result<WrittenFile, AppError> {
    ensure_dir(dir)?;

    if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
        tracing::error!(file_name, "invalid plot file name");
        return Err(AppError::file_write(format!(
            "Invalid plot file name '{file_name}': expected a bare file name."
        )));
    }

    let path = plot_file_path(dir, file_name);
    let content = content.unwrap_or(PLACEHOLDER_HTML);

    let mut file = File::create(&path).map_err(|e| {
        tracing::error!(path = %path.display(), "failed to create plot file: {e}");
        AppError::file_write(format!("Failed to create plot file '{}': {e}", path.display()))
    })?;
    file.write_all(content.as_bytes()).map_err(|e| {
        tracing::error!(path = %path.display(), "failed to write plot file: {e}");
        AppError::file_write(format!("Failed to write plot file '{}': {e}", path.display()))
    })?;

    let chars = content.chars().count();
    tracing::info!(path = %path.display(), chars, "wrote plot file");
    Ok(WrittenFile { path, chars })
}

/// Create `dir` and its parents; an existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    create_dir_all(dir).map_err(|e| {
        tracing::error!(dir = %dir.display(), "failed to create output directory: {e}");
        AppError::directory_create(format!("Failed to create directory '{}': {e}", dir.display()))
    })
}
