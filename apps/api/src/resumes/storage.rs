//! Raw upload storage on the local filesystem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use uuid::Uuid;

/// Creates the upload directory (and parents) if it does not exist.
pub async fn prepare_upload_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;
    info!("Upload directory ready at {}", dir.display());
    Ok(())
}

/// Case-insensitive `.pdf` suffix check on the client-supplied name.
pub fn is_pdf_filename(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".pdf")
}

/// Writes the upload as `{8 hex chars}_{basename}` and returns the path.
/// The random prefix keeps concurrent uploads of the same name apart.
pub async fn save_upload(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dest = dir.join(stored_name(file_name));
    tokio::fs::write(&dest, bytes)
        .await
        .with_context(|| format!("Failed to write upload to {}", dest.display()))?;
    debug!("Stored {} bytes at {}", bytes.len(), dest.display());
    Ok(dest)
}

fn stored_name(file_name: &str) -> String {
    // Only the last path component of the client name is trusted.
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.pdf");
    let prefix = Uuid::new_v4().simple().to_string();
    format!("{}_{base}", &prefix[..8])
}
