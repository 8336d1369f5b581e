use anyhow::{anyhow, Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Writes `content` into `dir` under `filename`. An existing file is never
/// overwritten; the name gets a ` (1)`, ` (2)`, ... suffix instead.
pub async fn save_pdf(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(candidate_name(filename, attempt));
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        match file {
            Ok(mut file) => {
                file.write_all(content)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                file.flush().await?;
                tracing::info!(path = %path.display(), bytes = content.len(), "Saved PDF");
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()))
            }
        }
    }

    Err(anyhow!(
        "No free file name for {} in {}",
        filename,
        dir.display()
    ))
}

fn candidate_name(filename: &str, attempt: u32) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    match path.extension() {
        Some(ext) => format!("{stem} ({attempt}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({attempt})"),
    }
}
