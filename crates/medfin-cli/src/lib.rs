use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use medfin_core::models::SelectedFile;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Content type from the file extension. The accepted set is small enough
/// that a lookup table beats pulling in a mime database.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Read a file from disk into the in-memory form the wizard works with.
pub async fn load_selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("File has no usable name")?
        .to_string();
    Ok(SelectedFile::new(
        file_name,
        content_type_for(path),
        Bytes::from(data),
    ))
}

/// Mask a CNIC for display, keeping the last four digits.
pub fn mask_cnic(cnic: &str) -> String {
    // Counted in chars, not bytes: extraction output may carry the CNIC in
    // Urdu digits.
    let chars: Vec<char> = cnic.chars().collect();
    if chars.len() <= 4 {
        return cnic.to_string();
    }
    let split = chars.len() - 4;
    let mut masked = "*".repeat(split);
    masked.extend(&chars[split..]);
    masked
}

/// Parse a `key=value` CLI argument.
pub fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for(Path::new("cnic.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("scan.png")), "image/png");
        assert_eq!(content_type_for(Path::new("statement.pdf")), "application/pdf");
        assert_eq!(
            content_type_for(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[test]
    fn mask_cnic_keeps_last_four() {
        assert_eq!(mask_cnic("3520212345671"), "*********5671");
        assert_eq!(mask_cnic("123"), "123");
    }

    #[test]
    fn mask_cnic_handles_urdu_digits() {
        assert_eq!(mask_cnic("۳۵۲۰۲۱۲۳۴۵۶۷۱"), "*********۵۶۷۱");
        assert_eq!(mask_cnic("۱۲۳"), "۱۲۳");
    }

    #[test]
    fn parse_key_val_accepts_pairs() {
        assert_eq!(
            parse_key_val("city=Lahore"),
            Ok(("city".to_string(), "Lahore".to_string()))
        );
        assert!(parse_key_val("city").is_err());
        assert!(parse_key_val("=Lahore").is_err());
    }

    #[tokio::test]
    async fn load_selected_file_reads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anwar ali cnic.jpg");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0u8; 2048]).unwrap();

        let file = load_selected_file(&path).await.unwrap();
        assert_eq!(file.file_name, "anwar ali cnic.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.size(), 2048);
    }
}
