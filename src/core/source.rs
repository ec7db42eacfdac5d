//! Loading documents from disk, with a refusal path for binary files.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use super::document::Document;

/// Errors surfaced when a document cannot be loaded.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} looks like binary data ({mime})", .path.display())]
    Binary { path: PathBuf, mime: String },
}

/// A loaded file plus the metadata the status bar shows.
#[derive(Debug)]
pub struct LoadedFile {
    pub document: Document,
    pub modified: Option<SystemTime>,
}

/// Read `path` into a document. Binary content is refused instead of
/// splattering control bytes over the terminal.
pub fn load_file(path: &Path, tab_width: u16) -> Result<LoadedFile, SourceError> {
    if let Some(mime) = binary_mime(path) {
        return Err(SourceError::Binary {
            path: path.to_path_buf(),
            mime,
        });
    }

    let raw = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Hosts without a shared-mime-info database sniff no type at all;
    // NUL bytes in the head of the file mean binary regardless.
    if raw.iter().take(4096).any(|&b| b == 0) {
        return Err(SourceError::Binary {
            path: path.to_path_buf(),
            mime: "application/octet-stream".into(),
        });
    }

    let text = String::from_utf8_lossy(&raw);
    let document = Document::from_text(&text, tab_width);
    let modified = std::fs::metadata(path).ok().and_then(|m| m.modified().ok());

    Ok(LoadedFile { document, modified })
}

/// Content-based MIME sniff (shared-mime-info magic). Returns the
/// detected type when it is clearly not text, `None` when text or
/// unknown.
fn binary_mime(path: &Path) -> Option<String> {
    let mime = tree_magic_mini::from_filepath(path)?;
    if is_texty(mime) {
        None
    } else {
        Some(mime.to_string())
    }
}

fn is_texty(mime: &str) -> bool {
    mime.starts_with("text/")
        || mime == "inode/x-empty"
        || mime == "application/x-empty"
        || mime == "application/json"
        || mime == "application/xml"
        || mime == "application/javascript"
        || mime == "application/x-shellscript"
        || mime.ends_with("+xml")
        || mime.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("glide-test-{}-{name}", std::process::id()))
    }

    #[test]
    fn loads_plain_text_with_mtime() {
        let path = temp_path("plain.txt");
        std::fs::write(&path, "alpha\nbeta\n").unwrap();
        let loaded = load_file(&path, 4).unwrap();
        assert_eq!(loaded.document.line_count(), 2);
        assert_eq!(loaded.document.line(1), "beta");
        assert!(loaded.modified.is_some());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn refuses_nul_laden_content() {
        let path = temp_path("blob.bin");
        std::fs::write(&path, b"\x00\x01\x02binary").unwrap();
        let err = load_file(&path, 4).unwrap_err();
        assert!(matches!(err, SourceError::Binary { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_file(Path::new("/definitely/not/here.txt"), 4).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
