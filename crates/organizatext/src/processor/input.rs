use crate::{OrganizatextError, Result};
use std::borrow::Cow;
use std::path::Path;

/// A file submitted for analysis.
///
/// Owns its bytes, so every worker receives its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// File name as shown to the user (no directory components).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            data,
        }
    }

    /// Read a file from disk. IO errors bubble up unchanged.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(display_name(path), data))
    }

    /// Blocking variant of [`InputFile::from_path`].
    pub fn from_path_sync(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Ok(Self::from_bytes(display_name(path), data))
    }

    /// Decode the content as UTF-8.
    ///
    /// Invalid sequences are replaced with U+FFFD unless `strict` is set, in which
    /// case they are a processing error.
    pub fn text(&self, strict: bool) -> Result<Cow<'_, str>> {
        if strict {
            std::str::from_utf8(&self.data).map(Cow::Borrowed).map_err(|e| {
                OrganizatextError::processing_with_source(format!("File '{}' is not valid UTF-8", self.name), e)
            })
        } else {
            Ok(String::from_utf8_lossy(&self.data))
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_bytes_sets_size() {
        let file = InputFile::from_bytes("a.txt", b"hola".to_vec());
        assert_eq!(file.size, 4);
        assert_eq!(file.text(true).unwrap(), "hola");
    }

    #[test]
    fn test_lossy_decoding() {
        let file = InputFile::from_bytes("a.txt", vec![b'a', 0xFF, b'b']);
        assert_eq!(file.text(false).unwrap(), "a\u{FFFD}b");
        assert!(file.text(true).is_err());
    }

    #[tokio::test]
    async fn test_from_path_uses_file_name() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        tmp.write_all("acta de reunión".as_bytes()).unwrap();

        let file = InputFile::from_path(tmp.path()).await.unwrap();
        assert!(file.name.ends_with(".txt"));
        assert!(!file.name.contains('/'));
        assert_eq!(file.size, "acta de reunión".len() as u64);
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let err = InputFile::from_path_sync("/nonexistent/organizatext/nada.txt").unwrap_err();
        assert!(matches!(err, OrganizatextError::Io(_)));
    }
}
