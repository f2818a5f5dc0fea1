//! Captured photos as `data:` URLs.

use super::error::CameraError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::path::Path;

/// Encoded image bytes produced by a camera or loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl CapturedImage {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Load a jpeg, png or webp photo, picking the MIME type by extension.
    pub fn from_file(path: &Path) -> Result<Self, CameraError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            _ => return Err(CameraError::UnsupportedFormat(path.display().to_string())),
        };

        let bytes = std::fs::read(path).map_err(|source| CameraError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(CameraError::Capture(format!(
                "{} is empty",
                path.display()
            )));
        }

        Ok(Self::new(mime, bytes))
    }

    /// `data:{mime};base64,{payload}`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_data_url() {
        let image = CapturedImage::new("image/jpeg", b"abc".to_vec());
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,YWJj");
    }

    #[test]
    fn test_from_file_picks_mime_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("me.PNG");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let image = CapturedImage::from_file(&path).unwrap();
        assert_eq!(image.mime, "image/png");
        assert!(image.to_data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("me.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        assert!(matches!(
            CapturedImage::from_file(&path),
            Err(CameraError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.jpg");
        assert!(matches!(
            CapturedImage::from_file(&path),
            Err(CameraError::Io { .. })
        ));
    }
}
