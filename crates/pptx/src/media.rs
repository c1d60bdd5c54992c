//! Image source resolution for export.
//!
//! A slide's image source is either a `data:` URL or a local file path.
//! Remote URLs are rejected: export never touches the network. Failures
//! here are recoverable per slide; the layout falls back to a
//! placeholder box.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use deck_core::{Error, Result};

/// Raster formats accepted for embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Png,
    Jpeg,
    Gif,
}

impl PictureFormat {
    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Gif);
        }
        None
    }

    /// File extension used for the media part.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }

    /// MIME content type for `[Content_Types].xml`.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

/// Image bytes ready for embedding, with their detected format.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub data: Vec<u8>,
    pub format: PictureFormat,
}

/// Resolve an image source to bytes and a recognized format.
pub fn resolve_image(source: &str) -> Result<ResolvedImage> {
    let data = if let Some(rest) = source.strip_prefix("data:") {
        decode_data_url(rest)?
    } else if source.starts_with("http://") || source.starts_with("https://") {
        return Err(Error::Image(format!(
            "remote image sources are not embedded: {source}"
        )));
    } else {
        std::fs::read(source)?
    };

    let format = PictureFormat::from_magic(&data)
        .ok_or_else(|| Error::Image(format!("unrecognized image format: {source}")))?;

    Ok(ResolvedImage { data, format })
}

/// Decode the payload of a `data:` URL (the part after `data:`).
fn decode_data_url(rest: &str) -> Result<Vec<u8>> {
    let Some((meta, payload)) = rest.split_once(',') else {
        return Err(Error::Image("malformed data URL: missing comma".to_string()));
    };
    if !meta.ends_with(";base64") {
        return Err(Error::Image(
            "only base64-encoded data URLs are supported".to_string(),
        ));
    }
    BASE64
        .decode(payload.trim())
        .map_err(|e| Error::Image(format!("invalid base64 image payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest well-formed headers for sniffing.
    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_format_from_magic() {
        assert_eq!(PictureFormat::from_magic(PNG_MAGIC), Some(PictureFormat::Png));
        assert_eq!(PictureFormat::from_magic(JPEG_MAGIC), Some(PictureFormat::Jpeg));
        assert_eq!(PictureFormat::from_magic(b"GIF89a"), Some(PictureFormat::Gif));
        assert_eq!(PictureFormat::from_magic(b"BM"), None);
        assert_eq!(PictureFormat::from_magic(&[]), None);
    }

    #[test]
    fn test_resolve_base64_data_url() {
        let payload = BASE64.encode(PNG_MAGIC);
        let source = format!("data:image/png;base64,{payload}");

        let image = resolve_image(&source).unwrap();
        assert_eq!(image.format, PictureFormat::Png);
        assert_eq!(image.data, PNG_MAGIC);
    }

    #[test]
    fn test_resolve_rejects_remote_urls() {
        assert!(resolve_image("https://example.com/pic.png").is_err());
        assert!(resolve_image("http://example.com/pic.png").is_err());
    }

    #[test]
    fn test_resolve_rejects_unknown_format() {
        let payload = BASE64.encode(b"plain text");
        let source = format!("data:text/plain;base64,{payload}");
        assert!(resolve_image(&source).is_err());
    }

    #[test]
    fn test_resolve_rejects_missing_file() {
        assert!(resolve_image("/no/such/image.png").is_err());
    }

    #[test]
    fn test_resolve_rejects_non_base64_data_url() {
        assert!(resolve_image("data:image/png,rawbytes").is_err());
        assert!(resolve_image("data:image/png;base64").is_err());
    }
}
