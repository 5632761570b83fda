use crate::{InferenceError, InferenceResult};

/// An uploaded chest X-ray that has passed media-type checks.
///
/// Detection sniffs the content with `infer`; the file extension is not trusted.
#[derive(Clone, Debug)]
pub struct XrayImage {
    file_name: String,
    media_type: &'static str,
    bytes: Vec<u8>,
}

impl XrayImage {
    /// Accept `bytes` as an X-ray upload if they decode as some `image/*` type.
    ///
    /// A blank `file_name` is replaced with `upload`.
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::EmptyImage` for empty input and
    /// `InferenceError::UnsupportedMediaType` when the content is not a recognised image.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> InferenceResult<Self> {
        if bytes.is_empty() {
            return Err(InferenceError::EmptyImage);
        }

        let media_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        if !media_type.starts_with("image/") {
            tracing::warn!(media_type, "rejected non-image upload");
            return Err(InferenceError::UnsupportedMediaType(media_type.to_owned()));
        }

        let file_name = file_name.into();
        let file_name = if file_name.trim().is_empty() {
            "upload".to_owned()
        } else {
            file_name.trim().to_owned()
        };

        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const PNG_HEADER: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

    pub(crate) fn sample_png() -> XrayImage {
        XrayImage::from_bytes("chest.png", PNG_HEADER.to_vec()).expect("png accepted")
    }

    #[test]
    fn accepts_png_and_jpeg() {
        let png = sample_png();
        assert_eq!(png.media_type(), "image/png");
        assert_eq!(png.file_name(), "chest.png");
        assert_eq!(png.size_bytes(), PNG_HEADER.len());

        let jpeg = XrayImage::from_bytes("scan.jpeg", JPEG_HEADER.to_vec()).expect("jpeg");
        assert_eq!(jpeg.media_type(), "image/jpeg");
    }

    #[test]
    fn ignores_misleading_extension() {
        let err = XrayImage::from_bytes("xray.png", b"%PDF-1.7 not an image".to_vec())
            .expect_err("pdf is rejected");
        assert!(matches!(err, InferenceError::UnsupportedMediaType(m) if m == "application/pdf"));
    }

    #[test]
    fn rejects_unrecognised_content() {
        let err = XrayImage::from_bytes("notes.txt", b"hello".to_vec()).expect_err("text");
        assert!(
            matches!(err, InferenceError::UnsupportedMediaType(m) if m == "application/octet-stream")
        );
    }

    #[test]
    fn rejects_empty_upload() {
        let err = XrayImage::from_bytes("empty.png", Vec::new()).expect_err("empty");
        assert!(matches!(err, InferenceError::EmptyImage));
    }

    #[test]
    fn blank_file_name_is_replaced() {
        let image = XrayImage::from_bytes("  ", PNG_HEADER.to_vec()).expect("png");
        assert_eq!(image.file_name(), "upload");
    }
}
