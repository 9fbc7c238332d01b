//! Helpers for document and image URLs served by the file-hosting provider.
//!
//! The provider encodes delivery type in the path (`/image/upload/` for
//! images, `/raw/upload/` for arbitrary files) and accepts transformation
//! flags right after `/upload/`. The `fl_attachment` flag forces a download
//! instead of inline display.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Delivery flag that makes the provider send `Content-Disposition: attachment`.
pub const ATTACHMENT_FLAG: &str = "fl_attachment";

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|gif|webp|bmp|svg|avif|heic)$").expect("valid image regex")
});

static PDF_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pdf$").expect("valid pdf regex"));

/// Strip any query string or fragment so extension checks see the path.
fn url_path(url: &str) -> &str {
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    &url[..end]
}

fn is_http_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Whether `url` points at a PDF document.
///
/// Raw uploads count as PDFs only when the last path segment has no
/// extension; any other explicit extension (`.zip`, `.docx`) is rejected.
pub fn is_pdf_url(url: &str) -> bool {
    let path = url_path(url);
    if PDF_EXTENSION.is_match(path) {
        return true;
    }
    let last_segment = path.rsplit('/').next().unwrap_or_default();
    path.contains("/raw/upload/") && !last_segment.contains('.')
}

/// Whether `url` points at an image.
pub fn is_image_url(url: &str) -> bool {
    let path = url_path(url);
    if PDF_EXTENSION.is_match(path) {
        return false;
    }
    IMAGE_EXTENSION.is_match(path) || path.contains("/image/upload/")
}

/// Rewrite `url` so the provider serves it as a download.
///
/// URLs without an `/upload/` segment, or already carrying the flag, are
/// returned unchanged.
pub fn to_attachment_url(url: &str) -> String {
    if has_attachment_flag(url) {
        return url.to_string();
    }
    match url.find("/upload/") {
        Some(idx) => {
            let split = idx + "/upload/".len();
            format!("{}{ATTACHMENT_FLAG}/{}", &url[..split], &url[split..])
        }
        None => url.to_string(),
    }
}

/// Rewrite `url` so the provider serves it inline (removes the attachment flag).
pub fn to_inline_url(url: &str) -> String {
    url.replacen(&format!("/{ATTACHMENT_FLAG}/"), "/", 1)
        .replacen(&format!("/{ATTACHMENT_FLAG},"), "/", 1)
}

pub fn has_attachment_flag(url: &str) -> bool {
    url.contains(&format!("/{ATTACHMENT_FLAG}/")) || url.contains(&format!("/{ATTACHMENT_FLAG},"))
}

/// Validate a fee document URL: an absolute http(s) URL to a PDF or image.
pub fn validate_document_url(url: &str) -> Result<(), CoreError> {
    if !is_http_url(url) {
        return Err(CoreError::Validation(
            "Document URL must be an absolute http(s) URL".into(),
        ));
    }
    if !is_pdf_url(url) && !is_image_url(url) {
        return Err(CoreError::Validation(
            "Document must be a PDF or an image".into(),
        ));
    }
    Ok(())
}

/// Validate a complaint image URL.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if !is_http_url(url) || !is_image_url(url) {
        return Err(CoreError::Validation(
            "Image URL must be an absolute http(s) URL to an image".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMG: &str = "https://res.cloudinary.com/demo/image/upload/v1712/room.jpg";
    const RAW_PDF: &str = "https://res.cloudinary.com/demo/raw/upload/v1712/receipt.pdf";

    #[test]
    fn pdf_detection() {
        assert!(is_pdf_url(RAW_PDF));
        assert!(is_pdf_url("https://cdn.example.com/fees/Receipt.PDF?sig=abc"));
        assert!(is_pdf_url("https://res.cloudinary.com/demo/raw/upload/v1/doc"));
        assert!(!is_pdf_url(IMG));
    }

    #[test]
    fn raw_upload_with_other_extension_is_not_pdf() {
        for url in [
            "https://res.cloudinary.com/demo/raw/upload/v1/payload.zip",
            "https://res.cloudinary.com/demo/raw/upload/v1/setup.exe",
            "https://res.cloudinary.com/demo/raw/upload/v1/letter.docx?dl=1",
            "https://res.cloudinary.com/demo/raw/upload/v1/scan.png",
        ] {
            assert!(!is_pdf_url(url), "{url}");
        }
        assert!(validate_document_url("https://res.cloudinary.com/demo/raw/upload/v1/x.zip").is_err());
        assert!(validate_document_url("https://res.cloudinary.com/demo/raw/upload/v1/x.docx").is_err());
        assert!(validate_document_url("https://res.cloudinary.com/demo/raw/upload/v1/receipt").is_ok());
    }

    #[test]
    fn image_detection() {
        assert!(is_image_url(IMG));
        assert!(is_image_url("https://cdn.example.com/a/b.webp#frag"));
        assert!(is_image_url("https://res.cloudinary.com/demo/image/upload/v1/noext"));
        assert!(!is_image_url(RAW_PDF));
        // A PDF delivered through the image pipeline is still a PDF.
        assert!(!is_image_url(
            "https://res.cloudinary.com/demo/image/upload/v1/receipt.pdf"
        ));
    }

    #[test]
    fn attachment_flag_round_trip() {
        let attached = to_attachment_url(IMG);
        assert_eq!(
            attached,
            "https://res.cloudinary.com/demo/image/upload/fl_attachment/v1712/room.jpg"
        );
        assert!(has_attachment_flag(&attached));
        assert_eq!(to_attachment_url(&attached), attached);
        assert_eq!(to_inline_url(&attached), IMG);
    }

    #[test]
    fn attachment_ignores_foreign_urls() {
        let url = "https://example.com/file.pdf";
        assert_eq!(to_attachment_url(url), url);
        assert_eq!(to_inline_url(url), url);
    }

    #[test]
    fn inline_strips_combined_flags() {
        let url = "https://res.cloudinary.com/demo/raw/upload/fl_attachment,q_auto/v1/x.pdf";
        assert_eq!(
            to_inline_url(url),
            "https://res.cloudinary.com/demo/raw/upload/q_auto/v1/x.pdf"
        );
    }

    #[test]
    fn document_validation() {
        assert!(validate_document_url(RAW_PDF).is_ok());
        assert!(validate_document_url(IMG).is_ok());
        assert!(validate_document_url("ftp://example.com/a.pdf").is_err());
        assert!(validate_document_url("https://example.com/a.docx").is_err());
    }

    #[test]
    fn image_validation() {
        assert!(validate_image_url(IMG).is_ok());
        assert!(validate_image_url(RAW_PDF).is_err());
        assert!(validate_image_url("room.jpg").is_err());
    }
}
