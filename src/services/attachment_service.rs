use bytes::Bytes;
use serde::Serialize;
use std::path::Path;

use crate::models::application::Attachment;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcceptedType {
    pub extension: &'static str,
    pub mime: &'static str,
}

const PDF: AcceptedType = AcceptedType {
    extension: "pdf",
    mime: "application/pdf",
};
const DOC: AcceptedType = AcceptedType {
    extension: "doc",
    mime: "application/msword",
};
const DOCX: AcceptedType = AcceptedType {
    extension: "docx",
    mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
};

const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentRejection {
    #[error("The uploaded file is empty")]
    Empty,
    #[error("File is larger than {}", size_label(.limit))]
    TooLarge { size: usize, limit: usize },
    #[error("File type .{extension} is not allowed")]
    UnsupportedType { extension: String },
    #[error("Invalid {} file content", upper(.extension))]
    ContentMismatch { extension: String },
}

/// Upload rules for the single resume slot: document types and a size ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicy {
    accepted: Vec<AcceptedType>,
    max_bytes: usize,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            accepted: vec![PDF, DOC, DOCX],
            max_bytes: MAX_RESUME_BYTES,
        }
    }
}

impl AttachmentPolicy {
    pub fn new(accepted: Vec<AcceptedType>, max_bytes: usize) -> Self {
        Self { accepted, max_bytes }
    }

    pub fn accepted(&self) -> &[AcceptedType] {
        &self.accepted
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn accept(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<Attachment, AttachmentRejection> {
        if data.is_empty() {
            return Err(AttachmentRejection::Empty);
        }
        if data.len() > self.max_bytes {
            return Err(AttachmentRejection::TooLarge {
                size: data.len(),
                limit: self.max_bytes,
            });
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let accepted = self
            .accepted
            .iter()
            .find(|t| t.extension == extension)
            .ok_or_else(|| AttachmentRejection::UnsupportedType {
                extension: extension.clone(),
            })?;

        if !signature_matches(accepted, &data) {
            return Err(AttachmentRejection::ContentMismatch { extension });
        }

        // Browsers often send application/octet-stream for Word files.
        let content_type = match content_type {
            Some(declared) if declared == accepted.mime => declared.to_string(),
            _ => accepted.mime.to_string(),
        };

        Ok(Attachment {
            file_name: file_name.to_string(),
            content_type,
            data,
        })
    }
}

fn size_label(bytes: &usize) -> String {
    format_file_size(*bytes as u64)
}

fn upper(extension: &str) -> String {
    extension.to_uppercase()
}

fn signature_matches(accepted: &AcceptedType, data: &[u8]) -> bool {
    match accepted.extension {
        "pdf" => data.starts_with(b"%PDF"),
        "doc" => data.starts_with(&OLE_SIGNATURE),
        "docx" => data.starts_with(&ZIP_SIGNATURE),
        _ => true,
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_bytes(len: usize) -> Bytes {
        let mut data = b"%PDF-1.7\n".to_vec();
        data.resize(len.max(data.len()), b'0');
        Bytes::from(data)
    }

    #[test]
    fn accepts_pdf_within_limit() {
        let policy = AttachmentPolicy::default();
        let attachment = policy
            .accept("Resume.PDF", Some("application/pdf"), pdf_bytes(2048))
            .unwrap();
        assert_eq!(attachment.content_type, "application/pdf");
        assert_eq!(attachment.size(), 2048);
    }

    #[test]
    fn accepts_exactly_five_mebibytes() {
        let policy = AttachmentPolicy::default();
        assert!(policy.accept("cv.pdf", None, pdf_bytes(MAX_RESUME_BYTES)).is_ok());
    }

    #[test]
    fn rejects_oversized_file() {
        let policy = AttachmentPolicy::default();
        let err = policy
            .accept("cv.pdf", None, pdf_bytes(MAX_RESUME_BYTES + 1))
            .unwrap_err();
        assert_eq!(
            err,
            AttachmentRejection::TooLarge {
                size: MAX_RESUME_BYTES + 1,
                limit: MAX_RESUME_BYTES
            }
        );
        assert_eq!(err.to_string(), "File is larger than 5 MB");
    }

    #[test]
    fn rejects_unsupported_extension() {
        let policy = AttachmentPolicy::default();
        let err = policy
            .accept("photo.png", Some("image/png"), Bytes::from_static(b"\x89PNG"))
            .unwrap_err();
        assert_eq!(err.to_string(), "File type .png is not allowed");

        let err = policy
            .accept("resume", None, Bytes::from_static(b"%PDF"))
            .unwrap_err();
        assert!(matches!(err, AttachmentRejection::UnsupportedType { .. }));
    }

    #[test]
    fn rejects_mismatched_content() {
        let policy = AttachmentPolicy::default();
        let err = policy
            .accept("cv.pdf", None, Bytes::from_static(b"plain text"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid PDF file content");
    }

    #[test]
    fn word_documents_get_canonical_mime() {
        let policy = AttachmentPolicy::default();
        let mut docx = ZIP_SIGNATURE.to_vec();
        docx.extend_from_slice(b"rest");
        let attachment = policy
            .accept("cv.docx", Some("application/octet-stream"), Bytes::from(docx))
            .unwrap();
        assert_eq!(attachment.content_type, DOCX.mime);

        let mut doc = OLE_SIGNATURE.to_vec();
        doc.push(0);
        assert!(policy.accept("cv.doc", None, Bytes::from(doc)).is_ok());
    }

    #[test]
    fn rejects_empty_upload() {
        let policy = AttachmentPolicy::default();
        assert_eq!(
            policy.accept("cv.pdf", None, Bytes::new()).unwrap_err(),
            AttachmentRejection::Empty
        );
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
