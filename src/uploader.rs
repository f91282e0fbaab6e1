//! Drag-and-drop uploader with client-side type and size checks.
//!
//! There is no upload transport: the upload button waits a fixed delay and
//! then reports success.

use crate::config::{
    UploaderIds, ACCEPTED_MIME_TYPES, DRAG_CLASS, LABEL_UPLOAD, LABEL_UPLOADING, MSG_BAD_TYPE,
    MSG_UPLOADED,
};
use crate::dom::{apply_feedback, by_id, clear_feedback, listen, set_class, Listener};
use crate::utils::{format_limit_megabytes, format_megabytes, Feedback};
use crate::MountError;
use gloo_timers::future::TimeoutFuture;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DragEvent, Event, File, HtmlButtonElement, HtmlElement, HtmlInputElement,
};

static ACCEPTED_EXTENSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(pdf|jpg|jpeg|png)$").unwrap());

/// The parts of a selected file the checks look at.
#[derive(Debug, Clone, Copy)]
pub struct FileCandidate<'a> {
    pub name: &'a str,
    pub mime: &'a str,
    pub size: u64,
}

/// Why a selected file was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    UnsupportedType,
    TooLarge { size: u64, limit: u64 },
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::UnsupportedType => write!(f, "{}", MSG_BAD_TYPE),
            UploadRejection::TooLarge { limit, .. } => {
                write!(f, "File too large. Max {}MB.", format_limit_megabytes(*limit))
            }
        }
    }
}

impl std::error::Error for UploadRejection {}

/// Accept PDF, JPEG and PNG (by MIME type or file extension) up to
/// `max_bytes`. The type is checked before the size.
pub fn check_file(file: &FileCandidate<'_>, max_bytes: u64) -> Result<(), UploadRejection> {
    let type_ok =
        ACCEPTED_MIME_TYPES.contains(&file.mime) || ACCEPTED_EXTENSION_REGEX.is_match(file.name);
    if !type_ok {
        return Err(UploadRejection::UnsupportedType);
    }
    if file.size > max_bytes {
        return Err(UploadRejection::TooLarge {
            size: file.size,
            limit: max_bytes,
        });
    }
    Ok(())
}

/// Preview line for an accepted file, e.g. `report.pdf — 1.50 MB`.
pub fn describe_file(name: &str, size: u64) -> String {
    format!("{} — {} MB", name, format_megabytes(size))
}

struct Uploader {
    input: HtmlInputElement,
    upload: HtmlButtonElement,
    preview: HtmlElement,
    feedback: HtmlElement,
    max_bytes: u64,
    delay_ms: u32,
}

impl Uploader {
    /// Run the checks on `file`, updating preview or feedback. Returns whether
    /// the file was accepted.
    fn accept(&self, file: &File) -> bool {
        let name = file.name();
        let mime = file.type_();
        let size = file.size().max(0.0) as u64;
        let candidate = FileCandidate {
            name: &name,
            mime: &mime,
            size,
        };
        match check_file(&candidate, self.max_bytes) {
            Ok(()) => {
                self.preview.set_text_content(Some(&describe_file(&name, size)));
                self.upload.set_disabled(false);
                clear_feedback(&self.feedback);
                debug!("Accepted upload candidate {} ({} bytes)", name, size);
                true
            }
            Err(rejection) => {
                debug!("Rejected upload candidate {}: {:?}", name, rejection);
                apply_feedback(&self.feedback, &Feedback::error(rejection.to_string()));
                false
            }
        }
    }

    fn on_drop(&self, event: &Event) {
        let Some(files) = event
            .dyn_ref::<DragEvent>()
            .and_then(|e| e.data_transfer())
            .and_then(|dt| dt.files())
        else {
            return;
        };
        let Some(file) = files.get(0) else {
            return;
        };
        if self.accept(&file) {
            self.input.set_files(Some(&files));
        }
    }

    fn on_change(&self) {
        let Some(file) = self.input.files().and_then(|list| list.get(0)) else {
            return;
        };
        if !self.accept(&file) {
            self.input.set_value("");
        }
    }

    fn on_upload(self: &Rc<Self>) {
        self.upload.set_disabled(true);
        self.upload.set_text_content(Some(LABEL_UPLOADING));

        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(this.delay_ms).await;
            this.upload.set_text_content(Some(LABEL_UPLOAD));
            this.upload.set_disabled(true);
            this.input.set_value("");
            this.preview.set_text_content(Some(""));
            apply_feedback(&this.feedback, &Feedback::success(MSG_UPLOADED));
            info!("Simulated upload finished");
        });
    }
}

/// Wire the uploader. File input, upload button, preview and feedback must
/// exist; the drop zone and browse button are optional.
pub fn mount_uploader(
    document: &Document,
    ids: &UploaderIds,
    max_bytes: u64,
    delay_ms: u32,
) -> Result<Vec<Listener>, MountError> {
    let (Some(input), Some(upload), Some(preview), Some(feedback)) = (
        by_id::<HtmlInputElement>(document, &ids.file_input),
        by_id::<HtmlButtonElement>(document, &ids.upload),
        by_id::<HtmlElement>(document, &ids.preview),
        by_id::<HtmlElement>(document, &ids.feedback),
    ) else {
        debug!("Uploader markup missing, skipping");
        return Ok(Vec::new());
    };

    let uploader = Rc::new(Uploader {
        input,
        upload,
        preview,
        feedback,
        max_bytes,
        delay_ms,
    });
    let mut listeners = Vec::new();

    if let Some(browse) = by_id::<HtmlElement>(document, &ids.browse) {
        let input = uploader.input.clone();
        listeners.push(listen(&browse, "click", move |_| input.click())?);
    }

    if let Some(zone) = by_id::<HtmlElement>(document, &ids.drop_zone) {
        let over = zone.clone();
        listeners.push(listen(&zone, "dragover", move |event| {
            event.prevent_default();
            set_class(&over, DRAG_CLASS, true);
        })?);

        let left = zone.clone();
        listeners.push(listen(&zone, "dragleave", move |_| {
            set_class(&left, DRAG_CLASS, false);
        })?);

        let dropped = zone.clone();
        let this = uploader.clone();
        listeners.push(listen(&zone, "drop", move |event| {
            event.prevent_default();
            set_class(&dropped, DRAG_CLASS, false);
            this.on_drop(&event);
        })?);
    }

    let this = uploader.clone();
    listeners.push(listen(&uploader.input, "change", move |_| this.on_change())?);

    let this = uploader.clone();
    listeners.push(listen(&uploader.upload, "click", move |_| this.on_upload())?);

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_UPLOAD_BYTES;

    fn candidate<'a>(name: &'a str, mime: &'a str, size: u64) -> FileCandidate<'a> {
        FileCandidate { name, mime, size }
    }

    #[test]
    fn accepts_known_mime_types() {
        for mime in ["application/pdf", "image/jpeg", "image/png"] {
            assert_eq!(check_file(&candidate("upload", mime, 1_000), MAX_UPLOAD_BYTES), Ok(()));
        }
    }

    #[test]
    fn accepts_by_extension_when_mime_is_missing() {
        assert_eq!(check_file(&candidate("scan.PDF", "", 10), MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(check_file(&candidate("photo.JpEg", "", 10), MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(
            check_file(&candidate("logo.png", "application/octet-stream", 10), MAX_UPLOAD_BYTES),
            Ok(())
        );
    }

    #[test]
    fn rejects_other_types() {
        assert_eq!(
            check_file(&candidate("notes.docx", "application/msword", 10), MAX_UPLOAD_BYTES),
            Err(UploadRejection::UnsupportedType)
        );
        assert_eq!(
            check_file(&candidate("pdf.exe", "", 10), MAX_UPLOAD_BYTES),
            Err(UploadRejection::UnsupportedType)
        );
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert_eq!(
            check_file(&candidate("a.pdf", "application/pdf", MAX_UPLOAD_BYTES), MAX_UPLOAD_BYTES),
            Ok(())
        );
        assert_eq!(
            check_file(
                &candidate("a.pdf", "application/pdf", MAX_UPLOAD_BYTES + 1),
                MAX_UPLOAD_BYTES
            ),
            Err(UploadRejection::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES
            })
        );
    }

    #[test]
    fn type_is_checked_before_size() {
        assert_eq!(
            check_file(&candidate("movie.mov", "video/quicktime", u64::MAX), MAX_UPLOAD_BYTES),
            Err(UploadRejection::UnsupportedType)
        );
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            UploadRejection::UnsupportedType.to_string(),
            "Invalid file type. Use PDF, JPG, or PNG."
        );
        assert_eq!(
            UploadRejection::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES
            }
            .to_string(),
            "File too large. Max 10MB."
        );
    }

    #[test]
    fn fractional_limits_are_not_truncated() {
        let rejection = |limit| UploadRejection::TooLarge {
            size: limit + 1,
            limit,
        };
        assert_eq!(
            rejection(5 * 1024 * 1024 + 512 * 1024).to_string(),
            "File too large. Max 5.50MB."
        );
        assert_eq!(rejection(512 * 1024).to_string(), "File too large. Max 0.50MB.");
    }

    #[test]
    fn preview_line() {
        assert_eq!(describe_file("cv.pdf", 1_572_864), "cv.pdf — 1.50 MB");
        assert_eq!(describe_file("tiny.png", 1_024), "tiny.png — 0.00 MB");
    }
}
