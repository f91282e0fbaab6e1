//! Page-level configuration: timing constants, limits, user-facing text and
//! the element selectors each feature binds to.

use serde::Deserialize;

// Timing
pub const AUTOPLAY_INTERVAL_MS: u32 = 5_000;
pub const MIN_AUTOPLAY_INTERVAL_MS: u32 = 1_000;
pub const UPLOAD_DELAY_MS: u32 = 1_200;
pub const SUBMIT_TIMEOUT_MS: u32 = 15_000;

// Upload limits
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

// Feedback colors
pub const SUCCESS_COLOR: &str = "#1a7f37";
pub const ERROR_COLOR: &str = "#c02b2b";

// CSS classes toggled by the glue code
pub const MENU_OPEN_CLASS: &str = "open";
pub const INVALID_FIELD_CLASS: &str = "invalid";
pub const FIELD_ERROR_SELECTOR: &str = ".error";
pub const LOADING_CLASS: &str = "loading";
pub const DRAG_CLASS: &str = "drag";

// Messages
pub const MSG_FIX_FIELDS: &str = "Please fix the highlighted fields.";
pub const MSG_SENT: &str = "Message sent successfully. We will reach out shortly.";
pub const MSG_REJECTED: &str = "Could not send message. Please try again later.";
pub const MSG_NETWORK: &str = "Network error. Please try again later.";
pub const MSG_BAD_TYPE: &str = "Invalid file type. Use PDF, JPG, or PNG.";
pub const MSG_UPLOADED: &str = "Upload successful. Thank you!";
pub const LABEL_UPLOADING: &str = "Uploading...";
pub const LABEL_UPLOAD: &str = "Upload";

/// Selectors for the carousel markup. All are CSS selectors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselSelectors {
    pub track: String,
    pub slide: String,
    pub previous: String,
    pub next: String,
    pub viewport: String,
}

impl Default for CarouselSelectors {
    fn default() -> Self {
        Self {
            track: ".carousel-track".into(),
            slide: ".carousel-slide".into(),
            previous: ".carousel-control.prev".into(),
            next: ".carousel-control.next".into(),
            viewport: ".carousel-viewport".into(),
        }
    }
}

/// Element ids for the header/footer glue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationIds {
    pub hamburger: String,
    pub nav: String,
    pub year: String,
}

impl Default for NavigationIds {
    fn default() -> Self {
        Self {
            hamburger: "hamburger".into(),
            nav: "mainNav".into(),
            year: "year".into(),
        }
    }
}

/// Element ids for the contact form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormIds {
    pub form: String,
    pub submit: String,
    pub feedback: String,
    /// Fields that clear their error as soon as they become valid while typing.
    pub live_fields: Vec<String>,
}

impl Default for ContactFormIds {
    fn default() -> Self {
        Self {
            form: "contactForm".into(),
            submit: "submitBtn".into(),
            feedback: "formFeedback".into(),
            live_fields: ["name", "email", "phone", "message"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Element ids for the drag-and-drop uploader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploaderIds {
    pub drop_zone: String,
    pub file_input: String,
    pub browse: String,
    pub upload: String,
    pub preview: String,
    pub feedback: String,
}

impl Default for UploaderIds {
    fn default() -> Self {
        Self {
            drop_zone: "uploader".into(),
            file_input: "fileInput".into(),
            browse: "browseBtn".into(),
            upload: "uploadBtn".into(),
            preview: "filePreview".into(),
            feedback: "uploadFeedback".into(),
        }
    }
}

/// Everything `mount` needs to know about the page.
///
/// Every field falls back to its default, so a JS caller only passes the
/// parts of the markup that differ.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub carousel: CarouselSelectors,
    pub navigation: NavigationIds,
    pub contact_form: ContactFormIds,
    pub uploader: UploaderIds,
    pub autoplay_interval_ms: u32,
    pub upload_delay_ms: u32,
    pub submit_timeout_ms: u32,
    pub max_upload_bytes: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselSelectors::default(),
            navigation: NavigationIds::default(),
            contact_form: ContactFormIds::default(),
            uploader: UploaderIds::default(),
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            upload_delay_ms: UPLOAD_DELAY_MS,
            submit_timeout_ms: SUBMIT_TIMEOUT_MS,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl PageConfig {
    /// Autoplay period actually used, never below [`MIN_AUTOPLAY_INTERVAL_MS`].
    pub fn autoplay_period_ms(&self) -> u32 {
        self.autoplay_interval_ms.max(MIN_AUTOPLAY_INTERVAL_MS)
    }
}
