use crate::config::{ERROR_COLOR, SUCCESS_COLOR};
use once_cell::sync::Lazy;
use regex::Regex;

// Leading number of a CSS length, the way `parseFloat` reads it.
static CSS_LENGTH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap());

/// Color class of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Success => SUCCESS_COLOR,
            Tone::Error => ERROR_COLOR,
        }
    }
}

/// A message shown in one of the feedback areas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub tone: Tone,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

/// Parse the leading number of a computed CSS length such as `"20px"`.
///
/// Keywords like `"normal"` and empty strings count as zero.
pub fn parse_css_px(value: &str) -> f64 {
    CSS_LENGTH_REGEX
        .captures(value)
        .and_then(|c| c[1].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Pick the gap a flex/grid track actually uses: `column-gap` first, then the
/// `gap` shorthand.
pub fn resolve_gap(column_gap: &str, gap: &str) -> f64 {
    if column_gap.trim().is_empty() {
        parse_css_px(gap)
    } else {
        parse_css_px(column_gap)
    }
}

/// Element id referenced by an in-page link (`"#about"` -> `"about"`).
///
/// Returns `None` for anything that is not a non-empty fragment.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Size in MiB with two decimals, e.g. `"1.50"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0 / 1024.0)
}

/// A size limit in MiB: whole numbers print bare (`"10"`), anything else
/// with two decimals (`"5.50"`).
pub fn format_limit_megabytes(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        (bytes / MIB).to_string()
    } else {
        format_megabytes(bytes)
    }
}

/// CSS transform that shifts the track left by `offset_px`.
pub fn translate_x(offset_px: i64) -> String {
    format!("translateX({}px)", -offset_px)
}
