//! Terminal renderings of the catalogue views.

pub mod card;
pub mod grid;
pub mod login;
pub mod table;

use catalogue_core::link::{DEFAULT_ICON, IconKind, classify_icon};

/// Glyph shown in front of a tool name. Image icons fall back to the default.
pub fn icon_glyph(icon: Option<&str>) -> &str {
    match classify_icon(icon) {
        IconKind::Glyph(g) => g,
        IconKind::Default | IconKind::Image(_) => DEFAULT_ICON,
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Relevance in `[0, 1]` as a whole percentage
pub fn percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}
