//! How a tool's icon and links are presented.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Icon shown when a tool has none.
pub const DEFAULT_ICON: &str = "🔧";

/// Query parameter carrying the bearer token to SSO-aware tools.
pub const SSO_TOKEN_PARAM: &str = "ag-token";

/// What a tool's `icon` field should render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind<'a> {
    /// No icon: show [`DEFAULT_ICON`]
    Default,
    /// Emoji or short text label
    Glyph(&'a str),
    /// Absolute or site-relative image URL
    Image(&'a str),
}

/// Classify an icon value.
pub fn classify_icon(icon: Option<&str>) -> IconKind<'_> {
    let Some(icon) = icon.map(str::trim).filter(|i| !i.is_empty()) else {
        return IconKind::Default;
    };
    if icon.chars().count() <= 2 {
        IconKind::Glyph(icon)
    } else if icon.starts_with("http") || icon.starts_with('/') {
        IconKind::Image(icon)
    } else {
        IconKind::Glyph(icon)
    }
}

/// The tool link with `ag-token=<token>` set, for single sign-on.
///
/// Links that do not parse as absolute URLs are returned unchanged, as is
/// every link when there is no token.
pub fn sso_link(link: &str, token: Option<&SecretString>) -> String {
    let Some(token) = token else {
        return link.to_string();
    };
    let Ok(mut url) = Url::parse(link) else {
        return link.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != SSO_TOKEN_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept);
        pairs.append_pair(SSO_TOKEN_PARAM, token.expose_secret());
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn icon_classification() {
        assert_eq!(classify_icon(None), IconKind::Default);
        assert_eq!(classify_icon(Some("  ")), IconKind::Default);
        assert_eq!(classify_icon(Some("📈")), IconKind::Glyph("📈"));
        assert_eq!(classify_icon(Some("DB")), IconKind::Glyph("DB"));
        assert_eq!(
            classify_icon(Some("https://cdn/x.png")),
            IconKind::Image("https://cdn/x.png")
        );
        assert_eq!(classify_icon(Some("/static/x.svg")), IconKind::Image("/static/x.svg"));
        assert_eq!(classify_icon(Some("wrench")), IconKind::Glyph("wrench"));
    }

    #[test]
    fn sso_link_appends_token() {
        assert_eq!(
            sso_link("https://tool.internal/app?x=1", Some(&token("t0k"))),
            "https://tool.internal/app?x=1&ag-token=t0k"
        );
    }

    #[test]
    fn sso_link_replaces_existing_token() {
        assert_eq!(
            sso_link("https://tool.internal/?ag-token=old&y=2", Some(&token("new"))),
            "https://tool.internal/?y=2&ag-token=new"
        );
    }

    #[test]
    fn sso_link_leaves_unparseable_or_tokenless_links() {
        assert_eq!(sso_link("tool.internal/app", Some(&token("t"))), "tool.internal/app");
        assert_eq!(sso_link("https://tool.internal/", None), "https://tool.internal/");
    }
}
