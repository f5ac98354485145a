//! Advisory validation for [`CatalogueSettings`].
//!
//! Problems are reported as warnings; the config is still usable.

use crate::types::{CatalogueSettings, DocOnlyMode};

/// An advisory warning about a configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// JSON path to the problematic config field.
    pub path: &'static str,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Collect advisory warnings for `cfg`.
pub fn validate(cfg: &CatalogueSettings) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    validate_url(
        &cfg.api.base_url,
        "api.base_url",
        "api.base_url.invalid",
        &mut warnings,
    );
    if let Some(login) = &cfg.auth.login_url {
        validate_url(login, "auth.login_url", "auth.login_url.invalid", &mut warnings);
    }

    if cfg.api.timeout_secs == 0 {
        warnings.push(AdvisoryWarning {
            code: "api.timeout_secs.zero",
            path: "api.timeout_secs",
            message: "A zero timeout fails every request".into(),
        });
    }

    if cfg.auth.callback_port == 0 {
        warnings.push(AdvisoryWarning {
            code: "auth.callback_port.zero",
            path: "auth.callback_port",
            message: "Port 0 cannot be registered as a redirect URI".into(),
        });
    }

    if cfg.search.limit == 0 {
        warnings.push(AdvisoryWarning {
            code: "search.limit.zero",
            path: "search.limit",
            message: "Remote searches will return nothing".into(),
        });
    }

    if cfg.search.doc_only == DocOnlyMode::Capped
        && cfg.search.doc_only_cap > cfg.search.limit as usize
    {
        warnings.push(AdvisoryWarning {
            code: "search.doc_only_cap.exceeds_limit",
            path: "search.doc_only_cap",
            message: format!(
                "Cap {} is larger than the search limit {}",
                cfg.search.doc_only_cap, cfg.search.limit
            ),
        });
    }

    if cfg.search.priority_names.iter().any(|n| n.trim().is_empty()) {
        warnings.push(AdvisoryWarning {
            code: "search.priority_names.empty",
            path: "search.priority_names",
            message: "Priority names cannot be empty".into(),
        });
    }

    for email in &cfg.admin.emails {
        if !looks_like_email(email) {
            warnings.push(AdvisoryWarning {
                code: "admin.emails.malformed",
                path: "admin.emails",
                message: format!("Not an email address: '{email}'"),
            });
        }
    }

    if !LOG_LEVELS.contains(&cfg.logging.level.to_lowercase().as_str()) {
        warnings.push(AdvisoryWarning {
            code: "logging.level.invalid",
            path: "logging.level",
            message: format!(
                "Unknown log level '{}'. Expected one of: {}",
                cfg.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    warnings
}

fn validate_url(
    raw: &str,
    path: &'static str,
    code: &'static str,
    warnings: &mut Vec<AdvisoryWarning>,
) {
    let ok = url::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false);
    if !ok {
        warnings.push(AdvisoryWarning {
            code,
            path,
            message: format!("Expected an http(s) URL, got: '{raw}'"),
        });
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(cfg: &CatalogueSettings) -> Vec<&'static str> {
        validate(cfg).into_iter().map(|w| w.code).collect()
    }

    #[test]
    fn default_config_has_no_warnings() {
        let warnings = validate(&CatalogueSettings::default());
        assert!(warnings.is_empty(), "unexpected: {warnings:?}");
    }

    #[test]
    fn bad_base_url_warns() {
        let mut cfg = CatalogueSettings::default();
        cfg.api.base_url = "localhost:8889".into();
        assert_eq!(codes(&cfg), vec!["api.base_url.invalid"]);
    }

    #[test]
    fn bad_login_url_warns() {
        let mut cfg = CatalogueSettings::default();
        cfg.auth.login_url = Some("ftp://sso".into());
        assert_eq!(codes(&cfg), vec!["auth.login_url.invalid"]);
    }

    #[test]
    fn zero_limit_and_cap_over_limit_warn() {
        let mut cfg = CatalogueSettings::default();
        cfg.search.limit = 0;
        let found = codes(&cfg);
        assert!(found.contains(&"search.limit.zero"));
        assert!(found.contains(&"search.doc_only_cap.exceeds_limit"));
    }

    #[test]
    fn uncapped_mode_ignores_cap() {
        let mut cfg = CatalogueSettings::default();
        cfg.search.limit = 5;
        cfg.search.doc_only = DocOnlyMode::Uncapped;
        assert!(codes(&cfg).is_empty());
    }

    #[test]
    fn empty_priority_name_warns() {
        let mut cfg = CatalogueSettings::default();
        cfg.search.priority_names.push("  ".into());
        assert_eq!(codes(&cfg), vec!["search.priority_names.empty"]);
    }

    #[test]
    fn malformed_admin_email_warns_once_per_entry() {
        let mut cfg = CatalogueSettings::default();
        cfg.admin.emails = vec!["ok@corp.com".into(), "nope".into(), "a@b@c.com".into()];
        assert_eq!(
            codes(&cfg),
            vec!["admin.emails.malformed", "admin.emails.malformed"]
        );
    }

    #[test]
    fn invalid_log_level_warns() {
        let mut cfg = CatalogueSettings::default();
        cfg.logging.level = "verbose".into();
        assert_eq!(codes(&cfg), vec!["logging.level.invalid"]);
    }

    #[test]
    fn warning_display() {
        let warning = AdvisoryWarning {
            code: "x.code",
            path: "x.path",
            message: "msg".into(),
        };
        assert_eq!(warning.to_string(), "[x.code] x.path: msg");
    }
}
