//! Tool card: every field of one tool.

use super::{icon_glyph, percent};
use catalogue_async::types::Tool;
use catalogue_core::link::{IconKind, classify_icon, sso_link};
use colored::Colorize;
use secrecy::SecretString;
use std::fmt::Write;

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<13} {value}", format!("{label}:").dimmed());
}

/// Render one tool in full.
pub fn render(tool: &Tool, token: Option<&SecretString>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        icon_glyph(tool.icon.as_deref()),
        tool.name.bold()
    );
    if !tool.description.is_empty() {
        let _ = writeln!(out, "{}", tool.description);
    }
    let _ = writeln!(out);

    field(&mut out, "ID", &tool.id);
    field(&mut out, "Link", &sso_link(&tool.tool_link, token));
    if let Some(doc) = &tool.documentation_link {
        field(&mut out, "Docs", doc);
    }
    if let IconKind::Image(src) = classify_icon(tool.icon.as_deref()) {
        field(&mut out, "Icon", src);
    }
    if !tool.tags.is_empty() {
        field(&mut out, "Tags", &tool.tags.join(", "));
    }
    if let Some(keywords) = tool.keywords.as_deref().filter(|k| !k.is_empty()) {
        field(&mut out, "Keywords", keywords);
    }
    if let Some(created) = tool.created_at {
        field(&mut out, "Created", &created.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    if let Some(updated) = tool.updated_at {
        field(&mut out, "Updated", &updated.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    if let Some(doc) = &tool.doc_match {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {} {}",
            "Matched documentation".magenta(),
            format!("({}%)", percent(doc.relevance_score)).dimmed()
        );
        let _ = writeln!(out, "  {}", doc.content_snippet.italic());
        let _ = writeln!(out, "  {}", doc.doc_url.underline());
    }
    out
}
