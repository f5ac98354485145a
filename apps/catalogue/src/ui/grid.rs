//! Catalogue grid: one compact entry per tool.

use super::{icon_glyph, percent, truncate};
use catalogue_async::types::Tool;
use catalogue_core::link::sso_link;
use colored::Colorize;
use secrecy::SecretString;
use std::fmt::Write;

const DESCRIPTION_WIDTH: usize = 100;
const SNIPPET_WIDTH: usize = 140;

/// How the grid was produced
#[derive(Debug, Clone, Copy, Default)]
pub struct GridHeader<'a> {
    /// Search text, if any
    pub query: Option<&'a str>,
    /// Selected tags
    pub tags: &'a [String],
    /// The view came from hybrid search
    pub hybrid: bool,
}

/// Render a list of tools.
pub fn render(tools: &[Tool], header: &GridHeader<'_>, token: Option<&SecretString>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary(tools.len(), header).bold());

    if tools.is_empty() {
        let _ = writeln!(out, "{}", "No tools found".dimmed());
        return out;
    }

    for tool in tools {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}  {}",
            icon_glyph(tool.icon.as_deref()),
            tool.name.bold(),
            format!("[{}]", tool.id).dimmed()
        );
        if !tool.description.is_empty() {
            let _ = writeln!(out, "   {}", truncate(&tool.description, DESCRIPTION_WIDTH));
        }
        if !tool.tags.is_empty() {
            let tags: Vec<String> = tool.tags.iter().map(|t| format!("#{t}")).collect();
            let _ = writeln!(out, "   {}", tags.join(" ").cyan());
        }
        let _ = writeln!(out, "   {}", sso_link(&tool.tool_link, token).underline());
        if let Some(doc) = &tool.doc_match {
            let _ = writeln!(
                out,
                "   {} {} {}",
                "docs".magenta(),
                format!("({}%)", percent(doc.relevance_score)).dimmed(),
                truncate(&doc.content_snippet, SNIPPET_WIDTH).italic()
            );
            let _ = writeln!(out, "        {}", doc.doc_url.dimmed());
        }
    }
    out
}

fn summary(count: usize, header: &GridHeader<'_>) -> String {
    let noun = if count == 1 { "tool" } else { "tools" };
    let mut line = format!("{count} {noun}");
    if let Some(q) = header.query.map(str::trim).filter(|q| !q.is_empty()) {
        let _ = write!(line, " matching \"{q}\"");
    }
    if !header.tags.is_empty() {
        let _ = write!(line, " tagged {}", header.tags.join(", "));
    }
    if header.hybrid {
        line.push_str(" (metadata + documents)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_async::types::DocMatch;

    fn tool(id: &str, name: &str) -> Tool {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "description": "Dashboards for everything",
            "tool_link": "https://grafana.internal/",
            "tags": ["ops", "metrics"],
        }))
        .unwrap()
    }

    #[test]
    fn renders_entries_with_sso_links() {
        colored::control::set_override(false);
        let token = SecretString::from("t0k".to_string());
        let out = render(&[tool("1", "Grafana")], &GridHeader::default(), Some(&token));

        assert!(out.starts_with("1 tool\n"));
        assert!(out.contains("🔧 Grafana  [1]"));
        assert!(out.contains("#ops #metrics"));
        assert!(out.contains("https://grafana.internal/?ag-token=t0k"));
    }

    #[test]
    fn hybrid_entries_show_doc_match() {
        colored::control::set_override(false);
        let mut t = tool("1", "Grafana");
        t.doc_match = Some(DocMatch {
            content_snippet: "Alert rules live in folders".into(),
            relevance_score: 0.91,
            doc_url: "https://wiki/grafana".into(),
        });
        let tags = vec!["ops".to_string()];
        let header = GridHeader {
            query: Some("alerts"),
            tags: &tags,
            hybrid: true,
        };
        let out = render(&[t], &header, None);

        assert!(out.contains("1 tool matching \"alerts\" tagged ops (metadata + documents)"));
        assert!(out.contains("(91%) Alert rules live in folders"));
        assert!(out.contains("https://wiki/grafana"));
    }

    #[test]
    fn empty_view_is_not_an_error() {
        colored::control::set_override(false);
        let out = render(&[], &GridHeader::default(), None);
        assert!(out.contains("0 tools"));
        assert!(out.contains("No tools found"));
    }
}
