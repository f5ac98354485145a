//! Local search and tag filtering over the loaded catalogue.
//!
//! Everything here is pure: the same tools, query and tags always give the
//! same ordered result.

use catalogue_async::types::Tool;
use std::cmp::Reverse;

/// Score for a name equal to the query.
pub const SCORE_EXACT: u32 = 1000;
/// Score for a name starting with the query.
pub const SCORE_NAME_PREFIX: u32 = 900;
/// Score for a name containing the query.
pub const SCORE_NAME_CONTAINS: u32 = 800;
/// Score for a word of the name starting with the query.
pub const SCORE_NAME_WORD: u32 = 700;
/// Score for a tag containing the query.
pub const SCORE_TAG: u32 = 500;
/// Score for a description containing the query.
pub const SCORE_DESCRIPTION: u32 = 300;
/// Score for a word of the description starting with the query.
pub const SCORE_DESCRIPTION_WORD: u32 = 200;

/// Inputs of one local filtering pass.
#[derive(Debug, Clone, Copy)]
pub struct FilterRequest<'a> {
    /// Free-text query; whitespace-only counts as empty
    pub query: &'a str,
    /// Selected tags; empty means no tag filter
    pub tags: &'a [String],
    /// Names pulled to the front when the query is empty
    pub priority_names: &'a [String],
}

/// Lowercased, trimmed query, or `None` when nothing is left.
pub fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|w| !w.is_empty())
}

/// Relevance of `tool` for an already-normalized query; 0 means no match.
///
/// The first matching rule wins.
pub fn score(tool: &Tool, query: &str) -> u32 {
    let name = tool.name.to_lowercase();
    let description = tool.description.to_lowercase();

    if name == query {
        SCORE_EXACT
    } else if name.starts_with(query) {
        SCORE_NAME_PREFIX
    } else if name.contains(query) {
        SCORE_NAME_CONTAINS
    } else if words(&name).any(|w| w.starts_with(query)) {
        SCORE_NAME_WORD
    } else if tool.tags.iter().any(|t| t.to_lowercase().contains(query)) {
        SCORE_TAG
    } else if description.contains(query) {
        SCORE_DESCRIPTION
    } else if words(&description).any(|w| w.starts_with(query)) {
        SCORE_DESCRIPTION_WORD
    } else {
        0
    }
}

/// Tools matching `query`, best first. Ties keep catalogue order.
pub fn rank(tools: &[Tool], query: &str) -> Vec<Tool> {
    let mut scored: Vec<(u32, &Tool)> = tools
        .iter()
        .map(|t| (score(t, query), t))
        .filter(|(s, _)| *s > 0)
        .collect();
    scored.sort_by_key(|(s, _)| Reverse(*s));
    scored.into_iter().map(|(_, t)| t.clone()).collect()
}

/// Keep tools carrying at least one selected tag, preserving order.
pub fn filter_by_tags(tools: Vec<Tool>, selected: &[String]) -> Vec<Tool> {
    if selected.is_empty() {
        return tools;
    }
    tools.into_iter().filter(|t| t.has_any_tag(selected)).collect()
}

/// Move tools whose lowercased name is in `names` to the front, in `names` order.
///
/// Everything else keeps its relative order.
pub fn priority_boost(mut tools: Vec<Tool>, names: &[String]) -> Vec<Tool> {
    let wanted: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    let rank_of = |tool: &Tool| {
        let name = tool.name.to_lowercase();
        wanted.iter().position(|n| *n == name).unwrap_or(wanted.len())
    };
    tools.sort_by_key(rank_of);
    tools
}

/// Full local pass: score and sort, filter by tags, boost when the query is empty.
pub fn apply(tools: &[Tool], req: &FilterRequest<'_>) -> Vec<Tool> {
    match normalize_query(req.query) {
        Some(q) => filter_by_tags(rank(tools, &q), req.tags),
        None => priority_boost(filter_by_tags(tools.to_vec(), req.tags), req.priority_names),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tool(id: &str, name: &str, description: &str, tags: &[&str]) -> Tool {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "description": description,
            "tool_link": format!("https://tools.internal/{id}"),
            "tags": tags,
        }))
        .unwrap()
    }

    fn names(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    fn priority() -> Vec<String> {
        catalogue_config::types::DEFAULT_PRIORITY_NAMES
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn trades_db_scores_by_rule_order() {
        let t = tool("1", "AG Trades DB", "Trade store", &["finance", "db"]);
        assert_eq!(score(&t, "ag trades db"), SCORE_EXACT);
        assert_eq!(score(&t, "ag trades"), SCORE_NAME_PREFIX);
        assert_eq!(score(&t, "trades"), SCORE_NAME_CONTAINS);
        assert_eq!(score(&t, "finance"), SCORE_TAG);
        assert_eq!(score(&t, "zzz"), 0);
        assert_eq!(t.tags, vec!["finance", "db"]);
    }

    #[test]
    fn words_split_on_hyphen_and_underscore() {
        let t = tool("1", "risk_engine-v2", "Computes var-limits daily", &[]);
        assert_eq!(score(&t, "engine"), SCORE_NAME_CONTAINS);
        assert_eq!(score(&t, "limits"), SCORE_DESCRIPTION);
        assert!(words("risk_engine-v2 x").eq(["risk", "engine", "v2", "x"]));
    }

    #[test]
    fn exact_match_ranks_first() {
        let tools = vec![
            tool("1", "Periscope Admin", "", &[]),
            tool("2", "Dash", "periscope dashboards", &[]),
            tool("3", "Periscope", "", &[]),
        ];
        assert_eq!(
            names(&rank(&tools, "periscope")),
            vec!["Periscope", "Periscope Admin", "Dash"]
        );
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let tools = vec![
            tool("1", "Alpha", "uses kafka", &[]),
            tool("2", "Beta", "", &["kafka-ops"]),
            tool("3", "Gamma", "kafka consumer", &[]),
        ];
        assert_eq!(names(&rank(&tools, "kafka")), vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn whitespace_query_is_empty() {
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query("  CMS "), Some("cms".into()));

        let tools = vec![tool("1", "Zed", "", &[]), tool("2", "AG CMS", "", &[])];
        let req = FilterRequest {
            query: "  ",
            tags: &[],
            priority_names: &priority(),
        };
        assert_eq!(names(&apply(&tools, &req)), vec!["AG CMS", "Zed"]);
    }

    #[test]
    fn priority_names_lead_in_fixed_order() {
        let tools = vec![
            tool("1", "Grafana", "", &[]),
            tool("2", "periscope", "", &[]),
            tool("3", "Jira", "", &[]),
            tool("4", "AG CMS", "", &[]),
            tool("5", "AG Trades DB", "", &[]),
        ];
        let boosted = priority_boost(tools, &priority());
        assert_eq!(
            names(&boosted),
            vec!["AG Trades DB", "AG CMS", "periscope", "Grafana", "Jira"]
        );
    }

    #[test]
    fn query_disables_priority_boost() {
        let tools = vec![
            tool("1", "Grafana dashboards", "", &[]),
            tool("2", "Periscope", "dashboards", &[]),
        ];
        let req = FilterRequest {
            query: "dashboards",
            tags: &[],
            priority_names: &priority(),
        };
        assert_eq!(
            names(&apply(&tools, &req)),
            vec!["Grafana dashboards", "Periscope"]
        );
    }

    #[test]
    fn tags_filter_after_ranking() {
        let tools = vec![
            tool("1", "Trade Viewer", "", &["ui"]),
            tool("2", "Trades", "", &["db"]),
            tool("3", "Other", "", &["db"]),
        ];
        let tags = vec!["db".to_string()];
        let req = FilterRequest {
            query: "trade",
            tags: &tags,
            priority_names: &[],
        };
        assert_eq!(names(&apply(&tools, &req)), vec!["Trades"]);
    }

    fn arb_tools() -> impl Strategy<Value = Vec<Tool>> {
        prop::collection::vec(
            (
                "[a-c ]{1,6}",
                "[a-c ]{0,8}",
                prop::collection::vec("[a-c]{1,3}", 0..3),
            ),
            0..12,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, desc, tags))| {
                    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                    tool(&i.to_string(), &name, &desc, &tags)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn tag_filter_is_order_preserving_subset(
            tools in arb_tools(),
            selected in prop::collection::vec("[a-c]{1,3}", 0..3),
        ) {
            let filtered = filter_by_tags(tools.clone(), &selected);
            let mut source = tools.iter();
            for t in &filtered {
                prop_assert!(selected.is_empty() || t.has_any_tag(&selected));
                prop_assert!(source.any(|s| s.id == t.id), "order not preserved");
            }
            let expected = tools.iter().filter(|t| selected.is_empty() || t.has_any_tag(&selected)).count();
            prop_assert_eq!(filtered.len(), expected);
        }

        #[test]
        fn ranked_scores_never_increase(tools in arb_tools(), q in "[a-c]{1,2}") {
            let ranked = rank(&tools, &q);
            let scores: Vec<u32> = ranked.iter().map(|t| score(t, &q)).collect();
            prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
            prop_assert!(scores.iter().all(|s| *s > 0));
        }

        #[test]
        fn boost_is_a_permutation(tools in arb_tools()) {
            let boosted = priority_boost(tools.clone(), &priority());
            let mut a: Vec<_> = tools.iter().map(|t| t.id.clone()).collect();
            let mut b: Vec<_> = boosted.iter().map(|t| t.id.clone()).collect();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }
    }
}
