//! Hybrid search: merge metadata matches and document matches into one list.
//!
//! The fused order is fixed by bucket: tools found by both searches, then
//! metadata-only tools, then document-only tools. Buckets are never
//! re-sorted against each other.

use catalogue_async::types::{DocMatch, DocSearchHit, Tool};
use catalogue_config::types::{DocOnlyMode, SearchConfig};
use std::collections::{HashMap, HashSet};

/// How many document-only tools may follow the other two buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocOnlyPolicy {
    /// Append every document-only tool.
    Uncapped,
    /// Append document-only tools until the list holds `n` tools in total.
    /// When the first two buckets already reach `n`, none are appended.
    CappedTotal(usize),
}

impl Default for DocOnlyPolicy {
    fn default() -> Self {
        Self::CappedTotal(10)
    }
}

impl From<&SearchConfig> for DocOnlyPolicy {
    fn from(cfg: &SearchConfig) -> Self {
        match cfg.doc_only {
            DocOnlyMode::Capped => Self::CappedTotal(cfg.doc_only_cap),
            DocOnlyMode::Uncapped => Self::Uncapped,
        }
    }
}

impl DocOnlyPolicy {
    /// Room left for document-only tools after `already` fused results.
    pub const fn room(self, already: usize) -> usize {
        match self {
            Self::Uncapped => usize::MAX,
            Self::CappedTotal(n) => n.saturating_sub(already),
        }
    }
}

/// Everything one fusion pass needs.
#[derive(Debug, Clone, Copy)]
pub struct FusionInput<'a> {
    /// Locally loaded catalogue, in catalogue order
    pub catalogue: &'a [Tool],
    /// Metadata search results, best first
    pub metadata: &'a [Tool],
    /// Raw document search hits, possibly several per tool
    pub documents: &'a [DocSearchHit],
    /// Selected tags; empty means no tag filter
    pub tags: &'a [String],
    /// Bound on the document-only bucket
    pub policy: DocOnlyPolicy,
}

/// Best document match per tool id. On equal scores the earlier hit wins.
pub fn best_doc_matches(hits: &[DocSearchHit]) -> HashMap<&str, &DocSearchHit> {
    let mut best: HashMap<&str, &DocSearchHit> = HashMap::new();
    for hit in hits {
        best.entry(hit.tool_id.as_str())
            .and_modify(|cur| {
                if hit.relevance_score > cur.relevance_score {
                    *cur = hit;
                }
            })
            .or_insert(hit);
    }
    best
}

/// Fuse the two result sets.
pub fn fuse(input: &FusionInput<'_>) -> Vec<Tool> {
    let best = best_doc_matches(input.documents);
    let doc_match = |id: &str| -> Option<DocMatch> { best.get(id).map(|h| h.to_doc_match()) };

    let mut seen: HashSet<&str> = HashSet::new();
    let metadata: Vec<&Tool> = input
        .metadata
        .iter()
        .filter(|t| seen.insert(t.id.as_str()))
        .collect();

    let (both, metadata_only): (Vec<&Tool>, Vec<&Tool>) = metadata
        .into_iter()
        .partition(|t| best.contains_key(t.id.as_str()));

    let room = input.policy.room(both.len() + metadata_only.len());
    let document_only = input
        .catalogue
        .iter()
        .filter(|t| best.contains_key(t.id.as_str()) && !seen.contains(t.id.as_str()))
        .take(room);

    let fused = both
        .into_iter()
        .chain(metadata_only)
        .chain(document_only)
        .filter(|t| input.tags.is_empty() || t.has_any_tag(input.tags))
        .map(|t| {
            let mut tool = t.clone();
            tool.doc_match = doc_match(&tool.id);
            tool
        })
        .collect::<Vec<_>>();

    let dropped = best
        .keys()
        .filter(|id| !seen.contains(*id) && !input.catalogue.iter().any(|t| t.id == **id))
        .count();
    if dropped > 0 {
        tracing::debug!(dropped, "document matches for tools missing from the catalogue");
    }

    fused
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tool(id: &str, tags: &[&str]) -> Tool {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Tool {id}"),
            "description": "",
            "tool_link": format!("https://tools.internal/{id}"),
            "tags": tags,
        }))
        .unwrap()
    }

    fn hit(id: &str, score: f64, url: &str) -> DocSearchHit {
        DocSearchHit {
            tool_id: id.into(),
            tool_name: String::new(),
            content_snippet: format!("snippet {url}"),
            doc_url: url.into(),
            doc_type: None,
            relevance_score: score,
        }
    }

    fn ids(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn keeps_highest_relevance_per_tool() {
        let hits = vec![hit("a", 0.2, "u1"), hit("a", 0.9, "u2"), hit("a", 0.9, "u3")];
        let best = best_doc_matches(&hits);
        assert_eq!(best.len(), 1);
        assert_eq!(best["a"].doc_url, "u2");
    }

    #[test]
    fn bucket_order_and_doc_match_attachment() {
        let catalogue = vec![tool("d2", &[]), tool("m1", &[]), tool("b1", &[]), tool("d1", &[])];
        let metadata = vec![tool("m1", &[]), tool("b1", &[])];
        let documents = vec![hit("d1", 0.5, "x"), hit("b1", 0.7, "y"), hit("d2", 0.1, "z")];

        let fused = fuse(&FusionInput {
            catalogue: &catalogue,
            metadata: &metadata,
            documents: &documents,
            tags: &[],
            policy: DocOnlyPolicy::Uncapped,
        });

        // Document-only tools follow catalogue order, not relevance
        assert_eq!(ids(&fused), vec!["b1", "m1", "d2", "d1"]);
        assert_eq!(fused[0].doc_match.as_ref().unwrap().doc_url, "y");
        assert!(fused[1].doc_match.is_none());
        assert!(fused[2].doc_match.is_some());
    }

    #[test]
    fn capped_total_fills_remaining_room() {
        let catalogue: Vec<Tool> = (0..6).map(|i| tool(&format!("d{i}"), &[])).collect();
        let metadata: Vec<Tool> = (0..3).map(|i| tool(&format!("m{i}"), &[])).collect();
        let documents: Vec<DocSearchHit> = (0..6).map(|i| hit(&format!("d{i}"), 0.5, "u")).collect();

        let fused = fuse(&FusionInput {
            catalogue: &catalogue,
            metadata: &metadata,
            documents: &documents,
            tags: &[],
            policy: DocOnlyPolicy::CappedTotal(5),
        });
        assert_eq!(ids(&fused), vec!["m0", "m1", "m2", "d0", "d1"]);
    }

    #[test]
    fn capped_total_saturates_when_metadata_overflows() {
        let catalogue = vec![tool("d0", &[])];
        let metadata: Vec<Tool> = (0..12).map(|i| tool(&format!("m{i}"), &[])).collect();
        let documents = vec![hit("d0", 0.9, "u")];

        let fused = fuse(&FusionInput {
            catalogue: &catalogue,
            metadata: &metadata,
            documents: &documents,
            tags: &[],
            policy: DocOnlyPolicy::default(),
        });
        assert_eq!(fused.len(), 12);
        assert!(fused.iter().all(|t| t.id != "d0"));
    }

    #[test]
    fn unknown_document_tools_are_dropped() {
        let catalogue = vec![tool("a", &[])];
        let documents = vec![hit("ghost", 0.9, "u"), hit("a", 0.3, "v")];

        let fused = fuse(&FusionInput {
            catalogue: &catalogue,
            metadata: &[],
            documents: &documents,
            tags: &[],
            policy: DocOnlyPolicy::Uncapped,
        });
        assert_eq!(ids(&fused), vec!["a"]);
    }

    #[test]
    fn tag_filter_applies_after_fusion() {
        let catalogue = vec![tool("d", &["ops"]), tool("e", &["ui"])];
        let metadata = vec![tool("m", &["ui"]), tool("n", &["ops"])];
        let documents = vec![hit("d", 0.5, "u"), hit("e", 0.5, "u")];
        let tags = vec!["ops".to_string()];

        let fused = fuse(&FusionInput {
            catalogue: &catalogue,
            metadata: &metadata,
            documents: &documents,
            tags: &tags,
            policy: DocOnlyPolicy::Uncapped,
        });
        assert_eq!(ids(&fused), vec!["n", "d"]);
    }

    #[test]
    fn duplicate_metadata_ids_appear_once() {
        let metadata = vec![tool("m", &[]), tool("m", &[])];
        let fused = fuse(&FusionInput {
            catalogue: &[],
            metadata: &metadata,
            documents: &[],
            tags: &[],
            policy: DocOnlyPolicy::Uncapped,
        });
        assert_eq!(ids(&fused), vec!["m"]);
    }

    #[test]
    fn policy_from_config() {
        let mut cfg = SearchConfig::default();
        assert_eq!(DocOnlyPolicy::from(&cfg), DocOnlyPolicy::CappedTotal(10));
        cfg.doc_only = DocOnlyMode::Uncapped;
        assert_eq!(DocOnlyPolicy::from(&cfg), DocOnlyPolicy::Uncapped);
    }

    proptest! {
        #[test]
        fn one_doc_match_per_tool_with_max_relevance(
            raw in prop::collection::vec((0u8..5, 0u32..100), 0..20),
            meta_ids in prop::collection::vec(0u8..5, 0..5),
        ) {
            let catalogue: Vec<Tool> = (0..5).map(|i| tool(&format!("t{i}"), &[])).collect();
            let metadata: Vec<Tool> = meta_ids.iter().map(|i| tool(&format!("t{i}"), &[])).collect();
            let documents: Vec<DocSearchHit> = raw
                .iter()
                .map(|(i, s)| hit(&format!("t{i}"), f64::from(*s) / 100.0, "u"))
                .collect();

            let fused = fuse(&FusionInput {
                catalogue: &catalogue,
                metadata: &metadata,
                documents: &documents,
                tags: &[],
                policy: DocOnlyPolicy::Uncapped,
            });

            let mut seen = HashSet::new();
            for t in &fused {
                prop_assert!(seen.insert(t.id.clone()), "duplicate id {}", t.id);
                let max = documents
                    .iter()
                    .filter(|d| d.tool_id == t.id)
                    .map(|d| d.relevance_score)
                    .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))));
                match (max, &t.doc_match) {
                    (Some(m), Some(dm)) => prop_assert!((dm.relevance_score - m).abs() < f64::EPSILON),
                    (None, None) => {}
                    _ => prop_assert!(false, "doc_match presence mismatch for {}", t.id),
                }
            }

            // Buckets: both < metadata-only < document-only
            let bucket = |t: &Tool| {
                let in_meta = metadata.iter().any(|m| m.id == t.id);
                match (in_meta, t.doc_match.is_some()) {
                    (true, true) => 0,
                    (true, false) => 1,
                    _ => 2,
                }
            };
            let buckets: Vec<u8> = fused.iter().map(bucket).collect();
            prop_assert!(buckets.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
