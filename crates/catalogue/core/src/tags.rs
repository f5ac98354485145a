//! Tag vocabulary derived from the loaded tools.

use catalogue_async::types::{TagCount, TagStats, Tool};
use std::collections::{BTreeMap, BTreeSet};

/// Every tag on any tool, merged with `extra` (e.g. the server's list), sorted and unique.
pub fn vocabulary<S: AsRef<str>>(tools: &[Tool], extra: &[S]) -> Vec<String> {
    tools
        .iter()
        .flat_map(|t| t.tags.iter().map(String::as_str))
        .chain(extra.iter().map(|s| s.as_ref()))
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Usage counts computed locally, most used first, ties by name.
pub fn stats(tools: &[Tool]) -> TagStats {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tool in tools {
        // A tool listing a tag twice still counts once
        let unique: BTreeSet<&str> = tool.tags.iter().map(String::as_str).collect();
        for tag in unique {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    TagStats {
        total_tags: tags.len(),
        tags,
    }
}
