//! Module: versions
//! Responsibility: distinct `MAJOR.MINOR` versions observed across a node listing.

use crate::record::{Record, get_path_str};
use std::{cmp::Reverse, collections::BTreeSet};

/// Node field holding the agent version string.
pub const NODE_VERSION_PATH: &str = "Meta.consul-version";

/// Distinct `MAJOR.MINOR` versions, newest first.
///
/// Both components must be numeric; anything else (including missing or
/// empty strings) is skipped. Ordering is numeric, so `1.10` sorts above `1.9`.
#[must_use]
pub fn distinct_versions<'a>(versions: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<Reverse<(u64, u64)>> = versions
        .into_iter()
        .filter_map(major_minor)
        .map(Reverse)
        .collect();

    set.into_iter()
        .map(|Reverse((major, minor))| format!("{major}.{minor}"))
        .collect()
}

/// Distinct versions read from each node's `Meta["consul-version"]`.
#[must_use]
pub fn node_versions(nodes: &[Record]) -> Vec<String> {
    distinct_versions(
        nodes
            .iter()
            .filter_map(|node| get_path_str(node, NODE_VERSION_PATH)),
    )
}

fn major_minor(version: &str) -> Option<(u64, u64)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;

    Some((major, minor))
}

///
/// TESTS
///
