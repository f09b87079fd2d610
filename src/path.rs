//! FQID path utilities
//!
//! An FQID is a list of nodes joined by [`SEPARATOR`]:
//!
//! ```text
//! geo.netacuity.NA.US.4412
//! └┬┘ └───┬───┘ └┬┘ └┬┘ └┬─┘
//!  node  node  node node node
//! ```
//!
//! Splitting and joining are inverse operations for any path whose nodes do
//! not themselves contain the separator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Character that separates nodes in a machine path
pub const SEPARATOR: char = '.';

/// Joiner between consecutive human-readable names
pub const NAME_SEPARATOR: &str = " · ";

/// Joiner between human-readable names when nodes between them were omitted
pub const NAME_SEPARATOR_SKIP: &str = " ··· ";

/// Pair of joiners used when rendering a list of nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separators {
    /// Placed between adjacent rendered nodes
    pub join: String,
    /// Placed where one or more empty nodes were skipped
    pub skip: String,
}

impl Separators {
    pub fn new(join: impl Into<String>, skip: impl Into<String>) -> Self {
        Self {
            join: join.into(),
            skip: skip.into(),
        }
    }

    /// Joiners for machine paths (`a.b.c`)
    pub fn machine() -> Self {
        let sep = SEPARATOR.to_string();
        Self::new(sep.clone(), sep)
    }

    /// Joiners for human-readable names (`A · B ··· D`)
    pub fn names() -> Self {
        Self::new(NAME_SEPARATOR, NAME_SEPARATOR_SKIP)
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::names()
    }
}

/// Join a list of possibly-missing nodes.
///
/// Missing or empty nodes are not rendered; the next rendered node is
/// preceded by the skip joiner instead. An empty list renders as `""`.
pub fn nodes_to_string<S: AsRef<str>>(nodes: &[Option<S>], separators: &Separators) -> String {
    let mut out = String::new();
    let mut sep: &str = &separators.join;
    let mut first = true;

    for node in nodes {
        let node: Option<&str> = node.as_ref().map(|n| n.as_ref());
        let node = match node {
            Some(n) if !n.is_empty() => n,
            _ => {
                sep = &separators.skip;
                continue;
            }
        };
        if first {
            first = false;
        } else {
            out.push_str(sep);
        }
        out.push_str(node);
        sep = &separators.join;
    }

    out
}

/// An ordered list of FQID nodes, root first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FqidPath {
    nodes: Vec<String>,
}

impl FqidPath {
    /// Split an FQID string into nodes.
    ///
    /// The empty string is the empty path, not a path of one empty node, so
    /// `parse(fqid())` round-trips every path except `[""]`.
    pub fn parse(fqid: &str) -> Self {
        if fqid.is_empty() {
            return Self::default();
        }
        Self {
            nodes: fqid.split(SEPARATOR).map(str::to_string).collect(),
        }
    }

    pub fn from_nodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The joined machine form of this path
    pub fn fqid(&self) -> String {
        self.nodes.join(SEPARATOR.to_string().as_str())
    }

    /// Nodes shared position-by-position with `other`.
    ///
    /// Every position of `self` is compared; positions that differ (or are
    /// beyond the end of `other`) become empty nodes. Returns `None` only for
    /// an empty `self`.
    pub fn common_root(&self, other: &FqidPath) -> Option<FqidPath> {
        if self.is_empty() {
            return None;
        }
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| match other.nodes.get(i) {
                Some(o) if o == node => node.clone(),
                _ => String::new(),
            })
            .collect();
        Some(Self { nodes })
    }

    /// The longest run of trailing nodes shared with `other`
    pub fn common_leaf(&self, other: &FqidPath) -> Option<FqidPath> {
        let mut shared: Vec<String> = self
            .nodes
            .iter()
            .rev()
            .zip(other.nodes.iter().rev())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.clone())
            .collect();
        if shared.is_empty() {
            return None;
        }
        shared.reverse();
        Some(Self { nodes: shared })
    }
}

impl FromStr for FqidPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for FqidPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqid())
    }
}

impl From<Vec<String>> for FqidPath {
    fn from(nodes: Vec<String>) -> Self {
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_separator() {
        let path = FqidPath::parse("geo.netacuity.NA.US");
        assert_eq!(path.nodes(), ["geo", "netacuity", "NA", "US"]);
        assert_eq!(path.fqid(), "geo.netacuity.NA.US");
        assert_eq!(path.to_string(), "geo.netacuity.NA.US");
    }

    #[test]
    fn empty_string_is_empty_path() {
        let path = FqidPath::parse("");
        assert!(path.is_empty());
        assert_eq!(path.fqid(), "");
    }

    #[test]
    fn single_empty_node_does_not_round_trip() {
        let path = FqidPath::from_nodes([""]);
        assert_eq!(path.fqid(), "");
        assert!(FqidPath::parse(&path.fqid()).is_empty());
    }

    #[test]
    fn parse_keeps_empty_inner_nodes() {
        let path = FqidPath::parse("a..c");
        assert_eq!(path.nodes(), ["a", "", "c"]);
        assert_eq!(path.fqid(), "a..c");
    }

    #[test]
    fn nodes_to_string_uses_skip_separator_for_gaps() {
        let nodes = vec![Some("A"), None, Some("C"), Some(""), Some("E")];
        assert_eq!(nodes_to_string(&nodes, &Separators::names()), "A ··· C ··· E");
        assert_eq!(nodes_to_string(&nodes, &Separators::new(" > ", " >> ")), "A >> C >> E");
    }

    #[test]
    fn nodes_to_string_leading_gap_is_not_rendered() {
        let nodes = vec![None, Some("B"), Some("C")];
        assert_eq!(nodes_to_string(&nodes, &Separators::names()), "B · C");
    }

    #[test]
    fn nodes_to_string_empty_list() {
        let nodes: Vec<Option<String>> = vec![];
        assert_eq!(nodes_to_string(&nodes, &Separators::names()), "");
    }

    #[test]
    fn common_root_blanks_mismatches() {
        let a = FqidPath::parse("bgp.prefix-visibility.asn.701.v4");
        let b = FqidPath::parse("bgp.prefix-visibility.asn.3356.v4");
        let root = a.common_root(&b).unwrap();
        assert_eq!(root.nodes(), ["bgp", "prefix-visibility", "asn", "", "v4"]);

        let short = FqidPath::parse("bgp");
        let root = a.common_root(&short).unwrap();
        assert_eq!(root.nodes(), ["bgp", "", "", "", ""]);

        assert!(FqidPath::default().common_root(&a).is_none());
    }

    #[test]
    fn common_leaf_stops_at_first_mismatch() {
        let a = FqidPath::parse("active.ping-slash24.geo.US.up_slash24_cnt");
        let b = FqidPath::parse("bgp.visibility.geo.US.up_slash24_cnt");
        let leaf = a.common_leaf(&b).unwrap();
        assert_eq!(leaf.nodes(), ["geo", "US", "up_slash24_cnt"]);

        let c = FqidPath::parse("x.y");
        assert!(a.common_leaf(&c).is_none());
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        // Non-empty nodes: a single empty node joins to "", which parses
        // back as the empty path.
        fn arb_node() -> impl Strategy<Value = String> {
            "[A-Za-z0-9_%-]{1,10}"
        }

        proptest! {
            #[test]
            fn split_inverts_join(nodes in prop::collection::vec(arb_node(), 0..8)) {
                let path = FqidPath::from_nodes(nodes.clone());
                let reparsed = FqidPath::parse(&path.fqid());
                prop_assert_eq!(reparsed.nodes(), nodes.as_slice());
            }

            #[test]
            fn machine_render_matches_fqid(nodes in prop::collection::vec(arb_node(), 0..8)) {
                let path = FqidPath::from_nodes(nodes.clone());
                let opt: Vec<Option<String>> = nodes.into_iter().map(Some).collect();
                prop_assert_eq!(nodes_to_string(&opt, &Separators::machine()), path.fqid());
            }
        }
    }
}
