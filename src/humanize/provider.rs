//! Provider contract for the resolution chain

use std::fmt::Debug;

use crate::error::HumanizeResult;

/// A prefix of a full path together with its terminal node.
///
/// `nodes` always ends with `terminal`; `fqid` is the machine form of
/// `nodes` (`A.B.C`, no trailing separator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialPath<'a> {
    fqid: &'a str,
    nodes: &'a [String],
    terminal: &'a str,
}

impl<'a> PartialPath<'a> {
    pub fn new(fqid: &'a str, nodes: &'a [String]) -> Self {
        let terminal = nodes.last().map(String::as_str).unwrap_or("");
        Self {
            fqid,
            nodes,
            terminal,
        }
    }

    pub fn fqid(&self) -> &'a str {
        self.fqid
    }

    pub fn nodes(&self) -> &'a [String] {
        self.nodes
    }

    pub fn terminal(&self) -> &'a str {
        self.terminal
    }

    /// Nodes before the terminal node, root first
    pub fn ancestors(&self) -> &'a [String] {
        match self.nodes.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

/// Outcome of a single provider attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The provider recognized the node and produced its display name
    Resolved(String),
    /// The provider does not handle this node; try the next one
    Declined,
}

impl Resolution {
    pub fn resolved(name: impl Into<String>) -> Self {
        Resolution::Resolved(name.into())
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            Resolution::Resolved(name) => Some(name),
            Resolution::Declined => None,
        }
    }
}

impl From<Option<String>> for Resolution {
    fn from(name: Option<String>) -> Self {
        name.map_or(Resolution::Declined, Resolution::Resolved)
    }
}

/// A strategy that may resolve a node to a display name.
///
/// Declining is not a failure. Errors are reserved for conditions that must
/// stop the whole request (corrupt metadata, backend failure).
pub trait HumanizeProvider: Send + Sync + Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Try to resolve `partial.terminal()` in the context of `partial`
    fn attempt(&self, partial: &PartialPath<'_>) -> HumanizeResult<Resolution>;
}

/// The last provider in a chain. It cannot decline and cannot fail.
pub trait FallbackProvider: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn resolve(&self, partial: &PartialPath<'_>) -> String;
}
