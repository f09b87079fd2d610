//! Humanizer - walks every prefix of a path through the resolution chain
//!
//! ```text
//! US . CA . 06037
//!
//! prefix "US"          terminal "US"     → United States
//! prefix "US.CA"       terminal "CA"     → California
//! prefix "US.CA.06037" terminal "06037"  → Los Angeles County
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::chain::ResolutionChain;
use super::provider::PartialPath;
use crate::config::HumanizeConfig;
use crate::error::HumanizeResult;
use crate::metadata::{MetadataEntitiesService, MetadataRepository};
use crate::path::{nodes_to_string, FqidPath, Separators, SEPARATOR};

/// Requested output shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One string, names joined by the configured separators
    #[default]
    Joined,
    /// One entry per input node
    PerNode,
}

/// Result of humanizing a path in the requested [`OutputMode`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HumanizedOutput {
    Joined(String),
    Nodes(Vec<Option<String>>),
}

/// Per-node display names, one entry per input node.
///
/// `None` marks an empty input node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HumanizedPath {
    nodes: Vec<Option<String>>,
}

impl HumanizedPath {
    pub fn nodes(&self) -> &[Option<String>] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Option<String>> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn joined(&self, separators: &Separators) -> String {
        nodes_to_string(&self.nodes, separators)
    }

    /// Compact label relative to other paths in the same set.
    ///
    /// `path` is the machine path these names were walked from. Positions
    /// whose node is shared with `root` (see [`FqidPath::common_root`]) are
    /// dropped; only when there is no root to compare against are the
    /// trailing nodes shared with `leaf` dropped instead. Dropped positions
    /// render with the skip separator.
    pub fn label_excluding(
        &self,
        path: &FqidPath,
        root: Option<&FqidPath>,
        leaf: Option<&FqidPath>,
        separators: &Separators,
    ) -> String {
        let mut nodes = self.nodes.clone();

        if let Some(common) = root.and_then(|r| path.common_root(r)) {
            for (node, shared) in nodes.iter_mut().zip(common.nodes()) {
                if !shared.is_empty() {
                    *node = None;
                }
            }
        } else if let Some(common) = leaf.and_then(|l| path.common_leaf(l)) {
            let keep = nodes.len().saturating_sub(common.len());
            for node in &mut nodes[keep..] {
                *node = None;
            }
        }

        nodes_to_string(&nodes, separators)
    }
}

impl From<Vec<Option<String>>> for HumanizedPath {
    fn from(nodes: Vec<Option<String>>) -> Self {
        Self { nodes }
    }
}

/// Applies a [`ResolutionChain`] to every prefix of a path
#[derive(Debug)]
pub struct Humanizer {
    chain: ResolutionChain,
    separators: Separators,
}

impl Humanizer {
    pub fn new(chain: ResolutionChain) -> Self {
        Self {
            chain,
            separators: Separators::default(),
        }
    }

    /// Standard chain and separators from configuration
    pub fn from_config(
        config: &HumanizeConfig,
        repo: Arc<dyn MetadataRepository>,
    ) -> HumanizeResult<Self> {
        config.validate()?;
        let chain = ResolutionChain::standard(config, MetadataEntitiesService::new(repo))?;
        Ok(Self::new(chain).with_separators(config.separators()))
    }

    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    pub fn chain(&self) -> &ResolutionChain {
        &self.chain
    }

    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    /// Resolve every node of `path` in order.
    ///
    /// The chain sees each prefix once, ending at its node. The first error
    /// aborts the walk.
    pub fn walk(&self, path: &FqidPath) -> HumanizeResult<HumanizedPath> {
        let nodes = path.nodes();
        let mut prefix = String::new();
        let mut out = Vec::with_capacity(nodes.len());

        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                prefix.push(SEPARATOR);
            }
            prefix.push_str(node);

            tracing::trace!(prefix = %prefix, "resolving prefix");
            let partial = PartialPath::new(&prefix, &nodes[..=i]);
            out.push(self.chain.resolve(&partial)?);
        }

        Ok(HumanizedPath { nodes: out })
    }

    pub fn humanize(&self, path: &FqidPath, mode: OutputMode) -> HumanizeResult<HumanizedOutput> {
        let humanized = self.walk(path)?;
        Ok(match mode {
            OutputMode::Joined => HumanizedOutput::Joined(humanized.joined(&self.separators)),
            OutputMode::PerNode => HumanizedOutput::Nodes(humanized.into_nodes()),
        })
    }

    /// Humanize `path` as a label relative to `root` or `leaf`
    pub fn label(
        &self,
        path: &FqidPath,
        root: Option<&FqidPath>,
        leaf: Option<&FqidPath>,
    ) -> HumanizeResult<String> {
        let humanized = self.walk(path)?;
        Ok(humanized.label_excluding(path, root, leaf, &self.separators))
    }

    /// Parse `fqid` and humanize it
    pub fn humanize_fqid(&self, fqid: &str, mode: OutputMode) -> HumanizeResult<HumanizedOutput> {
        self.humanize(&FqidPath::parse(fqid), mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HumanizeError;
    use crate::humanize::provider::{HumanizeProvider, Resolution};
    use crate::humanize::providers::{DefaultProvider, DirectProvider};
    use std::sync::Mutex;

    /// Records every (prefix, terminal) pair it is asked about
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl HumanizeProvider for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn attempt(&self, partial: &PartialPath<'_>) -> HumanizeResult<Resolution> {
            self.calls
                .lock()
                .unwrap()
                .push((partial.fqid().to_string(), partial.terminal().to_string()));
            Ok(Resolution::Declined)
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl HumanizeProvider for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn attempt(&self, partial: &PartialPath<'_>) -> HumanizeResult<Resolution> {
            if partial.terminal() == "boom" {
                return Err(crate::error::MetadataError::Backend("down".into()).into());
            }
            Ok(Resolution::Declined)
        }
    }

    fn plain() -> Humanizer {
        Humanizer::new(
            ResolutionChain::builder()
                .provider(DirectProvider::new())
                .terminate(DefaultProvider::default()),
        )
    }

    #[test]
    fn prefixes_accumulate_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let humanizer = Humanizer::new(
            ResolutionChain::builder()
                .provider(Recorder {
                    calls: calls.clone(),
                })
                .terminate(DefaultProvider::default()),
        );

        humanizer.walk(&FqidPath::parse("A.B.C")).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                ("A".to_string(), "A".to_string()),
                ("A.B".to_string(), "B".to_string()),
                ("A.B.C".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn per_node_and_joined_modes() {
        let humanizer = plain();
        let path = FqidPath::parse("bgp.prefix-visibility.unknown");

        assert_eq!(
            humanizer.humanize(&path, OutputMode::PerNode).unwrap(),
            HumanizedOutput::Nodes(vec![
                Some("BGP".to_string()),
                Some("Global Prefix Visibility".to_string()),
                Some("unknown".to_string()),
            ])
        );
        assert_eq!(
            humanizer.humanize(&path, OutputMode::Joined).unwrap(),
            HumanizedOutput::Joined("BGP · Global Prefix Visibility · unknown".to_string())
        );
    }

    #[test]
    fn empty_path() {
        let humanizer = plain();
        assert_eq!(
            humanizer.humanize_fqid("", OutputMode::PerNode).unwrap(),
            HumanizedOutput::Nodes(vec![])
        );
        assert_eq!(
            humanizer.humanize_fqid("", OutputMode::Joined).unwrap(),
            HumanizedOutput::Joined(String::new())
        );
    }

    #[test]
    fn empty_nodes_keep_their_position() {
        let humanizer = plain();
        let walked = humanizer.walk(&FqidPath::parse("bgp..v4")).unwrap();
        assert_eq!(
            walked.nodes(),
            [Some("BGP".to_string()), None, Some("IPv4".to_string())]
        );
        assert_eq!(walked.joined(humanizer.separators()), "BGP ··· IPv4");
    }

    #[test]
    fn custom_separators() {
        let humanizer = plain().with_separators(Separators::new(" > ", " >> "));
        assert_eq!(
            humanizer.humanize_fqid("bgp.v4", OutputMode::Joined).unwrap(),
            HumanizedOutput::Joined("BGP > IPv4".to_string())
        );
    }

    #[test]
    fn provider_error_aborts_walk() {
        let humanizer = Humanizer::new(
            ResolutionChain::builder()
                .provider(Failing)
                .terminate(DefaultProvider::default()),
        );
        let err = humanizer.walk(&FqidPath::parse("a.boom.c")).unwrap_err();
        assert!(matches!(err, HumanizeError::Metadata(_)));
    }

    #[test]
    fn label_excluding_root_and_leaf() {
        let humanizer = plain();
        let a = FqidPath::parse("bgp.v4.ipv4_pfx_cnt");
        let b = FqidPath::parse("bgp.v6.ipv4_pfx_cnt");
        let c = FqidPath::parse("active.v6.ipv4_pfx_cnt");

        assert_eq!(humanizer.label(&a, Some(&b), None).unwrap(), "IPv4");
        assert_eq!(humanizer.label(&a, None, Some(&c)).unwrap(), "BGP · IPv4");
        assert_eq!(
            humanizer.label(&a, None, None).unwrap(),
            "BGP · IPv4 · # IPv4 Prefixes"
        );
    }

    #[test]
    fn root_exclusion_skips_leaf_pass() {
        let humanizer = plain();
        let a = FqidPath::parse("bgp.v4.ipv4_pfx_cnt");
        let root = FqidPath::parse("active.v6.ipv6_pfx_cnt");
        let leaf = FqidPath::parse("active.v6.ipv4_pfx_cnt");

        // nothing shared at the root, leaf is not consulted
        assert_eq!(
            humanizer.label(&a, Some(&root), Some(&leaf)).unwrap(),
            "BGP · IPv4 · # IPv4 Prefixes"
        );
    }

    #[test]
    fn labels_compare_nodes_not_names() {
        let humanizer = Humanizer::new(
            ResolutionChain::builder()
                .provider(DirectProvider::empty().with_entries([("x", "Same"), ("y", "Same")]))
                .terminate(DefaultProvider::default()),
        );
        let a = FqidPath::parse("src.x");
        let b = FqidPath::parse("src.y");
        assert_eq!(humanizer.label(&a, Some(&b), None).unwrap(), "Same");
    }

    #[test]
    fn humanizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Humanizer>();
        assert_send_sync::<ResolutionChain>();
        assert_send_sync::<HumanizedPath>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn one_entry_per_node(nodes in prop::collection::vec("[a-z0-9_-]{0,6}", 0..10)) {
                let path = FqidPath::from_nodes(nodes.clone());
                let walked = plain().walk(&path).unwrap();
                prop_assert_eq!(walked.len(), nodes.len());
                for (node, name) in nodes.iter().zip(walked.nodes()) {
                    prop_assert_eq!(node.is_empty(), name.is_none());
                }
            }
        }
    }
}
