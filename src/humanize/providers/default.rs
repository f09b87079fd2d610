//! Fallback provider - always answers

use serde::{Deserialize, Serialize};

use crate::humanize::provider::{FallbackProvider, PartialPath};

/// How the fallback renders a node nobody else recognized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStyle {
    /// The node unchanged
    #[default]
    Raw,
    /// First letter of every whitespace-separated word uppercased
    TitleCase,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProvider {
    style: FallbackStyle,
}

impl DefaultProvider {
    pub fn new(style: FallbackStyle) -> Self {
        Self { style }
    }
}

impl FallbackProvider for DefaultProvider {
    fn name(&self) -> &'static str {
        "default"
    }

    fn resolve(&self, partial: &PartialPath<'_>) -> String {
        match self.style {
            FallbackStyle::Raw => partial.terminal().to_string(),
            FallbackStyle::TitleCase => title_case(partial.terminal()),
        }
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}
