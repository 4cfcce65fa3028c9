use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side wins when a path matches both an include and an exclude rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Precedence {
    #[default]
    Includes,
    Excludes,
}

impl Precedence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precedence::Includes => "includes",
            Precedence::Excludes => "excludes",
        }
    }
}

// Anything other than an explicit "excludes" keeps the default.
impl From<String> for Precedence {
    fn from(token: String) -> Self {
        Precedence::from(token.as_str())
    }
}

impl From<&str> for Precedence {
    fn from(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("excludes") {
            Precedence::Excludes
        } else {
            Precedence::Includes
        }
    }
}

impl From<Precedence> for String {
    fn from(p: Precedence) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative filter document, as stored in profiles and passed on the command line.
///
/// Unknown fields are ignored; absent fields mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Literal paths; a trailing `/` selects the whole subtree
    pub include_paths: Vec<String>,
    pub exclude_paths: Vec<String>,
    /// Extensions with or without the leading dot
    pub include_exts: Vec<String>,
    pub exclude_exts: Vec<String>,
    /// Prefixes matched at a path-segment boundary
    pub include_prefixes: Vec<String>,
    pub exclude_prefixes: Vec<String>,
    pub include_regex: Vec<String>,
    pub exclude_regex: Vec<String>,
    /// Raw regex lists from older profiles and `content get --includes/--excludes`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
    pub priority: Precedence,
}

impl FilterSpec {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build a filter from comma-separated raw regex lists
    pub fn from_raw_lists(includes: &str, excludes: &str, priority: Precedence) -> Self {
        Self {
            includes: split_list(includes),
            excludes: split_list(excludes),
            priority,
            ..Self::default()
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
