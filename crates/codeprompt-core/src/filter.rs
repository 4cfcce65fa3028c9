//! Filter engine: compiles a `FilterSpec` into ordered include/exclude
//! regex lists and decides, per relative path, whether it is selected.

use crate::{Error, Result};
use codeprompt_types::{FilterSpec, Precedence};
use regex::Regex;

/// Compiled filter. Immutable once built, so it can be shared across threads.
#[derive(Debug, Clone)]
pub struct Filter {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
    precedence: Precedence,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            excludes: Vec::new(),
            precedence: Precedence::Includes,
        }
    }
}

impl Filter {
    /// Parse a filter document and compile it
    pub fn from_json(json: &str) -> Result<Self> {
        let spec = FilterSpec::from_json(json)?;
        Self::compile(&spec)
    }

    /// Translate every structured rule to a regex and compile the lot.
    ///
    /// Order within each list: paths, extensions, prefixes, raw regexes.
    /// The first pattern that fails to compile rejects the whole filter.
    pub fn compile(spec: &FilterSpec) -> Result<Self> {
        let includes = compile_side(
            &spec.include_paths,
            &spec.include_exts,
            &spec.include_prefixes,
            [&spec.include_regex, &spec.includes],
        )?;
        let excludes = compile_side(
            &spec.exclude_paths,
            &spec.exclude_exts,
            &spec.exclude_prefixes,
            [&spec.exclude_regex, &spec.excludes],
        )?;

        Ok(Self {
            includes,
            excludes,
            precedence: spec.priority,
        })
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(Regex::as_str)
    }

    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(Regex::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    /// Verdict for one `/`-separated relative path.
    ///
    /// An empty include list matches every path. When a path matches both
    /// sides, the precedence token alone decides.
    pub fn is_included(&self, path: &str) -> bool {
        let match_include =
            self.includes.is_empty() || self.includes.iter().any(|re| re.is_match(path));
        let match_exclude = self.excludes.iter().any(|re| re.is_match(path));

        match (match_include, match_exclude) {
            (true, false) => true,
            (true, true) => self.precedence == Precedence::Includes,
            (false, _) => false,
        }
    }

    /// Keep the selected paths, preserving input order
    pub fn select<'a, I>(&self, paths: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths.into_iter().filter(|p| self.is_included(p)).collect()
    }
}

fn compile_side(
    paths: &[String],
    exts: &[String],
    prefixes: &[String],
    raw: [&Vec<String>; 2],
) -> Result<Vec<Regex>> {
    let synthesized = paths
        .iter()
        .filter_map(|p| path_pattern(p))
        .chain(exts.iter().filter_map(|e| extension_pattern(e)))
        .chain(prefixes.iter().filter_map(|p| prefix_pattern(p)));

    let user = raw
        .into_iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    synthesized
        .chain(user)
        .map(|pattern| match Regex::new(&pattern) {
            Ok(re) => Ok(re),
            Err(source) => Err(Error::InvalidPattern { pattern, source }),
        })
        .collect()
}

fn clean_rule(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while let Some(stripped) = value.strip_prefix("./") {
        value = stripped.to_string();
    }
    value.trim_start_matches('/').to_string()
}

/// `dir/` selects the subtree, anything else only that exact path
fn path_pattern(raw: &str) -> Option<String> {
    let value = clean_rule(raw);
    if let Some(dir) = value.strip_suffix('/') {
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            return None;
        }
        return Some(format!("^{}/", regex::escape(dir)));
    }
    if value.is_empty() {
        return None;
    }
    Some(format!("^{}$", regex::escape(&value)))
}

fn extension_pattern(raw: &str) -> Option<String> {
    let ext = raw.trim().trim_start_matches('.');
    if ext.is_empty() {
        return None;
    }
    Some(format!(r"\.{}$", regex::escape(ext)))
}

/// `src` matches `src` and `src/...` but not `srcgen/...`
fn prefix_pattern(raw: &str) -> Option<String> {
    let value = clean_rule(raw);
    let value = value.trim_end_matches('/');
    if value.is_empty() {
        return None;
    }
    Some(format!("^{}(?:/|$)", regex::escape(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(json: &str) -> Filter {
        Filter::from_json(json).unwrap()
    }

    #[test]
    fn test_empty_filter_includes_everything() {
        let f = Filter::default();
        assert!(f.is_empty());
        assert!(f.is_included("a.go"));
        assert!(f.is_included("deep/nested/file"));
    }

    #[test]
    fn test_extension_rule_is_anchored() {
        let f = filter(r#"{"includeExts":["go", ".md"]}"#);
        assert!(f.is_included("a.go"));
        assert!(f.is_included("docs/README.md"));
        assert!(!f.is_included("a.gold"));
        assert!(!f.is_included("go.mod"));
    }

    #[test]
    fn test_path_rule_subtree_vs_exact() {
        let f = filter(r#"{"includePaths":["cmd/", "main.go"]}"#);
        assert!(f.is_included("cmd/root.go"));
        assert!(f.is_included("cmd/sub/x.go"));
        assert!(f.is_included("main.go"));
        assert!(!f.is_included("cmdline/x.go"));
        assert!(!f.is_included("main.go.bak"));
        assert!(!f.is_included("pkg/main.go"));
    }

    #[test]
    fn test_prefix_rule_respects_segment_boundary() {
        let f = filter(r#"{"includePrefixes":["src"]}"#);
        assert!(f.is_included("src"));
        assert!(f.is_included("src/lib.rs"));
        assert!(!f.is_included("srcgen/lib.rs"));
    }

    #[test]
    fn test_exclude_only_filter_keeps_matches_under_default_precedence() {
        let f = filter(r#"{"excludeExts":["md"], "excludePaths":["vendor/"]}"#);
        assert_eq!(f.precedence(), Precedence::Includes);
        assert!(f.is_included("main.go"));
        assert!(f.is_included("README.md"));
        assert!(f.is_included("vendor/lib.go"));
    }

    #[test]
    fn test_exclude_only_filter_drops_matches_under_excludes_precedence() {
        let f = filter(
            r#"{"excludeExts":["md"], "excludePaths":["vendor/"], "priority":"excludes"}"#,
        );
        assert!(f.is_included("main.go"));
        assert!(!f.is_included("README.md"));
        assert!(!f.is_included("vendor/lib.go"));
    }

    #[test]
    fn test_precedence_law() {
        let spec = r#"{"includePaths":["cmd/"],"excludeExts":["md"]}"#;
        let f = filter(spec);
        assert!(f.is_included("cmd/doc.md"));
        assert!(!f.is_included("README.md"));
        assert!(!f.is_included("pkg/x.go"));

        let f = filter(r#"{"includePaths":["cmd/"],"excludeExts":["md"],"priority":"excludes"}"#);
        assert!(!f.is_included("cmd/doc.md"));
        assert!(f.is_included("cmd/root.go"));
    }

    #[test]
    fn test_legacy_raw_lists() {
        let f = filter(r#"{"includes":["\\.go$"],"excludes":["_test\\.go$"],"priority":"excludes"}"#);
        assert!(f.is_included("main.go"));
        assert!(!f.is_included("main_test.go"));
        assert!(!f.is_included("README.md"));
    }

    #[test]
    fn test_synthesized_patterns_escape_metacharacters() {
        let f = filter(r#"{"includePaths":["a+b/"],"includeExts":["c++"]}"#);
        assert!(f.is_included("a+b/x"));
        assert!(!f.is_included("aab/x"));
        assert!(f.is_included("x.c++"));
    }

    #[test]
    fn test_invalid_regex_rejects_whole_filter() {
        let err = Filter::from_json(r#"{"includeExts":["go"],"includeRegex":["(open"]}"#)
            .unwrap_err();
        match err {
            Error::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(open"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = Filter::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::InvalidFilterSpec(_)));
    }

    #[test]
    fn test_blank_rules_are_ignored() {
        let f = filter(r#"{"includeExts":[""],"includeRegex":["  "],"includePaths":["/"]}"#);
        assert!(f.is_empty());
        assert!(f.is_included("anything"));
    }

    #[test]
    fn test_pattern_order() {
        let f = filter(
            r#"{"includeRegex":["^z"],"includePrefixes":["p"],"includeExts":["e"],"includePaths":["x"]}"#,
        );
        let patterns: Vec<&str> = f.include_patterns().collect();
        assert_eq!(patterns, vec!["^x$", r"\.e$", "^p(?:/|$)", "^z"]);

        let f = filter(
            r#"{"excludeRegex":["^gen/"],"excludeExts":["md"],"excludePaths":["LICENSE"]}"#,
        );
        let patterns: Vec<&str> = f.exclude_patterns().collect();
        assert_eq!(patterns, vec!["^LICENSE$", r"\.md$", "^gen/"]);
    }

    #[test]
    fn test_select_preserves_order() {
        let f = filter(r#"{"includeExts":["go"]}"#);
        let picked = f.select(["b.go", "a.md", "a.go"]);
        assert_eq!(picked, vec!["b.go", "a.go"]);
    }
}
