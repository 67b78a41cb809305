//! File-type selector deciding which documents the adapter applies to.
//!
//! Syntax follows editor scope selectors in their simplest form:
//! comma-separated alternatives, each a whitespace-separated list of scope
//! names that must all be present, optionally followed by `- <names>`
//! exclusions. A selector name matches a scope when it equals it or is a
//! dot-boundary prefix of it (`source.css` matches `source.css.embedded.html`).

use std::path::Path;

/// CSS-family sources, excluding CSS inside attribute values.
pub const DEFAULT_SELECTOR: &str =
    "source.css - meta.attribute-with-value, source.sass, source.scss, source.less, source.sss";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Alternative {
    include: Vec<String>,
    exclude: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Alternative>,
}

impl Selector {
    pub fn parse(s: &str) -> Self {
        let alternatives = s
            .split(',')
            .filter_map(|alt| {
                let mut include = Vec::new();
                let mut exclude: Vec<Vec<String>> = Vec::new();
                for tok in alt.split_whitespace() {
                    if tok == "-" {
                        exclude.push(Vec::new());
                    } else if let Some(group) = exclude.last_mut() {
                        group.push(tok.to_string());
                    } else {
                        include.push(tok.to_string());
                    }
                }
                exclude.retain(|g| !g.is_empty());
                (!include.is_empty()).then_some(Alternative { include, exclude })
            })
            .collect();
        Selector { alternatives }
    }

    /// Whether a document carrying `scopes` is selected.
    pub fn matches(&self, scopes: &[&str]) -> bool {
        self.alternatives.iter().any(|alt| {
            all_present(&alt.include, scopes)
                && !alt.exclude.iter().any(|group| all_present(group, scopes))
        })
    }

    /// Whether the file at `path` is selected, judged by its extension.
    pub fn applies_to(&self, path: &Path) -> bool {
        self.matches(scopes_for_path(path))
    }
}

fn all_present(names: &[String], scopes: &[&str]) -> bool {
    names
        .iter()
        .all(|n| scopes.iter().any(|s| name_matches(n, s)))
}

fn name_matches(name: &str, scope: &str) -> bool {
    scope == name
        || scope
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Scopes a document gets from its file extension. HTML-like documents carry
/// an embedded stylesheet scope for their style blocks.
pub fn scopes_for_path(path: &Path) -> &'static [&'static str] {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "css" => &["source.css"],
        "scss" => &["source.scss"],
        "sass" => &["source.sass"],
        "less" => &["source.less"],
        "sss" => &["source.sss"],
        "html" | "htm" | "vue" | "svelte" => &["text.html.basic", "source.css.embedded.html"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selector_covers_css_family() {
        let sel = Selector::parse(DEFAULT_SELECTOR);
        for f in ["a.css", "b.SCSS", "c.sass", "d.less", "e.sss", "page.html", "App.vue"] {
            assert!(sel.applies_to(Path::new(f)), "{}", f);
        }
        for f in ["a.js", "README", "x.json"] {
            assert!(!sel.applies_to(Path::new(f)), "{}", f);
        }
    }

    #[test]
    fn test_exclusion_blocks_attribute_values() {
        let sel = Selector::parse(DEFAULT_SELECTOR);
        assert!(!sel.matches(&["text.html.basic", "meta.attribute-with-value.style.html", "source.css"]));
        assert!(sel.matches(&["source.css"]));
    }

    #[test]
    fn test_prefix_match_respects_dot_boundary() {
        let sel = Selector::parse("source.css");
        assert!(sel.matches(&["source.css.embedded.html"]));
        assert!(!sel.matches(&["source.cssx"]));
    }

    #[test]
    fn test_multi_name_alternative_and_blank_entries() {
        let sel = Selector::parse("text.html source.css, , ");
        assert!(sel.matches(&["text.html.basic", "source.css.embedded.html"]));
        assert!(!sel.matches(&["source.css"]));
        assert!(!Selector::parse("").matches(&["source.css"]));
    }
}
