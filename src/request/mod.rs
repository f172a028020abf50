//! Module request parsing - raw module identifiers to classified requests.
//!
//! A bundler names every unit of source content with an identifier that may
//! carry a query suffix encoding sub-block metadata, e.g.
//! `Comp.vue?vue&type=template`. Parsing splits the identifier once and the
//! predicates answer what the request resolves to. Classification is
//! advisory: malformed or unrecognized identifiers match nothing, they never
//! fail.

use std::collections::HashMap;

/// Marker key the component compiler adds to sub-block requests.
const SUB_BLOCK_MARKER: &str = "vue";
/// Query key carrying the sub-block kind (`template`, `script`, `style`).
const TYPE_KEY: &str = "type";
/// Presence flag for raw text imports. A style-named id traversing with
/// `?raw` is plain text, not a stylesheet to compile.
const RAW_KEY: &str = "raw";

/// Extensions classified as plain script modules.
const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".mts"];

/// Value of a single query key. A key without `=value` is a presence flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Flag,
    Value(String),
}

/// Stylesheet preprocessor dialect, resolved from the path extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleDialect {
    Scss,
    Sass,
    Other,
}

impl StyleDialect {
    /// The extension set this dialect is resolved from.
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            StyleDialect::Scss => &[".scss"],
            StyleDialect::Sass => &[".sass"],
            StyleDialect::Other => &[".css"],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StyleDialect::Scss => "scss",
            StyleDialect::Sass => "sass",
            StyleDialect::Other => "css",
        }
    }
}

/// What kind of module a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Script,
    Template,
    Style(StyleDialect),
}

/// A parsed module identifier: path plus decoded query metadata.
///
/// Recomputed per classification call, owned solely by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRequest {
    /// Identifier with the query suffix stripped.
    pub path: String,
    /// Decoded query pairs, keys lower-cased.
    pub query: HashMap<String, QueryValue>,
}

impl ModuleRequest {
    /// Parse a raw module identifier. Never fails.
    pub fn parse(id: &str) -> Self {
        let (path, raw_query) = match id.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (id, None),
        };

        let mut query = HashMap::new();
        for pair in raw_query.into_iter().flat_map(|q| q.split('&')) {
            match pair.split_once('=') {
                Some(("", _)) => {} // valueless key syntax, drop
                Some((key, value)) => {
                    query.insert(key.to_ascii_lowercase(), QueryValue::Value(value.to_string()));
                }
                None if !pair.is_empty() => {
                    query.insert(pair.to_ascii_lowercase(), QueryValue::Flag);
                }
                None => {}
            }
        }

        Self {
            path: path.to_string(),
            query,
        }
    }

    /// True iff the path extension is in `extensions` and the query does not
    /// mark the request as a non-stylesheet sub-block.
    pub fn is_style(&self, extensions: &[&str]) -> bool {
        if !self.has_extension(extensions) {
            return false;
        }
        if self.query.contains_key(RAW_KEY) {
            return false;
        }
        // A component sub-block traversing a style-named id only counts as a
        // stylesheet when it is explicitly the style block.
        if self.is_sub_block() && self.sub_block_type() != Some("style") {
            return false;
        }
        true
    }

    /// True iff the request is the compiled-template sub-block of a
    /// component module.
    pub fn is_template(&self) -> bool {
        self.is_sub_block() && self.sub_block_type() == Some("template")
    }

    /// True iff the request is a component module's script sub-block or a
    /// plain script file, and not a template or style sub-block.
    pub fn is_script(&self) -> bool {
        if self.is_sub_block() {
            self.sub_block_type() == Some("script")
        } else {
            !self.query.contains_key(RAW_KEY) && self.has_extension(SCRIPT_EXTENSIONS)
        }
    }

    /// Classify against the known dialects and script conventions.
    pub fn kind(&self) -> Option<RequestKind> {
        if self.is_template() {
            return Some(RequestKind::Template);
        }
        for dialect in [StyleDialect::Scss, StyleDialect::Sass, StyleDialect::Other] {
            if self.is_style(dialect.extensions()) {
                return Some(RequestKind::Style(dialect));
            }
        }
        if self.is_script() {
            return Some(RequestKind::Script);
        }
        None
    }

    fn has_extension(&self, extensions: &[&str]) -> bool {
        extensions.iter().any(|ext| self.path.ends_with(ext))
    }

    fn is_sub_block(&self) -> bool {
        self.query.contains_key(SUB_BLOCK_MARKER)
    }

    fn sub_block_type(&self) -> Option<&str> {
        match self.query.get(TYPE_KEY) {
            Some(QueryValue::Value(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_query() {
        let req = ModuleRequest::parse("src/styles/app.scss");
        assert_eq!(req.path, "src/styles/app.scss");
        assert!(req.query.is_empty());
    }

    #[test]
    fn test_parse_splits_at_first_delimiter() {
        let req = ModuleRequest::parse("Comp.vue?vue&type=template&id=a?b");
        assert_eq!(req.path, "Comp.vue");
        assert_eq!(req.query.get("vue"), Some(&QueryValue::Flag));
        assert_eq!(
            req.query.get("type"),
            Some(&QueryValue::Value("template".to_string()))
        );
        // Everything after the first '?' belongs to the query.
        assert_eq!(req.query.get("id"), Some(&QueryValue::Value("a?b".to_string())));
    }

    #[test]
    fn test_parse_lowercases_keys() {
        let req = ModuleRequest::parse("Comp.vue?VUE&Type=script");
        assert_eq!(req.query.get("vue"), Some(&QueryValue::Flag));
        assert_eq!(
            req.query.get("type"),
            Some(&QueryValue::Value("script".to_string()))
        );
    }

    #[test]
    fn test_parse_drops_degenerate_pairs() {
        let req = ModuleRequest::parse("a.js?&=x&&ok");
        assert_eq!(req.query.len(), 1);
        assert_eq!(req.query.get("ok"), Some(&QueryValue::Flag));
    }

    #[test]
    fn test_style_matches_plain_stylesheet() {
        let req = ModuleRequest::parse("src/app.scss");
        assert!(req.is_style(StyleDialect::Scss.extensions()));
        assert!(!req.is_style(StyleDialect::Sass.extensions()));
    }

    #[test]
    fn test_style_rejects_raw_import() {
        let req = ModuleRequest::parse("src/app.scss?raw");
        assert!(!req.is_style(StyleDialect::Scss.extensions()));
    }

    #[test]
    fn test_style_rejects_non_style_sub_block() {
        let req = ModuleRequest::parse("virtual.scss?vue&type=template");
        assert!(!req.is_style(StyleDialect::Scss.extensions()));

        let req = ModuleRequest::parse("block.scss?vue&type=style");
        assert!(req.is_style(StyleDialect::Scss.extensions()));
    }

    #[test]
    fn test_template_sub_block() {
        assert!(ModuleRequest::parse("Comp.vue?vue&type=template").is_template());
        assert!(!ModuleRequest::parse("Comp.vue?vue&type=script").is_template());
        assert!(!ModuleRequest::parse("Comp.vue").is_template());
    }

    #[test]
    fn test_script_sub_block_and_plain_file() {
        assert!(ModuleRequest::parse("Comp.vue?vue&type=script").is_script());
        assert!(ModuleRequest::parse("src/main.ts").is_script());
        assert!(!ModuleRequest::parse("src/main.ts?raw").is_script());
        assert!(!ModuleRequest::parse("Comp.vue").is_script());
        assert!(!ModuleRequest::parse("Comp.vue?vue&type=template").is_script());
    }

    #[test]
    fn test_unrecognized_query_matches_nothing() {
        let req = ModuleRequest::parse("Comp.vue?vue&type=banana");
        assert!(!req.is_template());
        assert!(!req.is_script());
        assert!(!req.is_style(StyleDialect::Scss.extensions()));
        assert_eq!(req.kind(), None);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ModuleRequest::parse("Comp.vue?vue&type=template").kind(),
            Some(RequestKind::Template)
        );
        assert_eq!(
            ModuleRequest::parse("a.scss").kind(),
            Some(RequestKind::Style(StyleDialect::Scss))
        );
        assert_eq!(
            ModuleRequest::parse("a.sass").kind(),
            Some(RequestKind::Style(StyleDialect::Sass))
        );
        assert_eq!(
            ModuleRequest::parse("a.css").kind(),
            Some(RequestKind::Style(StyleDialect::Other))
        );
        assert_eq!(ModuleRequest::parse("a.ts").kind(), Some(RequestKind::Script));
        assert_eq!(ModuleRequest::parse("a.wasm").kind(), None);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let id = "src/app.scss?scoped";
        let first = ModuleRequest::parse(id).is_style(StyleDialect::Scss.extensions());
        let second = ModuleRequest::parse(id).is_style(StyleDialect::Scss.extensions());
        assert_eq!(first, second);
    }
}
