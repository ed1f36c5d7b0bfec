//! Identifier escaping against a backend's reserved words.
//!
//! Names may be dotted (`Foo.Bar.Baz`). Each segment is checked and escaped on its own, so only
//! the colliding segments change. The escaping transform itself (backticks, `@`, `&`, brackets) is
//! supplied by the backend.
//!
//! ## Notes
//! - [`EscapeMode::Verbatim`] bypasses collision checks entirely (attribute-scope keywords,
//!   synthetic names already known to be safe).
//! - When namespace omission is enabled, a dotted name collapses to its last segment unless the
//!   call site asks for [`NamespacePolicy::AlwaysQualified`] (import paths, file-level names).

use std::collections::HashSet;

/// A backend's reserved words plus its case-sensitivity.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    words: HashSet<String>,
    case_sensitive: bool,
}

impl KeywordSet {
    pub fn case_sensitive<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words.into_iter().map(str::to_string).collect(),
            case_sensitive: true,
        }
    }

    /// Reserved words compared without regard to case. Stored lower-cased.
    pub fn case_insensitive<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words.into_iter().map(str::to_lowercase).collect(),
            case_sensitive: false,
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether a single (undotted) segment collides with a reserved word.
    pub fn contains(&self, segment: &str) -> bool {
        if self.case_sensitive {
            self.words.contains(segment)
        } else {
            self.words.contains(&segment.to_lowercase())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    #[default]
    Escape,
    Verbatim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamespacePolicy {
    /// Subject to the global namespace-omission setting.
    #[default]
    Default,
    AlwaysQualified,
}

/// Escape each colliding segment of a dotted name.
///
/// ## Parameters
/// - `name`: the identifier, possibly dotted.
/// - `keywords`: the backend's reserved words.
/// - `escape`: transform applied to a colliding segment (it receives the original casing).
///
/// ## Returns
/// - the name with only colliding segments transformed; unchanged if nothing collides.
pub fn escape_dotted(name: &str, keywords: &KeywordSet, escape: impl Fn(&str) -> String) -> String {
    if !name.split('.').any(|segment| keywords.contains(segment)) {
        return name.to_string();
    }
    name.split('.')
        .map(|segment| {
            if keywords.contains(segment) {
                escape(segment)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// The last segment of a dotted name.
pub fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Resolves identifiers for one backend under one configuration.
pub struct IdentifierResolver<'a> {
    keywords: &'a KeywordSet,
    omit_namespaces: bool,
    escape: &'a dyn Fn(&str) -> String,
}

impl<'a> IdentifierResolver<'a> {
    pub fn new(keywords: &'a KeywordSet, omit_namespaces: bool, escape: &'a dyn Fn(&str) -> String) -> Self {
        Self {
            keywords,
            omit_namespaces,
            escape,
        }
    }

    /// Apply namespace omission, then escaping.
    pub fn resolve(&self, name: &str, mode: EscapeMode, policy: NamespacePolicy) -> String {
        let name = if self.omit_namespaces && policy == NamespacePolicy::Default {
            last_segment(name)
        } else {
            name
        };
        match mode {
            EscapeMode::Verbatim => name.to_string(),
            EscapeMode::Escape => escape_dotted(name, self.keywords, self.escape),
        }
    }
}
