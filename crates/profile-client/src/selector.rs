//! List scoping

use std::collections::BTreeMap;

/// Scope of a list call: one namespace or all, optionally narrowed by a
/// label selector.
///
/// The label selector is passed to the API server as is. Only the
/// equality-based subset is understood locally (see
/// [`ListSelector::requirements`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSelector {
    pub namespace: Option<String>,
    pub label_selector: Option<String>,
}

/// One term of an equality-based label selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRequirement<'a> {
    /// `key=value` or `key==value`
    Equals(&'a str, &'a str),
    /// `key!=value`, also true when the label is absent
    NotEquals(&'a str, &'a str),
    /// `key`
    Exists(&'a str),
    /// `!key`
    DoesNotExist(&'a str),
}

impl LabelRequirement<'_> {
    /// Whether `labels` satisfy this term
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match *self {
            Self::Equals(key, value) => labels.get(key).is_some_and(|v| v == value),
            Self::NotEquals(key, value) => labels.get(key).is_none_or(|v| v != value),
            Self::Exists(key) => labels.contains_key(key),
            Self::DoesNotExist(key) => !labels.contains_key(key),
        }
    }
}

fn parse_term(term: &str) -> Result<LabelRequirement<'_>, String> {
    let unsupported = || format!("unsupported label selector term '{term}'");
    if term.contains(['(', ')']) {
        // Set-based terms (`in`, `notin`) are not understood locally
        return Err(unsupported());
    }
    let requirement = if let Some((key, value)) = term.split_once("!=") {
        LabelRequirement::NotEquals(key.trim(), value.trim())
    } else if let Some((key, value)) = term.split_once("==") {
        LabelRequirement::Equals(key.trim(), value.trim())
    } else if let Some((key, value)) = term.split_once('=') {
        LabelRequirement::Equals(key.trim(), value.trim())
    } else if let Some(key) = term.strip_prefix('!') {
        LabelRequirement::DoesNotExist(key.trim())
    } else {
        LabelRequirement::Exists(term)
    };

    let key = match requirement {
        LabelRequirement::Equals(key, _)
        | LabelRequirement::NotEquals(key, _)
        | LabelRequirement::Exists(key)
        | LabelRequirement::DoesNotExist(key) => key,
    };
    if key.is_empty() || key.contains(['!', '=']) {
        return Err(unsupported());
    }
    Ok(requirement)
}

impl ListSelector {
    /// Every object visible to the client's credentials
    pub fn all() -> Self {
        Self::default()
    }

    pub fn namespaced(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            label_selector: None,
        }
    }

    #[must_use]
    pub fn with_labels(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = Some(selector.into());
        self
    }

    /// Parsed terms of the label selector, empty when there is none
    ///
    /// Supports `k=v`, `k==v`, `k!=v`, `k` and `!k` joined by commas.
    /// Set-based terms (`k in (..)`, `k notin (..)`) are rejected.
    pub fn requirements(&self) -> Result<Vec<LabelRequirement<'_>>, String> {
        self.label_selector
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|term| !term.is_empty())
                    .map(parse_term)
                    .collect()
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
