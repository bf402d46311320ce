//! Deduplicating rule catalog.
//!
//! The emitted SARIF `rules` array must contain exactly one entry per
//! distinct rule identifier, in first-occurrence order, with results
//! referencing entries by dense index. The catalog is an explicit keyed
//! store owned by one pipeline run; a second conversion starts from an
//! empty catalog.

use std::collections::HashMap;

/// Catalog entry for a distinct rule identifier.
///
/// `description` and `severity` reflect the first finding observed for the
/// rule; they are not guaranteed representative if later occurrences vary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub help_uri: Option<String>,
    pub severity: Option<String>,
}

#[derive(Debug, Default)]
pub struct RuleCatalog {
    rules: Vec<RuleDefinition>,
    by_id: HashMap<String, usize>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog index for `rule_id`, building the definition via
    /// `supplier` on first occurrence only. Indices are dense and stable:
    /// once assigned, an index never changes and the supplier is never
    /// invoked again for the same identifier.
    pub fn intern<F>(&mut self, rule_id: &str, supplier: F) -> usize
    where
        F: FnOnce() -> RuleDefinition,
    {
        if let Some(&index) = self.by_id.get(rule_id) {
            return index;
        }
        let index = self.rules.len();
        self.rules.push(supplier());
        self.by_id.insert(rule_id.to_string(), index);
        index
    }

    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Derive a display name from a camelCase tool identifier.
///
/// A new word starts wherever a lowercase letter is immediately followed
/// by an uppercase letter; each word is capitalized and words are joined
/// with single spaces: `uninitVariable` → `Uninit Variable`, `memleak` →
/// `Memleak`. Consecutive uppercase runs and leading acronyms are not
/// split (known limitation of the heuristic, kept for output stability).
pub fn identifier_to_name(identifier: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut previous_was_lower = false;

    for c in identifier.chars() {
        if words.is_empty() || (previous_was_lower && c.is_uppercase()) {
            words.push(c.to_uppercase().collect());
        } else {
            words.last_mut().unwrap().push(c);
        }
        previous_was_lower = c.is_lowercase();
    }

    words.join(" ")
}
