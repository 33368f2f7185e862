//! Rule directory
//!
//! Resolves Charging-Rule-Base-Name values to the ids of the pre-provisioned
//! rules in that group. Caching, concurrency and timeouts belong to the
//! implementation; callers perform at most one batched lookup per directive.

use std::collections::BTreeMap;

use crate::error::DirectoryError;

/// Base name to rule id resolution
pub trait RuleDirectory: Send + Sync {
    /// Rule ids of every requested base name, in request order
    ///
    /// A base name without members contributes nothing; that is not an error.
    fn rule_ids_for_base_names(&self, base_names: &[String]) -> Result<Vec<String>, DirectoryError>;
}

/// In-memory rule directory, usually built from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticRuleDirectory {
    base_names: BTreeMap<String, Vec<String>>,
}

impl StaticRuleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a base name
    pub fn insert(&mut self, base_name: impl Into<String>, rule_ids: Vec<String>) {
        self.base_names.insert(base_name.into(), rule_ids);
    }

    pub fn len(&self) -> usize {
        self.base_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_names.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for StaticRuleDirectory {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            base_names: iter.into_iter().collect(),
        }
    }
}

impl RuleDirectory for StaticRuleDirectory {
    fn rule_ids_for_base_names(&self, base_names: &[String]) -> Result<Vec<String>, DirectoryError> {
        let mut rule_ids = Vec::new();
        for base_name in base_names {
            match self.base_names.get(base_name) {
                Some(ids) => rule_ids.extend(ids.iter().cloned()),
                None => log::warn!("No rules found for base name [{base_name}]"),
            }
        }
        Ok(rule_ids)
    }
}
