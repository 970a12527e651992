//! Node selection rules used as filter predicates.

use std::collections::BTreeSet;
use std::fmt;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::NodeId;

/// A single condition on a node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Reject this id
    Exclude(NodeId),
    /// Reject multiples of n (for n = 0 only 0 itself)
    ExcludeMultipleOf(NodeId),
    /// Reject ids below the bound
    MinId(NodeId),
    /// Reject ids above the bound
    MaxId(NodeId),
    /// Reject ids not in the set
    Only(BTreeSet<NodeId>),
}

impl Rule {
    pub fn accepts(&self, id: NodeId) -> bool {
        match self {
            Rule::Exclude(excluded) => id != *excluded,
            Rule::ExcludeMultipleOf(0) => id != 0,
            Rule::ExcludeMultipleOf(n) => id.wrapping_rem(*n) != 0,
            Rule::MinId(min) => id >= *min,
            Rule::MaxId(max) => id <= *max,
            Rule::Only(allowed) => allowed.contains(&id),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Exclude(id) => write!(f, "exclude {id}"),
            Rule::ExcludeMultipleOf(n) => write!(f, "exclude multiples of {n}"),
            Rule::MinId(min) => write!(f, "id >= {min}"),
            Rule::MaxId(max) => write!(f, "id <= {max}"),
            Rule::Only(ids) => write!(f, "only {ids:?}"),
        }
    }
}

/// Conjunction of rules; an empty selection accepts every id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rules: Vec<Rule>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, rejecting id bounds that leave no id to select.
    pub fn with(mut self, rule: Rule) -> ApplicationResult<Self> {
        match &rule {
            Rule::MinId(min) => {
                if let Some(max) = self.max_bound().filter(|max| max < min) {
                    return Err(ApplicationError::InvalidRule {
                        rule: rule.to_string(),
                        reason: format!("conflicts with id <= {max}"),
                    });
                }
            }
            Rule::MaxId(max) => {
                if let Some(min) = self.min_bound().filter(|min| min > max) {
                    return Err(ApplicationError::InvalidRule {
                        rule: rule.to_string(),
                        reason: format!("conflicts with id >= {min}"),
                    });
                }
            }
            _ => {}
        }
        self.rules.push(rule);
        Ok(self)
    }

    fn min_bound(&self) -> Option<NodeId> {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                Rule::MinId(min) => Some(*min),
                _ => None,
            })
            .max()
    }

    fn max_bound(&self) -> Option<NodeId> {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                Rule::MaxId(max) => Some(*max),
                _ => None,
            })
            .min()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn accepts(&self, id: NodeId) -> bool {
        self.rules.iter().all(|rule| rule.accepts(id))
    }
}
