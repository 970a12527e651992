//! Forest service
//!
//! Loads hierarchies under the configured validation policy, filters them by
//! a [`Selection`] and renders them in the configured style.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, Selection};
use crate::config::{RenderStyle, Settings, ValidationMode};
use crate::domain::{self, render, ArrayHierarchy, Depth, Hierarchy, NodeId};

/// Result of a filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Surviving nodes
    pub hierarchy: ArrayHierarchy,
    /// Number of predicate calls; pruned descendants are never evaluated
    pub evaluated: usize,
    /// Number of nodes removed, directly or as descendants
    pub removed: usize,
}

/// Service for loading, filtering and rendering hierarchies.
pub struct ForestService {
    settings: Arc<Settings>,
}

impl ForestService {
    /// Create a new forest service.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build a hierarchy from parallel sequences.
    ///
    /// In strict mode malformed input is rejected, in trust mode it is taken
    /// as given.
    #[instrument(level = "debug", skip_all, fields(nodes = node_ids.len()))]
    pub fn load(&self, node_ids: Vec<NodeId>, depths: Vec<Depth>) -> ApplicationResult<ArrayHierarchy> {
        let hierarchy = match self.settings.validation {
            ValidationMode::Strict => ArrayHierarchy::try_new(node_ids, depths)?,
            ValidationMode::Trust => ArrayHierarchy::new(node_ids, depths),
        };
        debug!("loaded {} nodes", hierarchy.size());
        Ok(hierarchy)
    }

    /// Validate parallel sequences regardless of the configured mode.
    pub fn check(&self, node_ids: Vec<NodeId>, depths: Vec<Depth>) -> ApplicationResult<ArrayHierarchy> {
        Ok(ArrayHierarchy::try_new(node_ids, depths)?)
    }

    /// Filter `hierarchy` by the structural closure of `selection`.
    #[instrument(level = "debug", skip_all, fields(size = hierarchy.size(), rules = selection.rules().len()))]
    pub fn filter<H: Hierarchy + ?Sized>(
        &self,
        hierarchy: &H,
        selection: &Selection,
    ) -> ApplicationResult<FilterOutcome> {
        let mut evaluated = 0;
        let filtered = domain::filter(hierarchy, |id| {
            evaluated += 1;
            selection.accepts(id)
        })?;
        let removed = hierarchy.size() - filtered.size();
        info!(kept = filtered.size(), removed, evaluated, "filter complete");
        Ok(FilterOutcome {
            hierarchy: filtered,
            evaluated,
            removed,
        })
    }

    /// Render in `style`, or in the configured style when `None`.
    ///
    /// The tree style refuses forests deeper than [`render::TREE_DEPTH_LIMIT`].
    pub fn render<H: Hierarchy + ?Sized>(
        &self,
        hierarchy: &H,
        style: Option<RenderStyle>,
    ) -> ApplicationResult<String> {
        Ok(match style.unwrap_or(self.settings.style) {
            RenderStyle::Flat => hierarchy.format_string(),
            RenderStyle::Outline => render::outline(hierarchy, &self.settings.outline_marker),
            RenderStyle::Tree => render::tree_string(hierarchy)?,
        })
    }
}
