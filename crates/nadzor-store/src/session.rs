//! Per-inspection selection session.
//!
//! Binds a [`SelectionState`] to the local cache: the state is read once
//! when the session opens and written back after every toggle. Selection
//! persistence is cache-only and independent of the tree's own lifecycle —
//! the tree may sync to the remote or not, the picker's checkboxes survive
//! either way.

use nadzor_core::id::NodeId;
use nadzor_core::model::Area;
use nadzor_core::selection::{SelectionState, count_in_scope, count_label};

use crate::cache::{LocalCache, SELECTION_KEY};

/// A selection-state editing session for one inspection.
#[derive(Debug)]
pub struct SelectionSession {
    cache: LocalCache,
    state: SelectionState,
}

impl SelectionSession {
    /// Open a session, adopting whatever selection state the cache holds.
    ///
    /// A missing or corrupt entry starts the session from the opt-out
    /// default: everything in scope.
    #[must_use]
    pub fn open(cache: LocalCache) -> Self {
        let state = cache
            .read(SELECTION_KEY)
            .and_then(|raw| match serde_json::from_value(raw) {
                Ok(state) => Some(state),
                Err(err) => {
                    tracing::warn!(error = %err, "stored selection state unusable, starting fresh");
                    None
                }
            })
            .unwrap_or_default();
        Self { cache, state }
    }

    /// The current selection state.
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Seed selection entries for every node of `areas`, then persist.
    ///
    /// Called when the picker opens so that nodes added since the last
    /// session silently join the selection as included.
    pub fn ensure_all(&mut self, areas: &[Area]) {
        for area in areas {
            self.state.ensure(area);
        }
        self.persist();
    }

    /// Toggle an area's own flag.
    pub fn set_area_included(&mut self, id: &NodeId, included: bool) {
        self.state.set_area_included(id, included);
        self.persist();
    }

    /// Toggle a sub-area's own flag.
    pub fn set_level2_included(&mut self, area_id: &NodeId, id: &NodeId, included: bool) {
        self.state.set_level2_included(area_id, id, included);
        self.persist();
    }

    /// Toggle a leaf item's flag.
    pub fn set_level3_included(
        &mut self,
        area_id: &NodeId,
        level2_id: &NodeId,
        id: &NodeId,
        included: bool,
    ) {
        self.state
            .set_level3_included(area_id, level2_id, id, included);
        self.persist();
    }

    /// Count the in-scope items for `areas` under this session's selection.
    pub fn count(&mut self, areas: &[Area]) -> usize {
        count_in_scope(areas, &mut self.state)
    }

    /// The count with its declined unit label, ready for display.
    pub fn count_display(&mut self, areas: &[Area]) -> String {
        count_label(self.count(areas))
    }

    fn persist(&self) {
        self.cache.write(SELECTION_KEY, &self.state);
    }
}
