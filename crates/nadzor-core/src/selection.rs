//! Per-inspection selection state and the scope-count aggregator.
//!
//! [`SelectionState`] is a shadow structure keyed by tree-node identifiers:
//! it records, per node, whether the node is in scope for the inspection
//! being edited. It is derived, not authoritative — entries for deleted
//! nodes linger harmlessly, and entries for new nodes are filled in lazily
//! by [`SelectionState::ensure`] with the opt-out default of "included".
//!
//! Two concerns are kept separate on purpose:
//!
//! - **Stored flags** — one per node, set only by that node's own toggle.
//!   Toggling a parent never rewrites a child's flag; a child's earlier
//!   choice survives the parent being excluded and re-included.
//! - **Scope gating** — computed top-down at read time by
//!   [`count_in_scope`]: an excluded ancestor short-circuits counting for
//!   the whole subtree without touching any stored flag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::NodeId;
use crate::model::Area;
use crate::plural::plural_form;

/// Grammatical forms of the scope-count unit ("пункт").
const UNIT_FORMS: [&str; 3] = ["пункт", "пункта", "пунктов"];

const fn default_true() -> bool {
    true
}

/// Selection flags for one area and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaSelection {
    pub included: bool,
    pub level2: BTreeMap<NodeId, Level2Selection>,
}

impl Default for AreaSelection {
    fn default() -> Self {
        Self {
            included: default_true(),
            level2: BTreeMap::new(),
        }
    }
}

/// Selection flags for one sub-area and its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level2Selection {
    pub included: bool,
    pub level3: BTreeMap<NodeId, bool>,
}

impl Default for Level2Selection {
    fn default() -> Self {
        Self {
            included: default_true(),
            level3: BTreeMap::new(),
        }
    }
}

/// The whole selection structure, keyed by area identifier.
///
/// Serializes to the cache wire shape: a JSON object mapping area ids to
/// their [`AreaSelection`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    areas: BTreeMap<NodeId, AreaSelection>,
}

impl SelectionState {
    /// Guarantee an entry exists for `area` and every node under it.
    ///
    /// Only missing entries are filled in (defaulting to included);
    /// existing flags — including explicit `false` — are never touched.
    /// Calling this twice in a row changes nothing the second time.
    pub fn ensure(&mut self, area: &Area) {
        let selection = self.areas.entry(area.id.clone()).or_default();
        for sub in &area.children {
            let sub_selection = selection.level2.entry(sub.id.clone()).or_default();
            for item in &sub.children {
                sub_selection.level3.entry(item.id.clone()).or_insert(true);
            }
        }
    }

    /// The stored selection entry for an area, if one exists.
    #[must_use]
    pub fn area(&self, id: &NodeId) -> Option<&AreaSelection> {
        self.areas.get(id)
    }

    /// Stored flag for an area; missing entries read as included.
    #[must_use]
    pub fn area_included(&self, id: &NodeId) -> bool {
        self.areas.get(id).is_none_or(|entry| entry.included)
    }

    /// Stored flag for a sub-area; missing entries read as included.
    #[must_use]
    pub fn level2_included(&self, area_id: &NodeId, id: &NodeId) -> bool {
        self.areas
            .get(area_id)
            .and_then(|entry| entry.level2.get(id))
            .is_none_or(|entry| entry.included)
    }

    /// Stored flag for a leaf item; missing entries read as included.
    #[must_use]
    pub fn level3_included(&self, area_id: &NodeId, level2_id: &NodeId, id: &NodeId) -> bool {
        self.areas
            .get(area_id)
            .and_then(|entry| entry.level2.get(level2_id))
            .and_then(|entry| entry.level3.get(id))
            .copied()
            .unwrap_or(true)
    }

    /// Set an area's own flag. Descendant flags are left alone.
    pub fn set_area_included(&mut self, id: &NodeId, included: bool) {
        self.areas.entry(id.clone()).or_default().included = included;
    }

    /// Set a sub-area's own flag. Item flags are left alone.
    pub fn set_level2_included(&mut self, area_id: &NodeId, id: &NodeId, included: bool) {
        self.areas
            .entry(area_id.clone())
            .or_default()
            .level2
            .entry(id.clone())
            .or_default()
            .included = included;
    }

    /// Set a leaf item's flag.
    pub fn set_level3_included(
        &mut self,
        area_id: &NodeId,
        level2_id: &NodeId,
        id: &NodeId,
        included: bool,
    ) {
        self.areas
            .entry(area_id.clone())
            .or_default()
            .level2
            .entry(level2_id.clone())
            .or_default()
            .level3
            .insert(id.clone(), included);
    }
}

/// Count the in-scope, leaf-equivalent items across `areas`.
///
/// Exclusion is a hard gate: an excluded area or sub-area contributes zero
/// no matter what its descendants' own flags say. An included sub-area with
/// items contributes the number of items not explicitly excluded; a
/// childless included sub-area counts as one unit itself.
///
/// Missing entries are seeded (via [`SelectionState::ensure`]) before
/// counting, so freshly added nodes count as included.
pub fn count_in_scope(areas: &[Area], selection: &mut SelectionState) -> usize {
    let mut count = 0;
    for area in areas {
        selection.ensure(area);
        let Some(area_selection) = selection.area(&area.id) else {
            continue;
        };
        if !area_selection.included {
            continue;
        }
        for sub in &area.children {
            let included = area_selection
                .level2
                .get(&sub.id)
                .is_none_or(|entry| entry.included);
            if !included {
                continue;
            }
            if sub.children.is_empty() {
                count += 1;
                continue;
            }
            count += sub
                .children
                .iter()
                .filter(|item| {
                    area_selection
                        .level2
                        .get(&sub.id)
                        .and_then(|entry| entry.level3.get(&item.id))
                        .copied()
                        .unwrap_or(true)
                })
                .count();
        }
    }
    count
}

/// Render the scope count with its correctly declined unit label.
#[must_use]
pub fn count_label(count: usize) -> String {
    format!("{count} {}", plural_form(count, UNIT_FORMS))
}
