#![forbid(unsafe_code)]
//! nadzor-core library.
//!
//! The verification-area classification engine: a user-editable three-level
//! tree (area → sub-area → item) with attached document templates, a
//! tolerant normalizer for legacy payload shapes, a row-span grid projection
//! for tabular display, and a per-inspection selection-state structure with
//! its scope-count aggregator.
//!
//! # Module layout
//!
//! - [`id`] — opaque, process-unique node identifiers.
//! - [`model`] — the canonical tree types.
//! - [`normalize`] — best-effort sanitization of cached/remote payloads.
//! - [`grid`] — pure projection of the tree into row-span display rows.
//! - [`selection`] — selection flags, scope gating, and counting.
//! - [`plural`] — Slavic three-form pluralization for count labels.
//! - [`error`] — stable machine-readable error codes.
//!
//! # Conventions
//!
//! - **Errors**: domain errors are explicit enums; `anyhow::Result` belongs
//!   to the store layer, not here.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`,
//!   `debug!`, `trace!`).

pub mod error;
pub mod grid;
pub mod id;
pub mod model;
pub mod normalize;
pub mod plural;
pub mod selection;

pub use error::ErrorCode;
pub use grid::{Row, project, project_all};
pub use id::NodeId;
pub use model::{Area, Level2, Level3, ParseTagError, Template, TemplateTag};
pub use normalize::{extract_items, normalize, normalize_area};
pub use plural::plural_form;
pub use selection::{
    AreaSelection, Level2Selection, SelectionState, count_in_scope, count_label,
};
