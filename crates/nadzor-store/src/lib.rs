#![forbid(unsafe_code)]
//! nadzor-store library.
//!
//! Persistence and orchestration for the classification engine: the local
//! key-value cache, the remote repository seam, the dual-write
//! [`AreaStore`] façade, the per-inspection [`SelectionSession`], and the
//! inspection form [`DraftStore`].
//!
//! # Persistence policy
//!
//! The local cache is written first and unconditionally; the remote write
//! follows and may fail. Failures are reported ([`Persisted::LocalOnly`])
//! but never rolled back — within a session the in-memory tree is the
//! source of truth, and the cache makes it survive to the next one.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for plumbing, explicit enums at the
//!   validation boundary.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`,
//!   `debug!`, `trace!`).

pub mod cache;
pub mod draft;
pub mod prompt;
pub mod repo;
pub mod session;
pub mod store;

pub use cache::{AREAS_KEY, DRAFT_KEY, LocalCache, SELECTION_KEY};
pub use draft::{Draft, DraftStore, FieldValue};
pub use prompt::{NamePrompt, TemplateDraft, TemplatePrompt};
pub use repo::RemoteAreaRepository;
pub use session::SelectionSession;
pub use store::{AreaStore, LoadSource, Persisted, TemplateError};
