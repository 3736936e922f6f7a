//! User-input collaborator seams.
//!
//! The UI shows blocking prompts for names and template details; this crate
//! only sees their outcome. The contract deliberately collapses "cancelled"
//! and "submitted empty" into `None` — every add/rename operation treats the
//! two identically (a silent no-op), so the distinction never crosses this
//! boundary.

use nadzor_core::model::Template;

/// What the template prompt hands back: a name plus the raw tag choice.
///
/// The tag is validated against the closed enumeration by the store, not
/// here — the prompt's job is collection, not validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub tag: String,
}

/// Blocking single-line text prompt.
pub trait NamePrompt {
    /// Ask for a name under `title`, prefilled with `initial`.
    ///
    /// Returns a trimmed, non-empty string, or `None` on cancel or empty
    /// submission.
    fn ask_name(&mut self, title: &str, initial: &str) -> Option<String>;
}

/// Blocking template editor prompt (name field plus tag picker).
pub trait TemplatePrompt {
    /// Ask for template details, prefilled from `initial` when editing.
    ///
    /// Returns `None` on cancel.
    fn ask_template(&mut self, initial: Option<&Template>) -> Option<TemplateDraft>;
}
