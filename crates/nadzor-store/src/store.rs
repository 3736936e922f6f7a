//! Dual-write classification tree store.
//!
//! [`AreaStore`] owns the canonical tree for the session and composes two
//! repositories behind one façade: the fallible remote authority and the
//! always-on local cache.
//!
//! - [`load`](AreaStore::load) prefers the remote, adopts and mirrors its
//!   payload on success, and falls back to the cache when the remote fails
//!   or returns nothing.
//! - Every mutation updates the in-memory tree, writes through to the cache
//!   unconditionally, then attempts the remote write. A remote failure is
//!   surfaced as [`Persisted::LocalOnly`] — the local change is kept, never
//!   rolled back, so the caller can warn the user without losing the edit.
//!
//! Mutations are optimistic and synchronous; there is no retry and no
//! transaction discipline, because a single user edits the tree at a time.
//! Views subscribe for change notifications instead of polling.

use nadzor_core::error::ErrorCode;
use nadzor_core::id::NodeId;
use nadzor_core::model::{Area, Level2, Level3, Template, TemplateTag};
use nadzor_core::normalize::normalize;

use crate::cache::{AREAS_KEY, LocalCache};
use crate::repo::RemoteAreaRepository;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Where [`AreaStore::load`] got its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Remote fetch succeeded and returned at least one area; the cache was
    /// refreshed from it.
    Remote,
    /// Remote failed or returned nothing; the last cached tree was adopted.
    CacheFallback,
    /// Neither source had data; the store starts empty (empty-state UI, not
    /// an error).
    Empty,
}

/// Outcome of a mutation's persistence pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    /// The mutation was a no-op; nothing was written, nobody was notified.
    Unchanged,
    /// Written to the cache and acknowledged by the remote.
    Synced,
    /// Written to the cache; the remote write failed. The change is kept
    /// locally and `reason` is display-ready for a user-facing warning.
    LocalOnly { reason: String },
}

impl Persisted {
    /// Returns `true` if the mutation changed the tree.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Validation failure for template create/update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template name must not be empty")]
    EmptyName,
    #[error("unknown template tag '{0}'")]
    InvalidTag(String),
}

impl TemplateError {
    /// Machine-readable code for this validation failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyName => ErrorCode::TemplateNameEmpty,
            Self::InvalidTag(_) => ErrorCode::InvalidTemplateTag,
        }
    }
}

type Observer = Box<dyn FnMut(&[Area])>;

// ---------------------------------------------------------------------------
// AreaStore
// ---------------------------------------------------------------------------

/// The session's canonical classification tree plus its persistence policy.
pub struct AreaStore<R: RemoteAreaRepository> {
    remote: R,
    cache: LocalCache,
    areas: Vec<Area>,
    observers: Vec<Observer>,
}

impl<R: RemoteAreaRepository> AreaStore<R> {
    /// Create an empty store over the given repositories.
    pub fn new(remote: R, cache: LocalCache) -> Self {
        Self {
            remote,
            cache,
            areas: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// The canonical tree, in display order.
    #[must_use]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Look up an area by identifier.
    #[must_use]
    pub fn area(&self, id: &NodeId) -> Option<&Area> {
        self.areas.iter().find(|area| &area.id == id)
    }

    /// Register a change observer, called after every committed mutation
    /// and after [`load`](Self::load).
    pub fn subscribe(&mut self, observer: impl FnMut(&[Area]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Load the tree: remote first, cache fallback.
    pub fn load(&mut self) -> LoadSource {
        match self.remote.fetch() {
            Ok(raw) => {
                let items = normalize(&raw);
                if items.is_empty() {
                    tracing::debug!("remote returned no areas, falling back to cache");
                } else {
                    tracing::debug!(count = items.len(), "adopted areas from remote");
                    self.areas = items;
                    self.cache.write(AREAS_KEY, &self.areas);
                    self.notify();
                    return LoadSource::Remote;
                }
            }
            Err(err) => {
                tracing::warn!(
                    code = %ErrorCode::RemoteFetchFailed,
                    error = %err,
                    "remote fetch failed, falling back to cache"
                );
            }
        }

        self.areas = self
            .cache
            .read(AREAS_KEY)
            .map(|raw| normalize(&raw))
            .unwrap_or_default();
        self.notify();
        if self.areas.is_empty() {
            LoadSource::Empty
        } else {
            LoadSource::CacheFallback
        }
    }

    // -- level 1 ------------------------------------------------------------

    /// Append a new area. No-op on an empty (or cancelled) name.
    pub fn add_area(&mut self, name: &str) -> Persisted {
        let Some(name) = submitted(name) else {
            return Persisted::Unchanged;
        };
        self.areas.push(Area::new(name));
        self.commit()
    }

    /// Rename an area in place, preserving id, children, and order.
    pub fn rename_area(&mut self, id: &NodeId, name: &str) -> Persisted {
        let Some(name) = submitted(name) else {
            return Persisted::Unchanged;
        };
        let Some(area) = self.area_mut(id) else {
            return Persisted::Unchanged;
        };
        area.name = name.to_string();
        self.commit()
    }

    /// Delete an area. Descendants and templates go with it.
    pub fn delete_area(&mut self, id: &NodeId) -> Persisted {
        let Some(index) = self.areas.iter().position(|area| &area.id == id) else {
            return Persisted::Unchanged;
        };
        self.areas.remove(index);
        self.commit()
    }

    /// Move the area `moved` to immediately precede the area `before`.
    ///
    /// No-op when either id is missing, the ids are identical, or `moved`
    /// already sits directly before `before`.
    pub fn reorder_area(&mut self, moved: &NodeId, before: &NodeId) -> Persisted {
        if moved == before {
            return Persisted::Unchanged;
        }
        let Some(from) = self.areas.iter().position(|area| &area.id == moved) else {
            return Persisted::Unchanged;
        };
        let Some(to) = self.areas.iter().position(|area| &area.id == before) else {
            return Persisted::Unchanged;
        };
        let insert = if from < to { to - 1 } else { to };
        if insert == from {
            return Persisted::Unchanged;
        }
        let area = self.areas.remove(from);
        self.areas.insert(insert, area);
        self.commit()
    }

    // -- level 2 ------------------------------------------------------------

    /// Append a sub-area. No-op on empty name or missing parent.
    pub fn add_level2(&mut self, area_id: &NodeId, name: &str) -> Persisted {
        let Some(name) = submitted(name) else {
            return Persisted::Unchanged;
        };
        let Some(area) = self.area_mut(area_id) else {
            return Persisted::Unchanged;
        };
        area.children.push(Level2::new(name));
        self.commit()
    }

    /// Rename a sub-area in place.
    pub fn rename_level2(&mut self, area_id: &NodeId, id: &NodeId, name: &str) -> Persisted {
        let Some(name) = submitted(name) else {
            return Persisted::Unchanged;
        };
        let Some(sub) = self.area_mut(area_id).and_then(|area| area.child_mut(id)) else {
            return Persisted::Unchanged;
        };
        sub.name = name.to_string();
        self.commit()
    }

    /// Delete a sub-area and its items.
    pub fn delete_level2(&mut self, area_id: &NodeId, id: &NodeId) -> Persisted {
        let Some(area) = self.area_mut(area_id) else {
            return Persisted::Unchanged;
        };
        let before = area.children.len();
        area.children.retain(|sub| &sub.id != id);
        if area.children.len() == before {
            return Persisted::Unchanged;
        }
        self.commit()
    }

    // -- level 3 ------------------------------------------------------------

    /// Append a leaf item. No-op on empty name or missing parent chain.
    pub fn add_level3(&mut self, area_id: &NodeId, level2_id: &NodeId, name: &str) -> Persisted {
        let Some(name) = submitted(name) else {
            return Persisted::Unchanged;
        };
        let Some(sub) = self
            .area_mut(area_id)
            .and_then(|area| area.child_mut(level2_id))
        else {
            return Persisted::Unchanged;
        };
        sub.children.push(Level3::new(name));
        self.commit()
    }

    /// Rename a leaf item in place.
    pub fn rename_level3(
        &mut self,
        area_id: &NodeId,
        level2_id: &NodeId,
        id: &NodeId,
        name: &str,
    ) -> Persisted {
        let Some(name) = submitted(name) else {
            return Persisted::Unchanged;
        };
        let Some(item) = self
            .area_mut(area_id)
            .and_then(|area| area.child_mut(level2_id))
            .and_then(|sub| sub.child_mut(id))
        else {
            return Persisted::Unchanged;
        };
        item.name = name.to_string();
        self.commit()
    }

    /// Delete a leaf item.
    pub fn delete_level3(&mut self, area_id: &NodeId, level2_id: &NodeId, id: &NodeId) -> Persisted {
        let Some(sub) = self
            .area_mut(area_id)
            .and_then(|area| area.child_mut(level2_id))
        else {
            return Persisted::Unchanged;
        };
        let before = sub.children.len();
        sub.children.retain(|item| &item.id != id);
        if sub.children.len() == before {
            return Persisted::Unchanged;
        }
        self.commit()
    }

    // -- templates ----------------------------------------------------------

    /// Attach a template to an area.
    ///
    /// `tag` must name one of the closed enumeration values; an empty name
    /// or unknown tag is a validation error and nothing is persisted.
    pub fn add_template(
        &mut self,
        area_id: &NodeId,
        name: &str,
        tag: &str,
    ) -> Result<Persisted, TemplateError> {
        let (name, tag) = validate_template(name, tag)?;
        let Some(area) = self.area_mut(area_id) else {
            return Ok(Persisted::Unchanged);
        };
        area.templates.push(Template::new(name, tag));
        Ok(self.commit())
    }

    /// Update a template's name and tag. The tag replaces any previous one.
    pub fn update_template(
        &mut self,
        area_id: &NodeId,
        template_id: &NodeId,
        name: &str,
        tag: &str,
    ) -> Result<Persisted, TemplateError> {
        let (name, tag) = validate_template(name, tag)?;
        let Some(template) = self
            .area_mut(area_id)
            .and_then(|area| area.template_mut(template_id))
        else {
            return Ok(Persisted::Unchanged);
        };
        template.name = name.to_string();
        template.set_tag(tag);
        Ok(self.commit())
    }

    /// Detach a template from an area.
    pub fn delete_template(&mut self, area_id: &NodeId, template_id: &NodeId) -> Persisted {
        let Some(area) = self.area_mut(area_id) else {
            return Persisted::Unchanged;
        };
        let before = area.templates.len();
        area.templates.retain(|template| &template.id != template_id);
        if area.templates.len() == before {
            return Persisted::Unchanged;
        }
        self.commit()
    }

    // -- plumbing -----------------------------------------------------------

    fn area_mut(&mut self, id: &NodeId) -> Option<&mut Area> {
        self.areas.iter_mut().find(|area| &area.id == id)
    }

    /// Write-through: cache unconditionally, then the remote.
    fn save(&mut self) -> Persisted {
        self.cache.write(AREAS_KEY, &self.areas);
        match self.remote.replace(&self.areas) {
            Ok(()) => Persisted::Synced,
            Err(err) => {
                tracing::warn!(
                    code = %ErrorCode::RemoteSaveFailed,
                    error = %err,
                    "remote save failed, change kept locally"
                );
                Persisted::LocalOnly {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn commit(&mut self) -> Persisted {
        let outcome = self.save();
        self.notify();
        outcome
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.areas);
        }
    }
}

/// Treat a cancelled or empty submission as "nothing entered".
fn submitted(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn validate_template<'a>(name: &'a str, tag: &str) -> Result<(&'a str, TemplateTag), TemplateError> {
    let name = submitted(name).ok_or(TemplateError::EmptyName)?;
    let tag = tag
        .parse::<TemplateTag>()
        .map_err(|err| TemplateError::InvalidTag(err.got))?;
    Ok((name, tag))
}
