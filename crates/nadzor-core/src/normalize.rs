//! Tolerant normalization of cached and remote payloads.
//!
//! Payloads reach us in several shapes: the canonical form written by this
//! crate, the bare-array form older caches used, and remote responses that
//! wrap the list in `{items: [...]}` or `{data: {items: [...]}}`. Node
//! entries may be plain strings instead of objects, and several legacy key
//! names (`title`, `level1`, `level2`, `level3`, singular `tag`) survive in
//! stored data.
//!
//! [`normalize`] is a best-effort sanitizer: it never fails, it assigns
//! missing identifiers, trims every name, and drops entries that cannot
//! carry information (sub-areas and items with no name and no children).
//! Its output always satisfies the canonical-model invariants, and running
//! it over its own output changes nothing.

use serde_json::Value;

use crate::id::NodeId;
use crate::model::{Area, Level2, Level3, Template, TemplateTag};

const EMPTY: &[Value] = &[];

/// Peel the outer wrapper off a remote or cached payload.
///
/// Accepts a bare array, `{items: [...]}`, or `{data: {items: [...]}}`;
/// anything else yields an empty slice.
#[must_use]
pub fn extract_items(raw: &Value) -> &[Value] {
    if let Some(items) = raw.as_array() {
        return items;
    }
    if let Some(items) = raw.get("items").and_then(Value::as_array) {
        return items;
    }
    if let Some(items) = raw
        .get("data")
        .and_then(|data| data.get("items"))
        .and_then(Value::as_array)
    {
        return items;
    }
    EMPTY
}

/// Normalize an arbitrary payload into the canonical tree shape.
#[must_use]
pub fn normalize(raw: &Value) -> Vec<Area> {
    extract_items(raw).iter().map(normalize_area).collect()
}

/// Normalize a single area entry.
///
/// Non-object entries become an empty area with a fresh identifier; the
/// enclosing UI treats nameless areas as editable placeholders.
#[must_use]
pub fn normalize_area(raw: &Value) -> Area {
    Area {
        id: node_id(raw),
        name: text(raw, &["name", "title", "level1"]),
        children: child_array(raw, &["children", "items", "level2"])
            .iter()
            .filter_map(normalize_level2)
            .collect(),
        templates: raw
            .get("templates")
            .and_then(Value::as_array)
            .map_or(EMPTY, Vec::as_slice)
            .iter()
            .map(normalize_template)
            .collect(),
    }
}

fn normalize_level2(raw: &Value) -> Option<Level2> {
    let sub = if let Some(name) = raw.as_str() {
        Level2 {
            id: NodeId::generate(),
            name: name.trim().to_string(),
            children: Vec::new(),
        }
    } else if raw.is_object() {
        Level2 {
            id: node_id(raw),
            name: text(raw, &["name", "title"]),
            children: child_array(raw, &["children", "items", "level3"])
                .iter()
                .filter_map(normalize_level3)
                .collect(),
        }
    } else {
        return None;
    };

    // Nothing to show and nothing underneath: malformed, drop it.
    if sub.name.is_empty() && sub.children.is_empty() {
        tracing::trace!("dropping empty sub-area entry");
        return None;
    }
    Some(sub)
}

fn normalize_level3(raw: &Value) -> Option<Level3> {
    let item = if let Some(name) = raw.as_str() {
        Level3 {
            id: NodeId::generate(),
            name: name.trim().to_string(),
        }
    } else if raw.is_object() {
        Level3 {
            id: node_id(raw),
            name: text(raw, &["name", "title"]),
        }
    } else {
        return None;
    };

    if item.name.is_empty() {
        return None;
    }
    Some(item)
}

fn normalize_template(raw: &Value) -> Template {
    if let Some(name) = raw.as_str() {
        return Template {
            id: NodeId::generate(),
            name: name.trim().to_string(),
            tags: Vec::new(),
        };
    }
    Template {
        id: node_id(raw),
        name: text(raw, &["name", "title"]),
        tags: normalize_tags(raw),
    }
}

/// Reduce a template's tag set to the single first legal value.
///
/// Accepts the canonical `tags` array or the legacy singular `tag` key;
/// values outside the closed enumeration are dropped silently.
fn normalize_tags(raw: &Value) -> Vec<TemplateTag> {
    let candidates: &[Value] = match raw.get("tags").and_then(Value::as_array) {
        Some(tags) => tags,
        None => raw.get("tag").map_or(EMPTY, std::slice::from_ref),
    };

    candidates
        .iter()
        .filter_map(Value::as_str)
        .find_map(|tag| tag.parse::<TemplateTag>().ok())
        .map_or_else(Vec::new, |tag| vec![tag])
}

fn node_id(raw: &Value) -> NodeId {
    match raw.get("id").and_then(Value::as_str).map(str::trim) {
        Some(id) if !id.is_empty() => NodeId::new_unchecked(id),
        _ => NodeId::generate(),
    }
}

/// First array among `keys`, or an empty slice.
fn child_array<'a>(raw: &'a Value, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .filter_map(|key| raw.get(key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .next()
        .unwrap_or(EMPTY)
}

/// First non-empty trimmed string among `keys`, or the empty string.
fn text(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| raw.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}
