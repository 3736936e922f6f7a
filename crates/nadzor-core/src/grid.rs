//! Row-span grid projection of the classification tree.
//!
//! Flattens the three-level tree into display rows for a grouped table: the
//! level-1 cell spans every row of its area, each level-2 cell spans the
//! rows of its items, and the template column (rendered once per area) may
//! force extra blank rows so it never overflows the area block.
//!
//! Pure functions — no I/O, no mutation. Rendering is the caller's concern.

use serde::Serialize;

use crate::id::NodeId;
use crate::model::{Area, Level2};

/// One display row of the projected grid.
///
/// `level2_id`/`level3_id` are `None` on placeholder and filler rows.
/// `level2_span` is `0` on filler rows, which never start a level-2 cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub area_id: NodeId,
    pub level1_name: String,
    /// True only on the first row of the area.
    pub level1_row_start: bool,
    /// Total row count of the area; the level-1 cell's rowspan.
    pub level1_span: usize,
    pub level2_id: Option<NodeId>,
    pub level2_name: String,
    /// True only on the first row belonging to a level-2 node.
    pub level2_row_start: bool,
    /// Row count of the level-2 node; the level-2 cell's rowspan.
    pub level2_span: usize,
    pub level3_id: Option<NodeId>,
    pub level3_name: String,
}

/// The level-2/level-3 portion of a row, before area totals are known.
#[derive(Debug, Clone, Default)]
struct PartialRow {
    level2_id: Option<NodeId>,
    level2_name: String,
    level2_row_start: bool,
    level2_span: usize,
    level3_id: Option<NodeId>,
    level3_name: String,
}

/// Project one area into its display rows.
///
/// The row count is `max(sub-area rows, named template count, 1)`: an area
/// always yields at least one row, and templates that outnumber the tree
/// rows pull in trailing filler rows to keep the template column aligned.
#[must_use]
pub fn project(area: &Area) -> Vec<Row> {
    let mut partial: Vec<PartialRow> = area.children.iter().flat_map(level2_rows).collect();

    if partial.is_empty() {
        partial.push(PartialRow {
            level2_row_start: true,
            level2_span: 1,
            ..PartialRow::default()
        });
    }

    let named_templates = area
        .templates
        .iter()
        .filter(|template| !template.name.is_empty())
        .count();
    let total = partial.len().max(named_templates).max(1);
    partial.resize_with(total, PartialRow::default);

    partial
        .into_iter()
        .enumerate()
        .map(|(index, row)| Row {
            area_id: area.id.clone(),
            level1_name: area.name.clone(),
            level1_row_start: index == 0,
            level1_span: total,
            level2_id: row.level2_id,
            level2_name: row.level2_name,
            level2_row_start: row.level2_row_start,
            level2_span: row.level2_span,
            level3_id: row.level3_id,
            level3_name: row.level3_name,
        })
        .collect()
}

/// Project every area, concatenating per-area results in tree order.
#[must_use]
pub fn project_all(areas: &[Area]) -> Vec<Row> {
    areas.iter().flat_map(|area| project(area)).collect()
}

fn level2_rows(sub: &Level2) -> Vec<PartialRow> {
    // A childless sub-area still occupies one table row.
    if sub.children.is_empty() {
        return vec![PartialRow {
            level2_id: Some(sub.id.clone()),
            level2_name: sub.name.clone(),
            level2_row_start: true,
            level2_span: 1,
            ..PartialRow::default()
        }];
    }

    sub.children
        .iter()
        .enumerate()
        .map(|(index, item)| PartialRow {
            level2_id: Some(sub.id.clone()),
            level2_name: sub.name.clone(),
            level2_row_start: index == 0,
            level2_span: sub.children.len(),
            level3_id: Some(item.id.clone()),
            level3_name: item.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{project, project_all};
    use crate::model::{Area, Level2, Level3, Template, TemplateTag};

    fn area_with(children: Vec<Level2>, templates: Vec<Template>) -> Area {
        let mut area = Area::new("Охрана труда");
        area.children = children;
        area.templates = templates;
        area
    }

    fn sub_with(name: &str, items: &[&str]) -> Level2 {
        let mut sub = Level2::new(name);
        sub.children = items.iter().map(|item| Level3::new(*item)).collect();
        sub
    }

    #[test]
    fn empty_area_yields_one_placeholder_row() {
        let rows = project(&area_with(vec![], vec![]));
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert!(row.level1_row_start);
        assert_eq!(row.level1_span, 1);
        assert!(row.level2_id.is_none());
        assert!(row.level2_row_start);
        assert_eq!(row.level2_span, 1);
        assert!(row.level3_id.is_none());
    }

    #[test]
    fn childless_sub_area_still_gets_a_row() {
        let rows = project(&area_with(vec![sub_with("Документация", &[])], vec![]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level2_name, "Документация");
        assert_eq!(rows[0].level2_span, 1);
        assert!(rows[0].level3_id.is_none());
    }

    #[test]
    fn templates_pull_in_filler_rows() {
        // Two sub-areas with 3 and 0 items, five templates:
        // max(3 + 1, 5, 1) = 5 rows.
        let templates = (0..5)
            .map(|n| Template::new(format!("Шаблон {n}"), TemplateTag::General))
            .collect();
        let area = area_with(
            vec![
                sub_with("Документация", &["Журнал", "Приказы", "Инструкции"]),
                sub_with("Обучение", &[]),
            ],
            templates,
        );

        let rows = project(&area);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].level2_span, 3);
        assert!(rows[0].level2_row_start);
        assert!(!rows[1].level2_row_start);
        assert!(!rows[2].level2_row_start);
        assert_eq!(rows[3].level2_span, 1);
        assert!(rows[3].level2_row_start);
        // Filler row: no ids, no spans, never a row start.
        assert!(rows[4].level2_id.is_none());
        assert_eq!(rows[4].level2_span, 0);
        assert!(!rows[4].level2_row_start);
    }

    #[test]
    fn unnamed_templates_do_not_force_rows() {
        let blank = Template::new("", TemplateTag::General);
        let rows = project(&area_with(vec![sub_with("Документация", &[])], vec![blank]));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn spans_partition_each_area() {
        let area = area_with(
            vec![
                sub_with("Документация", &["Журнал", "Приказы"]),
                sub_with("Обучение", &["СИЗ"]),
                sub_with("Медосмотры", &[]),
            ],
            vec![Template::new("Акт", TemplateTag::Deficiencies)],
        );

        let rows = project(&area);
        assert_eq!(rows[0].level1_span, rows.len());
        assert_eq!(rows.iter().filter(|row| row.level1_row_start).count(), 1);

        let span_sum: usize = rows
            .iter()
            .filter(|row| row.level2_row_start)
            .map(|row| row.level2_span)
            .sum();
        assert_eq!(span_sum, rows[0].level1_span);
    }

    #[test]
    fn project_all_concatenates_in_order() {
        let first = area_with(vec![sub_with("Документация", &["Журнал"])], vec![]);
        let second = area_with(vec![], vec![]);
        let rows = project_all(&[first.clone(), second.clone()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].area_id, first.id);
        assert_eq!(rows[1].area_id, second.id);
    }
}
