//! Plain-value projection of capture results.
//!
//! The projection holds only maps, lists and strings so it can be handed to
//! any serializer. Page numbers become JSON object keys (strings).

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{CaptureError, Result};

use super::entity::{CapturedEntity, ShapeKind};

/// One projected row: column name → column text, in column order.
pub type Row = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProjectedCapture {
    /// Rectangle capture: page number → text.
    Pages(BTreeMap<u32, String>),
    /// Line capture: rows from every page, in page order.
    Rows(Vec<Row>),
}

impl ProjectedCapture {
    pub fn as_pages(&self) -> Option<&BTreeMap<u32, String>> {
        match self {
            ProjectedCapture::Pages(p) => Some(p),
            ProjectedCapture::Rows(_) => None,
        }
    }

    pub fn as_rows(&self) -> Option<&[Row]> {
        match self {
            ProjectedCapture::Rows(r) => Some(r),
            ProjectedCapture::Pages(_) => None,
        }
    }
}

/// Capture name → projected capture, in first-detection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Projection {
    captures: IndexMap<String, ProjectedCapture>,
}

impl Projection {
    pub(crate) fn insert(&mut self, name: String, capture: ProjectedCapture) {
        self.captures.insert(name, capture);
    }

    pub fn get(&self, name: &str) -> Option<&ProjectedCapture> {
        self.captures.get(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ProjectedCapture> {
        self.captures.iter()
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<'a> IntoIterator for &'a Projection {
    type Item = (&'a String, &'a ProjectedCapture);
    type IntoIter = indexmap::map::Iter<'a, String, ProjectedCapture>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn mismatch(name: &str, expected: ShapeKind, entity: &CapturedEntity) -> CaptureError {
    CaptureError::ShapeKindMismatch {
        name: name.to_string(),
        expected: expected.as_str(),
        got: entity.kind_name(),
    }
}

/// Page → text; a later entity on the same page overwrites an earlier one.
pub(crate) fn project_rectangles(
    name: &str,
    entities: &[CapturedEntity],
) -> Result<BTreeMap<u32, String>> {
    let mut pages = BTreeMap::new();
    for entity in entities {
        let rect = entity
            .as_rectangle()
            .ok_or_else(|| mismatch(name, ShapeKind::Rectangle, entity))?;
        pages.insert(rect.page(), rect.text().to_string());
    }
    Ok(pages)
}

/// All rows across pages; `entities` is already in page order.
pub(crate) fn project_lines(name: &str, entities: &[CapturedEntity]) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for entity in entities {
        if entity.shape_kind() != ShapeKind::Line {
            return Err(mismatch(name, ShapeKind::Line, entity));
        }
        for line in entity.lines() {
            let row: Row = line
                .iter()
                .map(|col| (col.name().to_string(), col.text().to_string()))
                .collect();
            rows.push(row);
        }
    }
    Ok(rows)
}
