//! Line captures: rows of named columns, and the per-page sets of such rows.

use std::slice;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::area::Area;
use crate::error::{CaptureError, Result};

use super::entity::{ColumnEntity, ShapeKind};
use super::readonly::ReadOnly;

/// One captured row of a line shape.
///
/// Columns keep template order. Name lookups go through an index built once
/// at construction; when two columns share a name the later one wins.
#[derive(Debug, Clone)]
pub struct LineEntity {
    page: u32,
    name: String,
    text: String,
    area: Area,
    separator: String,
    columns: Vec<ColumnEntity>,
    index: FxHashMap<String, usize>,
}

impl LineEntity {
    pub const KIND: &'static str = "line";

    pub fn new(
        page: u32,
        name: impl Into<String>,
        columns: Vec<ColumnEntity>,
        area: Area,
        separator: impl Into<String>,
    ) -> Self {
        let separator = separator.into();
        let text = columns
            .iter()
            .map(ColumnEntity::text)
            .collect::<Vec<_>>()
            .join(separator.as_str());

        let mut index = FxHashMap::default();
        for (pos, column) in columns.iter().enumerate() {
            index.insert(column.name().to_string(), pos);
        }

        Self {
            page,
            name: name.into(),
            text,
            area,
            separator,
            columns,
            index,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column texts joined with the shape's separator.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn by_index(&self, index: usize) -> Result<&ColumnEntity> {
        self.columns
            .get(index)
            .ok_or_else(|| CaptureError::IndexOutOfRange {
                container: Self::KIND,
                name: self.name.clone(),
                index,
                len: self.columns.len(),
            })
    }

    pub fn by_name(&self, column: &str) -> Result<&ColumnEntity> {
        match self.index.get(column) {
            Some(&pos) => Ok(&self.columns[pos]),
            None => Err(CaptureError::UnknownColumn {
                line: self.name.clone(),
                column: column.to_string(),
            }),
        }
    }

    /// Position a column name resolves to, if any.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn iter(&self) -> slice::Iter<'_, ColumnEntity> {
        self.columns.iter()
    }

    pub fn columns(&self) -> &[ColumnEntity] {
        &self.columns
    }

    pub fn contains(&self, _other: &Area) -> Result<bool> {
        Err(CaptureError::Unsupported {
            operation: "contains",
            kind: Self::KIND,
        })
    }
}

impl ReadOnly for LineEntity {
    const KIND: &'static str = LineEntity::KIND;
}

impl<'a> IntoIterator for &'a LineEntity {
    type Item = &'a ColumnEntity;
    type IntoIter = slice::Iter<'a, ColumnEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// All rows a line shape produced on one page.
#[derive(Debug, Clone)]
pub struct LineSetEntity {
    page: u32,
    name: String,
    lines: Vec<Arc<LineEntity>>,
}

impl LineSetEntity {
    pub const KIND: &'static str = "line set";

    pub fn new(name: impl Into<String>, page: u32, lines: Vec<LineEntity>) -> Self {
        Self {
            page,
            name: name.into(),
            lines: lines.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    /// Line texts joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn by_index(&self, index: usize) -> Result<&Arc<LineEntity>> {
        self.lines
            .get(index)
            .ok_or_else(|| CaptureError::IndexOutOfRange {
                container: Self::KIND,
                name: self.name.clone(),
                index,
                len: self.lines.len(),
            })
    }

    pub fn iter(&self) -> slice::Iter<'_, Arc<LineEntity>> {
        self.lines.iter()
    }

    pub fn contains(&self, _other: &Area) -> Result<bool> {
        Err(CaptureError::Unsupported {
            operation: "contains",
            kind: Self::KIND,
        })
    }
}

impl ReadOnly for LineSetEntity {
    const KIND: &'static str = LineSetEntity::KIND;
}

impl<'a> IntoIterator for &'a LineSetEntity {
    type Item = &'a Arc<LineEntity>;
    type IntoIter = slice::Iter<'a, Arc<LineEntity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
