//! JSON capture records, the form in which a page scanner hands over its results.
//!
//! ```json
//! { "pages": { "1": [
//!     { "kind": "rectangle", "name": "Total", "text": "42.00",
//!       "area": { "left": 400, "top": 120, "width": 100, "height": 12 } },
//!     { "kind": "line", "name": "Items", "separator": "|",
//!       "area": { "left": 50, "top": 600, "right": 550, "bottom": 589 },
//!       "columns": [ { "name": "sku", "text": "A", "area": { "left": 50, "width": 100 } } ] }
//! ] } }
//! ```
//!
//! Column areas default to their line's area. Rows inside a `line_set`
//! default to the set's name.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::area::{Area, AreaSpec};
use crate::capture::{
    CapturedEntity, Captures, ColumnEntity, LineEntity, LineSetEntity, RectangleEntity,
};
use crate::error::{CaptureError, Result};
use crate::template::{DEFAULT_SEPARATOR, column_defaults};

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnRecord {
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub area: AreaSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub separator: Option<String>,
    pub area: AreaSpec,
    pub columns: Vec<ColumnRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRecord {
    Rectangle {
        name: String,
        #[serde(default)]
        text: String,
        area: AreaSpec,
    },
    Line(LineRecord),
    LineSet {
        name: String,
        #[serde(default)]
        lines: Vec<LineRecord>,
    },
}

impl LineRecord {
    fn into_entity(self, page: u32, fallback_name: Option<&str>) -> Result<LineEntity> {
        let name = match (self.name, fallback_name) {
            (Some(name), _) => name,
            (None, Some(name)) => name.to_string(),
            (None, None) => {
                return Err(CaptureError::InvalidShape(
                    "line record needs a name".to_string(),
                ));
            }
        };
        let area = Area::from_spec(&self.area, None).map_err(|e| e.in_shape(name.clone()))?;

        let mut columns = Vec::with_capacity(self.columns.len());
        for col in self.columns {
            let defaults = column_defaults(&area, &col.area);
            let col_area = Area::from_spec(&col.area, Some(&defaults))
                .map_err(|e| e.in_shape(format!("{}.{}", name, col.name)))?;
            columns.push(ColumnEntity::new(page, col.name, col.text, col_area));
        }

        let separator = self
            .separator
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());
        Ok(LineEntity::new(page, name, columns, area, separator))
    }
}

impl EntityRecord {
    pub fn name(&self) -> Option<&str> {
        match self {
            EntityRecord::Rectangle { name, .. } | EntityRecord::LineSet { name, .. } => {
                Some(name.as_str())
            }
            EntityRecord::Line(line) => line.name.as_deref(),
        }
    }

    pub fn into_entity(self, page: u32) -> Result<CapturedEntity> {
        match self {
            EntityRecord::Rectangle { name, text, area } => {
                let area = Area::from_spec(&area, None).map_err(|e| e.in_shape(name.clone()))?;
                Ok(RectangleEntity::new(page, name, text, area).into())
            }
            EntityRecord::Line(line) => Ok(line.into_entity(page, None)?.into()),
            EntityRecord::LineSet { name, lines } => {
                let lines = lines
                    .into_iter()
                    .map(|line| line.into_entity(page, Some(name.as_str())))
                    .collect::<Result<Vec<_>>>()?;
                Ok(LineSetEntity::new(name, page, lines).into())
            }
        }
    }
}

/// Every record a scanner produced for a document, grouped by page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureDocument {
    #[serde(default)]
    pub pages: BTreeMap<u32, Vec<EntityRecord>>,
}

impl CaptureDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Appends `other`'s records after this document's, page by page.
    pub fn merge(&mut self, other: CaptureDocument) {
        for (page, records) in other.pages {
            self.pages.entry(page).or_default().extend(records);
        }
    }

    pub fn record_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Resolves every record and builds the aggregator.
    ///
    /// Page numbers are 1-based; a page 0 is rejected.
    pub fn into_captures(self) -> Result<Captures> {
        let mut by_page = BTreeMap::new();
        for (page, records) in self.pages {
            if page == 0 {
                return Err(CaptureError::InvalidShape(
                    "page numbers start at 1".to_string(),
                ));
            }
            let entities = records
                .into_iter()
                .map(|record| record.into_entity(page))
                .collect::<Result<Vec<_>>>()?;
            by_page.insert(page, entities);
        }
        Ok(Captures::new(by_page))
    }
}

impl Captures {
    /// Loads captures from a JSON capture document.
    pub fn from_json(json: &str) -> Result<Self> {
        CaptureDocument::from_json(json)?.into_captures()
    }
}
