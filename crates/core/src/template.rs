//! Capture templates: the named shapes a scanner looks for on each page.
//!
//! Templates are JSON documents:
//!
//! ```json
//! {
//!   "defaults": { "height": 12 },
//!   "shapes": [
//!     { "name": "Total", "kind": "rectangle",
//!       "area": { "left": 400, "top": 120, "width": 100 } },
//!     { "name": "Items", "kind": "line", "separator": "|",
//!       "area": { "left": 50, "top": 600, "right": 550, "bottom": 200 },
//!       "columns": [ { "name": "sku", "area": { "left": 50, "width": 100 } } ] }
//!   ]
//! }
//! ```
//!
//! Shape areas fall back to the template `defaults`; column areas fall back
//! to their line's resolved area, so a column usually only states its
//! horizontal span.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::area::{Area, AreaSpec};
use crate::capture::ShapeKind;
use crate::error::{CaptureError, Result};

/// Separator used to join column texts when a line shape does not set one.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Fallbacks for a column nested in `line`.
///
/// A column that states its own width or height keeps it, so the line's far
/// edge is left out of the defaults on that axis.
pub(crate) fn column_defaults(line: &Area, column: &AreaSpec) -> AreaSpec {
    let mut defaults = line.to_spec();
    if column.width.is_some() {
        defaults.right = None;
    }
    if column.height.is_some() {
        defaults.bottom = None;
    }
    defaults
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTemplate {
    #[serde(default)]
    defaults: Option<AreaSpec>,
    shapes: Vec<RawShape>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawShape {
    name: String,
    kind: String,
    #[serde(default)]
    area: AreaSpec,
    #[serde(default)]
    columns: Vec<RawColumn>,
    #[serde(default)]
    separator: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColumn {
    name: String,
    #[serde(default)]
    area: AreaSpec,
}

/// A named column of a line shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub area: Area,
}

/// A resolved shape definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeDefinition {
    pub name: String,
    pub kind: ShapeKind,
    pub area: Area,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnDefinition>,
    pub separator: String,
}

impl ShapeDefinition {
    /// Tests whether a text run's bounding box falls inside this shape.
    pub fn contains(&self, run: &Area) -> bool {
        self.area.contains(run)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn resolve(raw: RawShape, defaults: Option<&AreaSpec>) -> Result<Self> {
        let kind: ShapeKind = raw.kind.parse()?;
        let area = Area::from_spec(&raw.area, defaults)?;

        match kind {
            ShapeKind::Rectangle if !raw.columns.is_empty() => {
                return Err(CaptureError::InvalidShape(
                    "columns are only allowed on line shapes".to_string(),
                ));
            }
            ShapeKind::Line if raw.columns.is_empty() => {
                return Err(CaptureError::InvalidShape(
                    "line shapes need at least one column".to_string(),
                ));
            }
            _ => {}
        }

        let columns = raw
            .columns
            .into_iter()
            .map(|col| {
                let defaults = column_defaults(&area, &col.area);
                Area::from_spec(&col.area, Some(&defaults))
                    .map(|area| ColumnDefinition {
                        name: col.name.clone(),
                        area,
                    })
                    .map_err(|e| e.in_shape(col.name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: raw.name,
            kind,
            area,
            columns,
            separator: raw
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        })
    }
}

/// A loaded capture template.
#[derive(Debug, Clone, Default)]
pub struct Template {
    defaults: Option<AreaSpec>,
    shapes: IndexMap<String, ShapeDefinition>,
}

impl Template {
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_raw(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_raw(raw: RawTemplate) -> Result<Self> {
        let mut shapes = IndexMap::with_capacity(raw.shapes.len());
        for raw_shape in raw.shapes {
            let name = raw_shape.name.clone();
            if shapes.contains_key(&name) {
                return Err(CaptureError::DuplicateShape(name));
            }
            let shape = ShapeDefinition::resolve(raw_shape, raw.defaults.as_ref())
                .map_err(|e| e.in_shape(name.clone()))?;
            shapes.insert(name, shape);
        }
        tracing::debug!(shapes = shapes.len(), "loaded capture template");
        Ok(Self {
            defaults: raw.defaults,
            shapes,
        })
    }

    pub fn defaults(&self) -> Option<&AreaSpec> {
        self.defaults.as_ref()
    }

    pub fn shape(&self, name: &str) -> Option<&ShapeDefinition> {
        self.shapes.get(name)
    }

    /// Shapes in template order.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeDefinition> + '_ {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
