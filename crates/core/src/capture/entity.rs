//! Captured entities - the immutable results of a confirmed zone match.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::area::Area;
use crate::error::{CaptureError, Result};

use super::line::{LineEntity, LineSetEntity};

/// Structural kind of a capture shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Line,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Line => "line",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "line" => Ok(ShapeKind::Line),
            _ => Err(CaptureError::UnknownShapeKind(s.to_string())),
        }
    }
}

/// Defines a leaf entity: a named piece of text found in one area of a page.
macro_rules! text_entity {
    ($(#[$meta:meta])* $ty:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            page: u32,
            name: String,
            text: String,
            area: Area,
        }

        impl $ty {
            pub const KIND: &'static str = $kind;

            pub fn new(
                page: u32,
                name: impl Into<String>,
                text: impl Into<String>,
                area: Area,
            ) -> Self {
                Self {
                    page,
                    name: name.into(),
                    text: text.into(),
                    area,
                }
            }

            pub fn page(&self) -> u32 {
                self.page
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn text(&self) -> &str {
                &self.text
            }

            pub fn area(&self) -> &Area {
                &self.area
            }
        }
    };
}

text_entity!(
    /// Text captured by a rectangle shape.
    RectangleEntity,
    "rectangle"
);

text_entity!(
    /// One column of a captured line.
    ColumnEntity,
    "column"
);

impl RectangleEntity {
    pub fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    /// Tests whether `other` falls inside the area this text was captured from.
    pub fn contains(&self, other: &Area) -> Result<bool> {
        Ok(self.area.contains(other))
    }
}

impl ColumnEntity {
    pub fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    /// Columns are detection results, not shapes; they cannot be matched against.
    pub fn contains(&self, _other: &Area) -> Result<bool> {
        Err(CaptureError::Unsupported {
            operation: "contains",
            kind: Self::KIND,
        })
    }
}

/// Any entity a scanner can report for a page.
///
/// Line captures may be reported row by row or grouped per page; both report
/// [`ShapeKind::Line`].
#[derive(Debug, Clone)]
pub enum CapturedEntity {
    Rectangle(Arc<RectangleEntity>),
    Line(Arc<LineEntity>),
    LineSet(Arc<LineSetEntity>),
}

impl CapturedEntity {
    pub fn name(&self) -> &str {
        match self {
            CapturedEntity::Rectangle(r) => r.name(),
            CapturedEntity::Line(l) => l.name(),
            CapturedEntity::LineSet(s) => s.name(),
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            CapturedEntity::Rectangle(r) => r.page(),
            CapturedEntity::Line(l) => l.page(),
            CapturedEntity::LineSet(s) => s.page(),
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            CapturedEntity::Rectangle(_) => ShapeKind::Rectangle,
            CapturedEntity::Line(_) | CapturedEntity::LineSet(_) => ShapeKind::Line,
        }
    }

    /// Entity kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CapturedEntity::Rectangle(_) => RectangleEntity::KIND,
            CapturedEntity::Line(_) => LineEntity::KIND,
            CapturedEntity::LineSet(_) => LineSetEntity::KIND,
        }
    }

    /// Captured text. A line set joins its lines with newlines.
    pub fn text(&self) -> String {
        match self {
            CapturedEntity::Rectangle(r) => r.text().to_string(),
            CapturedEntity::Line(l) => l.text().to_string(),
            CapturedEntity::LineSet(s) => s.text(),
        }
    }

    pub fn contains(&self, other: &Area) -> Result<bool> {
        match self {
            CapturedEntity::Rectangle(r) => r.contains(other),
            CapturedEntity::Line(l) => l.contains(other),
            CapturedEntity::LineSet(s) => s.contains(other),
        }
    }

    pub fn as_rectangle(&self) -> Option<&Arc<RectangleEntity>> {
        match self {
            CapturedEntity::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    /// Iterates the lines of a line or line-set entity; empty for rectangles.
    pub fn lines(&self) -> Box<dyn Iterator<Item = &Arc<LineEntity>> + '_> {
        match self {
            CapturedEntity::Rectangle(_) => Box::new(std::iter::empty()),
            CapturedEntity::Line(l) => Box::new(std::iter::once(l)),
            CapturedEntity::LineSet(s) => Box::new(s.iter()),
        }
    }
}

impl From<RectangleEntity> for CapturedEntity {
    fn from(entity: RectangleEntity) -> Self {
        CapturedEntity::Rectangle(Arc::new(entity))
    }
}

impl From<LineEntity> for CapturedEntity {
    fn from(entity: LineEntity) -> Self {
        CapturedEntity::Line(Arc::new(entity))
    }
}

impl From<LineSetEntity> for CapturedEntity {
    fn from(entity: LineSetEntity) -> Self {
        CapturedEntity::LineSet(Arc::new(entity))
    }
}
