//! Page-indexed typed views over one capture name.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use crate::error::{CaptureError, Result};

use super::entity::{CapturedEntity, RectangleEntity, ShapeKind};
use super::line::LineEntity;
use super::readonly::ReadOnly;

fn mismatch(name: &str, expected: ShapeKind, entity: &CapturedEntity) -> CaptureError {
    CaptureError::ShapeKindMismatch {
        name: name.to_string(),
        expected: expected.as_str(),
        got: entity.kind_name(),
    }
}

/// Rectangle capture results keyed by page number.
///
/// A rectangle resolves to one text per page; if the scanner reported the
/// same name twice on a page, the later entity wins.
#[derive(Debug, Clone)]
pub struct RectangleCapture {
    name: String,
    pages: BTreeMap<u32, Arc<RectangleEntity>>,
}

impl RectangleCapture {
    pub const KIND: &'static str = "rectangle capture";

    pub fn new<'a>(
        name: impl Into<String>,
        entities: impl IntoIterator<Item = &'a CapturedEntity>,
    ) -> Result<Self> {
        let name = name.into();
        let mut pages = BTreeMap::new();
        for entity in entities {
            let rect = entity
                .as_rectangle()
                .ok_or_else(|| mismatch(&name, ShapeKind::Rectangle, entity))?;
            pages.insert(rect.page(), Arc::clone(rect));
        }
        Ok(Self { name, pages })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, page: u32) -> Result<&RectangleEntity> {
        self.pages
            .get(&page)
            .map(|entity| &**entity)
            .ok_or_else(|| CaptureError::PageNotCaptured {
                name: self.name.clone(),
                page,
            })
    }

    pub fn text(&self, page: u32) -> Result<&str> {
        self.get(page).map(RectangleEntity::text)
    }

    pub fn contains_page(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Populated page numbers, ascending.
    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, u32, Arc<RectangleEntity>> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl ReadOnly for RectangleCapture {
    const KIND: &'static str = RectangleCapture::KIND;
}

impl<'a> IntoIterator for &'a RectangleCapture {
    type Item = (&'a u32, &'a Arc<RectangleEntity>);
    type IntoIter = btree_map::Iter<'a, u32, Arc<RectangleEntity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Line capture results keyed by page number.
///
/// Each page holds every row detected there, in detection order. Line sets
/// are flattened into their rows.
#[derive(Debug, Clone)]
pub struct LinesCapture {
    name: String,
    pages: BTreeMap<u32, Vec<Arc<LineEntity>>>,
}

impl LinesCapture {
    pub const KIND: &'static str = "lines capture";

    pub fn new<'a>(
        name: impl Into<String>,
        entities: impl IntoIterator<Item = &'a CapturedEntity>,
    ) -> Result<Self> {
        let name = name.into();
        let mut pages: BTreeMap<u32, Vec<Arc<LineEntity>>> = BTreeMap::new();
        for entity in entities {
            if entity.shape_kind() != ShapeKind::Line {
                return Err(mismatch(&name, ShapeKind::Line, entity));
            }
            let rows = pages.entry(entity.page()).or_default();
            rows.extend(entity.lines().cloned());
        }
        Ok(Self { name, pages })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows detected on `page`, in detection order.
    pub fn get(&self, page: u32) -> Result<&[Arc<LineEntity>]> {
        self.pages
            .get(&page)
            .map(Vec::as_slice)
            .ok_or_else(|| CaptureError::PageNotCaptured {
                name: self.name.clone(),
                page,
            })
    }

    pub fn contains_page(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, u32, Vec<Arc<LineEntity>>> {
        self.pages.iter()
    }

    /// Every row across all pages, in page order.
    pub fn rows(&self) -> impl Iterator<Item = &Arc<LineEntity>> + '_ {
        self.pages.values().flatten()
    }

    /// Number of populated pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl ReadOnly for LinesCapture {
    const KIND: &'static str = LinesCapture::KIND;
}

impl<'a> IntoIterator for &'a LinesCapture {
    type Item = (&'a u32, &'a Vec<Arc<LineEntity>>);
    type IntoIter = btree_map::Iter<'a, u32, Vec<Arc<LineEntity>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The view [`Captures::get`](super::Captures::get) returns for a name.
#[derive(Debug, Clone)]
pub enum CaptureView {
    Rectangle(RectangleCapture),
    Lines(LinesCapture),
}

impl CaptureView {
    /// Builds the view matching `kind` over a name's entities.
    pub(crate) fn build(name: &str, kind: ShapeKind, entities: &[CapturedEntity]) -> Result<Self> {
        match kind {
            ShapeKind::Rectangle => {
                RectangleCapture::new(name, entities).map(CaptureView::Rectangle)
            }
            ShapeKind::Line => LinesCapture::new(name, entities).map(CaptureView::Lines),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CaptureView::Rectangle(r) => r.name(),
            CaptureView::Lines(l) => l.name(),
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            CaptureView::Rectangle(_) => ShapeKind::Rectangle,
            CaptureView::Lines(_) => ShapeKind::Line,
        }
    }

    pub fn as_rectangle(&self) -> Option<&RectangleCapture> {
        match self {
            CaptureView::Rectangle(r) => Some(r),
            CaptureView::Lines(_) => None,
        }
    }

    pub fn as_lines(&self) -> Option<&LinesCapture> {
        match self {
            CaptureView::Lines(l) => Some(l),
            CaptureView::Rectangle(_) => None,
        }
    }

    pub fn pages(&self) -> Vec<u32> {
        match self {
            CaptureView::Rectangle(r) => r.pages().collect(),
            CaptureView::Lines(l) => l.pages().collect(),
        }
    }
}

impl ReadOnly for CaptureView {
    const KIND: &'static str = "capture view";
}
