//! The capture aggregator.
//!
//! `Captures` owns every entity found in a document. It is built once, after
//! all pages have been scanned, and indexes the entities by page and by
//! capture name. Typed views are materialized on first lookup and cached, so
//! repeated lookups return the same instance.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;

use crate::error::{CaptureError, Result};

use super::entity::{CapturedEntity, ShapeKind};
use super::projection::{ProjectedCapture, Projection, project_lines, project_rectangles};
use super::view::{CaptureView, LinesCapture, RectangleCapture};

#[derive(Debug, Default)]
pub struct Captures {
    by_page: BTreeMap<u32, Vec<CapturedEntity>>,
    by_name: IndexMap<String, Vec<CapturedEntity>>,
    views: FxHashMap<String, OnceCell<CaptureView>>,
}

impl Captures {
    /// Indexes entities grouped by page.
    ///
    /// Name buckets are filled visiting pages in ascending order and, within
    /// a page, entities in detection order. An entity filed under a page other
    /// than its own is moved to the bucket for [`CapturedEntity::page`].
    pub fn new(by_page: BTreeMap<u32, Vec<CapturedEntity>>) -> Self {
        let by_page = rekey_by_entity_page(by_page);
        let mut by_name: IndexMap<String, Vec<CapturedEntity>> = IndexMap::new();
        for entities in by_page.values() {
            for entity in entities {
                by_name
                    .entry(entity.name().to_string())
                    .or_default()
                    .push(entity.clone());
            }
        }

        let views = by_name
            .keys()
            .map(|name| (name.clone(), OnceCell::new()))
            .collect();

        tracing::debug!(
            pages = by_page.len(),
            names = by_name.len(),
            "indexed captured entities"
        );

        Self {
            by_page,
            by_name,
            views,
        }
    }

    /// Groups a flat list of entities by their page, keeping list order.
    pub fn from_entities(entities: impl IntoIterator<Item = CapturedEntity>) -> Self {
        Self::new(group_by_page(entities))
    }

    /// Returns the typed view for a capture name.
    ///
    /// The view is built on the first call and cached; later calls return the
    /// same instance. The shape kind of the name's first entity decides which
    /// view is built.
    pub fn get(&self, name: &str) -> Result<&CaptureView> {
        let (cell, entities) = match (self.views.get(name), self.by_name.get(name)) {
            (Some(cell), Some(entities)) => (cell, entities),
            _ => return Err(CaptureError::UnknownCapture(name.to_string())),
        };

        cell.get_or_try_init(|| {
            let kind = entities
                .first()
                .map(CapturedEntity::shape_kind)
                .ok_or_else(|| CaptureError::UnknownCapture(name.to_string()))?;
            tracing::debug!(name, %kind, entities = entities.len(), "materializing capture view");
            CaptureView::build(name, kind, entities)
        })
    }

    /// Returns the rectangle view for `name`.
    pub fn rectangle(&self, name: &str) -> Result<&RectangleCapture> {
        let view = self.get(name)?;
        view.as_rectangle()
            .ok_or_else(|| CaptureError::WrongCaptureKind {
                name: name.to_string(),
                requested: ShapeKind::Rectangle.as_str(),
                actual: view.shape_kind().as_str(),
            })
    }

    /// Returns the lines view for `name`.
    pub fn lines(&self, name: &str) -> Result<&LinesCapture> {
        let view = self.get(name)?;
        view.as_lines().ok_or_else(|| CaptureError::WrongCaptureKind {
            name: name.to_string(),
            requested: ShapeKind::Line.as_str(),
            actual: view.shape_kind().as_str(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Capture names in first-detection order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_name.keys().map(String::as_str)
    }

    pub fn names_to_entities(&self) -> &IndexMap<String, Vec<CapturedEntity>> {
        &self.by_name
    }

    pub fn pages_to_entities(&self) -> &BTreeMap<u32, Vec<CapturedEntity>> {
        &self.by_page
    }

    pub fn page_count(&self) -> usize {
        self.by_page.len()
    }

    /// Total number of entities across all pages.
    pub fn len(&self) -> usize {
        self.by_page.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_page.values().all(Vec::is_empty)
    }

    /// Flattens every capture into plain values.
    ///
    /// Rectangle captures become a page → text map; line captures become one
    /// list of column → text rows spanning all pages. Fails on the first
    /// capture whose entities disagree on their shape kind.
    pub fn project(&self) -> Result<Projection> {
        let mut projection = Projection::default();
        for (name, entities) in &self.by_name {
            let Some(first) = entities.first() else {
                continue;
            };
            let projected = match first.shape_kind() {
                ShapeKind::Rectangle => {
                    ProjectedCapture::Pages(project_rectangles(name, entities)?)
                }
                ShapeKind::Line => ProjectedCapture::Rows(project_lines(name, entities)?),
            };
            tracing::trace!(name = name.as_str(), "projected capture");
            projection.insert(name.clone(), projected);
        }
        Ok(projection)
    }
}

fn group_by_page(
    entities: impl IntoIterator<Item = CapturedEntity>,
) -> BTreeMap<u32, Vec<CapturedEntity>> {
    let mut by_page: BTreeMap<u32, Vec<CapturedEntity>> = BTreeMap::new();
    for entity in entities {
        by_page.entry(entity.page()).or_default().push(entity);
    }
    by_page
}

fn rekey_by_entity_page(
    by_page: BTreeMap<u32, Vec<CapturedEntity>>,
) -> BTreeMap<u32, Vec<CapturedEntity>> {
    let misfiled = by_page
        .iter()
        .flat_map(|(page, entities)| entities.iter().map(move |e| (*page, e)))
        .filter(|(page, entity)| entity.page() != *page)
        .count();
    if misfiled == 0 {
        return by_page;
    }
    tracing::warn!(misfiled, "entities filed under the wrong page were moved");
    group_by_page(by_page.into_values().flatten())
}
