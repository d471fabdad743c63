//! pdfcapture - template-driven text capture for decoded PDF pages.
//!
//! A template declares named zones of a page: rectangles that resolve to a
//! single text, and lines made of named columns that may repeat down the
//! page. An external scanner matches decoded text runs against those zones
//! using [`Area::contains`] and reports the results as captured entities.
//! [`Captures`] indexes them and hands out per-name typed views and a plain
//! projection ready for serialization.

pub mod area;
pub mod capture;
pub mod error;
pub mod record;
pub mod template;

pub use area::{Area, AreaSpec};
pub use capture::{
    CaptureView, CapturedEntity, Captures, ColumnEntity, LineEntity, LineSetEntity, LinesCapture,
    ProjectedCapture, Projection, ReadOnly, RectangleCapture, RectangleEntity, ShapeKind,
};
pub use error::{CaptureError, ErrorKind, Result};
pub use record::CaptureDocument;
pub use template::{ColumnDefinition, ShapeDefinition, Template};
