//! Captured text entities, typed views and the aggregator that indexes them.

mod captures;
mod entity;
mod line;
mod projection;
mod readonly;
mod view;

pub use captures::Captures;
pub use entity::{CapturedEntity, ColumnEntity, RectangleEntity, ShapeKind};
pub use line::{LineEntity, LineSetEntity};
pub use projection::{ProjectedCapture, Projection, Row};
pub use readonly::ReadOnly;
pub use view::{CaptureView, LinesCapture, RectangleCapture};
