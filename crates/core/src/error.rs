//! Error types for the capture engine.

use thiserror::Error;

/// Broad classification of a [`CaptureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or incomplete geometry or template.
    Configuration,
    /// Unknown capture, column, index or page.
    Lookup,
    /// Mutation of a read-only capture, or an operation the entity does not support.
    Unsupported,
    /// Reading a template or capture file failed.
    Io,
}

/// Primary error type for capture operations.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("{0} is mandatory")]
    MissingCoordinate(&'static str),

    #[error("either {corner} or {extent} required")]
    MissingExtent {
        corner: &'static str,
        extent: &'static str,
    },

    #[error("invalid area: {0}")]
    InvalidArea(String),

    #[error("unknown shape kind: {0}")]
    UnknownShapeKind(String),

    #[error("duplicate shape: {0}")]
    DuplicateShape(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("capture {name}: expected {expected} entity, got {got}")]
    ShapeKindMismatch {
        name: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("{path}: {source}")]
    Shape {
        path: String,
        #[source]
        source: Box<CaptureError>,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown capture: {0}")]
    UnknownCapture(String),

    #[error("unknown column {column} in line {line}")]
    UnknownColumn { line: String, column: String },

    #[error("index {index} out of range for {container} {name} of length {len}")]
    IndexOutOfRange {
        container: &'static str,
        name: String,
        index: usize,
        len: usize,
    },

    #[error("capture {name} has no entry on page {page}")]
    PageNotCaptured { name: String, page: u32 },

    #[error("capture {name} is a {actual} capture, not a {requested} capture")]
    WrongCaptureKind {
        name: String,
        requested: &'static str,
        actual: &'static str,
    },

    #[error("{operation} is not supported on {kind}")]
    Unsupported {
        operation: &'static str,
        kind: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::MissingCoordinate(_)
            | CaptureError::MissingExtent { .. }
            | CaptureError::InvalidArea(_)
            | CaptureError::UnknownShapeKind(_)
            | CaptureError::DuplicateShape(_)
            | CaptureError::InvalidShape(_)
            | CaptureError::ShapeKindMismatch { .. }
            | CaptureError::Json(_) => ErrorKind::Configuration,
            CaptureError::Shape { source, .. } => source.kind(),
            CaptureError::UnknownCapture(_)
            | CaptureError::UnknownColumn { .. }
            | CaptureError::IndexOutOfRange { .. }
            | CaptureError::PageNotCaptured { .. }
            | CaptureError::WrongCaptureKind { .. } => ErrorKind::Lookup,
            CaptureError::Unsupported { .. } => ErrorKind::Unsupported,
            CaptureError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub fn is_lookup(&self) -> bool {
        self.kind() == ErrorKind::Lookup
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind() == ErrorKind::Unsupported
    }

    /// Prefixes the error with the shape (or `shape.column`) it was raised for.
    pub(crate) fn in_shape(self, path: impl Into<String>) -> Self {
        CaptureError::Shape {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Convenience Result type alias for CaptureError.
pub type Result<T> = std::result::Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        assert_eq!(
            CaptureError::MissingCoordinate("left").to_string(),
            "left is mandatory"
        );
        assert_eq!(
            CaptureError::MissingExtent {
                corner: "right",
                extent: "width"
            }
            .to_string(),
            "either right or width required"
        );
        let wrapped = CaptureError::MissingCoordinate("top").in_shape("Items.sku");
        assert_eq!(wrapped.to_string(), "Items.sku: top is mandatory");
        assert!(wrapped.is_configuration());
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert!(CaptureError::UnknownCapture("x".into()).is_lookup());
        assert!(
            CaptureError::Unsupported {
                operation: "set",
                kind: "line"
            }
            .is_unsupported()
        );
    }
}
