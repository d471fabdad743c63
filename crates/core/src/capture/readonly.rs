//! Read-only container contract shared by captured lines, line sets and views.
//!
//! Captured results describe a decoded page and cannot be edited. The
//! mutators exist so callers that treat captures like ordinary containers get
//! a typed error instead of silently succeeding.

use crate::error::{CaptureError, Result};

fn rejected(operation: &'static str, kind: &'static str) -> CaptureError {
    CaptureError::Unsupported { operation, kind }
}

/// Mutators that always fail with [`CaptureError::Unsupported`].
pub trait ReadOnly {
    /// Entity kind reported in [`CaptureError::Unsupported`].
    const KIND: &'static str;

    fn try_set<K, V>(&self, _key: K, _value: V) -> Result<()> {
        Err(rejected("set", Self::KIND))
    }

    fn try_unset<K>(&self, _key: K) -> Result<()> {
        Err(rejected("unset", Self::KIND))
    }

    fn try_insert<V>(&self, _index: usize, _value: V) -> Result<()> {
        Err(rejected("insert", Self::KIND))
    }

    fn try_remove<K>(&self, _key: K) -> Result<()> {
        Err(rejected("remove", Self::KIND))
    }
}
