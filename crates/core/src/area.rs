//! Page-space rectangles used to declare capture zones.
//!
//! Coordinates follow the PDF convention: origin at the bottom-left of the
//! page, y growing upward. Extents are inclusive, so an area spanning
//! `left..=right` is `right - left + 1` units wide.

use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, Result};

/// Construction input for an [`Area`].
///
/// Every key is optional; a JSON `null` counts as unset and falls back to the
/// defaults passed to [`Area::from_spec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl AreaSpec {
    pub fn corners(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            ..Self::default()
        }
    }

    pub fn extent(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// An axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Area {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

fn right_from_width(left: f64, width: f64) -> f64 {
    left + width - 1.0
}

fn bottom_from_height(top: f64, height: f64) -> f64 {
    top - height + 1.0
}

impl Area {
    /// Creates an area from its two corners.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self> {
        let area = Self {
            left,
            top,
            right,
            bottom,
        };
        area.validate()?;
        Ok(area)
    }

    /// Creates an area from its top-left anchor and inclusive extent.
    pub fn with_extent(left: f64, top: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(
            left,
            top,
            right_from_width(left, width),
            bottom_from_height(top, height),
        )
    }

    /// Resolves a possibly incomplete [`AreaSpec`] against optional defaults.
    ///
    /// Each key resolves on its own, `spec` first and then `defaults`. `left`
    /// and `top` are mandatory. The right edge is only derived as
    /// `left + width - 1` when neither side supplies `right`; the bottom edge
    /// likewise falls back to `top - height + 1`.
    pub fn from_spec(spec: &AreaSpec, defaults: Option<&AreaSpec>) -> Result<Self> {
        let fallback = defaults.copied().unwrap_or_default();

        let left = spec
            .left
            .or(fallback.left)
            .ok_or(CaptureError::MissingCoordinate("left"))?;
        let top = spec
            .top
            .or(fallback.top)
            .ok_or(CaptureError::MissingCoordinate("top"))?;

        let right = spec
            .right
            .or(fallback.right)
            .or_else(|| spec.width.or(fallback.width).map(|w| right_from_width(left, w)))
            .ok_or(CaptureError::MissingExtent {
                corner: "right",
                extent: "width",
            })?;
        let bottom = spec
            .bottom
            .or(fallback.bottom)
            .or_else(|| {
                spec.height
                    .or(fallback.height)
                    .map(|h| bottom_from_height(top, h))
            })
            .ok_or(CaptureError::MissingExtent {
                corner: "bottom",
                extent: "height",
            })?;

        Self::new(left, top, right, bottom)
    }

    fn validate(&self) -> Result<()> {
        let coords = [self.left, self.top, self.right, self.bottom];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(CaptureError::InvalidArea(format!(
                "non-finite coordinate in {:?}",
                coords
            )));
        }
        if self.right < self.left {
            return Err(CaptureError::InvalidArea(format!(
                "right ({}) is less than left ({})",
                self.right, self.left
            )));
        }
        if self.top < self.bottom {
            return Err(CaptureError::InvalidArea(format!(
                "top ({}) is less than bottom ({})",
                self.top, self.bottom
            )));
        }
        Ok(())
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left + 1.0
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom + 1.0
    }

    /// Resizes horizontally, keeping `left` fixed.
    pub fn set_width(&mut self, width: f64) -> Result<()> {
        let resized = Self::new(
            self.left,
            self.top,
            right_from_width(self.left, width),
            self.bottom,
        )?;
        *self = resized;
        Ok(())
    }

    /// Resizes vertically, keeping `top` fixed.
    pub fn set_height(&mut self, height: f64) -> Result<()> {
        let resized = Self::new(
            self.left,
            self.top,
            self.right,
            bottom_from_height(self.top, height),
        )?;
        *self = resized;
        Ok(())
    }

    /// Returns true if `other` lies entirely within this area.
    #[inline]
    pub fn contains(&self, other: &Area) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top <= self.top
            && other.bottom >= self.bottom
    }

    /// Returns the four corners as a spec, for use as another area's defaults.
    pub fn to_spec(&self) -> AreaSpec {
        AreaSpec::corners(self.left, self.top, self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_matches_corners() {
        for &(left, top, width, height) in &[
            (0.0, 100.0, 10.0, 5.0),
            (12.5, 700.0, 1.0, 1.0),
            (-20.0, 0.0, 300.0, 40.0),
        ] {
            let a = Area::with_extent(left, top, width, height).unwrap();
            let b = Area::new(left, top, left + width - 1.0, top - height + 1.0).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.width(), width);
            assert_eq!(a.height(), height);
        }
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let defaults = AreaSpec {
            height: Some(12.0),
            ..AreaSpec::default()
        };
        let spec = AreaSpec {
            left: Some(10.0),
            top: Some(100.0),
            width: Some(50.0),
            ..AreaSpec::default()
        };
        let area = Area::from_spec(&spec, Some(&defaults)).unwrap();
        assert_eq!(area.right(), 59.0);
        assert_eq!(area.bottom(), 89.0);
    }

    #[test]
    fn default_corner_beats_own_extent() {
        let defaults = AreaSpec {
            right: Some(500.0),
            bottom: Some(90.0),
            ..AreaSpec::default()
        };
        let spec = AreaSpec {
            left: Some(100.0),
            top: Some(100.0),
            width: Some(50.0),
            ..AreaSpec::default()
        };
        let area = Area::from_spec(&spec, Some(&defaults)).unwrap();
        assert_eq!(area.right(), 500.0);
        assert_eq!(area.bottom(), 90.0);
    }

    #[test]
    fn default_extent_used_when_no_corner() {
        let defaults = AreaSpec {
            width: Some(20.0),
            ..AreaSpec::default()
        };
        let spec = AreaSpec {
            left: Some(5.0),
            top: Some(50.0),
            bottom: Some(40.0),
            ..AreaSpec::default()
        };
        let area = Area::from_spec(&spec, Some(&defaults)).unwrap();
        assert_eq!(area.right(), 24.0);
    }

    #[test]
    fn inverted_area_rejected() {
        assert!(Area::new(10.0, 10.0, 5.0, 0.0).is_err());
        assert!(Area::new(0.0, 0.0, 5.0, 10.0).is_err());
        assert!(Area::new(f64::NAN, 0.0, 5.0, 0.0).is_err());
    }

    #[test]
    fn resize_keeps_anchor() {
        let mut area = Area::new(10.0, 100.0, 19.0, 91.0).unwrap();
        area.set_width(20.0).unwrap();
        area.set_height(5.0).unwrap();
        assert_eq!((area.left(), area.top()), (10.0, 100.0));
        assert_eq!((area.right(), area.bottom()), (29.0, 96.0));
        assert!(area.set_width(-3.0).is_err());
        assert_eq!(area.right(), 29.0);
    }
}
