//! Axis-aligned rectangle overlap
//!
//! Two boxes overlap when the center of one lies strictly inside the other
//! grown by the first one's extents (a Minkowski sum). Touching edges do not
//! count.

use crate::math::Rect2;

/// Check whether two rectangles overlap (boundary exclusive)
pub fn intersects(a: &Rect2, b: &Rect2) -> bool {
    a.grown_by(b).contains_point(b.center())
}
