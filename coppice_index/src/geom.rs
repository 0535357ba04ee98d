// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap predicates and area math over [`kurbo::Rect`].

use kurbo::Rect;

/// Asserts the well-formedness contract for an index rectangle: finite
/// coordinates, `x0 <= x1`, `y0 <= y1`.
pub(crate) fn debug_check(rect: Rect) {
    debug_assert!(
        rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite(),
        "rect coordinates must be finite"
    );
    debug_assert!(
        rect.x0 <= rect.x1 && rect.y0 <= rect.y1,
        "rect must be ordered (x0 <= x1, y0 <= y1)"
    );
}

/// Closed-interval AABB overlap test.
///
/// Unlike [`Rect::overlaps`]-style half-open tests, rectangles that merely
/// touch along an edge or at a corner count as overlapping here. A dragged
/// ghost skimming the edge of a row should already be a hit.
#[must_use]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// Area of the intersection of `a` and `b`, zero when they are disjoint.
///
/// Edge-touching rectangles overlap with area zero; callers ranking
/// candidates by covered area treat those as the weakest possible hit.
#[must_use]
pub fn overlap_area(a: Rect, b: Rect) -> f64 {
    let width = a.x1.min(b.x1) - a.x0.max(b.x0);
    let height = a.y1.min(b.y1) - a.y0.max(b.y0);
    if width < 0.0 || height < 0.0 {
        0.0
    } else {
        width * height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert!(!overlaps(a, b));
        assert_eq!(overlap_area(a, b), 0.0);
    }

    #[test]
    fn edge_touching_counts_as_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(overlaps(a, b));
        assert_eq!(overlap_area(a, b), 0.0);

        let corner = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(overlaps(a, corner));
    }

    #[test]
    fn proper_overlap_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(overlaps(a, b));
        assert_eq!(overlap_area(a, b), 25.0);
        assert_eq!(overlap_area(b, a), 25.0);
    }

    #[test]
    fn containment_is_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 60.0, 60.0);
        assert!(overlaps(outer, inner));
        assert_eq!(overlap_area(outer, inner), 400.0);
    }
}
