//! Property-based invariant tests for signed geometry (Point, Rect, Sides).
//!
//! 1. Intersection is commutative and fits within both inputs.
//! 2. Union contains both inputs.
//! 3. Contains agrees with intersection.
//! 4. Normalize yields non-negative sizes covering the same cells.
//! 5. Inner and outer margins are inverse.
//! 6. clamp_point always lands inside non-empty rectangles.

use proptest::prelude::*;
use tessera_core::geometry::{Point, Rect, Sides};

// ── Helpers ─────────────────────────────────────────────────────────────

fn point_strategy() -> impl Strategy<Value = Point> {
    (-500i32..=500, -500i32..=500).prop_map(|(x, y)| Point::new(x, y))
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..=500, -500i32..=500, 0i32..=300, 0i32..=300)
        .prop_map(|(x, y, w, h)| Rect::from_xywh(x, y, w, h))
}

fn signed_rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..=500, -500i32..=500, -300i32..=300, -300i32..=300)
        .prop_map(|(x, y, w, h)| Rect::from_xywh(x, y, w, h))
}

fn sides_strategy() -> impl Strategy<Value = Sides> {
    (0i32..=50, 0i32..=50, 0i32..=50, 0i32..=50)
        .prop_map(|(l, r, t, b)| Sides::new(l, r, t, b))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Intersection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersection_commutative(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_fits_within_both(a in rect_strategy(), b in rect_strategy()) {
        if let Some(i) = a.intersection_opt(&b) {
            prop_assert!(i.origin.x >= a.origin.x && i.origin.x >= b.origin.x);
            prop_assert!(i.origin.y >= a.origin.y && i.origin.y >= b.origin.y);
            prop_assert!(i.right() <= a.right() && i.right() <= b.right());
            prop_assert!(i.bottom() <= a.bottom() && i.bottom() <= b.bottom());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Union
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn union_contains_both(a in rect_strategy(), b in rect_strategy()) {
        let u = a.union(&b);
        prop_assert!(u.origin.x <= a.origin.x && u.origin.x <= b.origin.x);
        prop_assert!(u.right() >= a.right() && u.right() >= b.right());
        prop_assert!(u.bottom() >= a.bottom() && u.bottom() >= b.bottom());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Contains agrees with intersection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contains_agrees_with_intersection(
        a in rect_strategy(),
        b in rect_strategy(),
        p in point_strategy(),
    ) {
        let both = a.contains(p) && b.contains(p);
        let in_i = a.intersection_opt(&b).is_some_and(|i| i.contains(p));
        prop_assert_eq!(both, in_i);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Normalize
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_is_non_negative_and_idempotent(r in signed_rect_strategy()) {
        let n = r.normalize();
        prop_assert!(n.size.x >= 0 && n.size.y >= 0);
        prop_assert_eq!(n.normalize(), n);
        prop_assert_eq!(n.size, r.size.abs());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Margins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inner_outer_inverse(r in rect_strategy(), s in sides_strategy()) {
        prop_assert_eq!(r.outer(s).inner(s), r);
        prop_assert_eq!(r.inner(s).outer(s), r);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Clamping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_point_lands_inside(r in rect_strategy(), p in point_strategy()) {
        prop_assume!(!r.is_empty());
        prop_assert!(r.contains(r.clamp_point(p)));
    }
}
