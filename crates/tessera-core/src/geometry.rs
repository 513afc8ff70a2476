#![forbid(unsafe_code)]

//! Signed geometric primitives.
//!
//! Canvas coordinates may be negative: blocks are routinely placed partly
//! outside their destination, and a canvas basis can be shifted with a
//! step. Everything is plain `i32`, so sizes can go negative in the middle
//! of a computation; [`Rect::normalize`] folds them back.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Rem, Sub, SubAssign};

/// A 2-D integer vector used both as a position and as a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// `(0, 0)`.
    pub const ZERO: Self = Self::new(0, 0);
    /// `(1, 1)`.
    pub const ONE: Self = Self::new(1, 1);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Both components set to `v`.
    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self::new(v, v)
    }

    /// Swap the components.
    #[inline]
    pub const fn transpose(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Component-wise clamp. `hi` wins when `lo > hi`.
    #[inline]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Per component: `if_less` where `self < what`, otherwise `if_not`.
    #[inline]
    pub fn less(self, what: Self, if_less: Self, if_not: Self) -> Self {
        Self::new(
            if self.x < what.x { if_less.x } else { if_not.x },
            if self.y < what.y { if_less.y } else { if_not.y },
        )
    }

    /// `x * y`, widened so large canvases never overflow.
    #[inline]
    pub const fn product(self) -> i64 {
        self.x as i64 * self.y as i64
    }

    /// Component-wise absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// True if both components are zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

macro_rules! point_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Point {
            type Output = Point;
            #[inline]
            fn $method(self, rhs: Point) -> Point {
                Point::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl $trait<i32> for Point {
            type Output = Point;
            #[inline]
            fn $method(self, rhs: i32) -> Point {
                Point::new(self.x $op rhs, self.y $op rhs)
            }
        }
    };
}

point_binop!(Add, add, +);
point_binop!(Sub, sub, -);
point_binop!(Mul, mul, *);
point_binop!(Div, div, /);
point_binop!(Rem, rem, %);

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// An axis-aligned rectangle: origin plus size.
///
/// The right and bottom edges are exclusive. A rectangle with a
/// non-positive width or height covers no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent in cells.
    pub size: Point,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Point, size: Point) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub const fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(Point::new(x, y), Point::new(w, h))
    }

    /// A rectangle of `size` at the origin.
    #[inline]
    pub const fn from_size(size: Point) -> Self {
        Self::new(Point::ZERO, size)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    /// Bottom-right corner (exclusive).
    #[inline]
    pub const fn end(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Number of covered cells; zero for degenerate rectangles.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() { 0 } else { self.size.product() }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x < self.right() && p.y >= self.origin.y && p.y < self.bottom()
    }

    /// Fold negative extents so the size is non-negative.
    ///
    /// A width of `-n` anchored at `x` becomes width `n` anchored at `x - n`.
    pub fn normalize(&self) -> Rect {
        let mut r = *self;
        if r.size.x < 0 {
            r.origin.x += r.size.x;
            r.size.x = -r.size.x;
        }
        if r.size.y < 0 {
            r.origin.y += r.size.y;
            r.size.y = -r.size.y;
        }
        r
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.origin.x.max(other.origin.x);
        let y = self.origin.y.max(other.origin.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::from_xywh(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// The smallest rectangle that contains both.
    pub fn union(&self, other: &Rect) -> Rect {
        let origin = self.origin.min(other.origin);
        let end = self.end().max(other.end());
        Rect::new(origin, end - origin)
    }

    /// Shrink by `margin` on each side. The size may go negative.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect::new(
            self.origin + Point::new(margin.left, margin.top),
            self.size - Point::new(margin.horizontal(), margin.vertical()),
        )
    }

    /// Grow by `margin` on each side.
    pub fn outer(&self, margin: Sides) -> Rect {
        Rect::new(
            self.origin - Point::new(margin.left, margin.top),
            self.size + Point::new(margin.horizontal(), margin.vertical()),
        )
    }

    /// Same rectangle moved by `delta`.
    #[inline]
    pub fn shift(&self, delta: Point) -> Rect {
        Rect::new(self.origin + delta, self.size)
    }

    /// Clamp `p` into the covered cells. Degenerate rectangles return the origin.
    pub fn clamp_point(&self, p: Point) -> Point {
        let last = (self.end() - Point::ONE).max(self.origin);
        p.clamp(self.origin, last)
    }
}

/// Per-side offsets (a "dent"), used to grow or shrink rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Sides {
    #[inline]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same offset on every side.
    #[inline]
    pub const fn all(n: i32) -> Self {
        Self::new(n, n, n, n)
    }

    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl Add for Sides {
    type Output = Sides;
    #[inline]
    fn add(self, rhs: Sides) -> Sides {
        Sides::new(
            self.left + rhs.left,
            self.right + rhs.right,
            self.top + rhs.top,
            self.bottom + rhs.bottom,
        )
    }
}

impl Sub for Sides {
    type Output = Sides;
    #[inline]
    fn sub(self, rhs: Sides) -> Sides {
        Sides::new(
            self.left - rhs.left,
            self.right - rhs.right,
            self.top - rhs.top,
            self.bottom - rhs.bottom,
        )
    }
}

/// Scan direction over a row or a flat cell array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub const fn is_backward(self) -> bool {
        matches!(self, Direction::Backward)
    }
}
