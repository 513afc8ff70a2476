#![forbid(unsafe_code)]

//! Rectangular pixel grids and the traversals shared by canvases and
//! bitmaps.
//!
//! # Layout
//!
//! Items are stored in row-major order: `index = y * width + x`, with
//! `(x, y)` relative to the grid's origin.
//!
//! # Coordinates
//!
//! A grid covers [`Grid::area`], a rectangle in some shared coordinate
//! space; its origin may be anywhere, including negative positions.
//! [`on_rect`] and [`on_body`] take rectangles in that shared space and
//! clip them to the grid. [`in_body`] and [`on_copy`] work on local
//! (index) coordinates.
//!
//! # Invariants
//!
//! 1. `items.len() == area.size.x * area.size.y`
//! 2. `area.size` is never negative

use core::ops::{Index, IndexMut};

use tessera_core::{Direction, Point, Rect, Sides};

/// A rectangular, row-major grid of items.
pub trait Grid {
    type Item;

    /// Covered rectangle in the shared coordinate space.
    fn area(&self) -> Rect;

    /// Rectangle that filters restrict themselves to.
    fn clip(&self) -> Rect {
        self.area()
    }

    fn items(&self) -> &[Self::Item];

    fn items_mut(&mut self) -> &mut [Self::Item];
}

/// `rect` clipped to `area`, in coordinates local to `area`.
fn local(area: Rect, rect: Rect) -> Option<Rect> {
    let r = rect.intersection_opt(&area)?;
    Some(Rect::new(r.origin - area.origin, r.size))
}

#[inline]
fn stride(area: Rect) -> usize {
    area.size.x.max(0) as usize
}

/// Row `y` of `r`, as an index range in a grid of width `stride`.
#[inline]
fn span(r: Rect, y: i32, stride: usize) -> core::ops::Range<usize> {
    let row = y as usize * stride;
    row + r.origin.x as usize..row + r.right() as usize
}

/// Apply `fx` to every item of `rect ∩ grid.area()`, row by row.
pub fn on_rect<G: Grid + ?Sized>(grid: &mut G, rect: Rect, mut fx: impl FnMut(&mut G::Item)) {
    on_rows(grid, rect, |_, row| row.iter_mut().for_each(&mut fx));
}

/// Hand each row of `rect ∩ grid.area()` to `fx` as a slice, together with
/// the row's index within the clipped rectangle.
pub fn on_rows<G: Grid + ?Sized>(
    grid: &mut G,
    rect: Rect,
    mut fx: impl FnMut(i32, &mut [G::Item]),
) {
    let area = grid.area();
    let Some(r) = local(area, rect) else {
        return;
    };
    let stride = stride(area);
    let items = grid.items_mut();
    for y in r.origin.y..r.bottom() {
        fx(y - r.origin.y, &mut items[span(r, y, stride)]);
    }
}

/// Visit `rect ∩ grid.area()` until `fx` returns `true`. Backward visits
/// rows bottom-up and each row right to left. Returns whether `fx`
/// stopped the walk.
pub fn on_rect_until<G: Grid + ?Sized>(
    grid: &G,
    rect: Rect,
    dir: Direction,
    mut fx: impl FnMut(&G::Item) -> bool,
) -> bool {
    let area = grid.area();
    let Some(r) = local(area, rect) else {
        return false;
    };
    let stride = stride(area);
    let items = grid.items();
    if dir.is_backward() {
        (r.origin.y..r.bottom())
            .rev()
            .any(|y| items[span(r, y, stride)].iter().rev().any(&mut fx))
    } else {
        (r.origin.y..r.bottom()).any(|y| items[span(r, y, stride)].iter().any(&mut fx))
    }
}

/// Apply `fx(dst, src)` over the overlap of both areas.
pub fn on_body<D, S>(dst: &mut D, src: &S, mut fx: impl FnMut(&mut D::Item, &S::Item))
where
    D: Grid + ?Sized,
    S: Grid + ?Sized,
{
    let (da, sa) = (dst.area(), src.area());
    let Some(joint) = da.intersection_opt(&sa) else {
        return;
    };
    in_body(dst, src, Rect::new(joint.origin - da.origin, joint.size), joint.origin - sa.origin, fx);
}

/// Apply `fx(dst, src)` over `joint` (local to `dst`), reading `src` from
/// `place` (local to `src`) onward. Parts falling outside either grid are
/// skipped.
pub fn in_body<D, S>(
    dst: &mut D,
    src: &S,
    joint: Rect,
    place: Point,
    mut fx: impl FnMut(&mut D::Item, &S::Item),
) where
    D: Grid + ?Sized,
    S: Grid + ?Sized,
{
    let (da, sa) = (dst.area(), src.area());
    let src_bounds = Rect::from_size(sa.size);
    let dst_bounds = Rect::from_size(da.size);
    // Express the source bounds in dst-local coordinates.
    let shifted = src_bounds.shift(joint.origin - place);
    let Some(r) = joint.intersection_opt(&dst_bounds).and_then(|j| j.intersection_opt(&shifted))
    else {
        return;
    };
    let place = place + (r.origin - joint.origin);
    let (dw, sw) = (stride(da), stride(sa));
    let src_items = src.items();
    let dst_items = dst.items_mut();
    for y in 0..r.size.y {
        let d = span(r, r.origin.y + y, dw);
        let s0 = (place.y + y) as usize * sw + place.x as usize;
        let s = &src_items[s0..s0 + r.size.x as usize];
        dst_items[d].iter_mut().zip(s).for_each(|(d, s)| fx(d, s));
    }
}

/// Apply `fx(dst, src)` index by index. Meant for grids of equal size;
/// otherwise the shorter one bounds the walk.
pub fn on_copy<D, S>(dst: &mut D, src: &S, mut fx: impl FnMut(&mut D::Item, &S::Item))
where
    D: Grid + ?Sized,
    S: Grid + ?Sized,
{
    dst.items_mut()
        .iter_mut()
        .zip(src.items())
        .for_each(|(d, s)| fx(d, s));
}

/// Stretch `src` over the whole of `dst` (nearest neighbor).
pub fn zoom_in<D, S>(dst: &mut D, src: &S, mut fx: impl FnMut(&mut D::Item, &S::Item))
where
    D: Grid + ?Sized,
    S: Grid + ?Sized,
{
    let (ds, ss) = (dst.area().size, src.area().size);
    if ds.x <= 0 || ds.y <= 0 || ss.x <= 0 || ss.y <= 0 {
        return;
    }
    let src_items = src.items();
    let dst_items = dst.items_mut();
    for y in 0..ds.y {
        let sy = (y as i64 * ss.y as i64 / ds.y as i64) as usize;
        for x in 0..ds.x {
            let sx = (x as i64 * ss.x as i64 / ds.x as i64) as usize;
            let d = y as usize * ds.x as usize + x as usize;
            fx(&mut dst_items[d], &src_items[sy * ss.x as usize + sx]);
        }
    }
}

/// Apply `fx` to a frame of `border` widths just inside `area`.
pub fn cage<G: Grid + ?Sized>(grid: &mut G, area: Rect, border: Sides, mut fx: impl FnMut(&mut G::Item)) {
    let mut strip = |grid: &mut G, r: Rect| {
        if let Some(r) = r.normalize().intersection_opt(&area) {
            on_rect(grid, r, &mut fx);
        }
    };
    let (o, s) = (area.origin, area.size);
    let top = border.top.max(0);
    let bottom = border.bottom.max(0);
    let side_h = (s.y - border.top - border.bottom).max(0);
    strip(grid, Rect::from_xywh(o.x, o.y, s.x, top));
    strip(grid, Rect::from_xywh(o.x, o.y + s.y - border.bottom, s.x, bottom));
    strip(grid, Rect::from_xywh(o.x, o.y + border.top, border.left.max(0), side_h));
    strip(
        grid,
        Rect::from_xywh(o.x + s.x - border.right, o.y + border.top, border.right.max(0), side_h),
    );
}

/// A plain bitmap: an area plus row-major pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Raster<T> {
    area: Rect,
    clip: Rect,
    data: Vec<T>,
}

impl<T: Clone> Raster<T> {
    /// A raster covering `area`, every pixel set to `fill`. Negative sizes
    /// become zero.
    pub fn new(area: Rect, fill: T) -> Self {
        let area = Rect::new(area.origin, area.size.max(Point::ZERO));
        Self {
            area,
            clip: area,
            data: vec![fill; area.size.product() as usize],
        }
    }

    /// Change the size, refilling every pixel with `fill`.
    pub fn resize(&mut self, size: Point, fill: T) {
        let size = size.max(Point::ZERO);
        self.area.size = size;
        self.clip = self.area;
        self.data.clear();
        self.data.resize(size.product() as usize, fill);
    }
}

impl<T> Raster<T> {
    /// Wrap existing pixels; `None` unless `data.len()` matches the area.
    pub fn from_vec(area: Rect, data: Vec<T>) -> Option<Self> {
        if area.size.x < 0 || area.size.y < 0 || data.len() as i64 != area.size.product() {
            return None;
        }
        Some(Self { area, clip: area, data })
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.area.size
    }

    /// Set the clip rectangle used by filters.
    #[inline]
    pub fn set_clip(&mut self, clip: Rect) {
        self.clip = clip;
    }

    /// Move the origin to `origin`.
    #[inline]
    pub fn move_to(&mut self, origin: Point) {
        self.area.origin = origin;
    }

    /// Shift the origin by `delta`.
    #[inline]
    pub fn step(&mut self, delta: Point) {
        self.area.origin += delta;
    }

    /// Pixel at local `p`.
    pub fn get(&self, p: Point) -> Option<&T> {
        Rect::from_size(self.area.size)
            .contains(p)
            .then(|| &self.data[p.y as usize * self.area.size.x as usize + p.x as usize])
    }

    /// Mutable pixel at local `p`.
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        if Rect::from_size(self.area.size).contains(p) {
            let i = p.y as usize * self.area.size.x as usize + p.x as usize;
            Some(&mut self.data[i])
        } else {
            None
        }
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Grid for Raster<T> {
    type Item = T;

    #[inline]
    fn area(&self) -> Rect {
        self.area
    }

    #[inline]
    fn clip(&self) -> Rect {
        self.clip
    }

    #[inline]
    fn items(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn items_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

/// Local coordinates. Panics when `p` is outside the raster.
impl<T> Index<Point> for Raster<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        debug_assert!(Rect::from_size(self.area.size).contains(p), "{p:?} outside raster");
        &self.data[p.y as usize * self.area.size.x as usize + p.x as usize]
    }
}

impl<T> IndexMut<Point> for Raster<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        debug_assert!(Rect::from_size(self.area.size).contains(p), "{p:?} outside raster");
        &mut self.data[p.y as usize * self.area.size.x as usize + p.x as usize]
    }
}
