#![forbid(unsafe_code)]

//! Window resize grips.
//!
//! [`SizeGrips`] tracks the pointer over a window's outer border, works out
//! which corner quadrant it is in, and produces the two grip rectangles
//! (one horizontal, one vertical) that highlight the edges a drag from
//! there would move. Grip rectangles are stored relative to the active
//! corner and placed with [`SizeGrips::layout`].

use tessera_core::{Point, Rect, Sides};

use crate::grid::{Grid, on_rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeGrips {
    /// Grab offset from the active corner.
    pub origin: Point,
    /// Per axis, `1` if dragging moves the window origin.
    pub dtcoor: Point,
    /// Active quadrant, `±1` per axis.
    pub sector: Point,
    pub hzgrip: Rect,
    pub vtgrip: Rect,
    /// Signed border widths on the active side.
    pub widths: Point,
    /// Pointer is over the border.
    pub inside: bool,
    /// A drag is in progress.
    pub seized: bool,
}

impl SizeGrips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hovered or dragging.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.inside || self.seized
    }

    /// The active corner of a rectangle of `length`.
    #[inline]
    pub fn corner(&self, length: Point) -> Point {
        self.dtcoor.less(Point::ONE, length, Point::ZERO)
    }

    /// `cur` relative to `basis`, snapped down to the cell grid.
    pub fn quantize(&self, cur: Point, basis: Point, cell: Point) -> Point {
        let cur = cur - basis;
        cur - (cur + cell) % cell
    }

    /// Start dragging if the pointer is over the border.
    pub fn grab(&mut self, window: Rect, cur: Point, outer: Sides, cell: Point) -> bool {
        if self.inside {
            let outer_rect = window.outer(outer);
            let cur = self.quantize(cur, outer_rect.origin, cell);
            self.origin = cur - self.corner(outer_rect.size);
            self.seized = true;
        }
        self.seized
    }

    /// Pointer left the window. Returns whether the hover state changed.
    pub fn leave(&mut self) -> bool {
        core::mem::replace(&mut self.inside, false)
    }

    /// Update hover state and grips for pointer position `cur`. Returns
    /// whether anything visible changed.
    pub fn calc(&mut self, window: Rect, cur: Point, outer: Sides, inner: Sides, cell: Point) -> bool {
        let border = outer - inner;
        let inside_old = self.inside;
        let (hz_old, vt_old) = (self.hzgrip, self.vtgrip);
        let inner_rect = window.outer(inner);
        let outer_rect = window.outer(outer);
        self.inside = !inner_rect.contains(cur) && outer_rect.contains(cur);
        let length = outer_rect.size;
        let cur = self.quantize(cur, outer_rect.origin, cell);
        let center = (length / 2).max(Point::ONE);
        if !self.seized {
            let odd = Point::new(length.x & 1, length.y & 1);
            self.dtcoor = cur.less(center + odd, Point::ONE, Point::ZERO);
            self.sector = self.dtcoor.less(Point::ONE, -Point::ONE, Point::ONE);
            self.widths = self.sector.less(
                Point::ZERO,
                Point::new(-border.right, -border.bottom),
                Point::new(border.left, border.top),
            );
        }
        let l = self.sector * (cur - self.corner(length));
        let a = center * l / center;
        let b = center * l.transpose() / center.transpose();
        let extra = self.sector.less(Point::ZERO, Point::ZERO, cell);
        let s = self.sector * (a - b + center + extra).max(Point::ZERO);

        self.hzgrip = Rect::new(Point::new(self.widths.x, 0), Point::new(s.x - s.x % cell.x, self.widths.y));
        self.vtgrip = Rect::new(Point::ZERO, self.widths + Point::new(0, s.y - s.y % cell.y));

        inside_old != self.inside || (self.inside && (hz_old != self.hzgrip || vt_old != self.vtgrip))
    }

    /// Preview rectangle and size delta for dragging to `cur`. With `zoom`
    /// the window grows symmetrically around its center.
    pub fn drag(&self, window: Rect, cur: Point, outer: Sides, zoom: bool, cell: Point) -> (Rect, Point) {
        let outer_rect = window.outer(outer);
        let cur = self.quantize(cur, outer_rect.origin, cell);
        let mut delta = (self.corner(outer_rect.size) + self.origin - cur) * self.sector;
        if zoom {
            delta = delta * 2;
        }
        let step = if zoom { -delta / 2 } else { -delta * self.dtcoor };
        (Rect::new(window.origin + step, window.size + delta), delta)
    }

    /// Origin shift for a size change of `dxdy`.
    pub fn move_by(&self, dxdy: Point, zoom: bool) -> Point {
        if zoom { -dxdy / 2 } else { -dxdy * self.dtcoor }
    }

    pub fn drop(&mut self) {
        self.seized = false;
    }

    /// Horizontal and vertical grips placed on `area`.
    pub fn layout(&self, area: Rect) -> (Rect, Rect) {
        let vertex = self.corner(area.size);
        let place = |grip: Rect| {
            grip.shift(vertex)
                .normalize()
                .shift(area.origin)
                .intersection(&area)
        };
        (place(self.hzgrip), place(self.vtgrip))
    }

    /// Apply `fx` to both grips on `area`.
    pub fn draw<G: Grid + ?Sized>(&self, canvas: &mut G, area: Rect, mut fx: impl FnMut(&mut G::Item)) {
        let (side_x, side_y) = self.layout(area);
        on_rect(canvas, side_x, &mut fx);
        on_rect(canvas, side_y, &mut fx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Raster;

    const WINDOW: Rect = Rect::from_xywh(10, 10, 20, 10);
    const OUTER: Sides = Sides::all(1);
    const INNER: Sides = Sides::all(0);

    // ====== Hover tests ======

    #[test]
    fn top_left_corner() {
        let mut g = SizeGrips::new();
        assert!(g.calc(WINDOW, Point::new(9, 9), OUTER, INNER, Point::ONE));
        assert!(g.inside);
        assert_eq!(g.sector, Point::ONE);
        assert_eq!(g.hzgrip, Rect::from_xywh(1, 0, 12, 1));
        assert_eq!(g.vtgrip, Rect::from_xywh(0, 0, 1, 8));
        let area = WINDOW.outer(OUTER);
        assert_eq!(g.layout(area), (Rect::from_xywh(10, 9, 12, 1), Rect::from_xywh(9, 9, 1, 8)));
    }

    #[test]
    fn bottom_right_corner() {
        let mut g = SizeGrips::new();
        g.calc(WINDOW, Point::new(30, 19), OUTER, INNER, Point::ONE);
        assert_eq!(g.sector, -Point::ONE);
        assert_eq!(g.dtcoor, Point::ZERO);
        let (side_x, side_y) = g.layout(WINDOW.outer(OUTER));
        assert_eq!(side_x, Rect::from_xywh(21, 20, 9, 1));
        assert_eq!(side_y, Rect::from_xywh(30, 12, 1, 9));
    }

    #[test]
    fn pointer_inside_window_is_not_a_grip() {
        let mut g = SizeGrips::new();
        assert!(!g.calc(WINDOW, Point::new(15, 15), OUTER, INNER, Point::ONE));
        assert!(!g.is_active());
    }

    #[test]
    fn leave_reports_change_once() {
        let mut g = SizeGrips::new();
        g.calc(WINDOW, Point::new(9, 9), OUTER, INNER, Point::ONE);
        assert!(g.leave());
        assert!(!g.leave());
    }

    #[test]
    fn quantize_snaps_to_cells() {
        let g = SizeGrips::new();
        assert_eq!(g.quantize(Point::new(13, 7), Point::new(1, 1), Point::new(4, 4)), Point::new(12, 4));
    }

    // ====== Drag tests ======

    #[test]
    fn drag_bottom_right_grows_size() {
        let mut g = SizeGrips::new();
        g.calc(WINDOW, Point::new(30, 19), OUTER, INNER, Point::ONE);
        assert!(g.grab(WINDOW, Point::new(30, 19), OUTER, Point::ONE));
        let (area, delta) = g.drag(WINDOW, Point::new(32, 21), OUTER, false, Point::ONE);
        assert_eq!(delta, Point::new(2, 2));
        assert_eq!(area, Rect::from_xywh(10, 10, 22, 12));
        let (zoomed, _) = g.drag(WINDOW, Point::new(32, 21), OUTER, true, Point::ONE);
        assert_eq!(zoomed, Rect::from_xywh(8, 8, 24, 14));
        g.drop();
        assert!(!g.seized);
    }

    #[test]
    fn drag_top_left_moves_origin() {
        let mut g = SizeGrips::new();
        g.calc(WINDOW, Point::new(9, 9), OUTER, INNER, Point::ONE);
        g.grab(WINDOW, Point::new(9, 9), OUTER, Point::ONE);
        let (area, delta) = g.drag(WINDOW, Point::new(7, 8), OUTER, false, Point::ONE);
        assert_eq!(delta, Point::new(2, 1));
        assert_eq!(area, Rect::from_xywh(8, 9, 22, 11));
        assert_eq!(g.move_by(delta, false), Point::new(-2, -1));
    }

    #[test]
    fn grab_without_hover_fails() {
        let mut g = SizeGrips::new();
        assert!(!g.grab(WINDOW, Point::new(9, 9), OUTER, Point::ONE));
    }

    #[test]
    fn draw_paints_both_grips() {
        let mut g = SizeGrips::new();
        g.calc(WINDOW, Point::new(9, 9), OUTER, INNER, Point::ONE);
        let area = WINDOW.outer(OUTER);
        let mut canvas = Raster::new(area, 0u8);
        g.draw(&mut canvas, area, |v| *v += 1);
        assert_eq!(canvas.data().iter().filter(|&&v| v > 0).count(), 12 + 8);
    }
}
