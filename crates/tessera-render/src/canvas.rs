#![forbid(unsafe_code)]

//! Canvas: a rectangular block of cells placed somewhere in a shared
//! coordinate space.
//!
//! # Layout
//!
//! Cells are stored row-major, `index = y * width + x`, with `(x, y)`
//! relative to the canvas origin. Methods taking a [`Rect`] or a "shared"
//! point work in the coordinate space that `region` lives in; `get`,
//! `get_mut` and indexing take local coordinates.
//!
//! # Invariants
//!
//! 1. `cells.len() == region.size.x * region.size.y`
//! 2. `client` is meant to lie within `region`; default fills target it
//!    but nothing enforces it
//! 3. Every reallocation bumps the resize stamp
//!
//! # Example
//!
//! ```
//! use tessera_core::{Point, Rect};
//! use tessera_render::canvas::Canvas;
//! use tessera_render::cell::Cell;
//! use tessera_render::shader::Full;
//!
//! let mut canvas = Canvas::with_brush(Rect::from_xywh(0, 0, 8, 2), Cell::from_byte(b'.'));
//! let block = Canvas::line(Cell::from_byte(b'#'), 3);
//! canvas.plot(&block, Full);
//! assert_eq!(canvas[Point::new(2, 0)], Cell::from_byte(b'#'));
//! assert_eq!(canvas[Point::new(3, 0)], Cell::from_byte(b'.'));
//! ```

use core::ops::{AddAssign, Index, IndexMut};

use unicode_segmentation::UnicodeSegmentation;

use tessera_core::text::{ZWSP, first_codepoint, grapheme_width};
use tessera_core::{Direction, Point, Rect, Sides};

use crate::cell::Cell;
use crate::color::Argb;
use crate::glyph::MAX_WIDTH;
use crate::grid::{self, Grid};
use crate::jumbo::Jumbos;
use crate::scan::Svga;
use crate::shader::{Compose, Full, Paint};

/// A block of cells with a placement, an active client area, and a
/// default brush.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    region: Rect,
    client: Rect,
    cells: Vec<Cell>,
    marker: Cell,
    digest: i32,
}

impl Canvas {
    /// A canvas covering `area`, filled with empty cells.
    pub fn new(area: Rect) -> Self {
        Self::with_brush(area, Cell::default())
    }

    /// A canvas covering `area`, filled with `brush`, which also becomes
    /// the default brush.
    pub fn with_brush(area: Rect, brush: Cell) -> Self {
        let size = area.size.max(Point::ZERO);
        Self {
            region: Rect::new(area.origin, size),
            client: Rect::from_size(size),
            cells: vec![brush; size.product() as usize],
            marker: brush,
            digest: 0,
        }
    }

    /// Wrap existing cells at the origin. `None` unless the cell count
    /// matches `size`.
    pub fn from_cells(cells: Vec<Cell>, size: Point) -> Option<Self> {
        if size.x < 0 || size.y < 0 || cells.len() as i64 != size.product() {
            return None;
        }
        Some(Self {
            region: Rect::from_size(size),
            client: Rect::from_size(size),
            cells,
            ..Self::default()
        })
    }

    /// A single row of `length` copies of `fill`.
    pub fn line(fill: Cell, length: i32) -> Self {
        Self::with_brush(Rect::from_xywh(0, 0, length, 1), fill)
    }

    // ========== Geometry ==========

    /// Cell count.
    #[inline]
    pub fn volume(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.region.size
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.region.origin
    }

    #[inline]
    pub fn area(&self) -> Rect {
        self.region
    }

    /// Resize to `area.size`, move to `area.origin` and make `area` the
    /// client rectangle.
    pub fn set_area(&mut self, area: Rect) {
        self.set_area_with(area, self.marker);
    }

    /// As [`Canvas::set_area`], refilling with `brush` if the size changes.
    pub fn set_area_with(&mut self, area: Rect, brush: Cell) {
        self.resize_with(area.size, brush);
        self.move_to(area.origin);
        self.set_clip(area);
    }

    #[inline]
    pub fn move_to(&mut self, origin: Point) {
        self.region.origin = origin;
    }

    #[inline]
    pub fn step(&mut self, delta: Point) {
        self.region.origin += delta;
    }

    /// Client rectangle.
    #[inline]
    pub fn clip(&self) -> Rect {
        self.client
    }

    #[inline]
    pub fn set_clip(&mut self, client: Rect) {
        self.client = client;
    }

    /// Resize stamp.
    #[inline]
    pub fn stamp(&self) -> i32 {
        self.digest
    }

    /// Adopt `stamp`, reporting whether it differed from ours.
    pub fn refresh(&mut self, stamp: i32) -> bool {
        if self.digest != stamp {
            self.digest = stamp;
            true
        } else {
            false
        }
    }

    /// Local coordinates of a cell offset, clamped into the canvas.
    pub fn toxy(&self, offset: i32) -> Point {
        let len = self.cells.len() as i32;
        if len == 0 {
            return Point::ZERO;
        }
        let offset = offset.clamp(0, len - 1);
        let sx = self.region.size.x.max(1);
        Point::new(offset % sx, offset / sx)
    }

    // ========== Brush and identity ==========

    /// Default brush.
    #[inline]
    pub fn mark(&self) -> &Cell {
        &self.marker
    }

    pub fn set_mark(&mut self, brush: Cell) -> &mut Cell {
        self.marker = brush;
        &mut self.marker
    }

    /// Link id of the default brush.
    #[inline]
    pub fn default_link(&self) -> u32 {
        self.marker.id
    }

    #[inline]
    pub fn set_default_link(&mut self, id: u32) {
        self.marker.id = id;
    }

    /// Link id of the cell at local `p`.
    pub fn link(&self, p: Point) -> Option<u32> {
        self.get(p).map(|c| c.id)
    }

    // ========== Cell access ==========

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    #[inline]
    fn offset(&self, p: Point) -> Option<usize> {
        Rect::from_size(self.region.size)
            .contains(p)
            .then(|| p.y as usize * self.region.size.x as usize + p.x as usize)
    }

    /// Cell at local `p`.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.offset(p).map(|i| &self.cells[i])
    }

    /// Mutable cell at local `p`.
    pub fn get_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.offset(p).map(move |i| &mut self.cells[i])
    }

    /// Mutable cell at shared-space `p`.
    pub fn peek(&mut self, p: Point) -> Option<&mut Cell> {
        let local = p - self.region.origin;
        self.get_mut(local)
    }

    // ========== Resize ==========

    /// Reallocate at `size`, filled with the default brush.
    pub fn resize(&mut self, size: Point) {
        self.resize_with(size, self.marker);
    }

    /// Reallocate at `size`, filled with `brush`. The client rectangle
    /// takes the new size. Nothing is refilled if the size is unchanged.
    pub fn resize_with(&mut self, size: Point, brush: Cell) {
        let size = size.max(Point::ZERO);
        if self.region.size != size {
            tessera_core::trace!(from = ?self.region.size, to = ?size, "canvas resize");
            self.region.size = size;
            self.digest += 1;
            self.cells.clear();
            self.cells.resize(size.product() as usize, brush);
        }
        self.client.size = size;
    }

    /// Reshape into a single row of `width` copies of `brush`.
    pub fn resize_line(&mut self, width: i32, brush: Cell) {
        let width = width.max(0);
        self.region.size = Point::new(width, 1);
        self.client.size = self.region.size;
        self.cells.clear();
        self.cells.resize(width as usize, brush);
        self.digest += 1;
    }

    /// Reshape into a single row of `width` cells, keeping the leading
    /// cells and padding with `brush`.
    pub fn crop_line(&mut self, width: i32, brush: Cell) {
        let width = width.max(0);
        self.region.size = Point::new(width, 1);
        self.client.size = self.region.size;
        self.cells.resize(width as usize, brush);
        self.digest += 1;
    }

    /// Append one cell to a single-row canvas.
    pub fn push(&mut self, c: Cell) {
        self.crop_line(self.region.size.x + 1, c);
    }

    /// Copy of `len` cells starting at offset `at`, as a single row. The
    /// range is clamped to the canvas.
    pub fn fragment(&self, at: i32, len: i32) -> Canvas {
        let total = self.cells.len() as i32;
        let at = at.clamp(0, total);
        let len = len.clamp(0, total - at);
        let cells = self.cells[at as usize..(at + len) as usize].to_vec();
        Canvas {
            region: Rect::from_xywh(0, 0, len, 1),
            client: Rect::from_xywh(0, 0, len, 1),
            cells,
            marker: self.marker,
            digest: 0,
        }
    }

    /// Resize to `size`, keeping the content anchored at the top-left (or
    /// bottom-left) corner. New cells take the default brush.
    pub fn crop(&mut self, size: Point, bottom_anchored: bool) {
        self.crop_with(size, self.marker, bottom_anchored);
    }

    /// As [`Canvas::crop`], with new cells set to `brush`.
    ///
    /// A bottom-anchored crop shifts the origin by the height difference so
    /// the bottom row stays where it was.
    pub fn crop_with(&mut self, size: Point, brush: Cell, bottom_anchored: bool) {
        let size = size.max(Point::ZERO);
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("canvas_crop", from = ?self.region.size, to = ?size, bottom_anchored).entered();
        let mut block = Canvas::with_brush(Rect::new(self.region.origin, size), brush);
        if bottom_anchored {
            block.step(Point::new(0, self.region.size.y - size.y));
        }
        grid::on_body(&mut block, &*self, |d, s| Full.compose(d, s));
        self.client.size = size;
        self.swap(&mut block);
        self.digest += 1;
    }

    /// Collapse to zero width.
    pub fn kill(&mut self) {
        self.region.size.x = 0;
        self.client.size.x = 0;
        self.cells.clear();
        self.digest += 1;
    }

    /// Exchange cells and placement with `other`.
    pub fn swap(&mut self, other: &mut Canvas) {
        core::mem::swap(&mut self.cells, &mut other.cells);
        core::mem::swap(&mut self.region, &mut other.region);
    }

    /// Move the cells into `target`, or copy them when the lengths differ.
    /// Returns the canvas size.
    pub fn swap_cells(&mut self, target: &mut Vec<Cell>) -> Point {
        if !self.cells.is_empty() {
            if target.len() == self.cells.len() {
                core::mem::swap(&mut self.cells, target);
            } else {
                target.clone_from(&self.cells);
            }
        }
        self.region.size
    }

    // ========== Whole-canvas ops ==========

    /// Fill every cell with the default brush.
    pub fn wipe(&mut self) {
        self.wipe_with(self.marker);
    }

    pub fn wipe_with(&mut self, c: Cell) {
        self.cells.fill(c);
    }

    /// Fill with the default brush carrying link id `id`.
    pub fn wipe_id(&mut self, id: u32) {
        self.wipe_with(self.marker.with_link(id));
    }

    pub fn each(&mut self, fx: impl FnMut(&mut Cell)) {
        self.cells.iter_mut().for_each(fx);
    }

    /// Apply `fx` to each cell of `rect`, clipped to the canvas.
    pub fn each_in(&mut self, rect: Rect, fx: impl FnMut(&mut Cell)) {
        grid::on_rect(self, rect, fx);
    }

    /// Plain text of the whole canvas, right halves as spaces.
    pub fn utf8(&self, jumbos: &Jumbos) -> String {
        let mut text = String::with_capacity(self.cells.len());
        self.utf8_into(&mut text, jumbos);
        text
    }

    pub fn utf8_into(&self, dest: &mut String, jumbos: &Jumbos) {
        self.cells.iter().for_each(|c| c.scan_text(dest, jumbos));
    }

    /// Copy the cells into `target`, returning the canvas size.
    pub fn copy_cells(&self, target: &mut Vec<Cell>) -> Point {
        target.clone_from(&self.cells);
        self.region.size
    }

    /// Combine our cells into `target` index by index. Meant for canvases
    /// of the same size.
    pub fn copy_to(&self, target: &mut Canvas, shader: impl Compose) {
        grid::on_copy(target, self, |d, s| shader.compose(d, s));
    }

    // ========== Compositing ==========

    /// Compose `block` where the two canvases overlap.
    pub fn fill_from(&mut self, block: &Canvas, shader: impl Compose) {
        grid::on_body(self, block, |d, s| shader.compose(d, s));
    }

    /// Compose `block` stretched over the whole canvas.
    pub fn zoom(&mut self, block: &Canvas, shader: impl Compose) {
        grid::zoom_in(self, block, |d, s| shader.compose(d, s));
    }

    /// Paste `block` into the client rectangle. The block's origin is taken
    /// relative to our own origin.
    pub fn plot(&mut self, block: &Canvas, shader: impl Compose) {
        let joint = Rect::new(self.client.origin - self.region.origin, self.client.size);
        if let Some(joint) = joint.intersection_opt(&block.region) {
            let place = joint.origin - block.region.origin;
            grid::in_body(self, block, joint, place, |d, s| shader.compose(d, s));
        }
    }

    /// Paint every cell of `area` (normalized, then clipped).
    pub fn fill(&mut self, area: Rect, shader: impl Paint) {
        grid::on_rect(self, area.normalize(), |c| shader.paint(c));
    }

    /// Paint the client rectangle.
    pub fn fill_client(&mut self, shader: impl Paint) {
        self.fill(self.client, shader);
    }

    /// Overwrite the client rectangle with `c`.
    pub fn fill_cell(&mut self, c: Cell) {
        self.fill_client(Full.brush(c));
    }

    /// Diagonal background gradient from `c1` at the client's top-left
    /// corner toward `c2`. Rows count four times as much as columns.
    pub fn grad(&mut self, c1: Argb, c2: Argb) {
        let mx = self.region.size.x as f32;
        let my = self.region.size.y as f32;
        let len = (mx * mx + my * my * 4.0).sqrt().max(1.0);
        let delta = |a: u8, b: u8| (f32::from(b) - f32::from(a)) / len;
        let (dr, dg, db, da) = (
            delta(c1.r(), c2.r()),
            delta(c1.g(), c2.g()),
            delta(c1.b(), c2.b()),
            delta(c1.a(), c2.a()),
        );
        let channel = |base: u8, d: f32, dt: f32| (f32::from(base) + d * dt) as u8;
        grid::on_rows(self, self.client, |y, row| {
            let z = (y * y * 4) as f32;
            for (x, c) in row.iter_mut().enumerate() {
                let x = x as f32;
                let dt = (x * x + z).sqrt();
                let bg = &mut c.colors.bg;
                bg.set_r(channel(c1.r(), dr, dt));
                bg.set_g(channel(c1.g(), dg, dt));
                bg.set_b(channel(c1.b(), db, dt));
                bg.set_a(channel(c1.a(), da, dt));
            }
        });
    }

    /// Repeat `image` over the whole canvas on a grid anchored at the
    /// shared-space origin, so scrolling does not shift the pattern.
    pub fn tile(&mut self, image: &mut Canvas, shader: impl Compose) {
        let step = image.size();
        if step.x <= 0 || step.y <= 0 {
            return;
        }
        let origin = self.region.origin;
        let cell_grid = origin % step;
        let init = origin - cell_grid - origin.less(Point::ZERO, step, Point::ZERO);
        let stop = self.region.end();
        let mut at = init;
        while at.y < stop.y {
            while at.x < stop.x {
                image.move_to(at);
                grid::on_body(self, &*image, |d, s| shader.compose(d, s));
                at.x += step.x;
            }
            at.x = init.x;
            at.y += step.y;
        }
    }

    /// Append `src` on the right. The result is as tall as the taller of
    /// the two, with both parts bottom-aligned.
    pub fn append(&mut self, src: &Canvas) {
        let a = self.size();
        let b = src.size();
        let size = Point::new(a.x + b.x, a.y.max(b.y));
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("canvas_append", left = ?a, right = ?b).entered();
        let mut block = Canvas::with_brush(Rect::new(self.region.origin, size), self.marker);
        let left = Rect::new(Point::new(0, size.y - a.y), a);
        grid::in_body(&mut block, &*self, left, Point::ZERO, |d, s| Full.compose(d, s));
        let right = Rect::new(Point::new(a.x, size.y - b.y), b);
        grid::in_body(&mut block, src, right, Point::ZERO, |d, s| Full.compose(d, s));
        self.swap(&mut block);
        self.digest += 1;
    }

    /// Paint a frame of `border` widths just inside `area`.
    pub fn cage(&mut self, area: Rect, border: Sides, shader: impl Paint) {
        grid::cage(self, area, border, |c| shader.paint(c));
    }

    /// Write `utf8` cluster by cluster starting at shared-space `pos`, using
    /// the default brush for colors and style. Wide clusters take as many
    /// cells as their width. With `rtl` the clusters run leftward from
    /// `pos`. Returns the position following the last cluster.
    pub fn text(&mut self, pos: Point, utf8: &str, rtl: bool, jumbos: &Jumbos) -> Point {
        let mut at = pos;
        for cluster in utf8.graphemes(true) {
            let w = grapheme_width(cluster).clamp(1, MAX_WIDTH as usize) as i32;
            let mut c = self.marker;
            c.glyph.set_direct(cluster, w, 1, jumbos);
            let left = if rtl { at.x - w + 1 } else { at.x };
            for x in 0..w {
                if let Some(dst) = self.peek(Point::new(left + x, at.y)) {
                    *dst = c;
                    dst.set_xy(x + 1, 1);
                }
            }
            at.x += if rtl { -w } else { w };
        }
        at
    }

    // ========== Search ==========

    /// Find `needle` by glyph fragment, starting at cell offset `from`.
    ///
    /// Forward search returns the offset of the match start. Backward
    /// search looks strictly before `from` and returns the offset of the
    /// match's last cell, the first one met while scanning backward.
    pub fn find(&self, needle: &Canvas, from: i32, dir: Direction) -> Option<i32> {
        let full = self.cells.len() as i32;
        let size = needle.cells.len() as i32;
        let from = from.clamp(0, full);
        let rest = if dir.is_backward() { from } else { full - from };
        if size == 0 || size > rest {
            return None;
        }
        let hay = &self.cells;
        let pat = &needle.cells;
        if dir.is_backward() {
            // Walk a reversed view; `j` counts from the end.
            let start = full - from;
            (start..=full - size)
                .find(|&j| {
                    (0..size).all(|k| {
                        let c = &hay[(full - 1 - j - k) as usize];
                        pat[(size - 1 - k) as usize].same_fragment(c)
                    })
                })
                .map(|j| full - j - 1)
        } else {
            (from..=full - size).find(|&i| {
                pat.iter()
                    .zip(&hay[i as usize..(i + size) as usize])
                    .all(|(p, c)| p.same_fragment(c))
            })
        }
    }

    /// Walk the first row from `*x` while `proc` is false.
    ///
    /// `*x` ends on the last cell before the first match (or stays put when
    /// the starting cell matches, or stops at the row end when nothing
    /// does). Returns whether a match was found.
    pub fn seek(&self, x: &mut i32, dir: Direction, mut proc: impl FnMut(&Cell) -> bool) -> bool {
        if self.region.is_empty() {
            return false;
        }
        let rev = dir.is_backward();
        let start = *x + i32::from(rev);
        let width = if rev { 0 } else { self.region.size.x } - start;
        let field = Rect::new(Point::new(start, 0) + self.region.origin, Point::new(width, 1)).normalize();
        let mut count = 0;
        let found = grid::on_rect_until(self, field, dir, |c| {
            if proc(c) {
                true
            } else {
                count += 1;
                false
            }
        });
        if count > 0 {
            count -= 1;
        }
        *x = if rev { start - count - 1 } else { *x + count };
        found
    }

    /// Word boundary next to local `coord` on its row.
    ///
    /// The cluster under `coord` picks a class (number, email tail, blank,
    /// or word) and the scan continues while cells stay in that class.
    /// Forward returns the offset just past the run, backward the offset
    /// of its first cell. A cluster ending in a zero-width space closes the
    /// run it belongs to, except inside blank runs.
    pub fn word(&self, coord: Point, dir: Direction, jumbos: &Jumbos) -> i32 {
        if self.region.is_empty() {
            return 0;
        }
        let rev = dir.is_backward();
        let coord = coord.clamp(Point::ZERO, self.region.size - Point::ONE);
        let mut state = WordScan::default();
        let test = self[coord].glyph.get(Svga::VtRgb, jumbos);
        if rev && test.ends_with(ZWSP) {
            state.stop_by_zwsp -= 2;
        }
        let class = if is_digit(&test) {
            WordClass::Digit
        } else if is_email(&test) {
            WordClass::Email
        } else if state.is_blank(&test) {
            WordClass::Blank
        } else {
            WordClass::Alpha
        };

        let right_half = if rev { 1 } else { 2 };
        let start = coord.x + i32::from(rev);
        let width = if rev { 0 } else { self.region.size.x } - start;
        let field = Rect::new(Point::new(start, coord.y) + self.region.origin, Point::new(width, 1)).normalize();
        let mut count = 0;
        grid::on_rect_until(self, field, dir, |c| {
            let txt = c.glyph.get(Svga::VtRgb, jumbos);
            let has_zwsp = state.stop_by_zwsp <= 0 && txt.ends_with(ZWSP);
            if has_zwsp || (state.stop_by_zwsp != 0 && state.stop_by_zwsp < 2) {
                state.stop_by_zwsp += if rev { 2 } else { 1 };
            }
            let (w, _, x, _) = c.whxy();
            let not_right_half = w != 2 || x != right_half;
            if state.stop_by_zwsp == 2 || (not_right_half && !state.accepts(class, &txt)) {
                return true;
            }
            count += 1;
            false
        });
        if rev {
            start - count.max(1)
        } else {
            coord.x + count
        }
    }

    /// [`Canvas::word`] on the first row.
    pub fn word_at(&self, offset: i32, dir: Direction, jumbos: &Jumbos) -> i32 {
        self.word(Point::new(offset, 0), dir, jumbos)
    }

    // ========== Stripes ==========

    /// Single-row copy of the cells in `from..upto` (swapped if reversed,
    /// clamped to the canvas).
    pub fn line_span(&self, from: i32, upto: i32) -> Canvas {
        let (from, upto) = if from > upto { (upto, from) } else { (from, upto) };
        let len = self.cells.len() as i32;
        let from = from.clamp(0, (len - 1).max(0));
        let upto = upto.clamp(0, len);
        self.fragment(from, upto - from)
    }

    /// Single-row copy of the cells from `p1` through `p2` in reading
    /// order, both ends included.
    pub fn line_between(&self, p1: Point, p2: Point) -> Canvas {
        let (p1, p2) = if p1.y > p2.y || (p1.y == p2.y && p1.x > p2.x) { (p2, p1) } else { (p1, p2) };
        let w = self.region.size.x;
        self.line_span(p1.x + p1.y * w, p2.x + p2.y * w + 1)
    }

    /// Same size and the same glyph in every cell.
    pub fn same_text(&self, other: &Canvas) -> bool {
        self.region.size == other.region.size
            && self.cells.iter().zip(&other.cells).all(|(a, b)| a.same_txt(b))
    }
}

/// Run classes recognized by [`Canvas::word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Digit,
    Email,
    Blank,
    Alpha,
}

#[derive(Debug, Default)]
struct WordScan {
    /// Zero-width-space break state: `<= 0` armed, `2` break here, `5`
    /// disabled for blank runs.
    stop_by_zwsp: i32,
}

impl WordScan {
    fn is_blank(&mut self, txt: &str) -> bool {
        let b = txt.as_bytes();
        let blank = b.is_empty() || b[0] == b' ' || (b[0] == b'^' && b.len() == 2);
        if blank {
            self.stop_by_zwsp = 5;
        }
        blank
    }

    fn accepts(&mut self, class: WordClass, txt: &str) -> bool {
        match class {
            WordClass::Digit => is_hex_digit(txt),
            WordClass::Email => !txt.is_empty() && (is_alpha(txt) || txt.starts_with('.')),
            WordClass::Blank => self.is_blank(txt),
            WordClass::Alpha => is_alpha(txt),
        }
    }
}

const FULLWIDTH_DIGITS: core::ops::RangeInclusive<u32> = 0xFF10..=0xFF19;

fn is_digit(txt: &str) -> bool {
    let c = first_codepoint(txt);
    (u32::from(b'0')..=u32::from(b'9')).contains(&c) || FULLWIDTH_DIGITS.contains(&c) || c == u32::from(b'.')
}

fn is_hex_digit(txt: &str) -> bool {
    let c = first_codepoint(txt);
    char::from_u32(c).is_some_and(|ch| ch == '.' || ch.is_ascii_hexdigit()) || FULLWIDTH_DIGITS.contains(&c)
}

fn is_email(txt: &str) -> bool {
    txt.starts_with('@')
}

/// Letter-like codepoints: ASCII alphanumerics, `@`, `_`, NBSP, and
/// everything from U+00C0 up except the punctuation, symbol and
/// box-drawing blocks.
fn is_alpha(txt: &str) -> bool {
    let c = first_codepoint(txt);
    matches!(c, 0x30..=0x39 | 0x40..=0x5A | 0x61..=0x7A | 0x5F | 0xA0)
        || (0xC0..0x2000).contains(&c)
        || (0x2070..0x2200).contains(&c)
        || (0x2400..0x2500).contains(&c)
        || (0x2600..0x2E00).contains(&c)
        || (0x2E80..0x3000).contains(&c)
        || ((0x3040..0xFE50).contains(&c) && c != 0x30FB)
        || (0xFE70..0xFF00).contains(&c)
        || (0xFF10..0xFF1A).contains(&c)
        || (0xFF20..0xFF3B).contains(&c)
        || (0xFF41..0xFF5B).contains(&c)
        || c > 0xFF65
}

impl PartialEq for Canvas {
    /// Same size and equal cells; placement and brush are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.region.size == other.region.size && self.cells == other.cells
    }
}

impl Grid for Canvas {
    type Item = Cell;

    #[inline]
    fn area(&self) -> Rect {
        self.region
    }

    #[inline]
    fn clip(&self) -> Rect {
        self.client
    }

    #[inline]
    fn items(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn items_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl AddAssign<&Canvas> for Canvas {
    fn add_assign(&mut self, src: &Canvas) {
        self.append(src);
    }
}

/// Local coordinates.
///
/// # Panics
///
/// Panics if `p` lies outside the canvas.
impl Index<Point> for Canvas {
    type Output = Cell;

    fn index(&self, p: Point) -> &Cell {
        debug_assert_eq!(self.cells.len() as i64, self.region.size.product());
        assert!(Rect::from_size(self.region.size).contains(p), "{p:?} outside canvas of size {:?}", self.region.size);
        &self.cells[p.y as usize * self.region.size.x as usize + p.x as usize]
    }
}

impl IndexMut<Point> for Canvas {
    fn index_mut(&mut self, p: Point) -> &mut Cell {
        debug_assert_eq!(self.cells.len() as i64, self.region.size.product());
        assert!(Rect::from_size(self.region.size).contains(p), "{p:?} outside canvas of size {:?}", self.region.size);
        &mut self.cells[p.y as usize * self.region.size.x as usize + p.x as usize]
    }
}

/// Flat cell offset.
impl Index<usize> for Canvas {
    type Output = Cell;

    fn index(&self, offset: usize) -> &Cell {
        &self.cells[offset]
    }
}

impl IndexMut<usize> for Canvas {
    fn index_mut(&mut self, offset: usize) -> &mut Cell {
        &mut self.cells[offset]
    }
}
