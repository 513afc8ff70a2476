#![forbid(unsafe_code)]

//! Soft rectangular drop shadows.
//!
//! A [`ShadowSprite`] holds the shadow of a single cell: a square (scaled
//! by the cell aspect ratio) whose opacity falls off toward every edge.
//! Rendering stretches it around a window rectangle: the leading and
//! trailing ramps of each axis are read from the sprite edges, and the
//! plateau in between repeats the sprite center.

use tessera_core::{Point, Rect};

use crate::grid::{Grid, Raster, on_rect};

/// Drop-shadow settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowParams {
    /// Falloff bias in `(0, 1)`; `0.5` is a plain smoothstep, lower values
    /// fade faster.
    pub bias: f32,
    /// Peak opacity, `0..=255`.
    pub alpha: f32,
    /// Ramp length in cells (vertical; horizontal is scaled by `ratio`).
    pub size: i32,
    /// Shadow displacement from the window.
    pub offset: Point,
    /// Cell aspect correction.
    pub ratio: Point,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            bias: 0.37,
            alpha: 105.0,
            size: 4,
            offset: Point::new(2, 1),
            ratio: Point::new(2, 1),
        }
    }
}

/// Schlick's bias curve: maps `0..=1` onto itself, bending toward `0`
/// for `b < 0.5`.
#[inline]
fn bias(t: f32, b: f32) -> f32 {
    t / ((1.0 / b - 2.0) * (1.0 - t) + 1.0)
}

/// Edge falloff at normalized position `t`: zero at both ends, one in the
/// middle.
pub fn falloff(t: f32, b: f32) -> f32 {
    let u = 1.0 - (2.0 * t.clamp(0.0, 1.0) - 1.0).abs();
    let s = bias(u, b.clamp(0.01, 0.99));
    s * s * (3.0 - 2.0 * s)
}

/// Shadow sprite with pixels of type `T`.
#[derive(Debug, Clone, Default)]
pub struct ShadowSprite<T> {
    bitmap: Raster<T>,
    /// Extra extent around the window.
    over: Point,
    /// Displacement from the window origin to the shadow origin.
    step: Point,
    ready: bool,
}

impl<T: Clone + Default> ShadowSprite<T> {
    pub fn new(params: ShadowParams, fuse: impl FnMut(&mut T, u8)) -> Self {
        let mut sprite = Self {
            bitmap: Raster::new(Rect::default(), T::default()),
            over: Point::ZERO,
            step: Point::ZERO,
            ready: false,
        };
        sprite.generate(params, fuse);
        sprite
    }

    /// Rebuild the sprite. `fuse` receives each pixel with its opacity.
    pub fn generate(&mut self, params: ShadowParams, mut fuse: impl FnMut(&mut T, u8)) {
        let alpha = params.alpha.clamp(0.0, 255.0);
        let size = params.size.abs();
        self.over = params.ratio * (size * 2);
        self.step = self.over / 2 - params.offset;
        self.ready = false;
        let sz = params.ratio * (size * 2 + 1);
        if sz.x <= 1 || sz.y <= 1 {
            self.bitmap = Raster::new(Rect::default(), T::default());
            return;
        }
        tessera_core::debug!(size = ?sz, alpha, bias = params.bias, "shadow sprite");
        self.bitmap = Raster::new(Rect::from_size(sz), T::default());
        let (fw, fh) = ((sz.x - 1) as f32, (sz.y - 1) as f32);
        for y in 0..sz.y {
            let sy = falloff(y as f32 / fh, params.bias);
            for x in 0..sz.x {
                let sx = falloff(x as f32 / fw, params.bias);
                let a = (alpha * sx * sy).round() as u8;
                fuse(&mut self.bitmap[Point::new(x, y)], a);
            }
        }
        self.ready = true;
    }
}

impl<T> ShadowSprite<T> {
    /// The sprite holds a usable bitmap.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn bitmap(&self) -> &Raster<T> {
        &self.bitmap
    }

    /// Rectangle the shadow of `window` covers.
    pub fn footprint(&self, window: Rect) -> Rect {
        Rect::new(window.origin - self.step, window.size + self.over)
    }

    /// Paint the shadow of `window` onto `canvas`, restricted to `clip`.
    /// `fx` receives each covered pixel together with its sprite sample.
    pub fn render<G>(&self, canvas: &mut G, clip: Rect, window: Rect, mut fx: impl FnMut(&mut G::Item, &T))
    where
        G: Grid + ?Sized,
    {
        if !self.ready {
            return;
        }
        let dst = self.footprint(window);
        let area = canvas.area();
        let Some(visible) = dst.intersection_opt(&clip).and_then(|v| v.intersection_opt(&area)) else {
            return;
        };
        let sz = self.bitmap.size();
        let center = sz / 2;
        let index = |q: i32, len: i32, sz: i32, c: i32| {
            let tail = len - 1 - q;
            if q <= tail { q.min(c) } else { (sz - 1 - tail).max(c) }
        };
        let mut p = visible.origin;
        on_rect(canvas, visible, |px| {
            let q = p - dst.origin;
            let ix = index(q.x, dst.size.x, sz.x, center.x);
            let iy = index(q.y, dst.size.y, sz.y, center.y);
            fx(px, &self.bitmap[Point::new(ix, iy)]);
            p.x += 1;
            if p.x == visible.right() {
                p.x = visible.origin.x;
                p.y += 1;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(size: i32) -> ShadowSprite<u8> {
        let params = ShadowParams {
            size,
            offset: Point::ZERO,
            ratio: Point::ONE,
            alpha: 200.0,
            bias: 0.5,
        };
        ShadowSprite::new(params, |p, a| *p = a)
    }

    // ====== Falloff tests ======

    #[test]
    fn falloff_endpoints() {
        assert_eq!(falloff(0.0, 0.37), 0.0);
        assert_eq!(falloff(1.0, 0.37), 0.0);
        assert!((falloff(0.5, 0.37) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lower_bias_fades_faster() {
        assert!(falloff(0.25, 0.3) < falloff(0.25, 0.7));
    }

    // ====== Sprite tests ======

    #[test]
    fn sprite_peaks_in_the_middle() {
        let s = sprite(2);
        let bmp = s.bitmap();
        assert_eq!(bmp.size(), Point::new(5, 5));
        assert_eq!(bmp[Point::new(2, 2)], 200);
        assert_eq!(bmp[Point::new(0, 2)], 0);
        assert!(bmp[Point::new(1, 2)] > 0 && bmp[Point::new(1, 2)] < 200);
    }

    #[test]
    fn degenerate_size_is_not_ready() {
        let s = sprite(0);
        assert!(!s.is_ready());
        let area = Rect::from_xywh(0, 0, 4, 4);
        let mut canvas = Raster::new(area, 0u8);
        s.render(&mut canvas, area, Rect::from_xywh(1, 1, 2, 2), |d, s| *d = *s);
        assert!(canvas.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn footprint_applies_offset() {
        let mut s = sprite(1);
        s.generate(ShadowParams { offset: Point::new(2, 1), ..ShadowParams::default() }, |p, a| *p = a);
        // size 4, ratio (2, 1): over = (16, 8), step = (6, 3).
        assert_eq!(s.footprint(Rect::from_xywh(10, 10, 4, 2)), Rect::from_xywh(4, 7, 20, 10));
    }

    #[test]
    fn render_fills_plateau_with_center() {
        let s = sprite(2);
        let area = Rect::from_xywh(0, 0, 20, 20);
        let mut canvas = Raster::new(area, 0u8);
        let window = Rect::from_xywh(5, 5, 6, 6);
        s.render(&mut canvas, area, window, |d, s| *d = *s);
        // Footprint is (3, 3, 10, 10).
        assert_eq!(canvas[Point::new(8, 8)], 200);
        assert_eq!(canvas[Point::new(3, 8)], 0);
        assert_eq!(canvas[Point::new(12, 8)], 0);
        assert_eq!(canvas[Point::new(2, 8)], 0);
        assert!(canvas[Point::new(4, 8)] > 0);
        assert_eq!(canvas[Point::new(4, 8)], canvas[Point::new(11, 8)]);
    }

    #[test]
    fn render_respects_clip() {
        let s = sprite(2);
        let mut canvas = Raster::new(Rect::from_xywh(0, 0, 20, 20), 0u8);
        s.render(&mut canvas, Rect::from_xywh(0, 0, 8, 20), Rect::from_xywh(5, 5, 6, 6), |d, s| *d = *s);
        assert_eq!(canvas[Point::new(9, 8)], 0);
        assert_eq!(canvas[Point::new(7, 8)], 200);
    }
}
