#![forbid(unsafe_code)]

//! Box blur and contour post-processing.
//!
//! Repeated box blur approximates a Gaussian. Each pass runs a sliding
//! window horizontally into a scratch buffer and then vertically back into
//! the image, clamping at the edges of the clip rectangle. Only the part of
//! the image inside [`Grid::clip`] is touched.
//!
//! [`contour`] turns every non-empty pixel into a solid silhouette, blurs
//! it, and writes the result back as alpha, leaving a soft halo around
//! opaque shapes.

use core::ops::{AddAssign, SubAssign};

use tessera_core::{Point, Rect};

use crate::cell::Cell;
use crate::color::Argb;
use crate::grid::{self, Grid, Raster};
use crate::irgb::Irgb;

/// A pixel the box blur can average.
pub trait Accumulate {
    /// Running-sum type.
    type Sum: Copy + Default + AddAssign + SubAssign;

    fn load(&self) -> Self::Sum;

    /// Average of `count` summed values.
    fn mean(sum: Self::Sum, count: i32) -> Self::Sum;

    fn store(&mut self, value: Self::Sum);
}

impl Accumulate for Argb {
    type Sum = Irgb<i32>;

    #[inline]
    fn load(&self) -> Irgb<i32> {
        Irgb::from(*self)
    }

    #[inline]
    fn mean(sum: Irgb<i32>, count: i32) -> Irgb<i32> {
        sum / count
    }

    #[inline]
    fn store(&mut self, value: Irgb<i32>) {
        *self = Argb::from(value);
    }
}

impl Accumulate for f32 {
    type Sum = f32;

    #[inline]
    fn load(&self) -> f32 {
        *self
    }

    #[inline]
    fn mean(sum: f32, count: i32) -> f32 {
        sum / count as f32
    }

    #[inline]
    fn store(&mut self, value: f32) {
        *self = value;
    }
}

/// Cells blur their background.
impl Accumulate for Cell {
    type Sum = Irgb<i32>;

    #[inline]
    fn load(&self) -> Irgb<i32> {
        self.colors.bg.load()
    }

    #[inline]
    fn mean(sum: Irgb<i32>, count: i32) -> Irgb<i32> {
        Argb::mean(sum, count)
    }

    #[inline]
    fn store(&mut self, value: Irgb<i32>) {
        self.colors.bg.store(value);
    }
}

/// Box blur settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurParams {
    /// Vertical window radius.
    pub radius: i32,
    /// Number of passes.
    pub repeat: i32,
    /// Horizontal radius multiplier, for cells taller than wide.
    pub ratio: i32,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            radius: 1,
            repeat: 2,
            ratio: 1,
        }
    }
}

impl BlurParams {
    pub const fn new(radius: i32) -> Self {
        Self {
            radius,
            repeat: 2,
            ratio: 1,
        }
    }

    pub const fn repeat(mut self, repeat: i32) -> Self {
        self.repeat = repeat;
        self
    }

    pub const fn ratio(mut self, ratio: i32) -> Self {
        self.ratio = ratio;
        self
    }
}

/// Scratch buffer reused across blurs.
#[derive(Debug, Clone, Default)]
pub struct BlurCache<S> {
    buf: Vec<S>,
}

impl<S: Copy + Default> BlurCache<S> {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Current capacity in pixels.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn reserve(&mut self, n: usize) -> &mut [S] {
        if self.buf.len() < n {
            self.buf.resize(n, S::default());
        }
        &mut self.buf[..n]
    }
}

/// Sliding-window mean over `len` samples with the edges extended.
fn blur_line<S, T>(len: usize, radius: i32, get: impl Fn(usize) -> S, mut put: impl FnMut(usize, S))
where
    S: Copy + Default + AddAssign + SubAssign,
    T: Accumulate<Sum = S> + ?Sized,
{
    if len == 0 {
        return;
    }
    let last = len as i32 - 1;
    let at = |i: i32| get(i.clamp(0, last) as usize);
    let count = 2 * radius + 1;
    let mut sum = S::default();
    for i in -radius..=radius {
        sum += at(i);
    }
    for i in 0..=last {
        put(i as usize, T::mean(sum, count));
        sum += at(i + radius + 1);
        sum -= at(i - radius);
    }
}

/// Blur the clipped part of `image` in place.
pub fn box_blur<G>(image: &mut G, params: BlurParams, cache: &mut BlurCache<<G::Item as Accumulate>::Sum>)
where
    G: Grid + ?Sized,
    G::Item: Accumulate,
{
    let area = image.area();
    let Some(clip) = image.clip().intersection_opt(&area) else {
        return;
    };
    let radius = params.radius.max(0);
    if radius == 0 {
        return;
    }
    let hz_radius = radius * params.ratio.max(1);
    let (w, h) = (clip.size.x as usize, clip.size.y as usize);
    let start = clip.origin - area.origin;
    let stride = area.size.x as usize;
    let base = start.y as usize * stride + start.x as usize;
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("box_blur", radius, repeat = params.repeat, w, h).entered();

    let scratch = cache.reserve(w * h);
    for _ in 0..params.repeat.max(0) {
        {
            let items = image.items();
            for y in 0..h {
                let row = base + y * stride;
                let out = &mut scratch[y * w..(y + 1) * w];
                blur_line::<_, G::Item>(w, hz_radius, |x| items[row + x].load(), |x, v| out[x] = v);
            }
        }
        let items = image.items_mut();
        for x in 0..w {
            let column = &*scratch;
            blur_line::<_, G::Item>(
                h,
                radius,
                |y| column[y * w + x],
                |y, v| items[base + y * stride + x].store(v),
            );
        }
    }
}

/// A pixel that can receive a silhouette alpha.
pub trait Silhouette {
    /// The pixel counts as part of the shape.
    fn is_solid(&self) -> bool;

    fn set_coverage(&mut self, alpha: u8);
}

impl Silhouette for Argb {
    #[inline]
    fn is_solid(&self) -> bool {
        self.token() != 0
    }

    #[inline]
    fn set_coverage(&mut self, alpha: u8) {
        self.set_a(alpha);
    }
}

/// Cells use their background.
impl Silhouette for Cell {
    #[inline]
    fn is_solid(&self) -> bool {
        self.colors.bg.is_solid()
    }

    #[inline]
    fn set_coverage(&mut self, alpha: u8) {
        self.colors.bg.set_coverage(alpha);
    }
}

/// Replace alpha with a soft silhouette of the non-empty pixels.
///
/// Solid pixels become opaque; empty pixels take the blurred coverage of
/// their neighbours, offset one pixel down and to the right. Pure black
/// transparent pixels (all-zero) count as empty.
pub fn contour<G>(image: &mut G, cache: &mut BlurCache<f32>)
where
    G: Grid + ?Sized,
    G::Item: Silhouette,
{
    let r = image.area();
    let mut shadows = Raster::new(r, 0.0f32);
    shadows.step(-Point::ONE);
    grid::on_body(&mut shadows, &*image, |dst, src| {
        *dst = if src.is_solid() { 255.0 * 3.0 } else { 0.0 };
    });
    shadows.step(Point::ONE);
    shadows.set_clip(r);
    box_blur(&mut shadows, BlurParams::new(1), cache);
    grid::on_copy(image, &shadows, |dst, &coverage| {
        let alpha = if dst.is_solid() {
            0xFF
        } else {
            coverage.clamp(0.0, 255.0) as u8
        };
        dst.set_coverage(alpha);
    });
}

/// Convenience: blur the backgrounds of `rect` within `image`.
pub fn blur_rect<G>(image: &mut G, rect: Rect, params: BlurParams)
where
    G: Grid<Item = Cell> + ?Sized,
{
    let Some(rect) = rect.intersection_opt(&image.area()) else {
        return;
    };
    let mut scratch = Raster::new(rect, Cell::default());
    grid::on_body(&mut scratch, &*image, |d, s| *d = *s);
    box_blur(&mut scratch, params, &mut BlurCache::new());
    let (dst_area, src) = (image.area(), &scratch);
    grid::in_body(image, src, Rect::new(rect.origin - dst_area.origin, rect.size), Point::ZERO, |d, s| {
        d.colors.bg = s.colors.bg;
    });
}
