#![forbid(unsafe_code)]

//! Wide RGBA accumulator.
//!
//! `Irgb<i32>` sums byte channels without overflow (box blur);
//! `Irgb<f32>` carries normalized channels for premultiplied-alpha
//! composition and sRGB/linear conversion. Neither is stored in cells.

use core::ops::{Add, AddAssign, Div, Mul, SubAssign};

use crate::color::Argb;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Irgb<T> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

impl<T> Irgb<T> {
    #[inline]
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }
}

impl<T: Copy + PartialOrd> Irgb<T> {
    /// True if any channel exceeds `n`.
    #[inline]
    pub fn any_above(&self, n: T) -> bool {
        self.r > n || self.g > n || self.b > n || self.a > n
    }
}

impl<T: Copy + Add<Output = T>> Add for Irgb<T> {
    type Output = Self;
    #[inline]
    fn add(self, c: Self) -> Self {
        Self::new(self.r + c.r, self.g + c.g, self.b + c.b, self.a + c.a)
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Irgb<T> {
    type Output = Self;
    #[inline]
    fn mul(self, n: T) -> Self {
        Self::new(self.r * n, self.g * n, self.b * n, self.a * n)
    }
}

impl<T: Copy + Div<Output = T>> Div<T> for Irgb<T> {
    type Output = Self;
    #[inline]
    fn div(self, n: T) -> Self {
        Self::new(self.r / n, self.g / n, self.b / n, self.a / n)
    }
}

impl<T: Copy + AddAssign> AddAssign for Irgb<T> {
    #[inline]
    fn add_assign(&mut self, c: Self) {
        self.r += c.r;
        self.g += c.g;
        self.b += c.b;
        self.a += c.a;
    }
}

impl<T: Copy + SubAssign> SubAssign for Irgb<T> {
    #[inline]
    fn sub_assign(&mut self, c: Self) {
        self.r -= c.r;
        self.g -= c.g;
        self.b -= c.b;
        self.a -= c.a;
    }
}

impl AddAssign<Argb> for Irgb<i32> {
    #[inline]
    fn add_assign(&mut self, c: Argb) {
        *self += Irgb::from(c);
    }
}

impl SubAssign<Argb> for Irgb<i32> {
    #[inline]
    fn sub_assign(&mut self, c: Argb) {
        *self -= Irgb::from(c);
    }
}

impl From<Argb> for Irgb<i32> {
    #[inline]
    fn from(c: Argb) -> Self {
        Self::new(c.r() as i32, c.g() as i32, c.b() as i32, c.a() as i32)
    }
}

impl From<Argb> for Irgb<f32> {
    #[inline]
    fn from(c: Argb) -> Self {
        Self::new(
            c.r() as f32 / 255.0,
            c.g() as f32 / 255.0,
            c.b() as f32 / 255.0,
            c.a() as f32 / 255.0,
        )
    }
}

impl From<Irgb<i32>> for Argb {
    /// Channels are saturated to a byte.
    #[inline]
    fn from(c: Irgb<i32>) -> Self {
        let byte = |v: i32| v.clamp(0, 255) as u8;
        Argb::new(byte(c.r), byte(c.g), byte(c.b), byte(c.a))
    }
}

impl From<Irgb<f32>> for Argb {
    #[inline]
    fn from(c: Irgb<f32>) -> Self {
        Argb::from_f32(c.r, c.g, c.b, c.a)
    }
}

/// sRGB transfer to linear light (gamma 2.4).
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light to sRGB transfer (gamma 2.4).
#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl Irgb<f32> {
    /// Convert rgb from sRGB to linear; alpha is unchanged.
    pub fn to_linear(&mut self) -> &mut Self {
        self.r = srgb_to_linear(self.r);
        self.g = srgb_to_linear(self.g);
        self.b = srgb_to_linear(self.b);
        self
    }

    /// Convert rgb from linear to sRGB; alpha is unchanged.
    pub fn to_srgb(&mut self) -> &mut Self {
        self.r = linear_to_srgb(self.r);
        self.g = linear_to_srgb(self.g);
        self.b = linear_to_srgb(self.b);
        self
    }

    /// Premultiply rgb by alpha.
    pub fn pma(&mut self) -> &mut Self {
        if self.a != 1.0 {
            if self.a == 0.0 {
                self.r = 0.0;
                self.g = 0.0;
                self.b = 0.0;
            } else {
                self.r *= self.a;
                self.g *= self.a;
                self.b *= self.a;
            }
        }
        self
    }

    /// Over-composite a premultiplied color.
    pub fn blend_pma(&mut self, c: Irgb<f32>) -> &mut Self {
        if c.a != 0.0 {
            if c.a == 1.0 || self.a == 0.0 {
                *self = c;
            } else {
                let na = 1.0 - c.a;
                self.r = c.r + na * self.r;
                self.g = c.g + na * self.g;
                self.b = c.b + na * self.b;
                self.a = c.a + na * self.a;
            }
        }
        self
    }

    /// Over-composite a straight-alpha color with extra coverage `alpha`.
    pub fn blend_nonpma(&mut self, mut c: Irgb<f32>, alpha: u8) -> &mut Self {
        if alpha == 255 {
            *self = c;
        } else if alpha != 0 {
            c.a *= alpha as f32 / 255.0;
            self.blend_pma(*c.pma());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_accumulates_bytes() {
        let mut acc = Irgb::<i32>::default();
        acc += Argb::WHITE;
        acc += Argb::WHITE;
        assert_eq!(acc, Irgb::new(510, 510, 510, 510));
        acc -= Argb::WHITE;
        assert_eq!(Argb::from(acc), Argb::WHITE);
        assert_eq!(Argb::from(acc / 5), Argb::new(51, 51, 51, 51));
    }

    #[test]
    fn int_to_argb_saturates() {
        let c = Argb::from(Irgb::new(-5, 300, 7, 255));
        assert_eq!(c, Argb::new(0, 255, 7, 255));
    }

    #[test]
    fn any_above() {
        assert!(Irgb::new(0, 0, 9, 0).any_above(8));
        assert!(!Irgb::new(1, 2, 3, 4).any_above(4));
    }

    #[test]
    fn float_round_trip() {
        let c = Argb::new(0, 255, 0, 255);
        let f = Irgb::<f32>::from(c);
        assert_eq!(f, Irgb::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(Argb::from(f), c);
    }

    #[test]
    fn srgb_curve_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        let mid = linear_to_srgb(srgb_to_linear(0.5));
        assert!((mid - 0.5).abs() < 1e-4);
    }

    #[test]
    fn pma_scales_rgb() {
        let mut c = Irgb::new(1.0, 0.5, 0.25, 0.5);
        c.pma();
        assert_eq!(c, Irgb::new(0.5, 0.25, 0.125, 0.5));
        let mut z = Irgb::new(1.0, 1.0, 1.0, 0.0);
        z.pma();
        assert_eq!(z, Irgb::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn blend_pma_over() {
        let mut dst = Irgb::new(0.0, 0.0, 1.0, 1.0);
        dst.blend_pma(Irgb::new(0.5, 0.0, 0.0, 0.5));
        assert_eq!(dst, Irgb::new(0.5, 0.0, 0.5, 1.0));
    }

    #[test]
    fn blend_nonpma_respects_coverage() {
        let mut dst = Irgb::new(0.0, 0.0, 0.0, 1.0);
        dst.blend_nonpma(Irgb::new(1.0, 1.0, 1.0, 1.0), 0);
        assert_eq!(dst, Irgb::new(0.0, 0.0, 0.0, 1.0));
        dst.blend_nonpma(Irgb::new(1.0, 1.0, 1.0, 1.0), 255);
        assert_eq!(dst, Irgb::new(1.0, 1.0, 1.0, 1.0));
    }
}
