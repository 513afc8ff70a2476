#![forbid(unsafe_code)]

//! Packed 8-bit ARGB color.
//!
//! # Layout
//!
//! The token is `0xAARRGGBB`. Stored little-endian, the bytes read
//! `b, g, r, a`, which is the order terminals and bitmap buffers expect.
//!
//! # Invariants
//!
//! - `a == 0`: fully transparent; blends skip the color.
//! - `a == 255`: fully opaque; blends replace outright.
//! - [`DEFAULT_COLOR`] (`0x00FFFFFF`) means "inherit the terminal default".
//!
//! All blending is fixed-point integer arithmetic so results are
//! byte-identical across platforms.

use crate::palette::{self, VT256};

/// "Use the terminal's default color."
pub const DEFAULT_COLOR: Argb = Argb(0x00FF_FFFF);

/// Almost transparent black, used to keep a cell "painted" without
/// changing what shows through it.
pub const ACTIVE_TRANSPARENT: Argb = Argb(0x0100_0000);

/// Luma above which highlighting darkens instead of lightening.
const XLIGHT_THRESHOLD: u8 = 140;

/// The 16 ANSI tints followed by the pure-color entries of the 256-color
/// palette. The discriminant is the palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tint {
    BlackDk = 0,
    RedDk = 1,
    GreenDk = 2,
    YellowDk = 3,
    BlueDk = 4,
    MagentaDk = 5,
    CyanDk = 6,
    WhiteDk = 7,
    BlackLt = 8,
    RedLt = 9,
    GreenLt = 10,
    YellowLt = 11,
    BlueLt = 12,
    MagentaLt = 13,
    CyanLt = 14,
    WhiteLt = 15,
    PureBlack = 16,
    PureBlue = 21,
    PureGreen = 46,
    PureCyan = 51,
    PureRed = 196,
    PureMagenta = 201,
    PureYellow = 226,
    PureWhite = 231,
}

/// Index order of the vtm 16-color palette: grays first, then hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tint16 {
    BlackDk = 0,
    BlackLt = 1,
    GrayDk = 2,
    GrayLt = 3,
    WhiteDk = 4,
    WhiteLt = 5,
    RedDk = 6,
    BlueDk = 7,
    GreenDk = 8,
    YellowDk = 9,
    MagentaLt = 10,
    CyanLt = 11,
    RedLt = 12,
    BlueLt = 13,
    GreenLt = 14,
    YellowLt = 15,
}

/// A 32-bit ARGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Opaque color from channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Color from normalized channels, saturating each to `0..=255`.
    #[inline]
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            (a * 255.0) as u8,
        )
    }

    #[inline]
    pub const fn token(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub fn set_r(&mut self, v: u8) {
        self.0 = (self.0 & 0xFF00_FFFF) | (v as u32) << 16;
    }

    #[inline]
    pub fn set_g(&mut self, v: u8) {
        self.0 = (self.0 & 0xFFFF_00FF) | (v as u32) << 8;
    }

    #[inline]
    pub fn set_b(&mut self, v: u8) {
        self.0 = (self.0 & 0xFFFF_FF00) | v as u32;
    }

    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.0 = (self.0 & 0x00FF_FFFF) | (v as u32) << 24;
    }

    #[inline]
    fn set_rgb(&mut self, r: u8, g: u8, b: u8) {
        *self = Self::new(r, g, b, self.a());
    }

    /// Any bit set, including alpha.
    #[inline]
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn swap_rb(&mut self) -> &mut Self {
        self.0 = (self.0 & 0xFF00_FF00) | ((self.0 >> 16) & 0xFF) | ((self.0 << 16) & 0x00FF_0000);
        self
    }

    /// Set all channels to zero.
    #[inline]
    pub fn wipe(&mut self) {
        self.0 = 0;
    }

    /// Set to opaque black.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::BLACK;
    }

    /// Partially transparent: neither skipped nor replaced by blends.
    #[inline]
    pub const fn is_alpha_blendable(self) -> bool {
        let a = self.a();
        a != 0 && a != 0xFF
    }

    /// Set alpha from a normalized value.
    #[inline]
    pub fn set_alpha_f32(&mut self, k: f32) -> &mut Self {
        self.set_a((k * 255.0).clamp(0.0, 255.0) as u8);
        self
    }

    /// Add `k` to alpha, saturating.
    #[inline]
    pub fn alpha_sum(&mut self, k: i32) -> &mut Self {
        self.set_a((self.a() as i32 + k).clamp(0, 255) as u8);
        self
    }

    /// Perceptual luminance (BT.2020 weights), truncated.
    #[inline]
    pub fn luma(self) -> u8 {
        luma(self.r() as i32, self.g() as i32, self.b() as i32)
    }

    /// Replace rgb by luma.
    pub fn grayscale(&mut self) -> &mut Self {
        let l = self.luma();
        self.set_rgb(l, l, l);
        self
    }

    /// Index in the xterm 256-color palette.
    ///
    /// Grays go to the 24-step ramp, except near-black and near-white which
    /// snap to the cube corners 16 and 231. Other colors use floor binning
    /// into the 6×6×6 cube.
    pub fn to_256cube(self) -> u8 {
        let (r, g, b) = (self.r() as u32, self.g() as u32, self.b() as u32);
        if r == g && r == b {
            match r {
                0..8 => 16,
                249.. => 231,
                _ => (232 + ((r * 24) >> 8)) as u8,
            }
        } else {
            (16 + 36 * ((r * 6) >> 8) + 6 * ((g * 6) >> 8) + ((b * 6) >> 8)) as u8
        }
    }

    /// Set both colors to their channel average. Alpha is left alone.
    pub fn avg(&mut self, other: &mut Argb) {
        let r = ((self.r() as u32 + other.r() as u32) >> 1) as u8;
        let g = ((self.g() as u32 + other.g() as u32) >> 1) as u8;
        let b = ((self.b() as u32 + other.b() as u32) >> 1) as u8;
        self.set_rgb(r, g, b);
        other.set_rgb(r, g, b);
    }

    /// One-sided blend for an opaque destination: alpha is not touched.
    #[inline]
    pub fn mix_one(&mut self, c: Argb) {
        let alpha = c.a() as i32;
        if alpha == 0xFF {
            *self = c;
        } else if alpha != 0 {
            let blend = |c1: u8, c2: u8| {
                let c1 = c1 as i32;
                (((c1 << 8) + (c2 as i32 - c1) * alpha) >> 8) as u8
            };
            self.set_rgb(
                blend(self.r(), c.r()),
                blend(self.g(), c.g()),
                blend(self.b(), c.b()),
            );
        }
    }

    /// Two-sided non-premultiplied over-blend.
    ///
    /// The resulting alpha is the union of opacities `a1 + a2 - a1·a2`.
    #[inline]
    pub fn mix(&mut self, c: Argb) {
        let a2 = c.a() as u32;
        if a2 == 0xFF {
            *self = c;
        } else if a2 != 0 {
            let a1 = self.a() as u32;
            let a = ((a2 + a1) << 8) - a1 * a2;
            let blend = |c1: u8, c2: u8| {
                let t = c1 as u32 * a1;
                let d = ((c2 as u32 * a2 + t) << 8) - t * a2;
                (d / a) as u8
            };
            *self = Argb::new(
                blend(self.r(), c.r()),
                blend(self.g(), c.g()),
                blend(self.b(), c.b()),
                (a >> 8) as u8,
            );
        }
    }

    /// Blend with an external coverage `alpha`, ignoring the colors' own alpha.
    #[inline]
    pub fn mix_alpha(&mut self, c: Argb, alpha: i32) {
        if alpha == 255 {
            *self = c;
        } else if alpha != 0 {
            let na = 256 - alpha;
            let blend = |c1: u8, c2: u8| ((c2 as i32 * alpha + c1 as i32 * na) >> 8) as u8;
            *self = Argb::new(
                blend(self.r(), c.r()),
                blend(self.g(), c.g()),
                blend(self.b(), c.b()),
                blend(self.a(), c.a()),
            );
        }
    }

    /// Linear interpolation; `level` 0 yields `c1`, 256 yields `c2`.
    pub fn transit(c1: Argb, c2: Argb, level: i32) -> Argb {
        let inverse = 256 - level;
        let lerp = |a: u8, b: u8| ((b as i32 * level + a as i32 * inverse) >> 8) as u8;
        Argb::new(
            lerp(c1.r(), c2.r()),
            lerp(c1.g(), c2.g()),
            lerp(c1.b(), c2.b()),
            lerp(c1.a(), c2.a()),
        )
    }

    /// Linear interpolation; `level` 0.0 yields `c1`, 1.0 yields `c2`.
    pub fn transit_f32(c1: Argb, c2: Argb, level: f32) -> Argb {
        let inverse = 1.0 - level;
        let lerp = |a: u8, b: u8| (b as f32 * level + a as f32 * inverse).clamp(0.0, 255.0) as u8;
        Argb::new(
            lerp(c1.r(), c2.r()),
            lerp(c1.g(), c2.g()),
            lerp(c1.b(), c2.b()),
            lerp(c1.a(), c2.a()),
        )
    }

    /// Highlight shift: darken light colors by `64·factor`, lighten dark
    /// ones by `48·factor`. Translucent colors also gain opacity.
    pub fn xlight(&mut self, factor: i32) {
        let a = self.a();
        if a == 0xFF {
            if self.luma() > XLIGHT_THRESHOLD {
                self.darken(shift_amount(64, factor));
            } else {
                self.lighten(shift_amount(48, factor));
            }
        } else if a < 2 {
            let k = shift_amount(48, factor);
            *self = Argb::new(k, k, k, (2 * k as u32).min(255) as u8);
        } else {
            if self.premultiplied_luma() > XLIGHT_THRESHOLD {
                let k = shift_amount(64, factor);
                self.darken(k);
                self.set_a(a.saturating_add(k));
            } else {
                let k = shift_amount(48, factor);
                self.lighten(k);
                self.set_a(a.saturating_add(k));
            }
        }
    }

    /// Highlight shift applied to `self`, with `second` moved in the same
    /// direction. Translucent colors keep their alpha here.
    pub fn xlight_pair(&mut self, factor: i32, second: &mut Argb) {
        let a = self.a();
        let darken = if a == 0xFF {
            self.luma() > XLIGHT_THRESHOLD
        } else if a < 2 {
            let k = shift_amount(48, factor);
            *self = Argb::new(k, k, k, (2 * k as u32).min(255) as u8);
            second.lighten(k);
            return;
        } else {
            self.premultiplied_luma() > XLIGHT_THRESHOLD
        };
        if darken {
            let k = shift_amount(64, factor);
            self.darken(k);
            second.darken(k);
        } else {
            let k = shift_amount(48, factor);
            self.lighten(k);
            second.lighten(k);
        }
    }

    fn premultiplied_luma(self) -> u8 {
        let a = self.a() as i32;
        luma(
            self.r() as i32 * a / 256,
            self.g() as i32 * a / 256,
            self.b() as i32 * a / 256,
        )
    }

    #[inline]
    fn darken(&mut self, k: u8) {
        self.set_rgb(
            self.r().saturating_sub(k),
            self.g().saturating_sub(k),
            self.b().saturating_sub(k),
        );
    }

    #[inline]
    fn lighten(&mut self, k: u8) {
        self.set_rgb(
            self.r().saturating_add(k),
            self.g().saturating_add(k),
            self.b().saturating_add(k),
        );
    }

    /// Darken rgb by `k`, saturating at zero.
    pub fn shadow(&mut self, k: u8) -> &mut Self {
        self.darken(k);
        self
    }

    /// Halve rgb.
    pub fn faint(&mut self) -> &mut Self {
        self.set_rgb(self.r() >> 1, self.g() >> 1, self.b() >> 1);
        self
    }

    /// Lighten rgb by `39·factor`, saturating.
    pub fn bright(&mut self, factor: i32) {
        self.lighten(shift_amount(39, factor));
    }

    /// Invert rgb. The alpha byte ends up opaque because the inverted
    /// mask carries into it.
    pub fn invert(&mut self) {
        self.0 = (self.0 & 0xFF00_0000) | !(self.0 & 0x00FF_FFFF);
    }

    /// Nearest vga16 index (DOS order); separate caches for fg and bg.
    pub fn to_vga16(self, fg: bool) -> u8 {
        palette::to_vga16(self, fg)
    }

    /// Nearest vtm16 index; separate caches for fg and bg.
    pub fn to_vtm16(self, fg: bool) -> u8 {
        palette::to_vtm16(self, fg)
    }

    /// Nearest index among the first 8 vtm16 entries.
    pub fn to_vtm8(self) -> u8 {
        palette::to_vtm8(self)
    }
}

/// Perceptual luminance of raw channels, truncated.
#[inline]
pub fn luma(r: i32, g: i32, b: i32) -> u8 {
    (0.2627f32 * r as f32 + 0.6780f32 * g as f32 + 0.0593f32 * b as f32) as u8
}

#[inline]
fn shift_amount(base: i32, factor: i32) -> u8 {
    base.saturating_mul(factor).clamp(0, 0xFF) as u8
}

impl From<u32> for Argb {
    #[inline]
    fn from(token: u32) -> Self {
        Self(token)
    }
}

impl From<Tint> for Argb {
    #[inline]
    fn from(t: Tint) -> Self {
        VT256[t as usize]
    }
}

impl core::fmt::Debug for Argb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Argb(#{:08X})", self.0)
    }
}

impl core::fmt::Display for Argb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{{{},{},{},{}}}", self.r(), self.g(), self.b(), self.a())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ====== Layout tests ======

    #[test]
    fn channels_pack_as_aarrggbb() {
        let c = Argb::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.token(), 0x4411_2233);
        assert_eq!(c.token().to_le_bytes(), [0x33, 0x22, 0x11, 0x44]);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn setters_touch_one_channel() {
        let mut c = Argb(0x4411_2233);
        c.set_r(0xAA);
        c.set_a(0x00);
        assert_eq!(c.token(), 0x00AA_2233);
    }

    #[test]
    fn from_f32_saturates() {
        let c = Argb::from_f32(1.5, 0.5, -1.0, 1.0);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (255, 127, 0, 255));
    }

    #[test]
    fn swap_rb_exchanges_red_and_blue() {
        let mut c = Argb::new(1, 2, 3, 4);
        c.swap_rb();
        assert_eq!(c, Argb::new(3, 2, 1, 4));
    }

    #[test]
    fn alpha_blendable_excludes_extremes() {
        assert!(!Argb(0x00FF_FFFF).is_alpha_blendable());
        assert!(!Argb(0xFF00_0000).is_alpha_blendable());
        assert!(Argb(0x8000_0000).is_alpha_blendable());
    }

    #[test]
    fn alpha_sum_saturates() {
        let mut c = Argb(0xF000_0000);
        c.alpha_sum(100);
        assert_eq!(c.a(), 255);
        c.alpha_sum(-300);
        assert_eq!(c.a(), 0);
    }

    // ====== Blend tests ======

    #[test]
    fn mix_opaque_replaces() {
        let mut dst = Argb(0x8012_3456);
        dst.mix(Argb(0xFFAB_CDEF));
        assert_eq!(dst, Argb(0xFFAB_CDEF));
    }

    #[test]
    fn mix_transparent_is_noop() {
        let mut dst = Argb(0x8012_3456);
        dst.mix(Argb(0x00FF_FFFF));
        assert_eq!(dst, Argb(0x8012_3456));
    }

    #[test]
    fn mix_accumulates_opacity() {
        let mut dst = Argb::new(0, 0, 0, 128);
        dst.mix(Argb::new(255, 255, 255, 128));
        // a = ((128 + 128) << 8) - 128 * 128 = 49152 -> 192
        assert_eq!(dst.a(), 192);
        // t = 0, d = (255 * 128) << 8 = 8355840, 8355840 / 49152 = 170
        assert_eq!(dst.r(), 170);
    }

    #[test]
    fn mix_one_half_blue_over_red() {
        let mut dst = Argb::rgb(255, 0, 0);
        dst.mix_one(Argb::new(0, 0, 255, 128));
        assert_eq!(dst, Argb::new(127, 0, 127, 255));
    }

    #[test]
    fn mix_alpha_ignores_own_alpha() {
        let mut dst = Argb::new(0, 0, 0, 0);
        dst.mix_alpha(Argb::new(255, 255, 255, 255), 128);
        assert_eq!(dst, Argb::new(127, 127, 127, 127));
        let before = dst;
        dst.mix_alpha(Argb::WHITE, 0);
        assert_eq!(dst, before);
    }

    #[test]
    fn transit_midpoint() {
        let c = Argb::transit(Argb::new(0, 0, 0, 0), Argb::new(200, 100, 50, 255), 128);
        assert_eq!(c, Argb::new(100, 50, 25, 127));
    }

    #[test]
    fn avg_sets_both_to_average() {
        let mut a = Argb::new(10, 20, 30, 1);
        let mut b = Argb::new(20, 40, 61, 2);
        a.avg(&mut b);
        assert_eq!(a, Argb::new(15, 30, 45, 1));
        assert_eq!(b, Argb::new(15, 30, 45, 2));
    }

    // ====== Luma and quantization tests ======

    #[test]
    fn luma_extremes() {
        assert_eq!(Argb::BLACK.luma(), 0);
        assert!(Argb::WHITE.luma() >= 254);
        assert_eq!(luma(255, 0, 0), 66);
    }

    #[test]
    fn grayscale_keeps_alpha() {
        let mut c = Argb::new(255, 0, 0, 7);
        c.grayscale();
        assert_eq!(c, Argb::new(66, 66, 66, 7));
    }

    #[test]
    fn cube_fixed_points() {
        assert_eq!(Argb::from(Tint::PureBlack).to_256cube(), 16);
        assert_eq!(Argb::from(Tint::PureWhite).to_256cube(), 231);
        assert_eq!(Argb::rgb(255, 0, 0).to_256cube(), 196);
        assert_eq!(Argb::rgb(0, 0, 255).to_256cube(), 21);
        assert_eq!(Argb::rgb(0x80, 0x80, 0x80).to_256cube(), 244);
    }

    // ====== Highlight tests ======

    #[test]
    fn xlight_darkens_bright_opaque() {
        let mut c = Argb::WHITE;
        c.xlight(1);
        assert_eq!(c, Argb::rgb(191, 191, 191));
    }

    #[test]
    fn xlight_lightens_dark_opaque() {
        let mut c = Argb::rgb(10, 250, 10);
        // luma(10, 250, 10) = 172 > 140 -> darken by 64
        c.xlight(1);
        assert_eq!(c, Argb::rgb(0, 186, 0));
        let mut d = Argb::BLACK;
        d.xlight(2);
        assert_eq!(d, Argb::rgb(96, 96, 96));
    }

    #[test]
    fn xlight_transparent_becomes_gray_veil() {
        let mut c = Argb::TRANSPARENT;
        c.xlight(1);
        assert_eq!(c, Argb::new(48, 48, 48, 96));
        let mut strong = Argb::TRANSPARENT;
        strong.xlight(5);
        assert_eq!(strong, Argb::new(240, 240, 240, 255));
    }

    #[test]
    fn xlight_translucent_gains_alpha() {
        let mut c = Argb::new(0, 0, 0, 100);
        c.xlight(1);
        assert_eq!(c, Argb::new(48, 48, 48, 148));
    }

    #[test]
    fn xlight_pair_moves_second_along() {
        let mut bg = Argb::BLACK;
        let mut fg = Argb::rgb(100, 100, 100);
        bg.xlight_pair(1, &mut fg);
        assert_eq!(bg, Argb::rgb(48, 48, 48));
        assert_eq!(fg, Argb::rgb(148, 148, 148));

        let mut veil = Argb::new(0, 0, 0, 100);
        let mut text = Argb::rgb(1, 2, 3);
        veil.xlight_pair(1, &mut text);
        assert_eq!(veil.a(), 100);
        assert_eq!(text, Argb::rgb(49, 50, 51));
    }

    #[test]
    fn shadow_faint_bright() {
        let mut c = Argb::rgb(30, 100, 255);
        c.shadow(39);
        assert_eq!(c, Argb::rgb(0, 61, 216));
        c.faint();
        assert_eq!(c, Argb::rgb(0, 30, 108));
        c.bright(1);
        assert_eq!(c, Argb::rgb(39, 69, 147));
    }

    #[test]
    fn invert_makes_opaque_complement() {
        let mut c = Argb::new(0x10, 0x20, 0x30, 0x40);
        c.invert();
        assert_eq!(c, Argb(0xFFEF_DFCF));
    }
}

#[cfg(test)]
mod color_proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn transit_int_endpoints(a in any::<u32>(), b in any::<u32>()) {
            prop_assert_eq!(Argb::transit(Argb(a), Argb(b), 0), Argb(a));
            prop_assert_eq!(Argb::transit(Argb(a), Argb(b), 256), Argb(b));
        }

        #[test]
        fn transit_float_endpoints(a in any::<u32>(), b in any::<u32>()) {
            prop_assert_eq!(Argb::transit_f32(Argb(a), Argb(b), 0.0), Argb(a));
            prop_assert_eq!(Argb::transit_f32(Argb(a), Argb(b), 1.0), Argb(b));
        }

        #[test]
        fn mix_opaque_is_idempotent(dst in any::<u32>(), rgb in 0u32..0x0100_0000) {
            let c = Argb(0xFF00_0000 | rgb);
            let mut d = Argb(dst);
            d.mix(c);
            prop_assert_eq!(d, c);
        }

        #[test]
        fn mix_transparent_is_noop(dst in any::<u32>(), rgb in 0u32..0x0100_0000) {
            let mut d = Argb(dst);
            d.mix(Argb(rgb));
            prop_assert_eq!(d, Argb(dst));
            d.mix_one(Argb(rgb));
            prop_assert_eq!(d, Argb(dst));
        }

        #[test]
        fn invert_twice_restores_rgb(c in any::<u32>()) {
            let mut x = Argb(c);
            x.invert();
            x.invert();
            prop_assert_eq!(x.token() & 0x00FF_FFFF, c & 0x00FF_FFFF);
        }
    }
}
