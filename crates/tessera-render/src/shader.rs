#![forbid(unsafe_code)]

//! Cell shaders.
//!
//! A shader is a blend rule with its parameters captured at construction.
//! Binary shaders implement [`Compose`] and combine a source cell into a
//! destination; unary shaders implement [`Paint`] and act on the
//! destination alone. Most parametrized shaders are both. Neither entry
//! point ever touches the source.
//!
//! Closures work as shaders too: any `Fn(&mut Cell, &Cell)` is a
//! [`Compose`], any `Fn(&mut Cell)` a [`Paint`].
//!
//! # Usage
//!
//! ```
//! use tessera_render::cell::Cell;
//! use tessera_render::color::Argb;
//! use tessera_render::shader::{Compose, Fuse, Paint, Xlight};
//!
//! let mut dst = Cell::from_byte(b'A').with_bg(Argb::rgb(255, 0, 0));
//! Fuse.compose(&mut dst, &Cell::default().with_bg(Argb(0x8000_00FF)));
//! assert_eq!(dst.colors.bg, Argb::rgb(127, 0, 127));
//!
//! let brush = Fuse.brush(Cell::default().with_bg(Argb::rgb(0, 0, 0)));
//! brush.paint(&mut dst);
//! Xlight(1).paint(&mut dst);
//! assert_eq!(dst.colors.bg, Argb::rgb(48, 48, 48));
//! ```

use crate::cell::{Cell, Colors};
use crate::color::{Argb, Tint};
use crate::style::Style;

/// Binary blend: combine `src` into `dst`.
pub trait Compose {
    fn compose(&self, dst: &mut Cell, src: &Cell);

    /// Bind a fixed source cell, turning the shader into a [`Paint`].
    fn brush(self, brush: Cell) -> Brush<Self>
    where
        Self: Sized,
    {
        Brush { shader: self, brush }
    }
}

/// Unary shader: modify `dst` in place.
pub trait Paint {
    fn paint(&self, dst: &mut Cell);
}

impl<F: Fn(&mut Cell, &Cell)> Compose for F {
    #[inline]
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        self(dst, src)
    }
}

impl<F: Fn(&mut Cell)> Paint for F {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        self(dst)
    }
}

/// A binary shader applied with a fixed source cell.
#[derive(Debug, Clone, Copy)]
pub struct Brush<S> {
    pub shader: S,
    pub brush: Cell,
}

impl<S: Compose> Paint for Brush<S> {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        self.shader.compose(dst, &self.brush)
    }
}

macro_rules! binary_shader {
    ($($(#[$doc:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name;

            impl Compose for $name {
                #[inline]
                fn compose(&self, dst: &mut Cell, src: &Cell) {
                    dst.$method(src);
                }
            }
        )*
    };
}

binary_shader! {
    /// [`Cell::fuse`].
    Fuse => fuse;
    /// [`Cell::lite`].
    Lite => lite;
    /// [`Cell::mix`].
    Mix => mix;
    /// [`Cell::blend`].
    Blend => blend;
    /// [`Cell::skipnulls`].
    SkipNulls => skipnulls;
    /// [`Cell::fuse_id`].
    FuseId => fuse_id;
    /// [`Cell::fuse_full`].
    FuseFull => fuse_full;
    /// [`Cell::overlay`].
    Overlay => overlay;
    /// Take the glyph only.
    Text => txt_from;
    /// [`Cell::meta`].
    Meta => meta;
}

/// Copy everything but the link id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flat;

impl Compose for Flat {
    #[inline]
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        dst.set(src);
    }
}

/// Copy the whole cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Full;

impl Compose for Full {
    #[inline]
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        *dst = *src;
    }
}

/// Zero the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wipe;

impl Paint for Wipe {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        *dst = Cell::default();
    }
}

/// Legible text over any background: a source without its own
/// foreground gets black or white depending on what lies beneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contrast;

impl Contrast {
    /// Luma at which black text becomes the legible choice.
    pub fn threshold() -> u8 {
        Argb::from(Tint::WhiteDk).luma() - 0x0F
    }

    /// Opaque black over light colors, opaque white over dark ones.
    pub fn invert(color: Argb) -> Argb {
        if color.luma() >= Self::threshold() {
            Argb::BLACK
        } else {
            Argb::WHITE
        }
    }
}

impl Compose for Contrast {
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        if src.is_null() {
            return;
        }
        if src.colors.fg.a() == 0 {
            let bg = dst.colors.bg;
            dst.colors.fg = if bg.a() < 2 { Argb::WHITE } else { Self::invert(bg) };
        }
        dst.fuse_full(src);
    }
}

/// Fuse, then apply a unary operation.
macro_rules! fused_unary {
    ($name:ty) => {
        impl Compose for $name {
            #[inline]
            fn compose(&self, dst: &mut Cell, src: &Cell) {
                dst.fuse(src);
                self.paint(dst);
            }
        }
    };
}

/// Highlight by shifting both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xlight(pub i32);

impl Default for Xlight {
    fn default() -> Self {
        Self(1)
    }
}

impl Paint for Xlight {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.xlight(self.0);
    }
}
fused_unary!(Xlight);

/// Highlight by underlining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underlight(pub i32);

impl Default for Underlight {
    fn default() -> Self {
        Self(1)
    }
}

impl Paint for Underlight {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.underlight(self.0);
    }
}
fused_unary!(Underlight);

/// Invert both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invert;

impl Paint for Invert {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.invert();
    }
}
fused_unary!(Invert);

/// Swap foreground and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reverse;

impl Paint for Reverse {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.reverse();
    }
}
fused_unary!(Reverse);

/// Toggle the invert attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvBit;

impl Paint for InvBit {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.invbit();
    }
}

/// Gray out the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disabled;

impl Paint for Disabled {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.disabled();
    }
}

/// [`Cell::mixfull`] with a fixed coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transparent(pub u8);

impl Compose for Transparent {
    #[inline]
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        dst.mixfull(src, self.0 as i32);
    }
}

/// Force the background alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xlucent(pub u8);

impl Paint for Xlucent {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.colors.bg.set_a(self.0);
    }
}
fused_unary!(Xlucent);

/// OR a depth into the cell's shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadow(u8);

impl Shadow {
    /// Depth clamped to `0..=255`.
    pub fn new(depth: i32) -> Self {
        Self(depth.clamp(0, 255) as u8)
    }

    pub fn depth(self) -> u8 {
        self.0
    }
}

impl Paint for Shadow {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.style.fuse_dim(self.0);
    }
}
fused_unary!(Shadow);

/// Darkening applied when a stamped background would vanish into the
/// cell's visible one.
const COLLISION_SHADOW: u8 = 39;

/// Stamp a color pair; the binary form fuses the source `factor` times
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFx {
    pub colors: Colors,
    pub factor: i32,
}

impl ColorFx {
    pub fn new(colors: Colors) -> Self {
        Self { colors, factor: 1 }
    }

    /// Colors of `brush`.
    pub fn from_brush(brush: &Cell) -> Self {
        Self::new(brush.colors)
    }

    /// Same colors, fused `factor` times.
    pub fn times(self, factor: i32) -> Self {
        Self { factor, ..self }
    }
}

impl Paint for ColorFx {
    fn paint(&self, dst: &mut Cell) {
        let visible = if dst.style.invert() { dst.colors.fg } else { dst.colors.bg };
        dst.colors = self.colors;
        if visible == self.colors.bg {
            dst.colors.bg.shadow(COLLISION_SHADOW);
        }
    }
}

impl Compose for ColorFx {
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        for _ in 0..self.factor {
            dst.fuse(src);
        }
        self.paint(dst);
    }
}

/// Take a brush's colors and style, then fuse the source on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mimic {
    pub colors: Colors,
    pub style: Style,
}

impl Mimic {
    pub fn new(brush: &Cell) -> Self {
        Self { colors: brush.colors, style: brush.style }
    }
}

impl Paint for Mimic {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.colors = self.colors;
        dst.style.meta(self.style);
    }
}

impl Compose for Mimic {
    #[inline]
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        self.paint(dst);
        dst.fuse(src);
    }
}

/// Fuse while forcing a link id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnlyId(pub u32);

impl Paint for OnlyId {
    #[inline]
    fn paint(&self, dst: &mut Cell) {
        dst.id = self.0;
    }
}

impl Compose for OnlyId {
    #[inline]
    fn compose(&self, dst: &mut Cell, src: &Cell) {
        dst.fuse_with_id(src, self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Argb = Argb(0xFFFF_0000);
    const BLUE: Argb = Argb(0xFF00_00FF);

    fn base() -> Cell {
        Cell::from_byte(b'a').with_bg(RED).with_fg(Argb::WHITE).with_link(1)
    }

    // ====== Contrast tests ======

    #[test]
    fn contrast_threshold_tracks_white_tint() {
        assert_eq!(Contrast::threshold(), Argb::from(Tint::WhiteDk).luma() - 15);
        assert_eq!(Contrast::invert(Argb::WHITE), Argb::BLACK);
        assert_eq!(Contrast::invert(Argb::BLACK), Argb::WHITE);
        assert_eq!(Contrast::invert(Argb::rgb(0, 0, 255)), Argb::WHITE);
    }

    #[test]
    fn contrast_picks_foreground_for_colorless_source() {
        let mut dst = Cell::default().with_bg(Argb::WHITE);
        Contrast.compose(&mut dst, &Cell::from_byte(b'x'));
        assert_eq!(dst.colors.fg, Argb::BLACK);
        assert_eq!(dst.glyph, crate::glyph::Glyph::from_byte(b'x'));

        let mut dst = Cell::default();
        Contrast.compose(&mut dst, &Cell::from_byte(b'x'));
        assert_eq!(dst.colors.fg, Argb::WHITE);
    }

    #[test]
    fn contrast_skips_null_source() {
        let mut dst = base();
        Contrast.compose(&mut dst, &Cell::from_byte(0).with_bg(BLUE));
        assert_eq!(dst, base());
    }

    #[test]
    fn contrast_keeps_source_foreground() {
        let mut dst = Cell::default().with_bg(Argb::WHITE);
        Contrast.compose(&mut dst, &Cell::from_byte(b'x').with_fg(BLUE));
        assert_eq!(dst.colors.fg, BLUE);
    }

    // ====== Copy tests ======

    #[test]
    fn flat_keeps_link_full_takes_it() {
        let src = Cell::from_byte(b'z').with_bg(BLUE).with_link(7);
        let mut a = base();
        Flat.compose(&mut a, &src);
        assert_eq!(a, src);
        assert_eq!(a.id, 1);
        let mut b = base();
        Full.compose(&mut b, &src);
        assert_eq!(b.id, 7);
    }

    #[test]
    fn wipe_zeroes() {
        let mut c = base();
        Wipe.paint(&mut c);
        assert!(c.is_empty());
    }

    #[test]
    fn text_takes_glyph_only() {
        let mut c = base();
        Text.compose(&mut c, &Cell::from_byte(b'q').with_bg(BLUE));
        assert_eq!(c.glyph, crate::glyph::Glyph::from_byte(b'q'));
        assert_eq!(c.colors.bg, RED);
    }

    // ====== Parametrized tests ======

    #[test]
    fn xlucent_forces_alpha() {
        let mut c = base();
        Xlucent(0x40).compose(&mut c, &Cell::default());
        assert_eq!(c.colors.bg.a(), 0x40);
    }

    #[test]
    fn shadow_is_clamped_and_ored() {
        assert_eq!(Shadow::new(1000).depth(), 255);
        assert_eq!(Shadow::new(-3).depth(), 0);
        let mut c = base();
        c.style.set_dim(1);
        Shadow::new(2).paint(&mut c);
        assert_eq!(c.style.dim(), 3);
    }

    #[test]
    fn transparent_uses_coverage() {
        let mut c = base();
        Transparent(0).compose(&mut c, &Cell::default().with_bg(BLUE));
        assert_eq!(c.colors.bg, RED);
        Transparent(255).compose(&mut c, &Cell::default().with_bg(BLUE));
        assert_eq!(c.colors.bg, BLUE);
    }

    #[test]
    fn color_stamps_and_darkens_on_collision() {
        let fx = ColorFx::new(Colors::new(RED, BLUE));
        let mut c = base();
        fx.paint(&mut c);
        let mut expected = RED;
        expected.shadow(39);
        assert_eq!(c.colors.bg, expected);
        assert_eq!(c.colors.fg, BLUE);

        let mut c = Cell::default().with_bg(Argb::BLACK);
        fx.paint(&mut c);
        assert_eq!(c.colors.bg, RED);
    }

    #[test]
    fn color_fuses_factor_times() {
        let fx = ColorFx::new(Colors::new(RED, BLUE)).times(2);
        let mut c = Cell::default().with_bg(Argb::BLACK);
        let mut src = Cell::default();
        src.style.set_dim(1);
        fx.compose(&mut c, &src);
        assert_eq!(c.style.dim(), 1);
        assert_eq!(c.colors.bg, RED);
    }

    #[test]
    fn mimic_copies_brush_then_fuses() {
        let mut brush = Cell::default().with_bg(BLUE);
        brush.style.set_italic(true);
        let mut c = base();
        Mimic::new(&brush).compose(&mut c, &Cell::from_byte(b'k'));
        assert_eq!(c.colors.bg, BLUE);
        assert_eq!(c.glyph, crate::glyph::Glyph::from_byte(b'k'));
        assert!(!c.style.italic());

        let mut c = base();
        Mimic::new(&brush).paint(&mut c);
        assert!(c.style.italic());
        assert_eq!(c.glyph, base().glyph);
    }

    #[test]
    fn onlyid_forces_link() {
        let mut c = base();
        OnlyId(5).compose(&mut c, &Cell::from_byte(b'k').with_link(9));
        assert_eq!(c.id, 5);
        OnlyId(6).paint(&mut c);
        assert_eq!(c.id, 6);
    }

    #[test]
    fn fused_unary_applies_after_fuse() {
        let mut c = base();
        Reverse.compose(&mut c, &Cell::default().with_bg(BLUE));
        assert_eq!(c.colors.fg, BLUE);
        assert_eq!(c.colors.bg, Argb::WHITE);
    }

    // ====== Adaptor tests ======

    #[test]
    fn brush_binds_source() {
        let brush = Fuse.brush(Cell::from_byte(b'b').with_bg(BLUE));
        let mut c = base();
        brush.paint(&mut c);
        assert_eq!(c.colors.bg, BLUE);
        assert_eq!(c.glyph, crate::glyph::Glyph::from_byte(b'b'));
    }

    #[test]
    fn closures_are_shaders() {
        let swap_fg = |dst: &mut Cell, src: &Cell| dst.colors.fg = src.colors.bg;
        let mut c = base();
        swap_fg.compose(&mut c, &Cell::default().with_bg(BLUE));
        assert_eq!(c.colors.fg, BLUE);
        let clear = |dst: &mut Cell| dst.id = 0;
        clear.paint(&mut c);
        assert_eq!(c.id, 0);
    }
}
