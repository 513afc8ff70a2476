#![forbid(unsafe_code)]

//! Packed 64-bit style token.
//!
//! # Layout
//!
//! | bits  | field      | notes                                        |
//! |-------|------------|----------------------------------------------|
//! | 0     | bold       |                                              |
//! | 1     | italic     |                                              |
//! | 2     | invert     |                                              |
//! | 3     | overline   |                                              |
//! | 4     | strike     |                                              |
//! | 5-7   | underline  | [`Underline`]                                |
//! | 8-15  | ucolor     | 256-color index, 0 follows the foreground    |
//! | 16-17 | cursor     | [`CursorStyle`]                              |
//! | 18    | hyperlink  | the cell's `px` carries the link hash        |
//! | 19    | blink      |                                              |
//! | 20-21 | bitmap     | [`BitmapKind`]                               |
//! | 22-23 | fusion     | background interpolation with neighbors      |
//! | 24-31 | shadow     | additive dim depth                           |
//! | 32    | hidden     |                                              |
//! | 40-47 | mosaic     | fragment position: `x` low 5 bits, `y` high 3 |
//! | 48-55 | cursor bg  | 256-color index, 0 = unset                   |
//! | 56-63 | cursor fg  | 256-color index, 0 = unset                   |
//!
//! Everything below `mosaic` is *shared*: two cells with equal shared bits
//! render with the same escape sequence. The rest is unique per cell and
//! ignored by [`Style::like`].

use crate::color::Argb;
use crate::palette::VT256;

/// A bit range inside the style token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Field {
    offset: u32,
    width: u32,
}

impl Field {
    const fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }

    const fn mask(self) -> u64 {
        ((1u64 << self.width) - 1) << self.offset
    }
}

const BOLD: Field = Field::new(0, 1);
const ITALIC: Field = Field::new(1, 1);
const INVERT: Field = Field::new(2, 1);
const OVERLINE: Field = Field::new(3, 1);
const STRIKE: Field = Field::new(4, 1);
const UNDERLINE: Field = Field::new(5, 3);
const UCOLOR: Field = Field::new(8, 8);
const CURSOR: Field = Field::new(16, 2);
const HYPERLINK: Field = Field::new(18, 1);
const BLINK: Field = Field::new(19, 1);
const BITMAP: Field = Field::new(20, 2);
const FUSION: Field = Field::new(22, 2);
const SHADOW: Field = Field::new(24, 8);
const HIDDEN: Field = Field::new(32, 1);
const MOSAIC: Field = Field::new(40, 8);
const CURSOR_BG: Field = Field::new(48, 8);
const CURSOR_FG: Field = Field::new(56, 8);

const SHARED_FIELDS: [Field; 14] = [
    BOLD, ITALIC, INVERT, OVERLINE, STRIKE, UNDERLINE, UCOLOR, CURSOR, HYPERLINK, BLINK, BITMAP,
    FUSION, SHADOW, HIDDEN,
];
const UNIQUE_FIELDS: [Field; 3] = [MOSAIC, CURSOR_BG, CURSOR_FG];

/// Bits compared by [`Style::like`].
pub const SHARED_BITS: u64 = (1u64 << MOSAIC.offset) - 1;

const fn fields_disjoint(fields: &[Field]) -> bool {
    let mut i = 0;
    while i < fields.len() {
        let mut j = i + 1;
        while j < fields.len() {
            if fields[i].mask() & fields[j].mask() != 0 {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn fields_within(fields: &[Field], bits: u64) -> bool {
    let mut i = 0;
    while i < fields.len() {
        if fields[i].mask() & !bits != 0 {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(fields_disjoint(&SHARED_FIELDS));
const _: () = assert!(fields_disjoint(&UNIQUE_FIELDS));
const _: () = assert!(fields_within(&SHARED_FIELDS, SHARED_BITS));
const _: () = assert!(fields_within(&UNIQUE_FIELDS, !SHARED_BITS));

/// Mask selecting the x part of a mosaic value.
pub const MOSAIC_X_MASK: u8 = 0b1_1111;
/// Shift of the y part of a mosaic value.
pub const MOSAIC_Y_SHIFT: u32 = 5;
/// Mosaic of the first fragment (1, 1) of a glyph matrix.
pub const MOSAIC_11: u8 = 1 | (1 << MOSAIC_Y_SHIFT);

/// Underline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Underline {
    #[default]
    None = 0,
    Line = 1,
    Biline = 2,
    Wavy = 3,
    Dotted = 4,
    Dashed = 5,
}

impl Underline {
    /// Decode a stored value; the reserved codes 6 and 7 read as `None`.
    pub const fn from_bits(v: u8) -> Self {
        match v {
            1 => Self::Line,
            2 => Self::Biline,
            3 => Self::Wavy,
            4 => Self::Dotted,
            5 => Self::Dashed,
            _ => Self::None,
        }
    }
}

/// Text cursor drawn inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CursorStyle {
    #[default]
    None = 0,
    Underline = 1,
    Block = 2,
    IBar = 3,
}

impl CursorStyle {
    pub const fn from_bits(v: u8) -> Self {
        match v & 0b11 {
            1 => Self::Underline,
            2 => Self::Block,
            3 => Self::IBar,
            _ => Self::None,
        }
    }
}

/// Kind of raw bitmap attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BitmapKind {
    #[default]
    None = 0,
    Sixel = 1,
    Kitty = 2,
    Iterm = 3,
}

impl BitmapKind {
    pub const fn from_bits(v: u8) -> Self {
        match v & 0b11 {
            1 => Self::Sixel,
            2 => Self::Kitty,
            3 => Self::Iterm,
            _ => Self::None,
        }
    }
}

bitflags::bitflags! {
    /// On/off attributes of a style, as seen by the diff scanner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 0b0000_0001;
        const ITALIC    = 0b0000_0010;
        const INVERT    = 0b0000_0100;
        const OVERLINE  = 0b0000_1000;
        const STRIKE    = 0b0001_0000;
        const BLINK     = 0b0010_0000;
        const HIDDEN    = 0b0100_0000;
        const HYPERLINK = 0b1000_0000;
    }
}

/// Packed style attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Style(u64);

const _: () = assert!(core::mem::size_of::<Style>() == 8);

impl Style {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn from_token(token: u64) -> Self {
        Self(token)
    }

    /// Style with only the mosaic set.
    #[inline]
    pub const fn with_mosaic(mosaic: u8) -> Self {
        Self((mosaic as u64) << MOSAIC.offset)
    }

    #[inline]
    pub const fn token(self) -> u64 {
        self.0
    }

    #[inline]
    const fn get(self, f: Field) -> u64 {
        (self.0 & f.mask()) >> f.offset
    }

    #[inline]
    fn put(&mut self, f: Field, v: u64) {
        self.0 = (self.0 & !f.mask()) | ((v << f.offset) & f.mask());
    }

    /// Equal shared bits.
    #[inline]
    pub const fn like(self, other: Style) -> bool {
        self.0 & SHARED_BITS == other.0 & SHARED_BITS
    }

    /// Take everything from `other` but keep our mosaic.
    #[inline]
    pub fn meta(&mut self, other: Style) {
        self.0 = (self.0 & MOSAIC.mask()) | (other.0 & !MOSAIC.mask());
    }

    /// As [`meta`](Self::meta), OR-ing our shadow into the result.
    #[inline]
    pub fn meta_shadow(&mut self, other: Style) {
        self.0 = (self.0 & (MOSAIC.mask() | SHADOW.mask())) | (other.0 & !MOSAIC.mask());
    }

    /// Take everything from `other`, OR-ing our shadow into the result.
    #[inline]
    pub fn meta_shadow_matrix(&mut self, other: Style) {
        self.0 = (self.0 & SHADOW.mask()) | other.0;
    }

    #[inline]
    pub fn wipe(&mut self) {
        self.0 = 0;
    }

    /// Toggle the invert bit.
    #[inline]
    pub fn reverse(&mut self) {
        self.0 ^= INVERT.mask();
    }

    pub const fn bold(self) -> bool {
        self.get(BOLD) != 0
    }
    pub const fn italic(self) -> bool {
        self.get(ITALIC) != 0
    }
    pub const fn invert(self) -> bool {
        self.get(INVERT) != 0
    }
    pub const fn overline(self) -> bool {
        self.get(OVERLINE) != 0
    }
    pub const fn strike(self) -> bool {
        self.get(STRIKE) != 0
    }
    pub const fn blink(self) -> bool {
        self.get(BLINK) != 0
    }
    pub const fn hidden(self) -> bool {
        self.get(HIDDEN) != 0
    }
    pub const fn hyperlink(self) -> bool {
        self.get(HYPERLINK) != 0
    }

    pub fn set_bold(&mut self, b: bool) {
        self.put(BOLD, b as u64);
    }
    pub fn set_italic(&mut self, b: bool) {
        self.put(ITALIC, b as u64);
    }
    pub fn set_invert(&mut self, b: bool) {
        self.put(INVERT, b as u64);
    }
    pub fn set_overline(&mut self, b: bool) {
        self.put(OVERLINE, b as u64);
    }
    pub fn set_strike(&mut self, b: bool) {
        self.put(STRIKE, b as u64);
    }
    pub fn set_blink(&mut self, b: bool) {
        self.put(BLINK, b as u64);
    }
    pub fn set_hidden(&mut self, b: bool) {
        self.put(HIDDEN, b as u64);
    }
    pub fn set_hyperlink(&mut self, b: bool) {
        self.put(HYPERLINK, b as u64);
    }

    /// Stored underline code, including the reserved values.
    #[inline]
    pub const fn underline_bits(self) -> u8 {
        self.get(UNDERLINE) as u8
    }

    #[inline]
    pub const fn underline(self) -> Underline {
        Underline::from_bits(self.underline_bits())
    }

    pub fn set_underline(&mut self, u: Underline) {
        self.put(UNDERLINE, u as u64);
    }

    /// Underline color index; 0 follows the foreground.
    #[inline]
    pub const fn ucolor(self) -> u8 {
        self.get(UCOLOR) as u8
    }

    pub fn set_ucolor(&mut self, index: u8) {
        self.put(UCOLOR, index as u64);
    }

    #[inline]
    pub const fn cursor(self) -> CursorStyle {
        CursorStyle::from_bits(self.get(CURSOR) as u8)
    }

    pub fn set_cursor(&mut self, c: CursorStyle) {
        self.put(CURSOR, c as u64);
    }

    #[inline]
    pub const fn bitmap(self) -> BitmapKind {
        BitmapKind::from_bits(self.get(BITMAP) as u8)
    }

    pub fn set_bitmap(&mut self, kind: BitmapKind) {
        self.put(BITMAP, kind as u64);
    }

    /// Bitmap bits in place (non-zero when a bitmap is attached).
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0 & BITMAP.mask()
    }

    /// Replace the bitmap bits with the in-place value `raw`.
    #[inline]
    pub fn set_raw(&mut self, raw: u64) {
        self.0 = (self.0 & !BITMAP.mask()) | (raw & BITMAP.mask());
    }

    /// Two 1-bit interpolation kinds: bit 0 toward the right neighbor,
    /// bit 1 toward the one below.
    #[inline]
    pub const fn fusion(self) -> u8 {
        self.get(FUSION) as u8
    }

    pub fn set_fusion(&mut self, kind: u8) {
        self.put(FUSION, kind as u64);
    }

    /// Shadow depth.
    #[inline]
    pub const fn dim(self) -> u8 {
        self.get(SHADOW) as u8
    }

    pub fn set_dim(&mut self, n: u8) {
        self.put(SHADOW, n as u64);
    }

    /// OR `n` into the shadow depth.
    #[inline]
    pub fn fuse_dim(&mut self, n: u8) {
        self.0 |= (n as u64) << SHADOW.offset;
    }

    #[inline]
    pub const fn mosaic(self) -> u8 {
        self.get(MOSAIC) as u8
    }

    pub fn set_mosaic(&mut self, m: u8) {
        self.put(MOSAIC, m as u64);
    }

    /// Mosaic bits in place; non-zero when the cell occupies a matrix slot.
    #[inline]
    pub const fn xy(self) -> u64 {
        self.0 & MOSAIC.mask()
    }

    /// Replace the mosaic bits with the in-place value `xy`.
    #[inline]
    pub fn set_xy_raw(&mut self, xy: u64) {
        self.0 = (self.0 & !MOSAIC.mask()) | (xy & MOSAIC.mask());
    }

    /// Set the fragment position within the glyph matrix (1-based).
    #[inline]
    pub fn set_xy(&mut self, x: i32, y: i32) {
        let m = (x as u32 & MOSAIC_X_MASK as u32) + ((y as u32) << MOSAIC_Y_SHIFT);
        self.set_mosaic(m as u8);
    }

    /// Fragment position `(x, y)`.
    #[inline]
    pub const fn fragment(self) -> (i32, i32) {
        let m = self.mosaic();
        ((m & MOSAIC_X_MASK) as i32, (m >> MOSAIC_Y_SHIFT) as i32)
    }

    /// Cache the cursor colors as 256-color indices. Transparent colors
    /// are stored as unset.
    pub fn set_cursor_color(&mut self, bg: Argb, fg: Argb) {
        let index = |c: Argb| if c.a() == 0 { 0 } else { c.to_256cube() };
        self.put(CURSOR_BG, index(bg) as u64);
        self.put(CURSOR_FG, index(fg) as u64);
    }

    /// Cached cursor `(bg, fg)`; unset entries are transparent.
    pub fn cursor_color(self) -> (Argb, Argb) {
        let color = |i: u64| if i != 0 { VT256[i as usize] } else { Argb::default() };
        (color(self.get(CURSOR_BG)), color(self.get(CURSOR_FG)))
    }

    /// On/off attributes as flags.
    pub fn flags(self) -> StyleFlags {
        let mut f = StyleFlags::empty();
        f.set(StyleFlags::BOLD, self.bold());
        f.set(StyleFlags::ITALIC, self.italic());
        f.set(StyleFlags::INVERT, self.invert());
        f.set(StyleFlags::OVERLINE, self.overline());
        f.set(StyleFlags::STRIKE, self.strike());
        f.set(StyleFlags::BLINK, self.blink());
        f.set(StyleFlags::HIDDEN, self.hidden());
        f.set(StyleFlags::HYPERLINK, self.hyperlink());
        f
    }
}
