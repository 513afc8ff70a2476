#![forbid(unsafe_code)]

//! The canvas cell and its blend operators.
//!
//! # Layout (32 bytes)
//!
//! ```text
//! Cell {
//!     colors: Colors,  // 8 bytes - bg, fg
//!     glyph: Glyph,    // 8 bytes - cluster and matrix size
//!     style: Style,    // 8 bytes - attributes and fragment position
//!     id: u32,         // 4 bytes - link id (owner object)
//!     px: u32,         // 4 bytes - attached bitmap or hyperlink hash
//! }
//! ```
//!
//! A wide or tall glyph spans several cells. Every cell of the matrix holds
//! the same glyph; the style's mosaic tells which fragment the cell shows.
//! A cell whose mosaic is zero occupies no matrix slot: blends treat it as
//! "colors only" and leave the destination glyph alone.
//!
//! Equality compares everything except the link id.

use crate::color::{Argb, DEFAULT_COLOR};
use crate::glyph::{Glyph, MAX_WIDTH};
use crate::jumbo::Jumbos;
use crate::palette::VT256;
use crate::scan::Svga;
use crate::shader::Contrast;
use crate::style::{CursorStyle, MOSAIC_11, MOSAIC_X_MASK, MOSAIC_Y_SHIFT, Style, Underline};

/// Background and foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colors {
    pub bg: Argb,
    pub fg: Argb,
}

impl Colors {
    #[inline]
    pub const fn new(bg: Argb, fg: Argb) -> Self {
        Self { bg, fg }
    }

    #[inline]
    pub fn wipe(&mut self) {
        self.bg.wipe();
        self.fg.wipe();
    }
}

/// One character cell.
#[derive(Clone, Copy, Eq, Default)]
pub struct Cell {
    pub colors: Colors,
    pub glyph: Glyph,
    pub style: Style,
    /// Link id of the object that painted the cell.
    pub id: u32,
    /// Attached bitmap reference (or hyperlink hash).
    pub px: u32,
}

const _: () = assert!(core::mem::size_of::<Cell>() == 32);

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
            && self.style == other.style
            && self.glyph == other.glyph
            && self.px == other.px
    }
}

impl Cell {
    /// All-zero cell.
    pub const EMPTY: Self = Self {
        colors: Colors::new(Argb::TRANSPARENT, Argb::TRANSPARENT),
        glyph: Glyph::EMPTY,
        style: Style::EMPTY,
        id: 0,
        px: 0,
    };

    /// Single-byte cluster in the first matrix slot.
    #[inline]
    pub const fn from_byte(c: u8) -> Self {
        Self {
            glyph: Glyph::from_byte(c),
            style: Style::with_mosaic(MOSAIC_11),
            ..Self::EMPTY
        }
    }

    /// Single codepoint in the first slot of a matrix as wide as the
    /// codepoint.
    pub fn from_char(c: char) -> Self {
        let mut glyph = Glyph::from_char(c);
        glyph.set_mtx(tessera_core::text::char_width(c).clamp(1, 2) as i32, 1);
        Self {
            glyph,
            style: Style::with_mosaic(MOSAIC_11),
            ..Self::EMPTY
        }
    }

    /// First cluster of `utf8`, registering it in `jumbos` when needed.
    pub fn from_text(utf8: &str, jumbos: &Jumbos) -> Self {
        let mut c = Self::EMPTY;
        c.txt(utf8, jumbos);
        c
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Argb) -> Self {
        self.colors.bg = bg;
        self
    }

    #[inline]
    pub const fn with_fg(mut self, fg: Argb) -> Self {
        self.colors.fg = fg;
        self
    }

    #[inline]
    pub const fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    #[inline]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub const fn with_link(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    // ----- predicates -----

    /// The cell occupies a glyph-matrix slot.
    #[inline]
    pub const fn occupied(&self) -> bool {
        self.style.xy() != 0
    }

    /// Every field, the link id included, is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.bg.token() == 0
            && self.colors.fg.token() == 0
            && self.glyph.token() == 0
            && self.style.token() == 0
            && self.id == 0
            && self.px == 0
    }

    /// Same glyph token.
    #[inline]
    pub fn same_txt(&self, other: &Cell) -> bool {
        self.glyph == other.glyph
    }

    /// Renders identically: colors, shared style bits, and the bitmap
    /// reference when one is attached.
    #[inline]
    pub fn like(&self, other: &Cell) -> bool {
        self.colors == other.colors
            && self.style.like(other.style)
            && (self.style.raw() == 0 || self.px == other.px)
    }

    /// Same glyph and same fragment of it.
    #[inline]
    pub fn same_fragment(&self, other: &Cell) -> bool {
        self.glyph == other.glyph && self.style.xy() == other.style.xy()
    }

    /// `next` is the other half of the same wide glyph.
    #[inline]
    pub fn check_pair(&self, next: &Cell) -> bool {
        self.glyph == next.glyph && self.like(next)
    }

    #[inline]
    pub const fn is_space(&self) -> bool {
        self.glyph.is_space()
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.glyph.is_null()
    }

    /// Background is neither fully transparent nor fully opaque.
    #[inline]
    pub const fn is_alpha_blendable(&self) -> bool {
        self.colors.bg.is_alpha_blendable()
    }

    /// Looks the same on screen: same glyph (or both blank) over the same
    /// background, and the same foreground unless nothing is drawn with it.
    pub fn issame_visual(&self, other: &Cell) -> bool {
        if (self.glyph == other.glyph || (self.is_space() && other.is_space()))
            && self.colors.bg == other.colors.bg
        {
            return !self.occupied()
                || self.glyph.bytes()[1] == b' '
                || self.colors.fg == other.colors.fg;
        }
        false
    }

    /// Matrix `(w, h)` and fragment `(x, y)`.
    #[inline]
    pub const fn whxy(&self) -> (i32, i32, i32, i32) {
        let m = self.style.mosaic();
        (
            self.glyph.size_w() + 1,
            self.glyph.size_h() + 1,
            (m & MOSAIC_X_MASK) as i32,
            (m >> MOSAIC_Y_SHIFT) as i32,
        )
    }

    /// The cell is the right edge of a multi-cell matrix.
    #[inline]
    pub const fn matrix_end(&self) -> bool {
        let w = self.glyph.size_w() + 1;
        w > 1 && w == (self.style.mosaic() & MOSAIC_X_MASK) as i32
    }

    // ----- blends -----

    /// General compositing of `c` over this cell.
    ///
    /// Colors blend one-sided onto an opaque destination, two-sided
    /// otherwise. If `c` occupies a slot its glyph and style replace ours;
    /// otherwise only style metadata merges and our mosaic stays. A source
    /// with an all-zero background ORs its shadow into ours instead of
    /// overwriting it.
    pub fn fuse(&mut self, c: &Cell) {
        if self.colors.fg.a() == 0xFF {
            self.colors.fg.mix_one(c.colors.fg);
        } else {
            self.colors.fg.mix(c.colors.fg);
        }
        if self.colors.bg.a() == 0xFF {
            self.colors.bg.mix_one(c.colors.bg);
        } else {
            self.colors.bg.mix(c.colors.bg);
        }
        let raw = c.style.raw();
        if raw != 0 {
            self.px = c.px;
            self.style.set_raw(raw);
        }
        let transparent = c.colors.bg.token() == 0;
        if c.occupied() {
            self.glyph = c.glyph;
            if transparent {
                self.style.meta_shadow_matrix(c.style);
            } else {
                self.style = c.style;
            }
        } else if transparent {
            self.style.meta_shadow(c.style);
        } else {
            self.style.meta(c.style);
        }
    }

    /// [`fuse`](Self::fuse) unless `c` is a null cell.
    #[inline]
    pub fn lite(&mut self, c: &Cell) {
        if !c.glyph.is_null() {
            self.fuse(c);
        }
    }

    /// One-sided color blend; glyph and style are taken when `c` occupies
    /// a slot.
    pub fn mix(&mut self, c: &Cell) {
        self.colors.fg.mix_one(c.colors.fg);
        self.colors.bg.mix_one(c.colors.bg);
        if c.occupied() {
            self.style = c.style;
            self.glyph = c.glyph;
        }
        if self.style.raw() != 0 {
            self.px = c.px;
        }
    }

    /// Two-sided color blend only.
    #[inline]
    pub fn blend(&mut self, c: &Cell) {
        self.colors.fg.mix(c.colors.fg);
        self.colors.bg.mix(c.colors.bg);
    }

    /// Color blend with coverage `alpha`, ignoring the colors' own alpha.
    pub fn mix_alpha(&mut self, c: &Cell, alpha: u8) {
        self.colors.fg.mix_alpha(c.colors.fg, alpha as i32);
        self.colors.bg.mix_alpha(c.colors.bg, alpha as i32);
        let raw = c.style.raw();
        if raw != 0 {
            self.px = c.px;
            self.style.set_raw(raw);
        }
        if c.occupied() {
            self.style = c.style;
            self.glyph = c.glyph;
        }
    }

    /// As [`mix_alpha`](Self::mix_alpha), also taking the link id. A new
    /// glyph is drawn over the background, so our foreground restarts from
    /// it.
    pub fn mixfull(&mut self, c: &Cell, alpha: i32) {
        if c.id != 0 {
            self.id = c.id;
        }
        if c.occupied() {
            self.style = c.style;
            self.glyph = c.glyph;
            self.colors.fg = self.colors.bg;
        }
        if self.style.raw() != 0 {
            self.px = c.px;
        }
        self.colors.fg.mix_alpha(c.colors.fg, alpha);
        self.colors.bg.mix_alpha(c.colors.bg, alpha);
    }

    /// Fuse and set the link id to `oid`.
    #[inline]
    pub fn fuse_with_id(&mut self, c: &Cell, oid: u32) {
        self.fuse(c);
        self.id = oid;
    }

    /// Fuse and take the link id of `c` when it has one.
    #[inline]
    pub fn fuse_full(&mut self, c: &Cell) {
        self.fuse(c);
        if c.id != 0 {
            self.id = c.id;
        }
    }

    /// Fuse and take the link id of `c` unconditionally.
    #[inline]
    pub fn fuse_id(&mut self, c: &Cell) {
        self.fuse(c);
        self.id = c.id;
    }

    /// Cursor and selection rendering.
    ///
    /// With a glyph or an underline in `c`, the new foreground is the
    /// destination background tinted by `c.fg`; otherwise our foreground
    /// is tinted by `c.bg`. Glyph, style, bitmap and link come from `c`.
    pub fn overlay(&mut self, c: &Cell) {
        let bg_opaque = self.colors.bg.a() == 0xFF;
        if c.occupied() || c.style.underline_bits() != 0 {
            self.colors.fg = self.colors.bg;
            if bg_opaque {
                self.colors.fg.mix_one(c.colors.fg);
            } else {
                self.colors.fg.mix(c.colors.fg);
            }
        } else if self.colors.fg.a() == 0xFF {
            self.colors.fg.mix_one(c.colors.bg);
        } else {
            self.colors.fg.mix(c.colors.bg);
        }
        self.glyph = c.glyph;
        self.style = c.style;
        if bg_opaque {
            self.colors.bg.mix_one(c.colors.bg);
        } else {
            self.colors.bg.mix(c.colors.bg);
        }
        if c.style.raw() != 0 {
            self.px = c.px;
        }
        if c.id != 0 {
            self.id = c.id;
        }
    }

    /// Take colors, bitmap and style of `c`, keeping our mosaic.
    pub fn meta(&mut self, c: &Cell) {
        self.colors = c.colors;
        self.style.meta(c.style);
        self.px = c.px;
    }

    /// Paste merge.
    ///
    /// A null source moves over us unless its background is set, in which
    /// case its metadata applies. A non-null source with the default
    /// background replaces only the glyph; anything else replaces the cell.
    pub fn skipnulls(&mut self, c: &Cell) {
        if c.glyph.is_null() {
            if c.colors.bg != DEFAULT_COLOR {
                self.meta(c);
            }
        } else if c.colors.bg == DEFAULT_COLOR {
            self.glyph = c.glyph;
            self.style.set_xy_raw(c.style.xy());
        } else {
            *self = *c;
        }
    }

    /// Copy everything but the link id.
    #[inline]
    pub fn set(&mut self, c: &Cell) -> &mut Self {
        self.colors = c.colors;
        self.style = c.style;
        self.glyph = c.glyph;
        self.px = c.px;
        self
    }

    /// Highlight background and foreground together.
    #[inline]
    pub fn xlight(&mut self, factor: i32) -> &mut Self {
        let Colors { bg, fg } = &mut self.colors;
        bg.xlight_pair(factor, fg);
        self
    }

    /// Highlight by underlining with a shifted color.
    pub fn underlight(&mut self, factor: i32) -> &mut Self {
        let (mut fgc, mut bgc) = (self.colors.fg, self.colors.bg);
        if self.style.invert() {
            core::mem::swap(&mut fgc, &mut bgc);
        }
        let index = self.style.ucolor();
        let mut color = if self.style.underline() == Underline::Line {
            if index != 0 {
                let mut c = VT256[index as usize];
                c.set_a(fgc.a());
                c
            } else {
                fgc
            }
        } else {
            bgc
        };
        color.xlight(factor);
        self.style.set_ucolor(color.to_256cube());
        self.style.set_underline(Underline::Line);
        self
    }

    /// Invert both colors.
    #[inline]
    pub fn invert(&mut self) {
        self.colors.fg.invert();
        self.colors.bg.invert();
    }

    /// Swap foreground and background.
    #[inline]
    pub fn reverse(&mut self) {
        let Colors { bg, fg } = &mut self.colors;
        core::mem::swap(bg, fg);
    }

    /// Flip the invert attribute.
    #[inline]
    pub fn invbit(&mut self) {
        self.style.reverse();
    }

    /// Gray out the foreground.
    pub fn disabled(&mut self) {
        self.colors.fg.grayscale().shadow(78);
        self.colors.fg.set_a(0xFF);
    }

    /// Set the shadow depth, or halve the foreground when `n == -1`.
    pub fn dim(&mut self, n: i32) -> &mut Self {
        if n == -1 {
            self.colors.fg.faint();
        } else {
            self.style.set_dim(n.clamp(0, 255) as u8);
        }
        self
    }

    /// Colors interpolated between two cells.
    pub fn avg(&mut self, c1: &Cell, c2: &Cell, level: i32) {
        self.colors.fg = Argb::transit(c1.colors.fg, c2.colors.fg, level);
        self.colors.bg = Argb::transit(c1.colors.bg, c2.colors.bg, level);
    }

    // ----- cursor -----

    /// Put a cursor of `style` in the cell, colored after `color`.
    /// Transparent colors leave the cursor to derive its colors.
    pub fn set_cursor(&mut self, style: CursorStyle, color: &Cell) {
        self.style.set_cursor(style);
        self.style.set_cursor_color(color.colors.bg, color.colors.fg);
    }

    /// Cached cursor `(bg, fg)`.
    #[inline]
    pub fn cursor_color(&self) -> (Argb, Argb) {
        self.style.cursor_color()
    }

    /// Render the cell's cursor into its colors and underline.
    pub fn draw_cursor(&mut self) {
        let (cursor_bg, cursor_fg) = self.cursor_color();
        let under = if self.style.invert() { self.colors.fg } else { self.colors.bg };
        match self.style.cursor() {
            CursorStyle::Block => {
                let (f, b) = if cursor_bg.a() == 0 {
                    let f = if cursor_fg.a() != 0 { cursor_fg } else { under };
                    (f, Contrast::invert(under))
                } else {
                    let f = if cursor_fg.a() != 0 { cursor_fg } else { Contrast::invert(cursor_bg) };
                    (f, cursor_bg)
                };
                self.style.set_invert(false);
                self.colors.fg = f;
                self.colors.bg = b;
            }
            CursorStyle::IBar | CursorStyle::Underline => {
                if cursor_bg.a() == 0 {
                    if self.style.underline() == Underline::Line {
                        self.style.set_underline(Underline::None);
                    } else {
                        self.style.set_underline(Underline::Line);
                        self.style.set_ucolor(Contrast::invert(under).to_256cube());
                    }
                } else {
                    let u = cursor_bg.to_256cube();
                    if u == self.style.ucolor() && self.style.underline() == Underline::Line {
                        self.style.set_underline(Underline::None);
                    } else {
                        self.style.set_underline(Underline::Line);
                        self.style.set_ucolor(u);
                    }
                }
            }
            CursorStyle::None => {}
        }
    }

    // ----- text -----

    /// Encode the first cluster of `utf8` in the first slot of its matrix.
    /// Empty text clears the glyph and the slot.
    pub fn txt(&mut self, utf8: &str, jumbos: &Jumbos) -> &mut Self {
        if utf8.is_empty() {
            self.glyph.wipe();
            self.style.set_xy_raw(0);
        } else {
            let cluster = tessera_core::text::first_cluster(utf8);
            let w = tessera_core::text::grapheme_width(cluster).clamp(1, MAX_WIDTH as usize);
            self.glyph.set_direct(cluster, w as i32, 1, jumbos);
            self.style.set_xy(1, 1);
        }
        self
    }

    /// Encode a single codepoint in the first slot of a matrix as wide as
    /// the codepoint.
    pub fn txt_char(&mut self, c: char) -> &mut Self {
        self.glyph = Glyph::from_char(c);
        self.glyph.set_mtx(tessera_core::text::char_width(c).clamp(1, 2) as i32, 1);
        self.style.set_xy(1, 1);
        self
    }

    /// Encode `utf8` as one cluster with an explicit matrix and fragment.
    pub fn txt_with(
        &mut self,
        utf8: &str,
        (w, h): (i32, i32),
        (x, y): (i32, i32),
        jumbos: &Jumbos,
    ) -> &mut Self {
        self.glyph.set_direct(utf8, w, h, jumbos);
        self.style.set_xy(x, y);
        self
    }

    /// Single byte cluster in the first slot.
    #[inline]
    pub fn txt_byte(&mut self, c: u8) -> &mut Self {
        self.glyph.set_byte(c);
        self.style.set_mosaic(MOSAIC_11);
        self
    }

    /// Take the glyph of `c`.
    #[inline]
    pub fn txt_from(&mut self, c: &Cell) -> &mut Self {
        self.glyph = c.glyph;
        self
    }

    /// Take the colors of `c`.
    #[inline]
    pub fn clr_from(&mut self, c: &Cell) -> &mut Self {
        self.colors = c.colors;
        self
    }

    /// Store a C0 control in caret notation; other bytes are ignored.
    #[inline]
    pub fn set_c0(&mut self, c: u8) -> &mut Self {
        if c < b' ' {
            self.glyph.set_c0(c);
        }
        self
    }

    /// Set the matrix size and fragment.
    #[inline]
    pub fn set_whxy(&mut self, w: i32, h: i32, x: i32, y: i32) -> &mut Self {
        self.glyph.set_mtx(w, h);
        self.style.set_xy(x, y);
        self
    }

    /// Take glyph and fragment of `c`.
    #[inline]
    pub fn set_gc(&mut self, c: &Cell) {
        self.glyph = c.glyph;
        self.style.set_xy_raw(c.style.xy());
    }

    /// Clear glyph and fragment.
    #[inline]
    pub fn clear_gc(&mut self) {
        self.glyph.wipe();
        self.style.set_xy_raw(0);
    }

    /// Reset colors, style, glyph and bitmap to a blank space cell.
    pub fn reset(&mut self) -> &mut Self {
        let id = self.id;
        *self = Cell::from_byte(b' ').with_link(id);
        self
    }

    /// Zero everything but the link id.
    pub fn wipe(&mut self) {
        self.colors.wipe();
        self.glyph.wipe();
        self.style.wipe();
        self.px = 0;
    }

    /// Copy holding a space.
    pub fn spc(&self) -> Cell {
        let mut c = *self;
        c.txt_byte(b' ');
        c
    }

    /// Copy holding a null cluster.
    pub fn nul(&self) -> Cell {
        let mut c = *self;
        c.txt_byte(0);
        c
    }

    /// Null cell with our colors only.
    pub fn dry(&self) -> Cell {
        Cell::from_byte(0).with_colors(self.colors)
    }

    /// Append the cell's plain text to `dest`: right halves and empty cells
    /// become spaces, caret notation turns back into the control byte.
    pub fn scan_text(&self, dest: &mut String, jumbos: &Jumbos) {
        let (w, h, x, _) = self.whxy();
        if w == 0 || h != 1 || x != 1 {
            dest.push(' ');
            return;
        }
        let cluster = self.glyph.get(Svga::VtRgb, jumbos);
        let bytes = cluster.as_bytes();
        if bytes.len() == 2 && bytes[0] == b'^' {
            dest.push(char::from(bytes[1] & 0x1F));
        } else {
            dest.push_str(&cluster);
        }
    }

    // ----- setters -----

    #[inline]
    pub fn set_bg(&mut self, c: Argb) -> &mut Self {
        self.colors.bg = c;
        self
    }

    #[inline]
    pub fn set_fg(&mut self, c: Argb) -> &mut Self {
        self.colors.fg = c;
        self
    }

    #[inline]
    pub fn set_bg_alpha(&mut self, k: u8) -> &mut Self {
        self.colors.bg.set_a(k);
        self
    }

    #[inline]
    pub fn set_fg_alpha(&mut self, k: u8) -> &mut Self {
        self.colors.fg.set_a(k);
        self
    }

    /// Set both alphas.
    #[inline]
    pub fn set_alpha(&mut self, k: u8) -> &mut Self {
        self.colors.bg.set_a(k);
        self.colors.fg.set_a(k);
        self
    }

    #[inline]
    pub fn set_bold(&mut self, b: bool) -> &mut Self {
        self.style.set_bold(b);
        self
    }

    #[inline]
    pub fn set_italic(&mut self, b: bool) -> &mut Self {
        self.style.set_italic(b);
        self
    }

    #[inline]
    pub fn set_invert(&mut self, b: bool) -> &mut Self {
        self.style.set_invert(b);
        self
    }

    #[inline]
    pub fn set_overline(&mut self, b: bool) -> &mut Self {
        self.style.set_overline(b);
        self
    }

    #[inline]
    pub fn set_strike(&mut self, b: bool) -> &mut Self {
        self.style.set_strike(b);
        self
    }

    #[inline]
    pub fn set_blink(&mut self, b: bool) -> &mut Self {
        self.style.set_blink(b);
        self
    }

    #[inline]
    pub fn set_hidden(&mut self, b: bool) -> &mut Self {
        self.style.set_hidden(b);
        self
    }

    #[inline]
    pub fn set_underline(&mut self, u: Underline) -> &mut Self {
        self.style.set_underline(u);
        self
    }

    /// Underline color by 256-color index.
    #[inline]
    pub fn set_ucolor(&mut self, index: u8) -> &mut Self {
        self.style.set_ucolor(index);
        self
    }

    /// Underline color quantized to the 256-color cube.
    #[inline]
    pub fn set_ucolor_argb(&mut self, c: Argb) -> &mut Self {
        self.style.set_ucolor(c.to_256cube());
        self
    }

    #[inline]
    pub fn set_cursor_style(&mut self, s: CursorStyle) -> &mut Self {
        self.style.set_cursor(s);
        self
    }

    #[inline]
    pub fn set_px(&mut self, px: u32) -> &mut Self {
        self.px = px;
        self
    }

    #[inline]
    pub fn set_rtl(&mut self, b: bool) -> &mut Self {
        self.glyph.set_rtl(b);
        self
    }

    #[inline]
    pub fn set_mtx(&mut self, size: tessera_core::Point) -> &mut Self {
        self.glyph.set_mtx(size.x, size.y);
        self
    }

    #[inline]
    pub fn set_xy(&mut self, x: i32, y: i32) -> &mut Self {
        self.style.set_xy(x, y);
        self
    }

    #[inline]
    pub fn set_link(&mut self, id: u32) -> &mut Self {
        self.id = id;
        self
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Cell::from_char(c)
    }
}

impl core::fmt::Debug for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cell")
            .field("bg", &self.colors.bg)
            .field("fg", &self.colors.fg)
            .field("glyph", &self.glyph)
            .field("style", &format_args!("{:#018X}", self.style.token()))
            .field("id", &self.id)
            .field("px", &self.px)
            .finish()
    }
}
