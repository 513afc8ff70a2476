#![forbid(unsafe_code)]

//! Diff scanning: the minimal attribute changes between two cells.
//!
//! The encoder keeps a `base` cell mirroring what the terminal currently
//! shows. For every cell it calls [`Cell::scan`], which reports through an
//! [`SgrSink`] only what differs from `base` and then updates `base`.
//! Escape-sequence encoding is the sink's business.
//!
//! # Output modes
//!
//! | mode    | colors           | attributes                          |
//! |---------|------------------|-------------------------------------|
//! | `Vt2d`  | truecolor        | all, plus cursor and shadow depth   |
//! | `VtRgb` | truecolor        | all                                 |
//! | `Vt256` | 256-color        | all                                 |
//! | `Vt16`  | vtm 16 fg / 8 bg | underline shown as invert           |
//! | `Nt16`  | console 16       | all                                 |
//! | `Dtvt`  | nothing          | nothing (cells travel as binary)    |
//!
//! With [`OutputProfile::sgr`] off no attribute is emitted; only text.

use crate::cell::{Cell, Colors};
use crate::color::Argb;
use crate::jumbo::Jumbos;
use crate::palette::fix_collision_vtm8;
use crate::style::{CursorStyle, Style, StyleFlags, Underline};

/// Terminal capability level targeted by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Svga {
    /// Full truecolor with the extended cell attributes.
    Vt2d,
    /// Truecolor.
    #[default]
    VtRgb,
    /// xterm 256 colors.
    Vt256,
    /// 16-color fg over 8-color bg.
    Vt16,
    /// Legacy console 16 colors.
    Nt16,
    /// Internal binary transport; nothing to scan.
    Dtvt,
}

/// Output capability: color level and whether SGR is usable at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputProfile {
    pub svga: Svga,
    pub sgr: bool,
}

impl OutputProfile {
    pub const fn new(svga: Svga, sgr: bool) -> Self {
        Self { svga, sgr }
    }
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self::new(Svga::VtRgb, true)
    }
}

/// Receiver of attribute changes and text.
pub trait SgrSink {
    fn bold(&mut self, on: bool);
    fn italic(&mut self, on: bool);
    fn invert(&mut self, on: bool);
    fn overline(&mut self, on: bool);
    fn strike(&mut self, on: bool);
    fn blink(&mut self, on: bool);
    fn hidden(&mut self, on: bool);
    fn underline(&mut self, style: Underline);
    /// Underline color as a 256-color index; 0 follows the foreground.
    fn underline_color(&mut self, index: u8);
    fn cursor(&mut self, style: CursorStyle);
    fn dim(&mut self, depth: u8);
    /// Background at the mode's color depth.
    fn bg(&mut self, mode: Svga, color: Argb);
    /// Foreground at the mode's color depth.
    fn fg(&mut self, mode: Svga, color: Argb);
    /// Background by 8-color index.
    fn bg_8(&mut self, index: u8);
    /// Foreground by 16-color index.
    fn fg_16(&mut self, index: u8);
    /// Literal cluster text.
    fn text(&mut self, text: &str);
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SgrOp {
    Bold(bool),
    Italic(bool),
    Invert(bool),
    Overline(bool),
    Strike(bool),
    Blink(bool),
    Hidden(bool),
    Underline(Underline),
    UnderlineColor(u8),
    Cursor(CursorStyle),
    Dim(u8),
    Bg(Svga, Argb),
    Fg(Svga, Argb),
    Bg8(u8),
    Fg16(u8),
    Text(String),
}

/// Records every call; adjacent text is coalesced.
impl SgrSink for Vec<SgrOp> {
    fn bold(&mut self, on: bool) {
        self.push(SgrOp::Bold(on));
    }
    fn italic(&mut self, on: bool) {
        self.push(SgrOp::Italic(on));
    }
    fn invert(&mut self, on: bool) {
        self.push(SgrOp::Invert(on));
    }
    fn overline(&mut self, on: bool) {
        self.push(SgrOp::Overline(on));
    }
    fn strike(&mut self, on: bool) {
        self.push(SgrOp::Strike(on));
    }
    fn blink(&mut self, on: bool) {
        self.push(SgrOp::Blink(on));
    }
    fn hidden(&mut self, on: bool) {
        self.push(SgrOp::Hidden(on));
    }
    fn underline(&mut self, style: Underline) {
        self.push(SgrOp::Underline(style));
    }
    fn underline_color(&mut self, index: u8) {
        self.push(SgrOp::UnderlineColor(index));
    }
    fn cursor(&mut self, style: CursorStyle) {
        self.push(SgrOp::Cursor(style));
    }
    fn dim(&mut self, depth: u8) {
        self.push(SgrOp::Dim(depth));
    }
    fn bg(&mut self, mode: Svga, color: Argb) {
        self.push(SgrOp::Bg(mode, color));
    }
    fn fg(&mut self, mode: Svga, color: Argb) {
        self.push(SgrOp::Fg(mode, color));
    }
    fn bg_8(&mut self, index: u8) {
        self.push(SgrOp::Bg8(index));
    }
    fn fg_16(&mut self, index: u8) {
        self.push(SgrOp::Fg16(index));
    }
    fn text(&mut self, text: &str) {
        if let Some(SgrOp::Text(last)) = self.last_mut() {
            last.push_str(text);
        } else {
            self.push(SgrOp::Text(text.to_owned()));
        }
    }
}

const WHITESPACE: &str = " ";

/// Attributes reported through the on/off sink calls.
const SWITCHES: [(StyleFlags, fn(&mut dyn SgrSink, bool)); 7] = [
    (StyleFlags::BOLD, |d, on| d.bold(on)),
    (StyleFlags::ITALIC, |d, on| d.italic(on)),
    (StyleFlags::INVERT, |d, on| d.invert(on)),
    (StyleFlags::OVERLINE, |d, on| d.overline(on)),
    (StyleFlags::STRIKE, |d, on| d.strike(on)),
    (StyleFlags::BLINK, |d, on| d.blink(on)),
    (StyleFlags::HIDDEN, |d, on| d.hidden(on)),
];

impl Style {
    /// Report shared-attribute changes from `base` and update it.
    pub fn scan(self, base: &mut Style, dest: &mut dyn SgrSink, profile: OutputProfile) {
        let mode = profile.svga;
        if mode == Svga::Dtvt || self.like(*base) {
            return;
        }
        if profile.sgr {
            if mode == Svga::Vt2d {
                if self.cursor() != base.cursor() {
                    dest.cursor(self.cursor());
                }
                if self.dim() != base.dim() {
                    dest.dim(self.dim());
                }
            }
            if mode != Svga::Vt16 {
                let (ours, theirs) = (self.flags(), base.flags());
                let changed = ours ^ theirs;
                for (flag, emit) in SWITCHES {
                    if changed.contains(flag) {
                        emit(dest, ours.contains(flag));
                    }
                }
                if self.underline_bits() != base.underline_bits() {
                    dest.underline(self.underline());
                }
                if self.ucolor() != base.ucolor() {
                    dest.underline_color(self.ucolor());
                }
            } else if self.underline_bits() != base.underline_bits() {
                // No underline in 16-color consoles.
                dest.invert(self.underline_bits() != 0);
            }
        }
        *base = self;
    }
}

impl Colors {
    /// Report color changes from `base` and update it.
    pub fn scan(self, base: &mut Colors, dest: &mut dyn SgrSink, profile: OutputProfile) {
        let mode = profile.svga;
        match mode {
            Svga::Dtvt => {}
            Svga::Vt16 => {
                if self.fg == base.fg && self.bg == base.bg {
                    return;
                }
                if profile.sgr {
                    let mut f = self.fg.to_vtm16(true);
                    let b = self.bg.to_vtm8();
                    if self.fg != self.bg && f == b {
                        fix_collision_vtm8(&mut f);
                        if self.bg != base.bg {
                            dest.bg_8(b);
                        }
                        dest.fg_16(f);
                    } else {
                        if self.bg != base.bg {
                            dest.bg_8(b);
                        }
                        if self.fg != base.fg {
                            dest.fg_16(f);
                        }
                    }
                }
                *base = self;
            }
            _ => {
                if self.bg != base.bg {
                    base.bg = self.bg;
                    if profile.sgr {
                        dest.bg(mode, self.bg);
                    }
                }
                if self.fg != base.fg {
                    base.fg = self.fg;
                    if profile.sgr {
                        dest.fg(mode, self.fg);
                    }
                }
            }
        }
    }
}

impl Cell {
    /// Report color and attribute changes from `base` and update it.
    pub fn scan_attr(&self, base: &mut Cell, dest: &mut dyn SgrSink, profile: OutputProfile) {
        if !self.like(base) {
            self.colors.scan(&mut base.colors, dest, profile);
            self.style.scan(&mut base.style, dest, profile);
        }
    }

    /// Report what turns a terminal cell showing `base` into this cell,
    /// then the cluster text. Right halves and blank cells emit a space.
    pub fn scan(
        &self,
        base: &mut Cell,
        dest: &mut dyn SgrSink,
        profile: OutputProfile,
        jumbos: &Jumbos,
    ) {
        if profile.svga == Svga::Dtvt {
            return;
        }
        self.scan_attr(base, dest, profile);
        if self.occupied() && !self.is_space() {
            self.filter(base, dest, profile, jumbos);
        } else {
            dest.text(WHITESPACE);
        }
    }

    /// Shade blocks `░▒▓` become spaces over a background blended between
    /// the current colors, when truecolor SGR is available.
    fn filter(&self, base: &mut Cell, dest: &mut dyn SgrSink, profile: OutputProfile, jumbos: &Jumbos) {
        let mode = profile.svga;
        let cluster = self.glyph.get(mode, jumbos);
        if profile.sgr && matches!(mode, Svga::VtRgb | Svga::Vt2d) {
            if let [0xE2, 0x96, last] = *cluster.as_bytes() {
                let k = match last {
                    0x91 => 64,
                    0x92 => 96,
                    0x93 => 128,
                    _ => {
                        dest.text(&cluster);
                        return;
                    }
                };
                let bgc = Argb::transit(base.colors.bg, base.colors.fg, k);
                if bgc != base.colors.bg {
                    base.colors.bg = bgc;
                    dest.bg(mode, bgc);
                }
                dest.text(WHITESPACE);
                return;
            }
        }
        dest.text(&cluster);
    }
}
