#![forbid(unsafe_code)]

//! SGR color arguments.
//!
//! The decoder that splits an escape sequence into numbers lives upstream;
//! it hands us anything implementing [`SgrParams`]. [`ParamQueue`] is a
//! small in-memory implementation that parses `;`/`:` delimited text.

use smallvec::SmallVec;

use crate::color::Argb;
use crate::palette::VT256;

const MODE_RGB: i32 = 2;
const MODE_256: i32 = 5;

/// A cursor over SGR parameters.
pub trait SgrParams {
    /// Next parameter, plus whether it was attached to its predecessor
    /// with `:`. Returns `(default, false)` when exhausted.
    fn raw_arg(&mut self, default: i32) -> (i32, bool);

    /// Next `:` sub-parameter. Empty or missing yields `default`, and a
    /// `;` boundary is never crossed.
    fn sub_arg(&mut self, default: i32) -> i32;

    /// Next parameter. Empty or missing yields `default`.
    fn arg(&mut self, default: i32) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Param {
    value: Option<i32>,
    sub: bool,
}

/// Parsed parameter list with a read cursor.
#[derive(Debug, Clone, Default)]
pub struct ParamQueue {
    params: SmallVec<[Param; 8]>,
    pos: usize,
}

impl ParamQueue {
    /// Parse `text` such as `"38;2;255;0;0"` or `"38:2::255:0:0"`.
    ///
    /// Non-numeric fields are treated as empty.
    pub fn parse(text: &str) -> Self {
        let mut params = SmallVec::new();
        for group in text.split(';') {
            for (j, field) in group.split(':').enumerate() {
                params.push(Param {
                    value: field.parse().ok(),
                    sub: j > 0,
                });
            }
        }
        Self { params, pos: 0 }
    }

    /// Parameters left to read.
    pub fn remaining(&self) -> usize {
        self.params.len() - self.pos
    }
}

impl SgrParams for ParamQueue {
    fn raw_arg(&mut self, default: i32) -> (i32, bool) {
        match self.params.get(self.pos) {
            Some(p) => {
                self.pos += 1;
                (p.value.unwrap_or(default), p.sub)
            }
            None => (default, false),
        }
    }

    fn sub_arg(&mut self, default: i32) -> i32 {
        match self.params.get(self.pos) {
            Some(p) if p.sub => {
                self.pos += 1;
                p.value.unwrap_or(default)
            }
            _ => default,
        }
    }

    fn arg(&mut self, default: i32) -> i32 {
        self.raw_arg(default).0
    }
}

impl Argb {
    /// Decode the color that follows an SGR `38`/`48`/`58` selector.
    ///
    /// Supports `2;r;g;b`, `5;n` and their colon forms (`2:[cs]:r:g:b[:a]`,
    /// `5:n`). Anything else leaves the color at its default.
    pub fn from_sgr(q: &mut impl SgrParams) -> Argb {
        let (mode, grouped) = q.raw_arg(MODE_RGB);
        if grouped {
            match mode {
                MODE_RGB => {
                    // An empty color-space id precedes the channels.
                    let r = match q.sub_arg(-1) {
                        -1 => q.sub_arg(0),
                        r => r,
                    };
                    let g = q.sub_arg(0);
                    let b = q.sub_arg(0);
                    let a = q.sub_arg(0xFF);
                    Argb::new(r as u8, g as u8, b as u8, a as u8)
                }
                MODE_256 => palette_entry(q.sub_arg(0)),
                _ => Argb::default(),
            }
        } else {
            match mode {
                MODE_RGB => {
                    let r = q.arg(0);
                    let g = q.arg(0);
                    let b = q.arg(0);
                    Argb::rgb(r as u8, g as u8, b as u8)
                }
                MODE_256 => palette_entry(q.arg(0)),
                _ => Argb::default(),
            }
        }
    }
}

fn palette_entry(index: i32) -> Argb {
    usize::try_from(index)
        .ok()
        .and_then(|i| VT256.get(i).copied())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Argb {
        let mut q = ParamQueue::parse(text);
        let selector = q.arg(0);
        assert!(matches!(selector, 38 | 48 | 58));
        Argb::from_sgr(&mut q)
    }

    #[test]
    fn truecolor_semicolon_form() {
        assert_eq!(decode("38;2;255;128;0"), Argb::rgb(255, 128, 0));
    }

    #[test]
    fn truecolor_colon_form_with_empty_colorspace() {
        assert_eq!(decode("38:2::10:20:30"), Argb::rgb(10, 20, 30));
    }

    #[test]
    fn truecolor_colon_form_with_alpha() {
        assert_eq!(decode("48:2::10:20:30:128"), Argb::new(10, 20, 30, 128));
    }

    #[test]
    fn palette_forms() {
        assert_eq!(decode("38;5;196"), Argb(0xFFFF_0000));
        assert_eq!(decode("38:5:21"), Argb(0xFF00_00FF));
    }

    #[test]
    fn unknown_mode_is_ignored() {
        assert_eq!(decode("38;7;1;2;3"), Argb::default());
        assert_eq!(decode("38:9:1"), Argb::default());
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        assert_eq!(decode("38;5;300"), Argb::default());
        assert_eq!(decode("38;5;-1"), Argb::default());
    }

    #[test]
    fn missing_mode_defaults_to_truecolor_black() {
        assert_eq!(decode("38"), Argb::BLACK);
    }

    #[test]
    fn sub_arg_does_not_cross_semicolon() {
        let mut q = ParamQueue::parse("1:2;3");
        assert_eq!(q.raw_arg(0), (1, false));
        assert_eq!(q.sub_arg(-1), 2);
        assert_eq!(q.sub_arg(-1), -1);
        assert_eq!(q.arg(0), 3);
        assert_eq!(q.remaining(), 0);
    }

    #[test]
    fn parse_follows_semicolon_form_with_rest() {
        let mut q = ParamQueue::parse("38;2;1;2;3;1");
        q.arg(0);
        assert_eq!(Argb::from_sgr(&mut q), Argb::rgb(1, 2, 3));
        assert_eq!(q.arg(0), 1);
    }
}
