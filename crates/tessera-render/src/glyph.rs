#![forbid(unsafe_code)]

//! Packed grapheme-cluster token.
//!
//! # Layout
//!
//! ```text
//! byte 0      props: [7: reserved][6: rtl][5-4: height-1][3-0: width-1]
//! bytes 1..8  inline UTF-8, NUL padded        (up to 7 bytes)
//!          or 64-bit content hash             (jumbo)
//! ```
//!
//! A UTF-8 sequence never starts with a continuation byte `0b10xx_xxxx`,
//! so a token whose byte 1 carries that pattern is a jumbo reference. The
//! cluster text then lives in [`Jumbos`] under [`Glyph::content_token`].
//!
//! Byte 1 equal to zero marks an empty cell; clusters never contain NUL.

use std::hash::Hasher;
use std::ops::Deref;
use std::sync::Arc;

use rustc_hash::FxHasher;

use crate::jumbo::Jumbos;
use crate::scan::Svga;

/// Start-of-text marker some producers put in front of a cluster to force
/// a specific matrix. Stripped on output except in 2D mode.
pub const STX: u8 = 0x02;

const SIZE_W_MASK: u64 = 0b0000_1111;
const SIZE_H_MASK: u64 = 0b0011_0000;
const RTL_MASK: u64 = 0b0100_0000;
const PROPS_MASK: u64 = 0xFF;
const JUMBO_MASK: u64 = 0b1100_0000 << 8;
const JUMBO_FLAG: u64 = 0b1000_0000 << 8;

/// Largest cluster stored inline.
pub const INLINE_CAPACITY: usize = 7;
/// Widest glyph matrix, in cells.
pub const MAX_WIDTH: i32 = 16;
/// Tallest glyph matrix, in cells.
pub const MAX_HEIGHT: i32 = 4;

/// Hash used to address jumbo clusters.
#[inline]
pub fn cluster_hash(utf8: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(utf8.as_bytes());
    hasher.finish()
}

/// Grapheme cluster plus matrix geometry, packed into 64 bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Glyph([u8; 8]);

const _: () = assert!(core::mem::size_of::<Glyph>() == 8);

impl Glyph {
    /// Empty cluster, 1x1 matrix.
    pub const EMPTY: Self = Self([0; 8]);

    /// Single-byte cluster.
    #[inline]
    pub const fn from_byte(c: u8) -> Self {
        Self([0, c, 0, 0, 0, 0, 0, 0])
    }

    /// Single-codepoint cluster, 1x1 matrix.
    #[inline]
    pub fn from_char(c: char) -> Self {
        let mut bytes = [0u8; 8];
        c.encode_utf8(&mut bytes[1..]);
        Self(bytes)
    }

    /// Glyph holding `token` (little-endian byte order).
    #[inline]
    pub const fn from_token(token: u64) -> Self {
        Self(token.to_le_bytes())
    }

    /// Raw 64-bit token.
    #[inline]
    pub const fn token(self) -> u64 {
        u64::from_le_bytes(self.0)
    }

    #[inline]
    fn set_token(&mut self, token: u64) {
        self.0 = token.to_le_bytes();
    }

    /// Raw bytes, props first.
    #[inline]
    pub const fn bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Matrix width minus one.
    #[inline]
    pub const fn size_w(self) -> i32 {
        (self.token() & SIZE_W_MASK) as i32
    }

    /// Matrix height minus one.
    #[inline]
    pub const fn size_h(self) -> i32 {
        ((self.token() & SIZE_H_MASK) >> 4) as i32
    }

    #[inline]
    pub fn set_size_w(&mut self, w: i32) {
        let w = w.clamp(0, MAX_WIDTH - 1) as u64;
        self.set_token((self.token() & !SIZE_W_MASK) | w);
    }

    #[inline]
    pub fn set_size_h(&mut self, h: i32) {
        let h = h.clamp(0, MAX_HEIGHT - 1) as u64;
        self.set_token((self.token() & !SIZE_H_MASK) | (h << 4));
    }

    /// Right-to-left cluster.
    #[inline]
    pub const fn rtl(self) -> bool {
        self.token() & RTL_MASK != 0
    }

    #[inline]
    pub fn set_rtl(&mut self, rtl: bool) {
        if rtl {
            self.0[0] |= RTL_MASK as u8;
        } else {
            self.0[0] &= !(RTL_MASK as u8);
        }
    }

    #[inline]
    pub const fn is_jumbo(self) -> bool {
        self.token() & JUMBO_MASK == JUMBO_FLAG
    }

    #[inline]
    fn set_jumbo_flag(&mut self) {
        self.set_token((self.token() & !JUMBO_MASK) | JUMBO_FLAG);
    }

    /// Matrix size in cells.
    #[inline]
    pub const fn mtx(self) -> tessera_core::Point {
        tessera_core::Point::new(self.size_w() + 1, self.size_h() + 1)
    }

    /// Set the matrix size; zero is treated as one.
    #[inline]
    pub fn set_mtx(&mut self, w: i32, h: i32) {
        self.set_size_w(if w != 0 { w - 1 } else { 0 });
        self.set_size_h(if h != 0 { h - 1 } else { 0 });
    }

    /// Token with the props byte masked out.
    #[inline]
    pub const fn content_token(self) -> u64 {
        self.token() & !PROPS_MASK
    }

    /// Compare cluster content ignoring geometry and direction.
    #[inline]
    pub const fn same_content(self, other: Glyph) -> bool {
        self.content_token() == other.content_token()
    }

    /// Replace the cluster with a single byte, keeping the rtl flag.
    pub fn set_byte(&mut self, c: u8) {
        let rtl = self.token() & RTL_MASK;
        self.set_token(((c as u64) << 8) | rtl);
    }

    /// Store a C0 control as caret notation (`^@`..`^_`), two cells wide.
    pub fn set_c0(&mut self, c: u8) {
        let rtl = self.token() & RTL_MASK;
        let token = ((b'^' as u64) << 8) | (((b'@' + (c & 0x1F)) as u64) << 16) | rtl;
        self.set_token(token);
        self.set_size_w(1);
    }

    /// Store `utf8` with a `w` x `h` matrix. Clusters longer than
    /// [`INLINE_CAPACITY`] bytes are registered in `jumbos`.
    pub fn set_direct(&mut self, utf8: &str, w: i32, h: i32, jumbos: &Jumbos) {
        let rtl = self.token() & RTL_MASK;
        let count = utf8.len();
        if count <= INLINE_CAPACITY {
            let mut bytes = [0u8; 8];
            bytes[0] = rtl as u8;
            bytes[1..=count].copy_from_slice(utf8.as_bytes());
            self.0 = bytes;
            self.set_mtx(w, h);
        } else {
            self.set_token((cluster_hash(utf8) & !RTL_MASK) | rtl);
            self.set_jumbo_flag();
            self.set_mtx(w, h);
            jumbos.add(self.content_token(), utf8);
        }
    }

    /// Inline cluster length in bytes. Meaningless for jumbo tokens.
    #[inline]
    pub fn str_len(self) -> usize {
        self.0[1..].iter().position(|&b| b == 0).unwrap_or(INLINE_CAPACITY)
    }

    /// Storage length: the props byte plus inline text, or the whole token.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_jumbo() {
            core::mem::size_of::<Self>()
        } else {
            1 + self.str_len()
        }
    }

    /// Cluster text for output `mode`.
    pub fn get(&self, mode: Svga, jumbos: &Jumbos) -> Cluster<'_> {
        if mode == Svga::Dtvt {
            return Cluster::Inline("");
        }
        let mut cluster = if self.is_jumbo() {
            Cluster::Jumbo(jumbos.get(self.content_token()), 0)
        } else {
            let bytes = &self.0[1..=self.str_len()];
            Cluster::Inline(std::str::from_utf8(bytes).unwrap_or(""))
        };
        if mode != Svga::Vt2d && cluster.as_bytes().first() == Some(&STX) {
            cluster.drop_first_byte();
        }
        cluster
    }

    /// Byte 1 is a space or a control code (including NUL).
    #[inline]
    pub const fn is_space(self) -> bool {
        self.0[1] <= b' '
    }

    /// Empty cluster. Jumbo tokens are never null.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0[1] == 0
    }

    /// Inline, or jumbo with registered text.
    pub fn resolvable(self, jumbos: &Jumbos) -> bool {
        !self.is_jumbo() || jumbos.exists(self.content_token())
    }

    /// Reset to a single space.
    #[inline]
    pub fn reset(&mut self) {
        self.set_byte(b' ');
    }

    /// Zero the token.
    #[inline]
    pub fn wipe(&mut self) {
        self.0 = [0; 8];
    }
}

impl core::fmt::Debug for Glyph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_jumbo() {
            write!(f, "Glyph(jumbo {:016X})", self.content_token())
        } else {
            let text = String::from_utf8_lossy(&self.0[1..=self.str_len()]);
            write!(f, "Glyph({text:?} {}x{})", self.size_w() + 1, self.size_h() + 1)
        }
    }
}

/// Cluster text borrowed from a glyph or shared from the jumbo registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster<'a> {
    Inline(&'a str),
    /// Registered text and the byte offset where output starts.
    Jumbo(Arc<str>, usize),
}

impl Cluster<'_> {
    fn drop_first_byte(&mut self) {
        match self {
            Cluster::Inline(s) => *s = &s[1..],
            Cluster::Jumbo(_, start) => *start += 1,
        }
    }
}

impl Deref for Cluster<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        match self {
            Cluster::Inline(s) => s,
            Cluster::Jumbo(text, start) => text.get(*start..).unwrap_or(""),
        }
    }
}

impl PartialEq<str> for Cluster<'_> {
    fn eq(&self, other: &str) -> bool {
        &**self == other
    }
}

impl PartialEq<&str> for Cluster<'_> {
    fn eq(&self, other: &&str) -> bool {
        &**self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(text: &str, w: i32, jumbos: &Jumbos) -> Glyph {
        let mut g = Glyph::EMPTY;
        g.set_direct(text, w, 1, jumbos);
        g
    }

    // ====== Inline tests ======

    #[test]
    fn single_byte_layout() {
        let g = Glyph::from_byte(b'A');
        assert_eq!(g.token(), 0x4100);
        assert_eq!(g.str_len(), 1);
        assert_eq!(g.len(), 2);
        assert_eq!(g.mtx(), tessera_core::Point::new(1, 1));
        assert!(!g.is_jumbo());
    }

    #[test]
    fn inline_round_trip() {
        let jumbos = Jumbos::new();
        for text in ["a", "é", "中", "😀", "e\u{301}\u{302}"] {
            let g = glyph(text, 2, &jumbos);
            assert!(!g.is_jumbo(), "{text:?}");
            assert_eq!(g.get(Svga::VtRgb, &jumbos), text);
        }
        assert!(jumbos.is_empty());
    }

    #[test]
    fn seven_bytes_still_inline() {
        let jumbos = Jumbos::new();
        let g = glyph("abcdefg", 1, &jumbos);
        assert!(!g.is_jumbo());
        assert_eq!(g.str_len(), 7);
        assert_eq!(g.get(Svga::VtRgb, &jumbos), "abcdefg");
    }

    #[test]
    fn inline_capacity_boundary() {
        let jumbos = Jumbos::new();
        let seven = "a😀ab";
        assert_eq!(seven.len(), INLINE_CAPACITY);
        let g = glyph(seven, 2, &jumbos);
        assert!(!g.is_jumbo());
        assert_eq!(g.str_len(), 7);
        assert_eq!(g.get(Svga::VtRgb, &jumbos), seven);
        assert!(jumbos.is_empty());

        let eight = "ab😀ab";
        assert_eq!(eight.len(), INLINE_CAPACITY + 1);
        let g = glyph(eight, 2, &jumbos);
        assert!(g.is_jumbo());
        assert_eq!(jumbos.len(), 1);
        assert_eq!(g.get(Svga::VtRgb, &jumbos), eight);
    }

    // ====== Jumbo tests ======

    #[test]
    fn long_cluster_goes_jumbo() {
        let jumbos = Jumbos::new();
        let family = "👨‍👩‍👧‍👦";
        let g = glyph(family, 2, &jumbos);
        assert!(g.is_jumbo());
        assert!(!g.is_null());
        assert_eq!(g.len(), 8);
        assert_eq!(jumbos.len(), 1);
        assert_eq!(g.get(Svga::VtRgb, &jumbos), family);
        assert!(g.resolvable(&jumbos));
    }

    #[test]
    fn jumbo_keeps_geometry_and_rtl() {
        let jumbos = Jumbos::new();
        let mut g = Glyph::EMPTY;
        g.set_rtl(true);
        g.set_direct("ABCDEFGHIJ", 3, 2, &jumbos);
        assert!(g.is_jumbo());
        assert!(g.rtl());
        assert_eq!(g.mtx(), tessera_core::Point::new(3, 2));
    }

    #[test]
    fn same_text_shares_key() {
        let jumbos = Jumbos::new();
        let a = glyph("0123456789", 1, &jumbos);
        let b = glyph("0123456789", 2, &jumbos);
        assert_ne!(a, b);
        assert!(a.same_content(b));
        assert_eq!(jumbos.len(), 1);
    }

    #[test]
    fn unregistered_jumbo_is_not_resolvable() {
        let home = Jumbos::new();
        let foreign = Jumbos::new();
        let g = glyph("0123456789", 1, &home);
        assert!(!g.resolvable(&foreign));
        assert_eq!(g.get(Svga::VtRgb, &foreign), "");
        assert_eq!(foreign.missing(), vec![g.content_token()]);
    }

    // ====== Output mode tests ======

    #[test]
    fn stx_prefix_dropped_outside_2d() {
        let jumbos = Jumbos::new();
        let g = glyph("\u{2}ab", 2, &jumbos);
        assert_eq!(g.get(Svga::VtRgb, &jumbos), "ab");
        assert_eq!(g.get(Svga::Vt2d, &jumbos), "\u{2}ab");
        assert_eq!(g.get(Svga::Dtvt, &jumbos), "");

        let long = glyph("\u{2}abcdefghij", 2, &jumbos);
        assert_eq!(long.get(Svga::Vt256, &jumbos), "abcdefghij");
    }

    // ====== Props tests ======

    #[test]
    fn matrix_bits() {
        let mut g = Glyph::from_byte(b'x');
        g.set_mtx(16, 4);
        assert_eq!(g.size_w(), 15);
        assert_eq!(g.size_h(), 3);
        g.set_mtx(0, 0);
        assert_eq!(g.mtx(), tessera_core::Point::new(1, 1));
        g.set_mtx(40, 9);
        assert_eq!(g.mtx(), tessera_core::Point::new(16, 4));
        assert_eq!(g.bytes()[1], b'x');
    }

    #[test]
    fn set_byte_keeps_rtl_only() {
        let mut g = Glyph::from_byte(b'x');
        g.set_rtl(true);
        g.set_mtx(2, 2);
        g.set_byte(b'y');
        assert!(g.rtl());
        assert_eq!(g.mtx(), tessera_core::Point::new(1, 1));
    }

    #[test]
    fn c0_caret_notation() {
        let jumbos = Jumbos::new();
        let mut g = Glyph::EMPTY;
        g.set_c0(0x03);
        assert_eq!(g.get(Svga::VtRgb, &jumbos), "^C");
        assert_eq!(g.size_w(), 1);
        g.set_c0(0x1B);
        assert_eq!(g.get(Svga::VtRgb, &jumbos), "^[");
    }

    #[test]
    fn space_and_null() {
        assert!(Glyph::EMPTY.is_null());
        assert!(Glyph::EMPTY.is_space());
        assert!(Glyph::from_byte(b' ').is_space());
        assert!(Glyph::from_byte(b'\t').is_space());
        assert!(!Glyph::from_byte(b'a').is_space());
        let mut g = Glyph::from_byte(b'a');
        g.reset();
        assert_eq!(g, Glyph::from_byte(b' '));
        g.wipe();
        assert_eq!(g, Glyph::EMPTY);
    }
}
