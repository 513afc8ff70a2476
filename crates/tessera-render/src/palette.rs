#![forbid(unsafe_code)]

//! Fixed palettes and nearest-color quantization for degraded terminals.
//!
//! The tables are bit-exact copies of what terminals expect:
//! - [`VT16`]: the 16 ANSI colors in ANSI order.
//! - [`VT256`]: xterm 256 colors (16 ANSI + 6×6×6 cube + 24 grays).
//! - [`VGA16`]: the 16 ANSI colors in DOS order.
//! - [`VTM16`]: the vtm 16-color palette, indexed by [`Tint16`].
//!
//! # Lookup order
//!
//! 1. Exact token match in a seed table (palette entries plus well-known
//!    aliases). A hit moves one slot toward the front of the thread's table.
//! 2. Nearest palette entry by squared rgb distance, if strictly below
//!    [`NEAREST_LIMIT`].
//! 3. Gray band by luma.
//!
//! Tables are thread-local, so the move-to-front reordering never races.
//! Foreground and background lookups use separate tables.

use std::cell::RefCell;

use crate::color::{Argb, Tint, Tint16};

/// Distance between light and dark green minus one; anything at or beyond
/// this falls back to a gray band.
pub const NEAREST_LIMIT: u32 = 1368;

/// ANSI 16 colors, ANSI order.
pub const VT16: [Argb; 16] = [
    Argb(0xFF10_1010), // blackdk
    Argb(0xFFC4_0F1F), // reddk
    Argb(0xFF12_A10E), // greendk
    Argb(0xFFC0_9C00), // yellowdk
    Argb(0xFF00_37DB), // bluedk
    Argb(0xFF87_1798), // magentadk
    Argb(0xFF3B_96DD), // cyandk
    Argb(0xFFBB_BBBB), // whitedk
    Argb(0xFF75_7575), // blacklt
    Argb(0xFFE6_4856), // redlt
    Argb(0xFF15_C60C), // greenlt
    Argb(0xFFF8_F1A5), // yellowlt
    Argb(0xFF3A_78FF), // bluelt
    Argb(0xFFB3_009E), // magentalt
    Argb(0xFF60_D6D6), // cyanlt
    Argb(0xFFF3_F3F3), // whitelt
];

/// xterm 256-color palette.
pub const VT256: [Argb; 256] = build_vt256();

/// ANSI 16 colors, DOS order (blue and red swapped).
pub const VGA16: [Argb; 16] = build_vga16();

/// vtm 16-color palette.
pub const VTM16: [Argb; 16] = [
    Argb(0xFF00_0000),
    Argb(0xFF20_2020),
    Argb(0xFF50_5050),
    Argb(0xFF80_8080),
    Argb(0xFFD0_D0D0),
    Argb(0xFFFF_FFFF),
    VT16[Tint::RedDk as usize],
    VT16[Tint::BlueDk as usize],
    VT16[Tint::GreenDk as usize],
    VT16[Tint::YellowDk as usize],
    VT16[Tint::MagentaLt as usize],
    VT16[Tint::CyanLt as usize],
    VT16[Tint::RedLt as usize],
    VT16[Tint::BlueLt as usize],
    VT16[Tint::GreenLt as usize],
    VT16[Tint::YellowLt as usize],
];

const CUBE_LEVELS: [u32; 6] = [0x00, 0x5F, 0x87, 0xAF, 0xD7, 0xFF];

const fn build_vt256() -> [Argb; 256] {
    let mut table = [Argb(0); 256];
    let mut i = 0;
    while i < 16 {
        table[i] = VT16[i];
        i += 1;
    }
    let mut n = 16;
    let mut r = 0;
    while r < 6 {
        let mut g = 0;
        while g < 6 {
            let mut b = 0;
            while b < 6 {
                let (rv, gv) = (CUBE_LEVELS[r], CUBE_LEVELS[g]);
                let mut bv = CUBE_LEVELS[b];
                // xterm-compatible quirk: the red row stores full blue as 0xFE.
                if rv == 0xFF && bv == 0xFF && gv != 0xFF {
                    bv = 0xFE;
                }
                table[n] = Argb(0xFF00_0000 | rv << 16 | gv << 8 | bv);
                n += 1;
                b += 1;
            }
            g += 1;
        }
        r += 1;
    }
    let mut k = 0;
    while k < 24 {
        let v = 0x08 + 10 * k as u32;
        table[232 + k] = Argb(0xFF00_0000 | v << 16 | v << 8 | v);
        k += 1;
    }
    table
}

const fn build_vga16() -> [Argb; 16] {
    const ORDER: [Tint; 8] = [
        Tint::BlackDk,
        Tint::BlueDk,
        Tint::GreenDk,
        Tint::CyanDk,
        Tint::RedDk,
        Tint::MagentaDk,
        Tint::YellowDk,
        Tint::WhiteDk,
    ];
    let mut table = [Argb(0); 16];
    let mut i = 0;
    while i < 8 {
        table[i] = VT16[ORDER[i] as usize];
        table[i + 8] = VT16[ORDER[i] as usize + 8];
        i += 1;
    }
    table
}

type Seed = Vec<(u32, u8)>;

fn vga16_seed() -> Seed {
    let mut table: Seed = (0..16u8).map(|i| (VT16[i as usize].0, i)).collect();
    table.extend([
        (0xFFFF_FFFF, Tint::WhiteLt as u8),
        (0xFFAA_AAAA, Tint::WhiteDk as u8),
        (0xFF80_8080, Tint::WhiteDk as u8),
        (0xFF55_5555, Tint::BlackLt as u8),
        (0xFF00_0000, Tint::BlackDk as u8),
        (0xFF55_0000, Tint::RedDk as u8),
        (0xFF80_0000, Tint::RedDk as u8),
        (0xFFAA_0000, Tint::RedDk as u8),
        (0xFFFF_0000, Tint::RedLt as u8),
        (0xFF00_0055, Tint::BlueDk as u8),
        (0xFF00_0080, Tint::BlueDk as u8),
        (0xFF00_00AA, Tint::BlueDk as u8),
        (0xFF00_00FF, Tint::BlueLt as u8),
        (0xFF00_AA00, Tint::GreenDk as u8),
        (0xFF00_8000, Tint::GreenDk as u8),
        (0xFF00_FF00, Tint::GreenLt as u8),
        (0xFF55_FF55, Tint::GreenLt as u8),
        (0xFF80_0080, Tint::MagentaDk as u8),
        (0xFFAA_00AA, Tint::MagentaDk as u8),
        (0xFFFF_55FF, Tint::MagentaLt as u8),
        (0xFFFF_00FF, Tint::MagentaLt as u8),
        (0xFF00_8080, Tint::CyanDk as u8),
        (0xFF00_AAAA, Tint::CyanDk as u8),
        (0xFF55_FFFF, Tint::CyanLt as u8),
        (0xFF00_FFFF, Tint::CyanLt as u8),
        (0xFFAA_5500, Tint::YellowDk as u8),
        (0xFF80_8000, Tint::YellowDk as u8),
        (0xFFFF_FF00, Tint::YellowLt as u8),
        (0xFFFF_FF55, Tint::YellowLt as u8),
    ]);
    table
}

fn vtm16_seed() -> Seed {
    let mut table: Seed = (0..16u8).map(|i| (VTM16[i as usize].0, i)).collect();
    table.extend([
        (0xFF55_0000, Tint16::RedDk as u8),
        (0xFFAA_0000, Tint16::RedDk as u8),
        (0xFF80_0000, Tint16::RedDk as u8),
        (0xFFFF_0000, Tint16::RedLt as u8),
        (VT256[Tint::MagentaDk as usize].0, Tint16::RedDk as u8),
        (0xFF80_0080, Tint16::RedDk as u8),
        (0xFFFF_55FF, Tint16::MagentaLt as u8),
        (0xFFFF_00FF, Tint16::MagentaLt as u8),
        (VT256[Tint::CyanDk as usize].0, Tint16::BlueLt as u8),
        (0xFF00_8080, Tint16::BlueLt as u8),
        (0xFF00_AAAA, Tint16::BlueLt as u8),
        (0xFF55_FFFF, Tint16::CyanLt as u8),
        (0xFF00_FFFF, Tint16::CyanLt as u8),
        (0xFFFF_FFFF, Tint16::WhiteLt as u8),
        (0xFFAA_AAAA, Tint16::WhiteDk as u8),
        (0xFF80_8080, Tint16::GrayLt as u8),
        (0xFF55_5555, Tint16::GrayDk as u8),
        (0xFF00_0000, Tint16::BlackDk as u8),
        (0xFF00_0055, Tint16::BlueDk as u8),
        (0xFF00_0080, Tint16::BlueDk as u8),
        (0xFF00_00AA, Tint16::BlueDk as u8),
        (0xFF00_00FF, Tint16::BlueLt as u8),
        (0xFF00_AA00, Tint16::GreenDk as u8),
        (0xFF00_8000, Tint16::GreenDk as u8),
        (0xFF00_FF00, Tint16::GreenLt as u8),
        (0xFF55_FF55, Tint16::GreenLt as u8),
        (0xFFAA_5500, Tint16::YellowDk as u8),
        (0xFF80_8000, Tint16::YellowDk as u8),
        (0xFFFF_FF00, Tint16::YellowLt as u8),
        (0xFFFF_FF55, Tint16::YellowLt as u8),
    ]);
    table
}

fn vtm8_seed() -> Seed {
    let vt = |t: Tint| VT256[t as usize].0;
    let mut table: Seed = (0..8u8).map(|i| (VTM16[i as usize].0, i)).collect();
    table.extend([
        (vt(Tint::BlueLt), Tint16::BlueDk as u8),
        (vt(Tint::RedLt), Tint16::RedDk as u8),
        (vt(Tint::CyanLt), Tint16::WhiteDk as u8),
        (vt(Tint::CyanDk), Tint16::GrayLt as u8),
        (vt(Tint::GreenLt), Tint16::GrayLt as u8),
        (vt(Tint::GreenDk), Tint16::GrayDk as u8),
        (vt(Tint::YellowDk), Tint16::GrayDk as u8),
        (vt(Tint::YellowLt), Tint16::WhiteLt as u8),
        (vt(Tint::MagentaLt), Tint16::RedDk as u8),
        (vt(Tint::MagentaDk), Tint16::RedDk as u8),
        (0xFF00_0000, Tint16::BlackDk as u8),
        (0xFFFF_0000, Tint16::RedDk as u8),
        (0xFF00_00FF, Tint16::BlueDk as u8),
        (0xFFFF_FFFF, Tint16::WhiteLt as u8),
        (0xFFAA_AAAA, Tint16::WhiteDk as u8),
        (0xFF80_8080, Tint16::GrayLt as u8),
        (0xFF55_5555, Tint16::GrayDk as u8),
    ]);
    table
}

thread_local! {
    static VGA16_FG: RefCell<Seed> = RefCell::new(vga16_seed());
    static VGA16_BG: RefCell<Seed> = RefCell::new(vga16_seed());
    static VTM16_FG: RefCell<Seed> = RefCell::new(vtm16_seed());
    static VTM16_BG: RefCell<Seed> = RefCell::new(vtm16_seed());
    static VTM8: RefCell<Seed> = RefCell::new(vtm8_seed());
}

/// Squared rgb distance; alpha is ignored.
#[inline]
fn distance(c1: u32, c2: u32) -> u32 {
    let d = |shift: u32| {
        let a = ((c1 >> shift) & 0xFF) as i32;
        let b = ((c2 >> shift) & 0xFF) as i32;
        (a - b) * (a - b)
    };
    (d(0) + d(8) + d(16)) as u32
}

/// Gray band index ([`Tint16`] numbering) by luma.
#[inline]
pub fn gray_band(color: Argb) -> u8 {
    let band = match color.luma() {
        0..42 => Tint16::BlackLt,
        42..90 => Tint16::GrayDk,
        90..170 => Tint16::GrayLt,
        170..240 => Tint16::WhiteDk,
        _ => Tint16::WhiteLt,
    };
    band as u8
}

/// Resolve `color` against `seed` then `palette`, reordering `seed` on a hit.
pub fn lookup(seed: &mut [(u32, u8)], palette: &[Argb], color: Argb) -> u8 {
    let token = color.0;
    if let Some(pos) = seed.iter().position(|&(t, _)| t == token) {
        let index = seed[pos].1;
        if pos > 0 {
            seed.swap(pos, pos - 1);
        }
        return index;
    }
    let mut best = (NEAREST_LIMIT, 0u8);
    for (i, p) in palette.iter().enumerate() {
        let d = distance(p.0, token);
        if d == 0 {
            return i as u8;
        }
        if d < best.0 {
            best = (d, i as u8);
        }
    }
    if best.0 == NEAREST_LIMIT {
        gray_band(color)
    } else {
        best.1
    }
}

/// Swap bits 0 and 2: ANSI order <-> DOS order.
#[inline]
const fn ansi_to_dos(c: u8) -> u8 {
    let b0 = c & 1;
    let b2 = (c >> 2) & 1;
    (c & !0b101) | b0 << 2 | b2
}

pub(crate) fn to_vga16(color: Argb, fg: bool) -> u8 {
    let cache = if fg { &VGA16_FG } else { &VGA16_BG };
    let index = cache.with(|c| lookup(&mut c.borrow_mut(), &VT16, color));
    ansi_to_dos(index)
}

pub(crate) fn to_vtm16(color: Argb, fg: bool) -> u8 {
    let cache = if fg { &VTM16_FG } else { &VTM16_BG };
    cache.with(|c| lookup(&mut c.borrow_mut(), &VTM16, color))
}

pub(crate) fn to_vtm8(color: Argb) -> u8 {
    VTM8.with(|c| lookup(&mut c.borrow_mut(), &VTM16[..8], color))
}

/// Resolve a fg/bg collision in vga16 mode by toggling brightness.
#[inline]
pub fn fix_collision_vga16(f: &mut u8) {
    if *f <= Tint::WhiteDk as u8 {
        *f += 8;
    } else {
        *f -= 8;
    }
}

/// Resolve a fg/bg collision in vtm16 mode.
pub fn fix_collision_vtm16(f: &mut u8) {
    let v = *f;
    *f = if v < Tint16::WhiteLt as u8 {
        v + 1
    } else if v == Tint16::WhiteLt as u8 {
        v - 1
    } else if v <= Tint16::YellowDk as u8 {
        v + 6
    } else if v <= Tint16::CyanLt as u8 {
        Tint16::GrayLt as u8
    } else {
        v - 6
    };
}

/// Resolve a fg/bg collision when the background is limited to 8 colors.
pub fn fix_collision_vtm8(f: &mut u8) {
    let v = *f;
    *f = if v < Tint16::WhiteLt as u8 {
        v + 1
    } else if v == Tint16::WhiteLt as u8 {
        v - 1
    } else {
        Tint16::WhiteDk as u8
    };
}
