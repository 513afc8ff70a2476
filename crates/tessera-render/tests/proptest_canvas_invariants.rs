//! Property-based invariant tests for glyph storage and canvas operations.
//!
//! 1. Any cluster stored with `set_direct` reads back unchanged.
//! 2. Clusters over the inline capacity go through the jumbo registry.
//! 3. Crop keeps every cell in the overlap of the old and new sizes.
//! 4. Forward `find` agrees with a naive byte search.
//! 5. `word` stays on the row and on the right side of the cursor.

use proptest::prelude::*;
use tessera_core::{Direction, Point, Rect};
use tessera_render::Canvas;
use tessera_render::cell::Cell;
use tessera_render::glyph::{Glyph, INLINE_CAPACITY};
use tessera_render::jumbo::Jumbos;
use tessera_render::scan::Svga;

// ── Helpers ─────────────────────────────────────────────────────────────

fn row(text: &[u8]) -> Canvas {
    let cells = text.iter().map(|&b| Cell::from_byte(b)).collect();
    Canvas::from_cells(cells, Point::new(text.len() as i32, 1)).expect("cell count matches")
}

fn naive_find(hay: &[u8], needle: &[u8]) -> Option<i32> {
    hay.windows(needle.len()).position(|w| w == needle).map(|i| i as i32)
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Glyph storage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cluster_roundtrip(text in "[a-z0-9 é中文😀]{1,6}") {
        let jumbos = Jumbos::new();
        let mut glyph = Glyph::default();
        glyph.set_direct(&text, 1, 1, &jumbos);
        prop_assert_eq!(&*glyph.get(Svga::VtRgb, &jumbos), text.as_str());
        prop_assert_eq!(glyph.is_jumbo(), text.len() > INLINE_CAPACITY);
        prop_assert_eq!(jumbos.len(), usize::from(glyph.is_jumbo()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Crop keeps the overlap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn crop_keeps_overlap(w in 0i32..8, h in 0i32..8, nw in 0i32..8, nh in 0i32..8) {
        let mut canvas = Canvas::new(Rect::from_xywh(0, 0, w, h));
        for (i, c) in canvas.cells_mut().iter_mut().enumerate() {
            *c = Cell::from_byte(b'!' + (i % 90) as u8);
        }
        let before = canvas.clone();
        canvas.crop(Point::new(nw, nh), false);
        prop_assert_eq!(canvas.size(), Point::new(nw, nh));
        prop_assert_eq!(canvas.volume(), (nw * nh) as usize);
        for y in 0..h.min(nh) {
            for x in 0..w.min(nw) {
                let p = Point::new(x, y);
                prop_assert_eq!(canvas[p], before[p]);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Find agrees with a naive search
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn find_matches_naive(hay in "[ab]{0,16}", needle in "[ab]{1,3}") {
        let found = row(hay.as_bytes()).find(&row(needle.as_bytes()), 0, Direction::Forward);
        prop_assert_eq!(found, naive_find(hay.as_bytes(), needle.as_bytes()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Word bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn word_stays_in_row(text in "[a-z0-9 .@_-]{1,20}", at in 0usize..20) {
        let jumbos = Jumbos::new();
        let canvas = row(text.as_bytes());
        let at = (at % text.len()) as i32;
        let fwd = canvas.word_at(at, Direction::Forward, &jumbos);
        let back = canvas.word_at(at, Direction::Backward, &jumbos);
        prop_assert!(fwd >= at && fwd <= text.len() as i32, "fwd {} from {}", fwd, at);
        prop_assert!(back >= 0 && back <= at, "back {} from {}", back, at);
    }
}
