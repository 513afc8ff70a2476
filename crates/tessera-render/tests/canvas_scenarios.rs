use tessera_core::{Direction, Point, Rect};
use tessera_render::cell::Cell;
use tessera_render::color::Argb;
use tessera_render::glyph::Glyph;
use tessera_render::jumbo::Jumbos;
use tessera_render::scan::{OutputProfile, SgrOp, Svga};
use tessera_render::shader::{Fuse, Full, Xlight};
use tessera_render::Canvas;

const RED: Argb = Argb(0xFFFF_0000);

fn row(text: &[u8]) -> Canvas {
    let cells = text.iter().map(|&b| Cell::from_byte(b)).collect();
    Canvas::from_cells(cells, Point::new(text.len() as i32, 1)).expect("cell count matches")
}

#[test]
fn crop_keeps_content_and_fills_new_cells() {
    let brush = Cell::from_byte(b'.').with_bg(RED);
    let mut canvas = Canvas::new(Rect::from_xywh(0, 0, 3, 3));
    for (i, c) in canvas.cells_mut().iter_mut().enumerate() {
        *c = Cell::from_byte(b'a' + i as u8);
    }
    let before = canvas.clone();
    canvas.crop_with(Point::new(5, 5), brush, false);

    assert_eq!(canvas.size(), Point::new(5, 5));
    for y in 0..5 {
        for x in 0..5 {
            let p = Point::new(x, y);
            if x < 3 && y < 3 {
                assert_eq!(canvas[p], before[p], "kept cell at {p:?}");
            } else {
                assert_eq!(canvas[p], brush, "new cell at {p:?}");
            }
        }
    }
}

#[test]
fn find_needle_forward() {
    let hay = row(b"ABCDEFGHIJ");
    assert_eq!(hay.find(&row(b"DEF"), 0, Direction::Forward), Some(3));
    assert_eq!(hay.find(&row(b"XYZ"), 0, Direction::Forward), None);
    assert_eq!(hay.find(&row(b"DEF"), 4, Direction::Forward), None);
    assert_eq!(hay.find(&row(b"DEF"), 10, Direction::Backward), Some(5));
}

#[test]
fn word_boundaries_in_hello_world() {
    let jumbos = Jumbos::new();
    let canvas = row(b"hello world");
    assert_eq!(canvas.word_at(2, Direction::Forward, &jumbos), 5);
    assert_eq!(canvas.word_at(6, Direction::Backward, &jumbos), 6);
    assert_eq!(canvas.word_at(8, Direction::Backward, &jumbos), 6);
    assert_eq!(canvas.word_at(6, Direction::Forward, &jumbos), 11);
}

#[test]
fn fuse_translucent_overlay_keeps_text() {
    let mut dst = Canvas::line(Cell::from_byte(b'A').with_bg(RED).with_fg(Argb::WHITE), 3);
    let mut veil = Cell::EMPTY.with_bg(Argb(0x8000_00FF));
    veil.glyph = Glyph::from_byte(b' ');
    let overlay = Canvas::line(veil, 3);
    overlay.copy_to(&mut dst, Fuse);

    for c in dst.cells() {
        assert_eq!(c.colors.bg, Argb::new(127, 0, 127, 255));
        assert_eq!(c.colors.fg, Argb::WHITE);
        assert_eq!(c.glyph, Glyph::from_byte(b'A'));
    }
}

#[test]
fn tile_pattern_is_anchored_to_shared_origin() {
    let jumbos = Jumbos::new();
    let mut image = row(b"ab");
    let mut canvas = Canvas::new(Rect::from_xywh(0, 0, 4, 2));
    canvas.tile(&mut image, Full);
    assert_eq!(canvas.utf8(&jumbos), "abababab");

    let mut shifted = Canvas::new(Rect::from_xywh(-1, 0, 4, 2));
    shifted.tile(&mut image, Full);
    assert_eq!(shifted.utf8(&jumbos), "babababa");
}

#[test]
fn append_bottom_aligns() {
    let mut left = row(b"ab");
    let right = Canvas::from_cells(vec![Cell::from_byte(b'c'), Cell::from_byte(b'd')], Point::new(1, 2))
        .expect("cell count matches");
    left += &right;

    assert_eq!(left.size(), Point::new(3, 2));
    assert!(left[Point::new(0, 0)].is_empty());
    assert!(left[Point::new(1, 0)].is_empty());
    assert_eq!(left[Point::new(2, 0)], Cell::from_byte(b'c'));
    assert_eq!(left[Point::new(0, 1)], Cell::from_byte(b'a'));
    assert_eq!(left[Point::new(1, 1)], Cell::from_byte(b'b'));
    assert_eq!(left[Point::new(2, 1)], Cell::from_byte(b'd'));
}

#[test]
fn highlight_then_scan_row() {
    let jumbos = Jumbos::new();
    let mut canvas = row(b"AB");
    canvas.each(|c| {
        c.set_bg(RED).set_fg(Argb::WHITE);
    });
    canvas.fill(Rect::from_xywh(0, 0, 1, 1), Xlight(0));

    let mut base = Cell::default();
    let mut ops: Vec<SgrOp> = Vec::new();
    canvas.cells()[1].scan(&mut base, &mut ops, OutputProfile::default(), &jumbos);
    assert_eq!(ops.first(), Some(&SgrOp::Bg(Svga::VtRgb, RED)));
    assert_eq!(ops.get(1), Some(&SgrOp::Fg(Svga::VtRgb, Argb::WHITE)));
    assert_eq!(ops.last(), Some(&SgrOp::Text("B".into())));
}

#[test]
fn text_roundtrips_through_utf8() {
    let jumbos = Jumbos::new();
    let mut canvas = Canvas::new(Rect::from_xywh(0, 0, 8, 1));
    let end = canvas.text(Point::ZERO, "hi 中文", false, &jumbos);
    assert_eq!(end, Point::new(7, 0));
    assert_eq!(canvas.utf8(&jumbos), "hi 中 文  ");
}
