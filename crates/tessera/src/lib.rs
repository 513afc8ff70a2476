#![forbid(unsafe_code)]

//! Tessera public facade crate.
//!
//! Re-exports the geometry core and the render kernel, and offers a
//! prelude with the types most compositing code touches.
//!
//! ```
//! use tessera::prelude::*;
//!
//! let jumbos = Jumbos::new();
//! let mut window = Canvas::with_brush(Rect::from_xywh(0, 0, 6, 1), Cell::from_byte(b' '));
//! window.text(Point::new(1, 0), "hi", false, &jumbos);
//! window.fill(Rect::from_xywh(1, 0, 2, 1), Xlight(1));
//! assert_eq!(window.utf8(&jumbos), " hi   ");
//! ```

// --- Core re-exports -------------------------------------------------------

pub use tessera_core::{Direction, Point, Rect, Sides};

// --- Render re-exports -----------------------------------------------------

pub use tessera_render::blur::{BlurCache, BlurParams, box_blur, contour};
pub use tessera_render::canvas::Canvas;
pub use tessera_render::cell::{Cell, Colors};
pub use tessera_render::color::Argb;
pub use tessera_render::glyph::Glyph;
pub use tessera_render::grid::{Grid, Raster};
pub use tessera_render::grips::SizeGrips;
pub use tessera_render::jumbo::Jumbos;
pub use tessera_render::scan::{OutputProfile, SgrSink, Svga};
pub use tessera_render::shader::{Compose, Paint};
pub use tessera_render::shadow::{ShadowParams, ShadowSprite};
pub use tessera_render::style::Style;

#[cfg(feature = "tracing-json")]
pub use tessera_core::logging::init_json_subscriber;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Argb, Canvas, Cell, Colors, Compose, Direction, Grid, Jumbos, OutputProfile, Paint, Point,
        Rect, Sides, Style, Svga,
    };

    pub use tessera_render::shader::{Fuse, Full, Mix, Xlight};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_composes_a_window() {
        let jumbos = Jumbos::new();
        let mut screen = Canvas::with_brush(Rect::from_xywh(0, 0, 4, 2), Cell::from_byte(b'.'));
        let mut window = Canvas::with_brush(Rect::from_xywh(1, 1, 2, 1), Cell::from_byte(b'#'));
        window.move_to(Point::new(1, 1));
        screen.fill_from(&window, Full);
        assert_eq!(screen.utf8(&jumbos), ".....##.");
    }
}
