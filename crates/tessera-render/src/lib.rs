#![forbid(unsafe_code)]

//! Render kernel: cells, colors, shaders, canvases, and the effects built
//! on them (box blur, drop shadows, resize grips).
//!
//! A [`Canvas`](canvas::Canvas) is a rectangle of [`Cell`](cell::Cell)s
//! with a client area and a brush. Blits take a [`Compose`](shader::Compose)
//! shader that decides how each source cell lands on its destination;
//! region fills take a [`Paint`](shader::Paint). Cells carry grapheme
//! clusters of any width through [`Glyph`](glyph::Glyph), spilling long
//! clusters into the shared [`Jumbos`](jumbo::Jumbos) registry.

pub mod blur;
pub mod canvas;
pub mod cell;
pub mod color;
pub mod glyph;
pub mod grid;
pub mod grips;
pub mod irgb;
pub mod jumbo;
pub mod palette;
pub mod scan;
pub mod sgr;
pub mod shader;
pub mod shadow;
pub mod style;

pub use canvas::Canvas;
pub use cell::{Cell, Colors};
pub use color::Argb;
pub use glyph::{Cluster, Glyph};
pub use grid::{Grid, Raster};
pub use jumbo::Jumbos;
pub use scan::{OutputProfile, SgrOp, SgrSink, Svga};
pub use shader::{Compose, Paint};
pub use style::Style;
