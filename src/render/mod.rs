//! Rendering surfaces
//!
//! The simulation never draws. After each tick the host takes a `View`
//! snapshot and hands it to a `Surface`.

pub mod svg;

pub use svg::SvgSurface;

use crate::sim::View;

/// Something that can draw a frame
pub trait Surface {
    fn present(&mut self, view: &View);
}
