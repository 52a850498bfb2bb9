//! Document backends for the notes layout
//!
//! The layout engine only talks to a [`DocumentBackend`]; this module
//! defines that capability interface and the `lopdf` implementation:
//! - Reading source page dimensions
//! - Creating XObjects from source pages and placing them
//! - Drawing outlines, rules and text
//! - Assembling the final document

mod lopdf_backend;
mod xobject;

pub use lopdf_backend::LopdfBackend;
pub use xobject::{SourceImporter, media_box, page_size};

use crate::layout::{Placement, Rect};
use crate::overlay::{DrawOp, Stroke, TextOp};
use crate::types::Result;

/// Reading and writing primitives the layout engine needs.
///
/// Output pages are built one at a time: `begin_page`, any number of
/// drawing calls, then `finish_page`.
pub trait DocumentBackend {
    /// What `finish` hands back, e.g. a document ready to be saved
    type Output;

    /// Number of pages in the source document
    fn page_count(&self) -> usize;

    /// Source page size (width, height) in points
    fn page_dimensions(&self, index: usize) -> Result<(f32, f32)>;

    /// Start a new output page
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()>;

    /// Draw a source page scaled and positioned per `placement`
    fn render_page_into(&mut self, placement: &Placement) -> Result<()>;

    fn draw_rect(&mut self, rect: &Rect, stroke: &Stroke) -> Result<()>;

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke) -> Result<()>;

    fn draw_text(&mut self, text: &TextOp) -> Result<()>;

    /// Complete the current output page
    fn finish_page(&mut self) -> Result<()>;

    /// Complete the output document
    fn finish(self) -> Result<Self::Output>
    where
        Self: Sized;

    fn draw(&mut self, op: &DrawOp) -> Result<()> {
        match op {
            DrawOp::Rect { rect, stroke } => self.draw_rect(rect, stroke),
            DrawOp::Line { from, to, stroke } => self.draw_line(*from, *to, stroke),
            DrawOp::Text(text) => self.draw_text(text),
        }
    }
}
