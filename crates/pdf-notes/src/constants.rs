//! Shared constants for the notes layout
//!
//! This module centralizes magic numbers used by the geometry, overlay
//! and rendering code.

use crate::types::Rgb;

// =============================================================================
// Output Page
// =============================================================================

/// Output page width in points (US Letter: 8.5" × 11")
pub const PAGE_WIDTH_PT: f32 = 612.0;

/// Output page height in points (US Letter)
pub const PAGE_HEIGHT_PT: f32 = 792.0;

/// Fraction of each cell left free around a placed slide
pub const SLIDE_INSET: f32 = 0.02;

// =============================================================================
// Options
// =============================================================================

pub const MIN_SLIDES_PER_PAGE: usize = 1;
pub const MAX_SLIDES_PER_PAGE: usize = 10;

pub const DEFAULT_SLIDES_PER_PAGE: usize = 5;
pub const DEFAULT_NOTE_FRACTION: f32 = 0.3;

/// Suffix appended to the input file stem for the default output name
pub const OUTPUT_SUFFIX: &str = "_notes";

// =============================================================================
// Lines
// =============================================================================

pub const BORDER_LINE_WIDTH: f32 = 0.5;
pub const BORDER_COLOR: Rgb = Rgb::gray(0.8);

pub const SEPARATOR_LINE_WIDTH: f32 = 1.0;
pub const DEFAULT_SEPARATOR_COLOR: Rgb = Rgb::gray(0.6);

// =============================================================================
// Text
// =============================================================================

pub const HEADER_FONT_SIZE: f32 = 9.0;
pub const HEADER_COLOR: Rgb = Rgb::gray(0.3);
/// Baseline distance from the top of the page
pub const HEADER_OFFSET: f32 = 20.0;
pub const HEADER_SUFFIX: &str = "NOTES";

pub const SLIDE_RANGE_FONT_SIZE: f32 = 7.0;
pub const SLIDE_RANGE_OFFSET: f32 = 35.0;

pub const SLIDE_NUMBER_FONT_SIZE: f32 = 6.0;
/// Inset of the per-cell slide number from the cell's top-left corner
pub const SLIDE_NUMBER_PADDING: f32 = 3.0;

/// Default font size for page numbers (points)
pub const PAGE_NUMBER_FONT_SIZE: f32 = 8.0;

/// Offset for page numbers from the bottom-right page corner (points)
pub const PAGE_NUMBER_OFFSET: f32 = 10.0;

pub const LABEL_COLOR: Rgb = Rgb::gray(0.5);

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Approximate width of `text` set in Helvetica at `font_size`.
///
/// Only characters that survive WinAnsi encoding are counted.
#[inline]
pub fn text_width(text: &str, font_size: f32) -> f32 {
    crate::winansi::printable(text).chars().count() as f32
        * font_size
        * HELVETICA_CHAR_WIDTH_RATIO
}
