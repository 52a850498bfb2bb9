//! Decorations drawn on top of the placed slides
//!
//! This module turns an output page layout into backend-neutral drawing
//! operations: cell borders, the separator between slides and notes,
//! slide numbers, the notes header and the page footer.

use crate::constants::*;
use crate::layout::{OutputPageLayout, PageGeometry};
use crate::options::LayoutOptions;
use crate::types::Rgb;

/// Line styling for outlines and rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

/// Standard fonts available to every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

/// A line of text, positioned by its left baseline point
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Rectangle outline
    Rect {
        rect: crate::layout::Rect,
        stroke: Stroke,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    Text(TextOp),
}

/// Generate all decorations for one output page
pub fn build_overlay(
    geometry: &PageGeometry,
    page: &OutputPageLayout,
    options: &LayoutOptions,
) -> Vec<DrawOp> {
    let mut ops = Vec::new();

    if options.show_borders {
        ops.extend(generate_borders(page));
    }

    if options.show_separator {
        ops.extend(generate_separator(geometry, page, options.separator_color));
    }

    if geometry.has_notes() {
        ops.push(generate_header(geometry, &options.printed_header_text()));

        if options.show_slide_numbers {
            ops.extend(generate_slide_range(geometry, page));
        }
    }

    if options.show_slide_numbers {
        ops.extend(generate_slide_numbers(page));
    }

    if options.show_page_numbers {
        ops.push(generate_page_number(geometry, page.page_number));
    }

    ops
}

/// Outline every cell that holds a slide
fn generate_borders(page: &OutputPageLayout) -> impl Iterator<Item = DrawOp> + '_ {
    page.occupied().map(|assignment| DrawOp::Rect {
        rect: assignment.cell.rect,
        stroke: Stroke {
            color: BORDER_COLOR,
            width: BORDER_LINE_WIDTH,
        },
    })
}

/// Vertical rule between the regions, running down only as far as the
/// page's slides go
fn generate_separator(
    geometry: &PageGeometry,
    page: &OutputPageLayout,
    color: Rgb,
) -> Option<DrawOp> {
    if !geometry.has_notes() || page.group.is_empty() {
        return None;
    }

    let last_cell = geometry.cells.get(page.group.len() - 1)?;
    let x = geometry.slide_region.right();

    Some(DrawOp::Line {
        from: (x, last_cell.rect.y),
        to: (x, geometry.page.top()),
        stroke: Stroke {
            color,
            width: SEPARATOR_LINE_WIDTH,
        },
    })
}

fn generate_header(geometry: &PageGeometry, header: &str) -> DrawOp {
    let notes = &geometry.notes_region;
    DrawOp::Text(TextOp {
        x: notes.x + (notes.width - text_width(header, HEADER_FONT_SIZE)) / 2.0,
        y: geometry.page.top() - HEADER_OFFSET,
        text: header.to_string(),
        font: Font::HelveticaBold,
        size: HEADER_FONT_SIZE,
        color: HEADER_COLOR,
    })
}

/// "Slides 6-10" under the header
fn generate_slide_range(geometry: &PageGeometry, page: &OutputPageLayout) -> Option<DrawOp> {
    let first = page.group.sources.start + 1;
    let last = page.group.sources.end;
    let text = match last.checked_sub(first)? {
        0 => format!("Slide {}", first),
        _ => format!("Slides {}-{}", first, last),
    };

    let notes = &geometry.notes_region;
    Some(DrawOp::Text(TextOp {
        x: notes.x + (notes.width - text_width(&text, SLIDE_RANGE_FONT_SIZE)) / 2.0,
        y: geometry.page.top() - SLIDE_RANGE_OFFSET,
        text,
        font: Font::Helvetica,
        size: SLIDE_RANGE_FONT_SIZE,
        color: LABEL_COLOR,
    }))
}

/// 1-based source index in the top-left corner of each occupied cell
fn generate_slide_numbers(page: &OutputPageLayout) -> impl Iterator<Item = DrawOp> + '_ {
    page.occupied().filter_map(|assignment| {
        let source = assignment.source_page?;
        let cell = &assignment.cell.rect;
        Some(DrawOp::Text(TextOp {
            x: cell.x + SLIDE_NUMBER_PADDING,
            y: cell.top() - SLIDE_NUMBER_PADDING - SLIDE_NUMBER_FONT_SIZE,
            text: (source + 1).to_string(),
            font: Font::Helvetica,
            size: SLIDE_NUMBER_FONT_SIZE,
            color: LABEL_COLOR,
        }))
    })
}

/// Right-aligned "Page N" in the bottom-right corner
fn generate_page_number(geometry: &PageGeometry, page_number: usize) -> DrawOp {
    let text = format!("Page {}", page_number);
    DrawOp::Text(TextOp {
        x: geometry.page.right()
            - PAGE_NUMBER_OFFSET
            - text_width(&text, PAGE_NUMBER_FONT_SIZE),
        y: PAGE_NUMBER_OFFSET,
        text,
        font: Font::Helvetica,
        size: PAGE_NUMBER_FONT_SIZE,
        color: LABEL_COLOR,
    })
}
