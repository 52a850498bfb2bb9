//! Content placement within cells
//!
//! Each source page is scaled uniformly to fit its cell, shrunk by a
//! small inset, and centered on both axes.

use crate::constants::SLIDE_INSET;
use crate::types::{NotesError, Result, SkippedPage};

use super::{Cell, CellAssignment, OutputPageLayout, PageGeometry, PageGroup, Placement, Rect};

/// Calculate the placement of a source page inside a cell.
///
/// Fails with [`NotesError::InvalidSourcePage`] when the source page has
/// no usable area.
///
/// # Arguments
/// * `cell` - The target cell
/// * `source_page` - 0-based index of the source page
/// * `source_width` - Width of the source page in points
/// * `source_height` - Height of the source page in points
pub fn place_page(
    cell: &Cell,
    source_page: usize,
    source_width: f32,
    source_height: f32,
) -> Result<Placement> {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(source_width) || !usable(source_height) {
        return Err(NotesError::InvalidSourcePage {
            index: source_page,
            width: source_width,
            height: source_height,
        });
    }

    let area = &cell.rect;
    let scale = calculate_scale(source_width, source_height, area.width, area.height);

    let scaled_width = source_width * scale;
    let scaled_height = source_height * scale;

    let offset_x = (area.width - scaled_width) / 2.0;
    let offset_y = (area.height - scaled_height) / 2.0;

    Ok(Placement {
        source_page,
        scale,
        offset_x,
        offset_y,
        content_rect: Rect::new(
            area.x + offset_x,
            area.y + offset_y,
            scaled_width,
            scaled_height,
        ),
    })
}

/// Calculate scale factor for fitting source to target dimensions,
/// preserving aspect ratio and leaving the slide inset free.
pub fn calculate_scale(
    src_width: f32,
    src_height: f32,
    target_width: f32,
    target_height: f32,
) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h).max(0.0) * (1.0 - SLIDE_INSET)
}

/// Lay out one output page.
///
/// Returns the page layout and the source pages that could not be placed.
/// Cells past the end of a partial group stay empty.
///
/// # Arguments
/// * `geometry` - The output page geometry
/// * `group` - Source pages that belong on this page
/// * `source_dimensions` - (width, height) in points for every source page
/// * `page_number` - Number printed in the page footer
pub fn layout_output_page(
    geometry: &PageGeometry,
    group: &PageGroup,
    source_dimensions: &[(f32, f32)],
    page_number: usize,
) -> (OutputPageLayout, Vec<SkippedPage>) {
    let mut skipped = Vec::new();

    let cells = geometry
        .cells
        .iter()
        .enumerate()
        .map(|(slot, cell)| {
            let source_page = group.sources.clone().nth(slot);

            let placement = source_page.and_then(|index| {
                let (width, height) = source_dimensions.get(index).copied().unwrap_or((0.0, 0.0));
                match place_page(cell, index, width, height) {
                    Ok(placement) => Some(placement),
                    Err(e) => {
                        skipped.push(SkippedPage {
                            index,
                            reason: e.to_string(),
                        });
                        None
                    }
                }
            });

            CellAssignment {
                cell: *cell,
                source_page,
                placement,
            }
        })
        .collect();

    let layout = OutputPageLayout {
        group: group.clone(),
        page_number,
        cells,
    };
    (layout, skipped)
}
