//! Grid planning and page geometry
//!
//! This module decides which source pages share an output page and
//! splits the output page into the slide region, the notes region and
//! the stack of slide cells.

use crate::constants::{PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::options::LayoutOptions;
use crate::types::{NotesError, Result};

use super::{Cell, PageGeometry, PageGroup, Rect};

// =============================================================================
// Grid Planning
// =============================================================================

/// Number of output pages needed for `total_pages` source pages
pub fn output_page_count(total_pages: usize, slides_per_page: usize) -> usize {
    if slides_per_page == 0 {
        return 0;
    }
    total_pages.div_ceil(slides_per_page)
}

/// Split source pages into consecutive groups, one per output page.
///
/// Group `i` holds source pages `[i * S, min((i + 1) * S, P))`; only the
/// last group can be partial.
pub fn plan_groups(total_pages: usize, slides_per_page: usize) -> Result<Vec<PageGroup>> {
    if slides_per_page == 0 {
        return Err(NotesError::Config(
            "Slides per page must be at least 1".to_string(),
        ));
    }

    Ok((0..output_page_count(total_pages, slides_per_page))
        .map(|index| {
            let start = index * slides_per_page;
            let end = (start + slides_per_page).min(total_pages);
            PageGroup {
                index,
                sources: start..end,
            }
        })
        .collect())
}

// =============================================================================
// Geometry
// =============================================================================

/// Create the page geometry for the given page size.
///
/// # Arguments
/// * `page_width` - Output page width in points
/// * `page_height` - Output page height in points
/// * `slides_per_page` - Number of cells stacked in the slide region
/// * `note_fraction` - Share of the page width given to the notes region
pub fn create_page_geometry(
    page_width: f32,
    page_height: f32,
    slides_per_page: usize,
    note_fraction: f32,
) -> PageGeometry {
    let page = Rect::new(0.0, 0.0, page_width, page_height);

    let slides_width = page_width * (1.0 - note_fraction);
    let notes_width = page_width * note_fraction;

    let slide_region = Rect::new(0.0, 0.0, slides_width, page_height);
    let notes_region = Rect::new(slides_width, 0.0, notes_width, page_height);

    let cell_height = if slides_per_page == 0 {
        0.0
    } else {
        page_height / slides_per_page as f32
    };

    // Each y is derived from the index so rounding never accumulates down the stack
    let cells = (0..slides_per_page)
        .map(|index| Cell {
            index,
            rect: Rect::new(
                slide_region.x,
                slide_region.top() - (index + 1) as f32 * cell_height,
                slides_width,
                cell_height,
            ),
        })
        .collect();

    PageGeometry {
        page,
        slide_region,
        notes_region,
        cells,
    }
}

/// US Letter geometry for the configured grid
pub fn letter_geometry(options: &LayoutOptions) -> PageGeometry {
    create_page_geometry(
        PAGE_WIDTH_PT,
        PAGE_HEIGHT_PT,
        options.slides_per_page,
        options.note_fraction,
    )
}
