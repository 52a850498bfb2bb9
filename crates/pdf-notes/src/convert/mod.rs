//! Notes conversion - placing slides next to a notes column
//!
//! This module orchestrates the conversion:
//! 1. Validate options and read source page dimensions
//! 2. Group source pages into output pages
//! 3. Place each page in its cell and draw the overlay
//! 4. Hand the finished document back for saving

mod io;

pub use io::{default_output_path, load_pdf, resolve_output_path, save_pdf};

use crate::layout::{
    OutputPageLayout, PageGeometry, layout_output_page, letter_geometry, plan_groups,
};
use crate::options::LayoutOptions;
use crate::overlay::build_overlay;
use crate::render::{DocumentBackend, LopdfBackend};
use crate::types::*;
use lopdf::Document;

/// Convert a document into the notes layout.
///
/// Returns the output document, ready for [`save_pdf`], together with a
/// report of what was produced.
pub async fn convert(
    source: &Document,
    options: &LayoutOptions,
) -> Result<(Document, ConversionReport)> {
    options.validate()?;

    let source = source.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        let mut backend = LopdfBackend::new(&source);
        let report = assemble(&mut backend, &options)?;
        Ok::<_, NotesError>((backend.finish()?, report))
    })
    .await?
}

/// Run the layout pass against any backend.
///
/// Output pages are emitted strictly in order. A source page with unusable
/// dimensions is skipped with a warning; every other failure aborts.
pub fn assemble<B: DocumentBackend>(
    backend: &mut B,
    options: &LayoutOptions,
) -> Result<ConversionReport> {
    options.validate()?;

    let total_pages = backend.page_count();
    if total_pages == 0 {
        return Err(NotesError::NoPages);
    }

    let source_dimensions = (0..total_pages)
        .map(|index| backend.page_dimensions(index))
        .collect::<Result<Vec<_>>>()?;

    let geometry = letter_geometry(options);
    let groups = plan_groups(total_pages, options.slides_per_page)?;

    // The last page carries the largest number
    options.page_number(groups.len().saturating_sub(1))?;

    log::info!(
        "Laying out {} page(s) onto {} output page(s)",
        total_pages,
        groups.len()
    );

    let mut report = ConversionReport {
        source_pages: total_pages,
        output_pages: 0,
        skipped: Vec::new(),
        pages: Vec::with_capacity(groups.len()),
    };

    for group in &groups {
        let page_number = options.page_number(group.index)?;
        let (layout, skipped) =
            layout_output_page(&geometry, group, &source_dimensions, page_number);

        for page in &skipped {
            log::warn!("Skipping source page {}: {}", page.index + 1, page.reason);
        }

        render_output_page(backend, &geometry, &layout, options)?;

        log::info!(
            "Output page {}/{} ({}/{} slides)",
            group.index + 1,
            groups.len(),
            group.sources.end,
            total_pages
        );

        report.skipped.extend(skipped);
        report.pages.push(layout);
        report.output_pages += 1;
    }

    Ok(report)
}

/// Emit one output page: scaled slides first, decorations on top
fn render_output_page<B: DocumentBackend>(
    backend: &mut B,
    geometry: &PageGeometry,
    layout: &OutputPageLayout,
    options: &LayoutOptions,
) -> Result<()> {
    backend.begin_page(geometry.page.width, geometry.page.height)?;

    for placement in layout.cells.iter().filter_map(|cell| cell.placement.as_ref()) {
        backend.render_page_into(placement)?;
    }

    for op in build_overlay(geometry, layout, options) {
        backend.draw(&op)?;
    }

    backend.finish_page()
}
