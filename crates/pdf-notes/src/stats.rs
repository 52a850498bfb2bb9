use crate::layout::output_page_count;
use crate::options::LayoutOptions;
use crate::types::*;

/// Calculate statistics for a conversion without rendering anything
pub fn calculate_statistics(
    source_pages: usize,
    options: &LayoutOptions,
) -> Result<ConversionStatistics> {
    options.validate()?;

    if source_pages == 0 {
        return Err(NotesError::NoPages);
    }

    let slides_per_page = options.slides_per_page;
    let output_pages = output_page_count(source_pages, slides_per_page);
    options.page_number(output_pages - 1)?;

    let last_page_slides = match source_pages % slides_per_page {
        0 => slides_per_page,
        remainder => remainder,
    };

    let reduction_percent = (1.0 - output_pages as f32 / source_pages as f32) * 100.0;

    Ok(ConversionStatistics {
        source_pages,
        output_pages,
        slides_per_page,
        last_page_slides,
        note_percent: (options.note_fraction * 100.0).round() as u32,
        reduction_percent,
    })
}
