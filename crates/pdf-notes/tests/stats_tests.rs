use pdf_notes::*;

#[test]
fn test_statistics_partial_last_page() {
    let stats = calculate_statistics(12, &LayoutOptions::default()).unwrap();

    assert_eq!(stats.source_pages, 12);
    assert_eq!(stats.output_pages, 3);
    assert_eq!(stats.slides_per_page, 5);
    assert_eq!(stats.last_page_slides, 2);
    assert_eq!(stats.note_percent, 30);
    assert!((stats.reduction_percent - 75.0).abs() < 0.01);
}

#[test]
fn test_statistics_exact_fit() {
    let options = LayoutOptions {
        slides_per_page: 4,
        note_fraction: 0.35,
        ..Default::default()
    };
    let stats = calculate_statistics(8, &options).unwrap();

    assert_eq!(stats.output_pages, 2);
    assert_eq!(stats.last_page_slides, 4);
    assert_eq!(stats.note_percent, 35);
}

#[test]
fn test_statistics_single_slide_per_page() {
    let options = LayoutOptions {
        slides_per_page: 1,
        ..Default::default()
    };
    let stats = calculate_statistics(3, &options).unwrap();

    assert_eq!(stats.output_pages, 3);
    assert_eq!(stats.last_page_slides, 1);
    assert_eq!(stats.reduction_percent, 0.0);
}

#[test]
fn test_statistics_no_pages() {
    assert!(matches!(
        calculate_statistics(0, &LayoutOptions::default()),
        Err(NotesError::NoPages)
    ));
}

#[test]
fn test_statistics_invalid_options() {
    let options = LayoutOptions {
        slides_per_page: 0,
        ..Default::default()
    };
    assert!(matches!(
        calculate_statistics(10, &options),
        Err(NotesError::Config(_))
    ));
}

#[test]
fn test_statistics_page_number_overflow() {
    let options = LayoutOptions {
        page_number_start: usize::MAX,
        ..Default::default()
    };
    assert!(calculate_statistics(5, &options).is_ok());
    assert!(matches!(
        calculate_statistics(6, &options),
        Err(NotesError::Config(_))
    ));
}
