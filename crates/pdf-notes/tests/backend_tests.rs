use pdf_notes::layout::{Placement, Rect};
use pdf_notes::overlay::{Stroke, TextOp};
use pdf_notes::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Begin,
    Render(usize),
    Rect,
    Line(Rgb),
    Text(String),
    Finish,
}

/// Records every call the layout engine makes
struct RecordingBackend {
    sizes: Vec<(f32, f32)>,
    calls: Vec<Call>,
    fail_dimensions_at: Option<usize>,
}

impl RecordingBackend {
    fn new(sizes: Vec<(f32, f32)>) -> Self {
        Self {
            sizes,
            calls: Vec::new(),
            fail_dimensions_at: None,
        }
    }

    fn pages(&self) -> Vec<Vec<Call>> {
        self.calls
            .split(|call| *call == Call::Finish)
            .filter(|page| !page.is_empty())
            .map(|page| page.to_vec())
            .collect()
    }
}

impl DocumentBackend for RecordingBackend {
    type Output = Vec<Call>;

    fn page_count(&self) -> usize {
        self.sizes.len()
    }

    fn page_dimensions(&self, index: usize) -> Result<(f32, f32)> {
        if self.fail_dimensions_at == Some(index) {
            return Err(NotesError::UnreadableDocument {
                path: "memory".into(),
                reason: "broken page".to_string(),
            });
        }
        Ok(self.sizes[index])
    }

    fn begin_page(&mut self, width: f32, height: f32) -> Result<()> {
        assert_eq!((width, height), (612.0, 792.0));
        self.calls.push(Call::Begin);
        Ok(())
    }

    fn render_page_into(&mut self, placement: &Placement) -> Result<()> {
        self.calls.push(Call::Render(placement.source_page));
        Ok(())
    }

    fn draw_rect(&mut self, _rect: &Rect, _stroke: &Stroke) -> Result<()> {
        self.calls.push(Call::Rect);
        Ok(())
    }

    fn draw_line(&mut self, _from: (f32, f32), _to: (f32, f32), stroke: &Stroke) -> Result<()> {
        self.calls.push(Call::Line(stroke.color));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextOp) -> Result<()> {
        self.calls.push(Call::Text(text.text.clone()));
        Ok(())
    }

    fn finish_page(&mut self) -> Result<()> {
        self.calls.push(Call::Finish);
        Ok(())
    }

    fn finish(self) -> Result<Vec<Call>> {
        Ok(self.calls)
    }
}

#[test]
fn test_pages_emitted_in_order_with_overlay_last() {
    let mut backend = RecordingBackend::new(vec![(720.0, 540.0); 7]);
    let options = LayoutOptions {
        slides_per_page: 3,
        ..Default::default()
    };

    let report = assemble(&mut backend, &options).unwrap();
    assert_eq!(report.output_pages, 3);

    let pages = backend.pages();
    assert_eq!(pages.len(), 3);

    let rendered: Vec<Vec<usize>> = pages
        .iter()
        .map(|page| {
            page.iter()
                .filter_map(|call| match call {
                    Call::Render(index) => Some(*index),
                    _ => None,
                })
                .collect()
        })
        .collect();
    assert_eq!(rendered, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);

    for page in &pages {
        assert_eq!(page[0], Call::Begin);
        let last_render = page
            .iter()
            .rposition(|call| matches!(call, Call::Render(_)))
            .unwrap();
        let first_draw = page
            .iter()
            .position(|call| matches!(call, Call::Rect | Call::Line(_) | Call::Text(_)))
            .unwrap();
        assert!(last_render < first_draw);
    }
}

#[test]
fn test_invalid_page_skipped_and_run_continues() {
    let mut backend = RecordingBackend::new(vec![
        (720.0, 540.0),
        (720.0, -1.0),
        (720.0, 540.0),
    ]);

    let report = assemble(&mut backend, &LayoutOptions::default()).unwrap();

    assert_eq!(report.output_pages, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);

    let calls = backend.finish().unwrap();
    assert!(calls.contains(&Call::Render(0)));
    assert!(!calls.contains(&Call::Render(1)));
    assert!(calls.contains(&Call::Render(2)));

    // Slide numbers only for placed slides, range still covers the group
    assert!(calls.contains(&Call::Text("1".to_string())));
    assert!(!calls.contains(&Call::Text("2".to_string())));
    assert!(calls.contains(&Call::Text("Slides 1-3".to_string())));
}

#[test]
fn test_read_errors_abort_before_output() {
    let mut backend = RecordingBackend::new(vec![(720.0, 540.0); 4]);
    backend.fail_dimensions_at = Some(3);

    let result = assemble(&mut backend, &LayoutOptions::default());
    assert!(matches!(result, Err(NotesError::UnreadableDocument { .. })));
    assert!(backend.calls.is_empty());
}

#[test]
fn test_invalid_options_fail_before_any_call() {
    let mut backend = RecordingBackend::new(vec![(720.0, 540.0); 4]);
    let options = LayoutOptions {
        note_fraction: 1.0,
        ..Default::default()
    };

    assert!(matches!(
        assemble(&mut backend, &options),
        Err(NotesError::Config(_))
    ));
    assert!(backend.calls.is_empty());
}

#[test]
fn test_separator_color_reaches_backend() {
    let mut backend = RecordingBackend::new(vec![(720.0, 540.0); 6]);
    let options = LayoutOptions {
        separator_color: Rgb::new(1.0, 0.0, 0.0),
        ..Default::default()
    };

    assemble(&mut backend, &options).unwrap();
    for page in backend.pages() {
        assert!(page.contains(&Call::Line(Rgb::new(1.0, 0.0, 0.0))));
    }
}

#[test]
fn test_empty_source_is_rejected() {
    let mut backend = RecordingBackend::new(Vec::new());
    assert!(matches!(
        assemble(&mut backend, &LayoutOptions::default()),
        Err(NotesError::NoPages)
    ));
}

#[test]
fn test_page_number_overflow_fails_before_any_page() {
    let mut backend = RecordingBackend::new(vec![(720.0, 540.0); 12]);
    let options = LayoutOptions {
        page_number_start: usize::MAX - 1,
        ..Default::default()
    };

    assert!(matches!(
        assemble(&mut backend, &options),
        Err(NotesError::Config(_))
    ));
    assert!(backend.calls.is_empty());
}
