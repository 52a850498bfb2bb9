use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Notes layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    // Grid
    pub slides_per_page: usize,
    /// Fraction of the page width reserved for notes, in `[0, 1)`
    pub note_fraction: f32,

    // Header
    pub label: Option<String>,
    pub emoji: Option<Emoji>,

    // Decorations
    pub show_borders: bool,
    pub show_separator: bool,
    pub separator_color: Rgb,

    // Numbering
    pub show_page_numbers: bool,
    pub show_slide_numbers: bool,
    pub page_number_start: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            slides_per_page: DEFAULT_SLIDES_PER_PAGE,
            note_fraction: DEFAULT_NOTE_FRACTION,
            label: None,
            emoji: None,
            show_borders: false,
            show_separator: true,
            separator_color: DEFAULT_SEPARATOR_COLOR,
            show_page_numbers: true,
            show_slide_numbers: true,
            page_number_start: 1,
        }
    }
}

impl LayoutOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| NotesError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NotesError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SLIDES_PER_PAGE..=MAX_SLIDES_PER_PAGE).contains(&self.slides_per_page) {
            return Err(NotesError::Config(format!(
                "Slides per page must be between {} and {}, got: {}",
                MIN_SLIDES_PER_PAGE, MAX_SLIDES_PER_PAGE, self.slides_per_page
            )));
        }

        if !self.note_fraction.is_finite() || !(0.0..1.0).contains(&self.note_fraction) {
            return Err(NotesError::Config(format!(
                "Note space ratio must be at least 0 and below 1, got: {}",
                self.note_fraction
            )));
        }

        if !self.separator_color.is_valid() {
            return Err(NotesError::Config(format!(
                "Separator color components must be between 0 and 1, got: {}",
                self.separator_color
            )));
        }

        Ok(())
    }

    /// The label with surrounding whitespace removed, if any remains
    pub fn effective_label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    /// Compose the notes header: `{emoji} {label} NOTES`
    pub fn header_text(&self) -> String {
        self.compose_header(self.emoji.map(Emoji::symbol))
    }

    /// The header as drawn with the standard PDF fonts, the emoji replaced
    /// by its text mark
    pub fn printed_header_text(&self) -> String {
        self.compose_header(self.emoji.map(Emoji::text_mark))
    }

    fn compose_header(&self, emoji: Option<&str>) -> String {
        let mut parts = Vec::with_capacity(3);
        parts.extend(emoji);
        parts.extend(self.effective_label());
        parts.push(HEADER_SUFFIX);
        parts.join(" ")
    }

    /// Number printed on the output page at `index`
    pub fn page_number(&self, index: usize) -> Result<usize> {
        self.page_number_start.checked_add(index).ok_or_else(|| {
            NotesError::Config(format!(
                "Page numbers starting at {} overflow on output page {}",
                self.page_number_start,
                index + 1
            ))
        })
    }
}
