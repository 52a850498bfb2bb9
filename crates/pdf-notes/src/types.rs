use crate::layout::OutputPageLayout;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Rejected before any page is processed
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Input file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Cannot read {}: {reason}", .path.display())]
    UnreadableDocument { path: PathBuf, reason: String },
    /// Recovered by the assembler: the page is skipped and the run continues
    #[error("Source page {} has invalid dimensions {width}x{height}", .index + 1)]
    InvalidSourcePage { index: usize, width: f32, height: f32 },
    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("PDF has no pages")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, NotesError>;

/// Decoration placed in front of the notes header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Emoji {
    Brain,
    Rocket,
    Star,
    Fire,
    Book,
}

impl Emoji {
    pub const ALL: [Emoji; 5] = [
        Emoji::Brain,
        Emoji::Rocket,
        Emoji::Star,
        Emoji::Fire,
        Emoji::Book,
    ];

    /// Key used on the command line and in config files
    pub fn key(self) -> &'static str {
        match self {
            Emoji::Brain => "brain",
            Emoji::Rocket => "rocket",
            Emoji::Star => "star",
            Emoji::Fire => "fire",
            Emoji::Book => "book",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Emoji::Brain => "\u{1F9E0}",
            Emoji::Rocket => "\u{1F680}",
            Emoji::Star => "\u{2B50}",
            Emoji::Fire => "\u{1F525}",
            Emoji::Book => "\u{1F4DA}",
        }
    }

    /// Stand-in drawn with the standard fonts, which have no emoji glyphs
    pub fn text_mark(self) -> &'static str {
        match self {
            Emoji::Brain => "[Brain]",
            Emoji::Rocket => "[Rocket]",
            Emoji::Star => "[Star]",
            Emoji::Fire => "[Fire]",
            Emoji::Book => "[Book]",
        }
    }
}

impl FromStr for Emoji {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Emoji::ALL
            .into_iter()
            .find(|emoji| emoji.key() == key)
            .ok_or_else(|| {
                NotesError::Config(format!(
                    "Unknown emoji '{}', expected one of: brain, rocket, star, fire, book",
                    s
                ))
            })
    }
}

/// RGB color with components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::gray(0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Parses `"r,g,b"`, e.g. `"0.5,0.5,0.5"`
impl FromStr for Rgb {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || {
            NotesError::Config(format!(
                "Invalid color '{}': expected three comma-separated values between 0 and 1 (e.g. \"0.5,0.5,0.5\")",
                s
            ))
        };

        let components = s
            .split(',')
            .map(|part| part.trim().parse::<f32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;

        let &[r, g, b] = components.as_slice() else {
            return Err(malformed());
        };

        let color = Rgb::new(r, g, b);
        if !color.is_valid() {
            return Err(malformed());
        }
        Ok(color)
    }
}

/// A source page left out of the output
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPage {
    /// 0-based source page index
    pub index: usize,
    pub reason: String,
}

/// Result of a layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub source_pages: usize,
    pub output_pages: usize,
    pub skipped: Vec<SkippedPage>,
    /// Every output page in emission order
    pub pages: Vec<OutputPageLayout>,
}

/// Statistics about a conversion, available without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of output pages
    pub output_pages: usize,
    pub slides_per_page: usize,
    /// Slides on the final output page
    pub last_page_slides: usize,
    /// Notes column width as a whole percentage of the page width
    pub note_percent: u32,
    /// How many fewer pages the output has, as a percentage of the input
    pub reduction_percent: f32,
}
