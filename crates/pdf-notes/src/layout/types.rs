//! Layout data types for the notes layout
//!
//! These types represent the intermediate layout calculations between
//! grouping source pages and rendering output pages.

use std::ops::Range;

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies inside this rectangle, allowing `tolerance` points of slack
    pub fn contains(&self, other: &Rect, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.top() <= self.top() + tolerance
    }
}

/// Source pages that share one output page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroup {
    /// 0-based output page index
    pub index: usize,
    /// Source page indices, in order
    pub sources: Range<usize>,
}

impl PageGroup {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// One slot of the slide region's vertical stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Position in the stack (0 = top)
    pub index: usize,
    pub rect: Rect,
}

/// Output page partitioned into slide and notes regions
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    /// The whole output page
    pub page: Rect,
    /// Left part of the page holding the slide cells
    pub slide_region: Rect,
    /// Right part of the page left blank for notes
    pub notes_region: Rect,
    /// Cells from top to bottom
    pub cells: Vec<Cell>,
}

impl PageGeometry {
    /// A zero-width notes region has no room for header text
    pub fn has_notes(&self) -> bool {
        self.notes_region.width > 0.0
    }

    pub fn cell_height(&self) -> f32 {
        self.cells.first().map(|cell| cell.rect.height).unwrap_or(0.0)
    }
}

/// Scale and offset mapping a source page into a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// 0-based source page index
    pub source_page: usize,
    /// Uniform scale factor applied to the source page
    pub scale: f32,
    /// Horizontal offset from the cell's left edge
    pub offset_x: f32,
    /// Vertical offset from the cell's bottom edge
    pub offset_y: f32,
    /// Position and size of the scaled page on the output page
    pub content_rect: Rect,
}

/// What a cell holds on a particular output page
#[derive(Debug, Clone, PartialEq)]
pub struct CellAssignment {
    pub cell: Cell,
    /// Source page assigned by the grid (None past the end of a partial group)
    pub source_page: Option<usize>,
    /// None when the cell is empty or its page was skipped
    pub placement: Option<Placement>,
}

impl CellAssignment {
    pub fn is_occupied(&self) -> bool {
        self.placement.is_some()
    }
}

/// Complete layout of one output page
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPageLayout {
    pub group: PageGroup,
    /// Number printed in the page footer
    pub page_number: usize,
    /// One entry per cell of the geometry, top to bottom
    pub cells: Vec<CellAssignment>,
}

impl OutputPageLayout {
    pub fn occupied(&self) -> impl Iterator<Item = &CellAssignment> {
        self.cells.iter().filter(|assignment| assignment.is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }
}
