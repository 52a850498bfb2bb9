//! Layout calculation modules for the notes layout
//!
//! This module handles all the geometric calculations:
//! - Grid planning (which source pages share an output page)
//! - Page geometry (slide region, notes region, cells)
//! - Content placement (scaling and centering)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
