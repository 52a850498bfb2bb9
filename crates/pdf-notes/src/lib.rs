pub mod convert;
mod constants;
pub mod layout;
mod options;
pub mod overlay;
pub mod render;
mod stats;
mod types;
mod winansi;

pub use convert::{assemble, convert, default_output_path, load_pdf, resolve_output_path, save_pdf};
pub use options::*;
pub use render::{DocumentBackend, LopdfBackend};
pub use stats::calculate_statistics;
pub use types::*;
