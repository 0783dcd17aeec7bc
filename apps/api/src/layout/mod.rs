// Pagination engine: measure blocks off-view, pack them into A4 pages, render
// page containers and republish on every input change.
// Passes are CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod context;
pub mod error;
pub mod font_metrics;
pub mod fragment;
pub mod packer;
pub mod page_fill;
pub mod relayout;
pub mod renderer;
pub mod sandbox;

// Re-export the public API consumed by the routes and the print export.
pub use context::{LayoutContext, PageGeometry};
pub use error::LayoutError;
pub use font_metrics::FontFamily;
pub use relayout::{DocumentSession, LayoutInputs, Paginator};
pub use renderer::PageSet;
