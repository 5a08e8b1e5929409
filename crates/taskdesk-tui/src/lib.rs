/*
[INPUT]:  Public API exports for taskdesk-tui crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod listing;
pub mod logging;
pub mod view;

// Re-export main types for convenience
pub use config::AppConfig;
pub use listing::render_listing;
pub use view::{CommentsByTask, TaskListView};
