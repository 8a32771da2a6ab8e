//! Output renderers: terminal and JSON.

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::session::SessionView;

/// Trait for rendering a session snapshot to an output format.
pub trait OutputRenderer {
    /// Render the view to a string.
    fn render(&self, view: &SessionView<'_>) -> String;
}
