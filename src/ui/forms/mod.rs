//! Form rendering module
//!
//! - `field_renderer`: draws a single field according to its kind
//! - `section`: the current section with progress and navigation buttons

mod field_renderer;
mod section;

pub use field_renderer::{draw_field, field_height, FieldView};
pub use section::draw_form;
