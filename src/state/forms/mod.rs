//! Form domain layer
//!
//! Values, validation and section navigation for schema-driven forms.
//! Nothing here touches the terminal, so the whole flow is testable
//! without a UI harness.

mod field;
mod form_state;
mod input;
mod session;
mod validation;

pub use field::FieldValue;
pub use form_state::{FormState, SectionButton};
pub use input::FieldInput;
pub use session::{FormSession, SessionError, Transition};
pub use validation::validate_field;

#[cfg(test)]
pub use session::NavigationState;
