//! Application state module

mod app_state;
mod bootstrap;
mod forms;
mod login;
mod schema;

pub use app_state::*;
pub use bootstrap::bootstrap;
pub use forms::*;
pub use login::*;
pub use schema::*;
