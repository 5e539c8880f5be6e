//! Trait abstraction for the form service to enable mocking in tests

use super::error::Result;
use crate::state::{CreateUserResponse, FormResponse, UserData};
use async_trait::async_trait;

/// Operations the form service offers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormApi: Send + Sync {
    /// Register the user; a rejection is reported in the response, not as an error
    async fn create_user(&self, user: &UserData) -> Result<CreateUserResponse>;

    /// Fetch the form assigned to a roll number
    async fn get_form_structure(&self, roll_number: &str) -> Result<FormResponse>;
}
