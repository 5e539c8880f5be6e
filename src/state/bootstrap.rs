//! Login flow: create the user, fetch their form, start a session

use super::forms::{FormSession, SessionError};
use super::login::LoginState;
use super::schema::UserData;
use crate::api::{ApiError, FormApi};
use thiserror::Error;

/// Shown when a failure carries no message of its own
pub const GENERIC_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
enum BootstrapError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl BootstrapError {
    fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        }
    }
}

/// Holds the loading flag up for as long as it lives
struct LoadingGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// Run a login attempt end to end
///
/// Failures never escape: they are written to `login.error` and None is
/// returned. The loading flag is cleared on every path.
pub async fn bootstrap(
    api: &dyn FormApi,
    login: &mut LoginState,
    user: UserData,
) -> Option<FormSession> {
    let _loading = LoadingGuard::acquire(&mut login.is_loading);
    login.error = None;

    match start_session(api, &user).await {
        Ok(session) => {
            tracing::info!(
                roll_number = %user.roll_number,
                session_id = %session.id(),
                sections = session.section_count(),
                "form session started"
            );
            Some(session)
        }
        Err(err) => {
            tracing::warn!(roll_number = %user.roll_number, error = %err, "login failed");
            login.error = Some(err.user_message());
            None
        }
    }
}

async fn start_session(api: &dyn FormApi, user: &UserData) -> Result<FormSession, BootstrapError> {
    let created = api.create_user(user).await?;
    if !created.success {
        return Err(BootstrapError::Rejected(created.message));
    }

    let response = api.get_form_structure(&user.roll_number).await?;
    Ok(FormSession::new(response.form)?)
}
