//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod login;
mod submitted;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (content_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Login => login::draw(frame, content_area, &app.state.login),
        View::Form => {
            if let Some(form) = &app.state.form {
                forms::draw_form(frame, content_area, form);
            }
        }
        View::Submitted => submitted::draw(frame, content_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog goes on top of everything
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    }
}
