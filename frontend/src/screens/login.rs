use log::{debug, warn};

use super::{Failure, Phase, Transition};
use crate::api::LoginOutcome;
use crate::error::ApiError;
use crate::notify::{Notification, Status};
use crate::router::Route;
use crate::session::SessionStore;
use crate::structs::LoginInput;

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub input: LoginInput,
    /// Show the password in clear text.
    pub reveal_password: bool,
    phase: Phase,
}

impl LoginScreen {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal_password = !self.reveal_password;
    }

    pub fn begin_submit(&mut self) -> LoginInput {
        self.phase = Phase::Submitting;
        self.input.clone()
    }

    /// Persists the token on success. The session is left alone on every
    /// other path.
    pub fn finish_submit(
        &mut self,
        result: Result<LoginOutcome, ApiError>,
        session: &SessionStore,
    ) -> Transition {
        self.phase = Phase::Idle;
        match result {
            Ok(LoginOutcome::Authenticated(token)) => match session.set_token(&token) {
                Ok(()) => {
                    debug!("Logged in as {}", self.input.email);
                    Transition::succeeded()
                        .notify(
                            Notification::toast(Status::Success, "Login Successfully")
                                .with_description("Hi! Welcome Back."),
                        )
                        .navigate(Route::Notes)
                }
                Err(e) => {
                    warn!("Login succeeded but the token was not stored: {}", e);
                    Transition::failed(Failure::Storage(e.to_string())).notify(
                        Notification::toast(Status::Error, "Something Went Wrong")
                            .with_description(e.to_string()),
                    )
                }
            },
            Ok(LoginOutcome::Rejected) => {
                debug!("Login rejected for {}", self.input.email);
                Transition::failed(Failure::Authentication).notify(
                    Notification::toast(Status::Error, "Something Went Wrong")
                        .with_description("Login failed. Please try After some time"),
                )
            }
            Err(e) => {
                warn!("Login request failed: {}", e);
                Transition::failed(Failure::Transport(e.to_string())).notify(
                    Notification::toast(Status::Error, "Network error")
                        .with_description(e.to_string()),
                )
            }
        }
    }
}
