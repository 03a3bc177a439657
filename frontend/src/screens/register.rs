use chrono::Duration;
use log::warn;

use super::{Failure, Phase, Transition};
use crate::error::ApiError;
use crate::notify::{Notification, Status};
use crate::router::Route;
use crate::structs::{Ack, RegistrationInput};

#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub input: RegistrationInput,
    phase: Phase,
}

impl RegisterScreen {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn begin_submit(&mut self) -> RegistrationInput {
        self.phase = Phase::Submitting;
        self.input.clone()
    }

    pub fn finish_submit(&mut self, result: Result<Ack, ApiError>) -> Transition {
        self.phase = Phase::Idle;
        match result {
            Ok(_) => Transition::succeeded()
                .notify(
                    Notification::toast(Status::Success, "Account created.")
                        .with_description("We've created your account for you.")
                        .with_duration(Duration::milliseconds(5000)),
                )
                .navigate(Route::Login),
            Err(e) => {
                warn!("Registration failed: {}", e);
                Transition::failed(Failure::Transport(e.to_string()))
                    .notify(Notification::alert(format!("An Error occurred {}", e)))
            }
        }
    }
}
