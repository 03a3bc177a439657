use log::warn;

use super::{Failure, Phase, Transition};
use crate::error::ApiError;
use crate::notify::{Notification, Status};
use crate::router::Route;
use crate::structs::{Ack, NoteInput};

#[derive(Debug, Default)]
pub struct CreateNoteScreen {
    pub input: NoteInput,
    phase: Phase,
}

impl CreateNoteScreen {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Maps the status picker's value; anything but "true"/"false" unsets it.
    pub fn set_status(&mut self, value: &str) {
        self.input.status = match value {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        };
    }

    pub fn begin_submit(&mut self) -> NoteInput {
        self.phase = Phase::Submitting;
        self.input.clone()
    }

    pub fn finish_submit(&mut self, result: Result<Ack, ApiError>) -> Transition {
        self.phase = Phase::Idle;
        match result {
            Ok(_) => Transition::succeeded()
                .notify(
                    Notification::toast(Status::Success, "Note created.")
                        .with_description("We've created your note."),
                )
                .navigate(Route::Notes),
            Err(e) => {
                warn!("Creating note failed: {}", e);
                Transition::failed(Failure::Transport(e.to_string()))
                    .notify(Notification::alert(format!("An Error occurred: {}", e)))
            }
        }
    }
}
