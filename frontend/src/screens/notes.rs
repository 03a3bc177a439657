use log::{info, warn};

use super::{Failure, Phase, Transition};
use crate::error::ApiError;
use crate::notify::{Notification, Status};
use crate::router::Route;
use crate::session::SessionStore;
use crate::structs::{Ack, Note};

/// The note list. The collection is only ever replaced wholesale by a fetch;
/// deleting never edits it locally.
#[derive(Debug, Default)]
pub struct NotesScreen {
    notes: Vec<Note>,
    phase: Phase,
}

impl NotesScreen {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn begin_load(&mut self) {
        self.phase = Phase::Submitting;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Note>, ApiError>) -> Transition {
        self.phase = Phase::Idle;
        match result {
            Ok(notes) => {
                self.notes = notes;
                Transition::succeeded()
            }
            Err(e) => {
                warn!("Fetching notes failed: {}", e);
                Transition::failed(Failure::Transport(e.to_string())).notify(check_console())
            }
        }
    }

    pub fn begin_delete(&mut self, id: &str) -> String {
        self.phase = Phase::Submitting;
        id.to_string()
    }

    /// On success the screen stays busy: the refetch that follows ends it.
    pub fn finish_delete(&mut self, result: Result<Ack, ApiError>) -> Transition {
        match result {
            Ok(_) => Transition::succeeded().reload(),
            Err(e) => {
                self.phase = Phase::Idle;
                warn!("Deleting note failed: {}", e);
                Transition::failed(Failure::Transport(e.to_string())).notify(check_console())
            }
        }
    }

    /// Always ends on the login screen, whatever the storage says.
    pub fn logout(&mut self, session: &SessionStore) -> Transition {
        if let Err(e) = session.clear_token() {
            warn!("Could not clear session token on logout: {}", e);
        }
        info!("Logged out");
        self.notes.clear();
        self.phase = Phase::Idle;
        Transition::succeeded()
            .notify(Notification::toast(Status::Success, "See you soon..."))
            .navigate(Route::Login)
    }
}

fn check_console() -> Notification {
    Notification::toast(Status::Error, "Please check console")
}
