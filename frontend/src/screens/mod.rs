// Screens never talk to the network. `begin_*` hands back what to send and
// `finish_*` turns the result into a `Transition` for the app to apply.

pub mod create_note;
pub mod login;
pub mod notes;
pub mod register;

use std::fmt;

use crate::notify::Notification;
use crate::router::Route;

pub use create_note::CreateNoteScreen;
pub use login::LoginScreen;
pub use notes::NotesScreen;
pub use register::RegisterScreen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Unreachable server, non-2xx reply or undecodable body.
    Transport(String),
    /// Login reached the server but no token came back.
    Authentication,
    /// The session token could not be written.
    Storage(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Transport(reason) => write!(f, "network error: {}", reason),
            Failure::Authentication => f.write_str("login failed"),
            Failure::Storage(reason) => write!(f, "could not store session: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded,
    Failed(Failure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// What the app does once a screen action settles.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub outcome: Outcome,
    pub navigate: Option<Route>,
    pub notification: Option<Notification>,
    /// The note list must be fetched again.
    pub reload: bool,
}

impl Transition {
    pub fn succeeded() -> Self {
        Self {
            outcome: Outcome::Succeeded,
            navigate: None,
            notification: None,
            reload: false,
        }
    }

    pub fn failed(failure: Failure) -> Self {
        Self {
            outcome: Outcome::Failed(failure),
            ..Self::succeeded()
        }
    }

    pub fn navigate(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    pub fn reload(mut self) -> Self {
        self.reload = true;
        self
    }
}
