use serde::{Deserialize, Deserializer, Serialize};

/// A note as the remote service reports it. The client never edits one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Note {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub status: bool,
}

pub type NoteVector = Vec<Note>;

#[derive(Deserialize, Debug)]
pub struct NoteList {
    pub notes: NoteVector,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub age: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Form state of the note creation screen. `status` stays `None` (sent as
/// `null`) until the user picks one.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub status: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Server acknowledgement of a write. The message is whatever the service
/// put in `msg` or `message`, if anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ack {
    pub message: Option<String>,
}

impl Ack {
    pub fn from_body(body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("msg")
                    .or_else(|| value.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            });
        Ack { message }
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
