use std::io::{self, Write};

use chrono::Utc;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::App;
use crate::notify::{Delivery, Notification, Status};
use crate::router::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    Gender,
    Age,
    Title,
    Content,
    Status,
}

impl Field {
    fn parse(raw: &str) -> Option<Field> {
        Some(match raw {
            "name" => Field::Name,
            "email" => Field::Email,
            "password" => Field::Password,
            "gender" => Field::Gender,
            "age" => Field::Age,
            "title" => Field::Title,
            "content" => Field::Content,
            "status" => Field::Status,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Go(Route),
    Set { field: Field, value: String },
    Submit,
    Refresh,
    Delete(String),
    Logout,
    Reveal,
    Dismiss(Option<u64>),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("no screen at `{0}`")]
    UnknownRoute(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("`{0}` is not a notification id")]
    BadNotificationId(String),
    #[error("status must be complete or incomplete, got `{0}`")]
    BadStatus(String),
    #[error("`{0}` is not available on {1}")]
    NotOnScreen(&'static str, Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub const HELP: &str = "\
commands:
  home | login | register | notes | create    open a screen
  go <path>                                   open the screen at <path>
  set <field> <value...>                      fill in a form field
  submit                                      send the current form
  reveal                                      show/hide the login password
  refresh                                     fetch the note list again
  delete <id>                                 delete a note
  logout                                      drop the session
  dismiss [<id>]                              close a notification
  help | quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => return Err(CommandError::Empty),
        "home" => Command::Go(Route::Home),
        "login" => Command::Go(Route::Login),
        "register" => Command::Go(Route::Register),
        "notes" => Command::Go(Route::Notes),
        "create" => Command::Go(Route::CreateNote),
        "go" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("go"));
            }
            let route =
                Route::from_path(rest).ok_or_else(|| CommandError::UnknownRoute(rest.into()))?;
            Command::Go(route)
        }
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if name.is_empty() {
                return Err(CommandError::MissingArgument("set"));
            }
            let field = Field::parse(name).ok_or_else(|| CommandError::UnknownField(name.into()))?;
            Command::Set {
                field,
                value: value.trim().to_string(),
            }
        }
        "submit" => Command::Submit,
        "refresh" => Command::Refresh,
        "delete" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("delete"));
            }
            Command::Delete(rest.to_string())
        }
        "logout" => Command::Logout,
        "reveal" => Command::Reveal,
        "dismiss" => {
            if rest.is_empty() {
                Command::Dismiss(None)
            } else {
                let id = rest
                    .parse()
                    .map_err(|_| CommandError::BadNotificationId(rest.into()))?;
                Command::Dismiss(Some(id))
            }
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.into())),
    };
    Ok(command)
}

/// Runs `command` against `app`, awaiting any request it starts.
pub async fn execute(app: &mut App, command: Command) -> Result<Flow, CommandError> {
    let route = app.route();
    match command {
        Command::Go(target) => {
            if app.navigate(target) {
                app.load_notes().await;
            }
        }
        Command::Set { field, value } => set_field(app, field, value)?,
        Command::Submit => match route {
            Route::Register => {
                app.submit_registration().await;
            }
            Route::Login => {
                app.submit_login().await;
            }
            Route::CreateNote => {
                app.submit_note().await;
            }
            _ => return Err(CommandError::NotOnScreen("submit", route)),
        },
        Command::Refresh => {
            require(route, Route::Notes, "refresh")?;
            app.load_notes().await;
        }
        Command::Delete(id) => {
            require(route, Route::Notes, "delete")?;
            app.delete_note(&id).await;
        }
        Command::Logout => {
            require(route, Route::Notes, "logout")?;
            app.logout();
        }
        Command::Reveal => {
            require(route, Route::Login, "reveal")?;
            app.login.toggle_reveal();
        }
        Command::Dismiss(id) => {
            let target = id.or_else(|| app.notifications().latest().map(|n| n.id));
            if let Some(id) = target {
                app.notifications_mut().dismiss(id);
            }
        }
        Command::Help => {}
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn require(current: Route, expected: Route, action: &'static str) -> Result<(), CommandError> {
    if current == expected {
        Ok(())
    } else {
        Err(CommandError::NotOnScreen(action, current))
    }
}

fn set_field(app: &mut App, field: Field, value: String) -> Result<(), CommandError> {
    let route = app.route();
    match (route, field) {
        (Route::Register, Field::Name) => app.register.input.name = value,
        (Route::Register, Field::Email) => app.register.input.email = value,
        (Route::Register, Field::Password) => app.register.input.password = value,
        (Route::Register, Field::Gender) => app.register.input.gender = value,
        (Route::Register, Field::Age) => app.register.input.age = value,
        (Route::Login, Field::Email) => app.login.input.email = value,
        (Route::Login, Field::Password) => app.login.input.password = value,
        (Route::CreateNote, Field::Title) => app.create_note.input.title = value,
        (Route::CreateNote, Field::Content) => app.create_note.input.content = value,
        (Route::CreateNote, Field::Status) => {
            let picked = match value.as_str() {
                "complete" | "true" => "true",
                "incomplete" | "not-complete" | "false" => "false",
                _ => return Err(CommandError::BadStatus(value)),
            };
            app.create_note.set_status(picked);
        }
        _ => return Err(CommandError::NotOnScreen("set", route)),
    }
    Ok(())
}

/// Prints the current screen and any live notifications.
pub fn render<W: Write>(out: &mut W, app: &mut App) -> io::Result<()> {
    app.notifications_mut().prune_expired(Utc::now());

    writeln!(out)?;
    writeln!(out, "== {} ==", app.route())?;

    if app.is_loading() {
        writeln!(out, "loading...")?;
    } else {
        match app.route() {
            Route::Home => {
                writeln!(out, "Your Digital Notebook")?;
                writeln!(out, "  register | login")?;
            }
            Route::Register => {
                let input = &app.register.input;
                writeln!(out, "  name:     {}", input.name)?;
                writeln!(out, "  email:    {}", input.email)?;
                writeln!(out, "  password: {}", mask(&input.password))?;
                writeln!(out, "  gender:   {}", input.gender)?;
                writeln!(out, "  age:      {}", input.age)?;
            }
            Route::Login => {
                let input = &app.login.input;
                let password = if app.login.reveal_password {
                    input.password.clone()
                } else {
                    mask(&input.password)
                };
                writeln!(out, "  email:    {}", input.email)?;
                writeln!(out, "  password: {}", password)?;
            }
            Route::Notes => {
                let notes = app.notes.notes();
                if notes.is_empty() {
                    writeln!(out, "  (no notes)")?;
                }
                for note in notes {
                    let status = if note.status { "complete" } else { "not complete" };
                    writeln!(out, "  [{}] {} ({})", note.id, note.title, status)?;
                    if !note.content.is_empty() {
                        writeln!(out, "      {}", note.content)?;
                    }
                }
                writeln!(out, "  create | delete <id> | refresh | logout")?;
            }
            Route::CreateNote => {
                let input = &app.create_note.input;
                let status = match input.status {
                    Some(true) => "complete",
                    Some(false) => "not complete",
                    None => "-",
                };
                writeln!(out, "  title:   {}", input.title)?;
                writeln!(out, "  content: {}", input.content)?;
                writeln!(out, "  status:  {}", status)?;
            }
        }
    }

    for notification in app.notifications().iter() {
        writeln!(out, "{}", describe(notification))?;
    }
    Ok(())
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn describe(notification: &Notification) -> String {
    let tag = match (notification.delivery, notification.status) {
        (Delivery::Alert, _) => "ALERT",
        (Delivery::Toast, Status::Success) => "ok",
        (Delivery::Toast, Status::Error) => "error",
        (Delivery::Toast, Status::Info) => "info",
    };
    match &notification.description {
        Some(description) => format!(
            "#{} [{}] {}: {}",
            notification.id, tag, notification.title, description
        ),
        None => format!("#{} [{}] {}", notification.id, tag, notification.title),
    }
}

/// Reads commands from stdin until EOF or `quit`.
pub async fn run(mut app: App) -> anyhow::Result<()> {
    let stdout = io::stdout();

    if app.route() == Route::Notes {
        app.load_notes().await;
    }
    render(&mut stdout.lock(), &mut app)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut out = stdout.lock();
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        if command == Command::Help {
            writeln!(out, "{}", HELP)?;
            continue;
        }
        drop(out);

        match execute(&mut app, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(stdout.lock(), "{}", e)?,
        }
        render(&mut stdout.lock(), &mut app)?;
    }
    Ok(())
}
