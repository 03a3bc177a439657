mod common;

use common::{dead_url, MockRemote, TOKEN};
use notes_frontend::notify::{Delivery, Status};
use notes_frontend::screens::{Failure, Outcome};
use notes_frontend::session::FileStorage;
use notes_frontend::structs::RegistrationInput;
use notes_frontend::{ApiClient, App, Route, SessionStore};
use tempfile::TempDir;

fn logged_in() -> SessionStore {
    let session = SessionStore::in_memory();
    session.set_token(TOKEN).unwrap();
    session
}

fn has_alert(app: &App) -> bool {
    app.notifications()
        .iter()
        .any(|n| n.delivery == Delivery::Alert)
}

fn shown_ids(app: &App) -> Vec<String> {
    app.notes.notes().iter().map(|n| n.id.clone()).collect()
}

#[tokio::test]
async fn registration_lands_on_login_without_a_session() {
    let remote = MockRemote::start().await;
    let mut app = remote.app(SessionStore::in_memory(), Route::Home);

    app.navigate(Route::Register);
    app.register.input = RegistrationInput {
        name: "Ann".into(),
        email: "a@x.com".into(),
        password: "p".into(),
        gender: "f".into(),
        age: "22".into(),
    };
    let outcome = app.submit_registration().await;

    assert_eq!(outcome, Outcome::Succeeded);
    assert_eq!(app.route(), Route::Login);
    assert_eq!(app.route().path(), "/login");
    assert!(!has_alert(&app));
    assert_eq!(app.session().get_token(), None);
}

#[tokio::test]
async fn failed_registration_alerts_and_keeps_the_form() {
    let mut app = App::new(
        ApiClient::new(&dead_url().await, SessionStore::in_memory()),
        Route::Register,
    );
    app.register.input.name = "Ann".into();

    let outcome = app.submit_registration().await;

    assert!(matches!(outcome, Outcome::Failed(Failure::Transport(_))));
    assert_eq!(app.route(), Route::Register);
    assert!(has_alert(&app));
    assert_eq!(app.register.input.name, "Ann");
    assert!(!app.is_loading());
}

#[tokio::test]
async fn login_with_token_stores_it_and_opens_notes() {
    let remote = MockRemote::start().await;
    remote.add_user("a@x.com", "p");
    remote.seed_note("n1", "first");
    let mut app = remote.app(SessionStore::in_memory(), Route::Login);

    app.login.input.email = "a@x.com".into();
    app.login.input.password = "p".into();
    let outcome = app.submit_login().await;

    assert_eq!(outcome, Outcome::Succeeded);
    assert_eq!(app.session().get_token().as_deref(), Some(TOKEN));
    assert_eq!(app.route(), Route::Notes);
    assert_eq!(shown_ids(&app), vec!["n1".to_string()]);
}

#[tokio::test]
async fn login_without_token_leaves_the_session_alone() {
    let remote = MockRemote::start().await;
    let session = SessionStore::in_memory();
    session.set_token("previous").unwrap();
    let mut app = remote.app(session, Route::Login);

    app.login.input.email = "nobody@x.com".into();
    app.login.input.password = "p".into();
    let outcome = app.submit_login().await;

    assert_eq!(outcome, Outcome::Failed(Failure::Authentication));
    assert_eq!(app.session().get_token().as_deref(), Some("previous"));
    assert_eq!(app.route(), Route::Login);
    let latest = app.notifications().latest().unwrap();
    assert_eq!(latest.status, Status::Error);
    assert_eq!(latest.delivery, Delivery::Toast);
    assert_eq!(app.login.input.email, "nobody@x.com");
}

#[tokio::test]
async fn login_network_failure_is_not_reported_as_bad_credentials() {
    let mut app = App::new(
        ApiClient::new(&dead_url().await, SessionStore::in_memory()),
        Route::Login,
    );

    let outcome = app.submit_login().await;

    assert!(matches!(outcome, Outcome::Failed(Failure::Transport(_))));
    assert_eq!(app.route(), Route::Login);
    assert_eq!(app.notifications().latest().map(|n| n.status), Some(Status::Error));
}

#[tokio::test]
async fn created_note_shows_up_on_the_list() {
    let remote = MockRemote::start().await;
    let mut app = remote.app(logged_in(), Route::Notes);
    app.load_notes().await;
    assert!(shown_ids(&app).is_empty());

    app.navigate(Route::CreateNote);
    app.create_note.input.title = "groceries".into();
    app.create_note.input.content = "milk".into();
    app.create_note.set_status("true");
    let outcome = app.submit_note().await;

    assert_eq!(outcome, Outcome::Succeeded);
    assert_eq!(app.route(), Route::Notes);
    let notes = app.notes.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "groceries");
    assert!(notes[0].status);
    assert!(!has_alert(&app));
}

#[tokio::test]
async fn failed_note_creation_alerts_and_stays() {
    let remote = MockRemote::start().await;
    remote.remote().fail_writes = true;
    let mut app = remote.app(logged_in(), Route::CreateNote);
    app.create_note.input.title = "groceries".into();

    let outcome = app.submit_note().await;

    assert!(matches!(outcome, Outcome::Failed(Failure::Transport(_))));
    assert_eq!(app.route(), Route::CreateNote);
    assert!(has_alert(&app));
    assert_eq!(app.create_note.input.title, "groceries");
}

#[tokio::test]
async fn delete_refetches_and_drops_exactly_that_note() {
    let remote = MockRemote::start().await;
    remote.seed_note("n1", "first");
    remote.seed_note("n2", "second");
    let mut app = remote.app(logged_in(), Route::Notes);
    app.load_notes().await;
    assert_eq!(shown_ids(&app), vec!["n1".to_string(), "n2".to_string()]);

    let outcome = app.delete_note("n1").await;

    assert_eq!(outcome, Outcome::Succeeded);
    assert_eq!(shown_ids(&app), vec!["n2".to_string()]);
    assert_eq!(shown_ids(&app), remote.note_ids());
    assert!(!app.is_loading());
    // One listing before the delete, the delete, and the refetch.
    assert_eq!(remote.remote().auth_headers.len(), 3);
}

#[tokio::test]
async fn failed_delete_keeps_the_list() {
    let remote = MockRemote::start().await;
    remote.seed_note("n1", "first");
    let mut app = remote.app(logged_in(), Route::Notes);
    app.load_notes().await;

    let outcome = app.delete_note("ghost").await;

    assert!(matches!(outcome, Outcome::Failed(Failure::Transport(_))));
    assert_eq!(shown_ids(&app), vec!["n1".to_string()]);
    assert_eq!(app.notifications().latest().map(|n| n.status), Some(Status::Error));
    assert!(!app.is_loading());
}

#[tokio::test]
async fn list_failure_without_session_is_a_plain_fetch_failure() {
    let remote = MockRemote::start().await;
    remote.seed_note("n1", "first");
    let mut app = remote.app(SessionStore::in_memory(), Route::Notes);

    let outcome = app.load_notes().await;

    assert!(matches!(outcome, Outcome::Failed(Failure::Transport(_))));
    assert!(shown_ids(&app).is_empty());
    assert_eq!(app.route(), Route::Notes);
}

#[tokio::test]
async fn logout_clears_the_token_even_when_offline() {
    let mut app = App::new(ApiClient::new(&dead_url().await, logged_in()), Route::Notes);
    app.load_notes().await;

    app.logout();

    assert_eq!(app.session().get_token(), None);
    assert_eq!(app.route(), Route::Login);
}

#[tokio::test]
async fn session_file_carries_login_across_restarts() {
    let remote = MockRemote::start().await;
    remote.add_user("a@x.com", "p");
    remote.seed_note("n1", "first");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    {
        let mut app = remote.app(SessionStore::new(FileStorage::new(&path)), Route::Login);
        app.login.input.email = "a@x.com".into();
        app.login.input.password = "p".into();
        assert_eq!(app.submit_login().await, Outcome::Succeeded);
    }

    let mut reopened = remote.app(SessionStore::new(FileStorage::new(&path)), Route::Notes);
    assert_eq!(reopened.load_notes().await, Outcome::Succeeded);
    assert_eq!(shown_ids(&reopened), vec!["n1".to_string()]);

    reopened.navigate(Route::Notes);
    reopened.logout();
    assert_eq!(
        SessionStore::new(FileStorage::new(&path)).get_token(),
        None
    );
}

#[tokio::test]
async fn login_recovers_from_an_unreadable_session_file() {
    let remote = MockRemote::start().await;
    remote.add_user("a@x.com", "p");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"token": 42}"#).unwrap();

    let mut app = remote.app(SessionStore::new(FileStorage::new(&path)), Route::Login);
    app.login.input.email = "a@x.com".into();
    app.login.input.password = "p".into();

    assert_eq!(app.submit_login().await, Outcome::Succeeded);
    assert_eq!(app.route(), Route::Notes);
    assert_eq!(
        SessionStore::new(FileStorage::new(&path)).get_token().as_deref(),
        Some(TOKEN)
    );
}
