use std::time::Duration;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;
use yew::services::interval::{IntervalService, IntervalTask};

use crate::api::{ApiClient, LoginOutcome};
use crate::app::App;
use crate::config::Config;
use crate::error::ApiError;
use crate::notify::{Delivery, Notification, Status};
use crate::router::{Route, Router};
use crate::session::{LocalStorage, SessionStore};
use crate::structs::{Ack, Note};

pub enum FormField {
    Name,
    Email,
    Password,
    Gender,
    Age,
    Title,
    Content,
    Status,
}

pub enum Msg {
    Navigate(Route),
    // Back/forward: the address bar already moved.
    PathChanged(String),
    Input(FormField, String),
    ToggleReveal,

    SubmitRegistration,
    RegistrationDone(Result<Ack, ApiError>),
    SubmitLogin,
    LoginDone(Result<LoginOutcome, ApiError>),
    SubmitNote,
    NoteDone(Result<Ack, ApiError>),

    LoadNotes,
    NotesLoaded(Result<Vec<Note>, ApiError>),
    Delete(String),
    Deleted(Result<Ack, ApiError>),
    Logout,

    Dismiss(u64),
    Tick,
}

pub struct Model {
    link: ComponentLink<Self>,
    app: App,
    _ticker: IntervalTask,
    popstate: Option<Closure<dyn FnMut()>>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_props: Self::Properties, link: ComponentLink<Self>) -> Self {
        let session = match LocalStorage::open() {
            Ok(storage) => SessionStore::new(storage),
            Err(e) => {
                warn!("Local storage unavailable, session will not survive a reload: {}", e);
                SessionStore::in_memory()
            }
        };
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Falling back to default config: {}", e);
            Config::default()
        });

        let start = Router::from_path(&current_path()).current();
        let app = App::new(ApiClient::new(&config.api_base_url, session), start);
        if app.route() == Route::Notes {
            link.send_message(Msg::LoadNotes);
        }

        let ticker = IntervalService::spawn(Duration::from_secs(1), link.callback(|_| Msg::Tick));
        let popstate = listen_popstate(link.callback(Msg::PathChanged));

        Self {
            link,
            app,
            _ticker: ticker,
            popstate,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::Navigate(route) => {
                if self.app.navigate(route) {
                    self.link.send_message(Msg::LoadNotes);
                }
                push_path(route);
            }
            Msg::PathChanged(path) => {
                let before = self.app.route();
                if self.app.follow_path(&path) {
                    self.link.send_message(Msg::LoadNotes);
                }
                return self.app.route() != before;
            }
            Msg::Input(field, value) => self.set_field(field, value),
            Msg::ToggleReveal => self.app.login.toggle_reveal(),

            Msg::SubmitRegistration => {
                let input = self.app.register.begin_submit();
                let api = self.app.api().clone();
                self.link
                    .send_future(async move { Msg::RegistrationDone(api.register(&input).await) });
            }
            Msg::RegistrationDone(result) => {
                let transition = self.app.register.finish_submit(result);
                self.settle(transition);
            }
            Msg::SubmitLogin => {
                let input = self.app.login.begin_submit();
                let api = self.app.api().clone();
                self.link
                    .send_future(async move { Msg::LoginDone(api.login(&input).await) });
            }
            Msg::LoginDone(result) => {
                let session = self.app.session().clone();
                let transition = self.app.login.finish_submit(result, &session);
                self.settle(transition);
            }
            Msg::SubmitNote => {
                let input = self.app.create_note.begin_submit();
                let api = self.app.api().clone();
                self.link
                    .send_future(async move { Msg::NoteDone(api.create_note(&input).await) });
            }
            Msg::NoteDone(result) => {
                let transition = self.app.create_note.finish_submit(result);
                self.settle(transition);
            }

            Msg::LoadNotes => {
                self.app.notes.begin_load();
                let api = self.app.api().clone();
                self.link
                    .send_future(async move { Msg::NotesLoaded(api.list_notes().await) });
            }
            Msg::NotesLoaded(result) => {
                let transition = self.app.notes.finish_load(result);
                self.app.apply(transition);
            }
            Msg::Delete(id) => {
                let id = self.app.notes.begin_delete(&id);
                let api = self.app.api().clone();
                self.link
                    .send_future(async move { Msg::Deleted(api.delete_note(&id).await) });
            }
            Msg::Deleted(result) => {
                let transition = self.app.notes.finish_delete(result);
                self.settle(transition);
            }
            Msg::Logout => {
                self.app.logout();
                push_path(self.app.route());
            }

            Msg::Dismiss(id) => {
                return self.app.notifications_mut().dismiss(id);
            }
            Msg::Tick => {
                let before = self.app.notifications().len();
                self.app.notifications_mut().prune_expired(chrono::Utc::now());
                return self.app.notifications().len() != before;
            }
        }
        true
    }

    fn change(&mut self, _props: Self::Properties) -> ShouldRender {
        false
    }

    fn destroy(&mut self) {
        if let (Some(window), Some(closure)) = (web_sys::window(), self.popstate.take()) {
            if let Err(e) = window
                .remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            {
                warn!("Could not stop listening for history changes: {:?}", e);
            }
        }
    }

    fn view(&self) -> Html {
        html! {
            <div>
                <div class="notifications">{ self.view_notifications() }</div>
                <div class="screen">{ self.view_screen() }</div>
            </div>
        }
    }
}

impl Model {
    fn settle(&mut self, transition: crate::screens::Transition) {
        let before = self.app.route();
        if self.app.apply(transition) {
            self.link.send_message(Msg::LoadNotes);
        }
        if self.app.route() != before {
            push_path(self.app.route());
        }
    }

    fn set_field(&mut self, field: FormField, value: String) {
        match self.app.route() {
            Route::Register => {
                let input = &mut self.app.register.input;
                match field {
                    FormField::Name => input.name = value,
                    FormField::Email => input.email = value,
                    FormField::Password => input.password = value,
                    FormField::Gender => input.gender = value,
                    FormField::Age => input.age = value,
                    _ => {}
                }
            }
            Route::Login => {
                let input = &mut self.app.login.input;
                match field {
                    FormField::Email => input.email = value,
                    FormField::Password => input.password = value,
                    _ => {}
                }
            }
            Route::CreateNote => match field {
                FormField::Title => self.app.create_note.input.title = value,
                FormField::Content => self.app.create_note.input.content = value,
                FormField::Status => self.app.create_note.set_status(&value),
                _ => {}
            },
            Route::Home | Route::Notes => {}
        }
    }

    fn view_notifications(&self) -> Html {
        let items = self.app.notifications().iter().map(|n| self.view_notification(n));
        html! {
            <>
                { for items }
            </>
        }
    }

    fn view_notification(&self, notification: &Notification) -> Html {
        let class = match (notification.delivery, notification.status) {
            (Delivery::Alert, _) => "alert",
            (Delivery::Toast, Status::Success) => "toast success",
            (Delivery::Toast, Status::Error) => "toast error",
            (Delivery::Toast, Status::Info) => "toast info",
        };
        let id = notification.id;
        let description = notification.description.clone().unwrap_or_default();
        html! {
            <div class=class>
                <b>{ &notification.title }</b>
                <div>{ description }</div>
                <button onclick=self.link.callback(move |_| Msg::Dismiss(id))>{ "x" }</button>
            </div>
        }
    }

    fn view_screen(&self) -> Html {
        if self.app.is_loading() {
            return html! { <div class="loading">{ "Loading..." }</div> };
        }
        match self.app.route() {
            Route::Home => self.view_home(),
            Route::Register => self.view_register(),
            Route::Login => self.view_login(),
            Route::Notes => self.view_notes(),
            Route::CreateNote => self.view_create_note(),
        }
    }

    fn view_home(&self) -> Html {
        html! {
            <div class="home">
                <h1>{ "Your Digital Notebook" }</h1>
                <button onclick=self.link.callback(|_| Msg::Navigate(Route::Register))>{ "Register" }</button>
                <button onclick=self.link.callback(|_| Msg::Navigate(Route::Login))>{ "Login" }</button>
            </div>
        }
    }

    fn text_input(&self, placeholder: &str, value: &str, field: fn() -> FormField) -> Html {
        html! {
            <input
                placeholder=placeholder.to_string()
                value=value.to_string()
                oninput=self.link.callback(move |e: InputData| Msg::Input(field(), e.value)) />
        }
    }

    fn view_register(&self) -> Html {
        let input = &self.app.register.input;
        html! {
            <div class="form">
                <h2>{ "Hi! Register Here" }</h2>
                { self.text_input("Enter Your Name", &input.name, || FormField::Name) }
                { self.text_input("Enter Your Email", &input.email, || FormField::Email) }
                <input type="password"
                    placeholder="Enter password"
                    value=input.password.clone()
                    oninput=self.link.callback(|e: InputData| Msg::Input(FormField::Password, e.value)) />
                { self.text_input("Enter Gender", &input.gender, || FormField::Gender) }
                <input type="number" min="10" max="50"
                    placeholder="Age"
                    value=input.age.clone()
                    oninput=self.link.callback(|e: InputData| Msg::Input(FormField::Age, e.value)) />
                <button onclick=self.link.callback(|_| Msg::SubmitRegistration)>{ "Submit" }</button>
            </div>
        }
    }

    fn view_login(&self) -> Html {
        let screen = &self.app.login;
        let kind = if screen.reveal_password { "text" } else { "password" };
        let toggle = if screen.reveal_password { "Hide" } else { "Show" };
        html! {
            <div class="form">
                <h4>{ "Login Here" }</h4>
                { self.text_input("Enter Email", &screen.input.email, || FormField::Email) }
                <input type=kind
                    placeholder="Enter Password"
                    value=screen.input.password.clone()
                    oninput=self.link.callback(|e: InputData| Msg::Input(FormField::Password, e.value)) />
                <button onclick=self.link.callback(|_| Msg::ToggleReveal)>{ toggle }</button>
                <button onclick=self.link.callback(|_| Msg::SubmitLogin)>{ "Submit" }</button>
            </div>
        }
    }

    fn view_notes(&self) -> Html {
        let notes = self.app.notes.notes().iter().map(|note| {
            let id = note.id.clone();
            html! {
                <div class="note">
                    <b>{ &note.title }</b>
                    <div>{ &note.content }</div>
                    <button onclick=self.link.callback(move |_| Msg::Delete(id.clone()))>
                        { "Delete the note" }
                    </button>
                </div>
            }
        });
        html! {
            <div class="notes">
                <h3>{ "Notes" }</h3>
                <button onclick=self.link.callback(|_| Msg::Navigate(Route::CreateNote))>{ "Create Note" }</button>
                <button onclick=self.link.callback(|_| Msg::Logout)>{ "LOGOUT" }</button>
                <div class="grid">{ for notes }</div>
            </div>
        }
    }

    fn view_create_note(&self) -> Html {
        let input = &self.app.create_note.input;
        let selected = match input.status {
            Some(true) => "true",
            Some(false) => "false",
            None => "",
        };
        html! {
            <div class="form">
                <h2>{ "New note" }</h2>
                { self.text_input("Enter title", &input.title, || FormField::Title) }
                { self.text_input("Enter Content", &input.content, || FormField::Content) }
                <select
                    value=selected.to_string()
                    onchange=self.link.callback(|e: ChangeData| match e {
                        ChangeData::Select(select) => Msg::Input(FormField::Status, select.value()),
                        _ => Msg::Input(FormField::Status, String::new()),
                    })>
                    <option value="">{ "Select Status" }</option>
                    <option value="true">{ "Complete" }</option>
                    <option value="false">{ "Not Complete" }</option>
                </select>
                <button onclick=self.link.callback(|_| Msg::SubmitNote)>{ "Submit" }</button>
            </div>
        }
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn listen_popstate(on_change: Callback<String>) -> Option<Closure<dyn FnMut()>> {
    let window = web_sys::window()?;
    let closure =
        Closure::wrap(Box::new(move || on_change.emit(current_path())) as Box<dyn FnMut()>);
    if let Err(e) =
        window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
    {
        warn!("Could not listen for history changes: {:?}", e);
        return None;
    }
    Some(closure)
}

/// Keeps the address bar in step with the screen so a reload lands on it.
fn push_path(route: Route) {
    let history = web_sys::window().and_then(|w| w.history().ok());
    if let Some(history) = history {
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(route.path())) {
            warn!("Could not update location to {}: {:?}", route, e);
        }
    }
}
