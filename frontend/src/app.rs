use crate::api::ApiClient;
use crate::notify::Notifications;
use crate::router::{Route, Router};
use crate::screens::{
    CreateNoteScreen, LoginScreen, NotesScreen, Outcome, RegisterScreen, Transition,
};
use crate::session::SessionStore;

pub struct App {
    api: ApiClient,
    router: Router,
    notifications: Notifications,
    pub register: RegisterScreen,
    pub login: LoginScreen,
    pub notes: NotesScreen,
    pub create_note: CreateNoteScreen,
}

impl App {
    pub fn new(api: ApiClient, start: Route) -> Self {
        Self {
            api,
            router: Router::new(start),
            notifications: Notifications::default(),
            register: RegisterScreen::default(),
            login: LoginScreen::default(),
            notes: NotesScreen::default(),
            create_note: CreateNoteScreen::default(),
        }
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn is_loading(&self) -> bool {
        match self.route() {
            Route::Home => false,
            Route::Login => self.login.is_loading(),
            Route::Register => self.register.is_loading(),
            Route::Notes => self.notes.is_loading(),
            Route::CreateNote => self.create_note.is_loading(),
        }
    }

    /// Opens `route` with fresh form state. Returns `true` when the note
    /// list has to be fetched for the new page.
    pub fn navigate(&mut self, route: Route) -> bool {
        self.router.navigate(route);
        match route {
            Route::Home => false,
            Route::Login => {
                self.login = LoginScreen::default();
                false
            }
            Route::Register => {
                self.register = RegisterScreen::default();
                false
            }
            Route::CreateNote => {
                self.create_note = CreateNoteScreen::default();
                false
            }
            Route::Notes => {
                self.notes = NotesScreen::default();
                true
            }
        }
    }

    /// Follows a location change made outside the app, such as the browser's
    /// back button. Unknown paths land on Home. Returns `true` when the note
    /// list has to be fetched.
    pub fn follow_path(&mut self, path: &str) -> bool {
        let route = Route::from_path(path).unwrap_or(Route::Home);
        if route == self.route() {
            return false;
        }
        self.navigate(route)
    }

    /// Shows the transition's notification and follows its navigation.
    /// Returns `true` when a note list fetch is due.
    pub fn apply(&mut self, transition: Transition) -> bool {
        if let Some(notification) = transition.notification {
            self.notifications.push(notification);
        }
        let mut load = transition.reload;
        if let Some(route) = transition.navigate {
            load |= self.navigate(route);
        }
        load
    }

    pub fn logout(&mut self) {
        let transition = self.notes.logout(self.api.session());
        self.apply(transition);
    }

    pub async fn submit_registration(&mut self) -> Outcome {
        let input = self.register.begin_submit();
        let result = self.api.register(&input).await;
        let transition = self.register.finish_submit(result);
        self.settle(transition).await
    }

    pub async fn submit_login(&mut self) -> Outcome {
        let input = self.login.begin_submit();
        let result = self.api.login(&input).await;
        let transition = self.login.finish_submit(result, self.api.session());
        self.settle(transition).await
    }

    pub async fn submit_note(&mut self) -> Outcome {
        let input = self.create_note.begin_submit();
        let result = self.api.create_note(&input).await;
        let transition = self.create_note.finish_submit(result);
        self.settle(transition).await
    }

    pub async fn load_notes(&mut self) -> Outcome {
        self.notes.begin_load();
        let result = self.api.list_notes().await;
        let transition = self.notes.finish_load(result);
        let outcome = transition.outcome.clone();
        self.apply(transition);
        outcome
    }

    pub async fn delete_note(&mut self, id: &str) -> Outcome {
        let id = self.notes.begin_delete(id);
        let result = self.api.delete_note(&id).await;
        let transition = self.notes.finish_delete(result);
        self.settle(transition).await
    }

    /// Applies `transition`, runs the fetch it asks for, and reports the
    /// outcome of the original action.
    async fn settle(&mut self, transition: Transition) -> Outcome {
        let outcome = transition.outcome.clone();
        if self.apply(transition) {
            self.load_notes().await;
        }
        outcome
    }
}
