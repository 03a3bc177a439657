use std::fmt;

use log::info;

/// The five screens, one per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Notes,
    CreateNote,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Notes,
        Route::CreateNote,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Notes => "/notes",
            Route::CreateNote => "/create-note",
        }
    }

    /// Exact path match; a single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        let normalized = if normalized.is_empty() { "/" } else { normalized };
        Route::ALL.iter().copied().find(|r| r.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Current screen. Navigation is explicit; nothing here guards a route.
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self { current: start }
    }

    /// Starts at `path`, or at Home when the path names no screen.
    pub fn from_path(path: &str) -> Self {
        Self::new(Route::from_path(path).unwrap_or(Route::Home))
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, route: Route) {
        info!("Navigating {} -> {}", self.current, route);
        self.current = route;
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}
