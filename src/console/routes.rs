use crate::navigation::{HOME_PATH, LOGIN_PATH};

/// Views the console can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Article,
    Publish,
    Login,
}

const ROUTES: &[(&str, Route)] = &[
    (HOME_PATH, Route::Home),
    ("/article", Route::Article),
    ("/publish", Route::Publish),
    (LOGIN_PATH, Route::Login),
];

impl Route {
    /// Resolves a location, ignoring any query string, fragment or trailing slash.
    #[must_use]
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => HOME_PATH,
            trimmed => trimmed,
        };

        ROUTES
            .iter()
            .find(|(candidate, _)| *candidate == path)
            .map(|(_, route)| *route)
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, route)| *route == self)
            .map_or(HOME_PATH, |(path, _)| path)
    }

    /// Everything but the login view sits behind the route guard.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }
}
