//! Navigation seam.
//!
//! Session changes (logout, rejected credential, protected view without an
//! identity) move the user to another view. The core only names the target;
//! the front end decides what "navigating" means.

use parking_lot::Mutex;
use std::fmt;
use url::form_urlencoded;

/// A view the core can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Login view. `return_to` is where to go after a successful login,
    /// `registered` marks the redirect that follows a signup.
    Login {
        return_to: Option<String>,
        registered: bool,
    },
    Home,
}

impl Route {
    pub fn login() -> Self {
        Route::Login {
            return_to: None,
            registered: false,
        }
    }

    pub fn login_returning_to(path: impl Into<String>) -> Self {
        Route::Login {
            return_to: Some(path.into()),
            registered: false,
        }
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Route::Login { .. })
    }

    /// Path form of the route, e.g. `/login?redirect=%2Fbookmarks`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login {
                return_to,
                registered,
            } => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                if let Some(return_to) = return_to {
                    query.append_pair("redirect", return_to);
                }
                if *registered {
                    query.append_pair("registered", "true");
                }
                let query = query.finish();
                if query.is_empty() {
                    "/login".to_string()
                } else {
                    format!("/login?{query}")
                }
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only logs. Used when no front end is attached.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "Navigation requested");
    }
}

/// Navigator that remembers every request, in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }

    pub fn login_redirects(&self) -> usize {
        self.routes.lock().iter().filter(|r| r.is_login()).count()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_paths() {
        assert_eq!(Route::login().path(), "/login");
        assert_eq!(
            Route::login_returning_to("/bookmarks").path(),
            "/login?redirect=%2Fbookmarks"
        );
        let registered = Route::Login {
            return_to: None,
            registered: true,
        };
        assert_eq!(registered.to_string(), "/login?registered=true");
        assert_eq!(Route::Home.path(), "/");
    }

    #[test]
    fn test_recording_navigator_counts_logins() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(Route::login());
        navigator.navigate(Route::Home);
        navigator.navigate(Route::login_returning_to("/starred"));
        assert_eq!(navigator.login_redirects(), 2);
        assert_eq!(navigator.routes().len(), 3);
    }
}
