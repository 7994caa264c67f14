//! Session banner and logout
//!
//! Thin wrapper over client-local session state: render the welcome
//! banner for a logged-in user, clear the session on logout and hand back
//! the login-page navigation target.

use std::collections::HashMap;

/// Session key holding the logged-in username
pub const USERNAME_KEY: &str = "username";

/// Navigation target after logout
pub const LOGIN_PAGE: &str = "login.html";

/// Client-local session state (string key/value)
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Welcome text for the banner, or None when nobody is logged in (banner
/// hidden)
pub fn welcome_banner(store: &SessionStore) -> Option<String> {
    store
        .get(USERNAME_KEY)
        .map(|user| format!("Welcome, {}!", user))
}

/// Clear the user session and return where to navigate
pub fn logout(store: &mut SessionStore) -> &'static str {
    store.remove(USERNAME_KEY);
    LOGIN_PAGE
}
