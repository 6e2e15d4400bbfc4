use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const LOGGED_IN_KEY: &str = "isLoggedIn";
pub const BOOKING_REDIRECT_KEY: &str = "bookingRedirect";
pub const LOGIN_PATH: &str = "/auth/login";
pub const HOME_PATH: &str = "/";

/// What booking needs to know about whoever is at the keyboard.
pub trait AuthGate {
    fn is_authenticated(&self) -> bool;

    /// Where to send the user back to after they sign in.
    fn remember_redirect(&mut self, path: &str);
}

/// Client-local key/value flags. Nothing here is verified by a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSession {
    items: BTreeMap<String, String>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    pub fn remove_item(&mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_item(LOGGED_IN_KEY) == Some("true")
    }

    /// Sets the flag and returns the page to land on, consuming any pending redirect.
    pub fn log_in(&mut self) -> String {
        self.set_item(LOGGED_IN_KEY, "true");
        self.remove_item(BOOKING_REDIRECT_KEY)
            .filter(|path| is_local_path(path))
            .unwrap_or_else(|| HOME_PATH.to_string())
    }

    pub fn log_out(&mut self) {
        self.remove_item(LOGGED_IN_KEY);
    }

    pub fn pending_redirect(&self) -> Option<&str> {
        self.get_item(BOOKING_REDIRECT_KEY)
    }
}

impl AuthGate for ClientSession {
    fn is_authenticated(&self) -> bool {
        self.is_logged_in()
    }

    fn remember_redirect(&mut self, path: &str) {
        self.set_item(BOOKING_REDIRECT_KEY, path);
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}
