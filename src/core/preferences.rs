use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Small key-value boundary for client-local state. The browser build
/// persists these in local storage; the in-process implementation backs
/// tests and local runs.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory preference store
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("preference lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("preference lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

/// Display theme, persisted independently for the admin and freelancer views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Invalid theme: {}", s)),
        }
    }
}

/// The two independently themed views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeScope {
    Admin,
    Freelancer,
}

impl ThemeScope {
    fn key(&self) -> &'static str {
        match self {
            ThemeScope::Admin => "admin.theme",
            ThemeScope::Freelancer => "freelancer.theme",
        }
    }
}

impl std::str::FromStr for ThemeScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "admin" => Ok(ThemeScope::Admin),
            "freelancer" => Ok(ThemeScope::Freelancer),
            _ => Err(format!("Invalid theme scope: {}", s)),
        }
    }
}

/// Theme persistence over a preference store, one key per view
#[derive(Clone)]
pub struct ThemeService {
    store: Arc<dyn PreferenceStore>,
}

impl ThemeService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn theme(&self, scope: ThemeScope) -> Theme {
        self.store
            .get(scope.key())
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, scope: ThemeScope, theme: Theme) -> Result<()> {
        self.store.set(scope.key(), &theme.to_string());
        Ok(())
    }
}

impl fmt::Debug for ThemeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeService").finish_non_exhaustive()
    }
}
