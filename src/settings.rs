//! Host-owned player settings with change notification.
//!
//! The store holds the current [`Settings`] and tells listeners about every value
//! that actually changes. Persistence stays with the host: [`SettingsStore::to_json`]
//! and [`SettingsStore::from_json`] convert to and from the flat key/value form.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MUSIC_ENABLED_KEY: &str = "tomino.settings.musicEnabled";
pub const SCREEN_BUTTONS_ENABLED_KEY: &str = "tomino.settings.screenButtonsEnabled";
pub const THEME_KEY: &str = "tomino.settings.theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Neon,
    Blue,
}

impl Theme {
    /// Stored integer code
    pub fn code(self) -> i64 {
        match self {
            Theme::Neon => 0,
            Theme::Blue => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Theme::Neon),
            1 => Some(Theme::Blue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub music_enabled: bool,
    pub screen_buttons_enabled: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            screen_buttons_enabled: false,
            theme: Theme::Neon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    MusicEnabled(bool),
    ScreenButtonsEnabled(bool),
    Theme(Theme),
}

pub type SettingsListener = Box<dyn FnMut(&SettingChange)>;

#[derive(Default)]
pub struct SettingsStore {
    settings: Settings,
    listeners: Vec<SettingsListener>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            listeners: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&SettingChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_music_enabled(&mut self, enabled: bool) -> bool {
        if self.settings.music_enabled == enabled {
            return false;
        }
        self.settings.music_enabled = enabled;
        self.broadcast(SettingChange::MusicEnabled(enabled));
        true
    }

    pub fn set_screen_buttons_enabled(&mut self, enabled: bool) -> bool {
        if self.settings.screen_buttons_enabled == enabled {
            return false;
        }
        self.settings.screen_buttons_enabled = enabled;
        self.broadcast(SettingChange::ScreenButtonsEnabled(enabled));
        true
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if self.settings.theme == theme {
            return false;
        }
        self.settings.theme = theme;
        self.broadcast(SettingChange::Theme(theme));
        true
    }

    /// Apply a whole settings value, notifying once per changed field
    pub fn replace(&mut self, settings: Settings) {
        self.set_music_enabled(settings.music_enabled);
        self.set_screen_buttons_enabled(settings.screen_buttons_enabled);
        self.set_theme(settings.theme);
    }

    fn broadcast(&mut self, change: SettingChange) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }

    /// Flat key/value form: booleans as 0/1, theme as its code.
    pub fn to_json(&self) -> Result<String> {
        let mut map = Map::new();
        map.insert(
            MUSIC_ENABLED_KEY.to_string(),
            Value::from(i64::from(self.settings.music_enabled)),
        );
        map.insert(
            SCREEN_BUTTONS_ENABLED_KEY.to_string(),
            Value::from(i64::from(self.settings.screen_buttons_enabled)),
        );
        map.insert(THEME_KEY.to_string(), Value::from(self.settings.theme.code()));
        serde_json::to_string(&Value::Object(map)).context("failed to serialize settings")
    }

    /// Parse the flat key/value form. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("invalid settings JSON")?;
        let Value::Object(map) = value else {
            bail!("settings JSON must be an object");
        };

        let mut settings = Settings::default();
        if let Some(flag) = read_int(&map, MUSIC_ENABLED_KEY)? {
            settings.music_enabled = flag != 0;
        }
        if let Some(flag) = read_int(&map, SCREEN_BUTTONS_ENABLED_KEY)? {
            settings.screen_buttons_enabled = flag != 0;
        }
        if let Some(code) = read_int(&map, THEME_KEY)? {
            settings.theme = Theme::from_code(code)
                .with_context(|| format!("unknown theme code {code}"))?;
        }

        Ok(Self::new(settings))
    }
}

fn read_int(map: &Map<String, Value>, key: &str) -> Result<Option<i64>> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .with_context(|| format!("{key} must be an integer")),
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
