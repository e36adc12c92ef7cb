//! Layout and theme preferences, persisted in client storage.

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key for the layout preference.
pub const LAYOUT_VIEW_STORAGE_KEY: &str = "layoutView";

/// Storage key for the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// How the wine list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutView {
    #[default]
    Grid,
    List,
}

impl LayoutView {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "grid" => Some(Self::Grid),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// Color theme. `System` defers to the platform preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// UI preference state. Unknown persisted values fall back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiPreferences {
    pub layout_view: LayoutView,
    pub theme: Theme,
}

impl UiPreferences {
    /// Load preferences from storage.
    #[must_use]
    pub fn load<S: KeyValueStorage>(storage: &S) -> Self {
        Self {
            layout_view: storage
                .get(LAYOUT_VIEW_STORAGE_KEY)
                .and_then(|raw| LayoutView::parse(&raw))
                .unwrap_or_default(),
            theme: storage
                .get(THEME_STORAGE_KEY)
                .and_then(|raw| Theme::parse(&raw))
                .unwrap_or_default(),
        }
    }

    /// Change and persist the layout preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when persisting fails; the in-memory value
    /// is updated regardless.
    pub fn set_layout_view<S: KeyValueStorage>(
        &mut self,
        storage: &mut S,
        view: LayoutView,
    ) -> Result<(), StorageError> {
        self.layout_view = view;
        storage.set(LAYOUT_VIEW_STORAGE_KEY, view.as_str())
    }

    /// Change and persist the theme preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when persisting fails; the in-memory value
    /// is updated regardless.
    pub fn set_theme<S: KeyValueStorage>(
        &mut self,
        storage: &mut S,
        theme: Theme,
    ) -> Result<(), StorageError> {
        self.theme = theme;
        storage.set(THEME_STORAGE_KEY, theme.as_str())
    }
}
