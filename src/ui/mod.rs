//! Dashboard chrome state: sidebar and theme, persisted as two flags

mod debounce;
mod prefs;

pub(crate) use debounce::{DEBOUNCE_QUIET_MS, Debouncer};
pub(crate) use prefs::{JsonFileStore, MemoryStore, PreferenceStore, PrefsError};

use tracing::debug;

/// Storage keys, shared with the page script's `localStorage`
pub(crate) const SIDEBAR_COLLAPSED_KEY: &str = "sidebar-collapsed";
pub(crate) const DARK_MODE_KEY: &str = "dark-mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Sidebar {
    #[default]
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiEvent {
    ToggleSidebar,
    ToggleTheme,
    SetTheme(Theme),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct UiState {
    pub(crate) sidebar: Sidebar,
    pub(crate) theme: Theme,
}

fn flag(store: &dyn PreferenceStore, key: &str) -> bool {
    store.get(key).as_deref() == Some("true")
}

impl UiState {
    /// Pure transition
    pub(crate) fn apply(self, event: UiEvent) -> Self {
        match event {
            UiEvent::ToggleSidebar => Self {
                sidebar: match self.sidebar {
                    Sidebar::Expanded => Sidebar::Collapsed,
                    Sidebar::Collapsed => Sidebar::Expanded,
                },
                ..self
            },
            UiEvent::ToggleTheme => Self {
                theme: match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                },
                ..self
            },
            UiEvent::SetTheme(theme) => Self { theme, ..self },
        }
    }

    pub(crate) fn sidebar_collapsed(&self) -> bool {
        self.sidebar == Sidebar::Collapsed
    }

    pub(crate) fn dark_mode(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Read both flags; anything but `"true"` counts as off
    pub(crate) fn load(store: &dyn PreferenceStore) -> Self {
        let state = Self {
            sidebar: if flag(store, SIDEBAR_COLLAPSED_KEY) {
                Sidebar::Collapsed
            } else {
                Sidebar::Expanded
            },
            theme: if flag(store, DARK_MODE_KEY) {
                Theme::Dark
            } else {
                Theme::Light
            },
        };
        debug!(?state, "ui preferences loaded");
        state
    }

    pub(crate) fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), PrefsError> {
        store.set(SIDEBAR_COLLAPSED_KEY, &self.sidebar_collapsed().to_string())?;
        store.set(DARK_MODE_KEY, &self.dark_mode().to_string())?;
        Ok(())
    }

    /// Body classes the page renders for this state
    pub(crate) fn body_class(&self) -> String {
        let mut classes = Vec::new();
        if self.sidebar_collapsed() {
            classes.push("sidebar-collapsed");
        }
        if self.dark_mode() {
            classes.push("dark-mode");
        }
        classes.join(" ")
    }
}
