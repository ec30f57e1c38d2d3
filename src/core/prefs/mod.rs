//! User Preferences
//!
//! The theme preference lives in its own keyed store entry, independent of
//! the bookmarks entry, so the theme widget and the bookmark repository never
//! contend on the same persisted value.

use serde::{Deserialize, Serialize};

use crate::core::storage::KeyedStore;
use crate::core::CoreResult;

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// UI theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Loads the persisted theme, defaulting to dark.
pub fn load_theme(store: &KeyedStore) -> Theme {
    store.read(THEME_KEY, Theme::default())
}

/// Persists the theme preference.
pub fn save_theme(store: &KeyedStore, theme: Theme) -> CoreResult<()> {
    store.write(THEME_KEY, &theme)
}
