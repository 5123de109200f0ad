use serde::{Deserialize, Serialize};

use crate::store::Reducer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone)]
pub enum ThemeAction {
    SetMode(ThemeMode),
    /// Flip between light and dark. From `System` this goes to dark.
    Toggle,
    /// Set the accent color; anything but `#rrggbb` is ignored.
    SetAccent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
    pub accent: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::System,
            accent: "#1a1a1a".to_string(),
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl Reducer for Theme {
    type Action = ThemeAction;

    const NAME: &'static str = "theme";

    fn reduce(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        match action {
            ThemeAction::SetMode(mode) => next.mode = *mode,
            ThemeAction::Toggle => {
                next.mode = match self.mode {
                    ThemeMode::Dark => ThemeMode::Light,
                    ThemeMode::Light | ThemeMode::System => ThemeMode::Dark,
                }
            }
            ThemeAction::SetAccent(accent) => {
                let accent = accent.trim();
                if is_hex_color(accent) {
                    next.accent = accent.to_ascii_lowercase();
                }
            }
        }
        next
    }
}
