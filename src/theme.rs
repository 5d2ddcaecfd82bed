use crate::env::SharedEnv;
use crate::i18n::t;
use std::str::FromStr;
use tracing::debug;

pub const THEME_KEY: &str = "bm_theme";
pub const MODE_ATTR: &str = "data-theme-mode";
pub const EFFECTIVE_ATTR: &str = "data-theme";

/// User-facing tri-state preference. Auto defers to the OS color scheme.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }

    /// Click order: light, dark, auto, back to light.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Auto,
            ThemeMode::Auto => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            _ => Err(()),
        }
    }
}

/// Absent or unrecognized stored values read as auto.
pub fn parse_mode(raw: Option<&str>) -> ThemeMode {
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
}

/// The binary value actually applied to styling; never "auto".
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl EffectiveTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectiveTheme::Light => "light",
            EffectiveTheme::Dark => "dark",
        }
    }
}

pub struct ThemeController {
    env: SharedEnv,
    label_locale: String,
}

impl ThemeController {
    pub fn new(env: SharedEnv, label_locale: &str) -> Self {
        Self {
            env,
            label_locale: label_locale.to_string(),
        }
    }

    /// The logical mode lives in the root attribute, so it survives between
    /// events without any module-level state.
    pub fn current_mode(&self) -> ThemeMode {
        parse_mode(self.env.root_attr(MODE_ATTR).as_deref())
    }

    pub fn resolve(&self, mode: ThemeMode) -> EffectiveTheme {
        match mode {
            ThemeMode::Light => EffectiveTheme::Light,
            ThemeMode::Dark => EffectiveTheme::Dark,
            // Media queries unavailable reads as a light preference.
            ThemeMode::Auto => {
                if self.env.prefers_dark().unwrap_or(false) {
                    EffectiveTheme::Dark
                } else {
                    EffectiveTheme::Light
                }
            }
        }
    }

    pub fn apply(&self, mode: ThemeMode) {
        self.env.set_root_attr(MODE_ATTR, mode.as_str());
        self.env
            .set_root_attr(EFFECTIVE_ATTR, self.resolve(mode).as_str());
        self.env.set_theme_toggle_label(&self.label(mode));
    }

    pub fn cycle(&self) {
        let next = self.current_mode().next();
        if !self.env.storage_set(THEME_KEY, next.as_str()) {
            debug!(mode = next.as_str(), "storage unavailable, theme not persisted");
        }
        self.apply(next);
    }

    /// OS color-scheme flips only re-resolve while the mode is auto; manual
    /// light/dark selections stay put.
    pub fn on_system_change(&self) {
        if self.current_mode() == ThemeMode::Auto {
            self.apply(ThemeMode::Auto);
        }
    }

    fn label(&self, mode: ThemeMode) -> String {
        let locale = self.label_locale.as_str();
        match mode {
            ThemeMode::Light => t!("theme.light", locale = locale),
            ThemeMode::Dark => t!("theme.dark", locale = locale),
            ThemeMode::Auto => t!("theme.auto", locale = locale),
        }
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_invalid_modes_read_as_auto() {
        assert_eq!(parse_mode(None), ThemeMode::Auto);
        assert_eq!(parse_mode(Some("purple")), ThemeMode::Auto);
        assert_eq!(parse_mode(Some("")), ThemeMode::Auto);
        assert_eq!(parse_mode(Some("dark")), ThemeMode::Dark);
    }

    #[test]
    fn cycle_visits_every_mode_and_wraps() {
        let mut mode = ThemeMode::Light;
        let mut seen = Vec::new();
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![ThemeMode::Dark, ThemeMode::Auto, ThemeMode::Light]
        );
    }
}
