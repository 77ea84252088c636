//! Light/dark theme flag.

use std::fmt;
use std::str::FromStr;

/// Preference key under which the theme is persisted.
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Visual theme of the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Value stored under [`THEME_PREFERENCE_KEY`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(mode.toggled().toggled(), mode);
            assert_ne!(mode.toggled(), mode);
        }
    }

    #[test]
    fn test_stored_value_round_trip() {
        assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(" Light ".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert_eq!(ThemeMode::Dark.as_str().parse(), Ok(ThemeMode::Dark));
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
