//! UI theme and icon selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Icon shown next to script results on light themes.
pub const SCRIPT_ICON_LIGHT: &str = "Images/Script.light.png";
/// Icon shown next to script results on dark themes.
pub const SCRIPT_ICON_DARK: &str = "Images/Script.dark.png";
/// Icon for the "open config file" result on light themes.
pub const CONFIG_ICON_LIGHT: &str = "Images/Config.light.png";
/// Icon for the "open config file" result on dark themes.
pub const CONFIG_ICON_DARK: &str = "Images/Config.dark.png";

/// Theme reported by the host.
///
/// Only the light/dark split matters for icon selection; the remaining
/// variants exist so host values can be passed through unchanged.
///
/// # Examples
///
/// ```
/// use sr_core::Theme;
///
/// assert!(Theme::HighContrastWhite.is_light());
/// assert_eq!(Theme::Dark.script_icon(), "Images/Script.dark.png");
/// assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Follow the operating system.
    System,
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
    /// High contrast #1.
    HighContrastOne,
    /// High contrast #2.
    HighContrastTwo,
    /// High contrast black.
    HighContrastBlack,
    /// High contrast white.
    HighContrastWhite,
}

impl Theme {
    /// Returns `true` for themes with a light background.
    #[inline]
    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light | Self::HighContrastWhite)
    }

    /// Maps a bare light/dark flag to a theme.
    #[inline]
    #[must_use]
    pub const fn from_is_light(is_light: bool) -> Self {
        if is_light { Self::Light } else { Self::Dark }
    }

    /// Icon path for script entries under this theme.
    #[inline]
    #[must_use]
    pub const fn script_icon(self) -> &'static str {
        if self.is_light() {
            SCRIPT_ICON_LIGHT
        } else {
            SCRIPT_ICON_DARK
        }
    }

    /// Icon path for the config-file result under this theme.
    #[inline]
    #[must_use]
    pub const fn config_icon(self) -> &'static str {
        if self.is_light() {
            CONFIG_ICON_LIGHT
        } else {
            CONFIG_ICON_DARK
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "high-contrast-one" => Ok(Self::HighContrastOne),
            "high-contrast-two" => Ok(Self::HighContrastTwo),
            "high-contrast-black" => Ok(Self::HighContrastBlack),
            "high-contrast-white" => Ok(Self::HighContrastWhite),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}
