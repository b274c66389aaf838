//! Localized Strings
//!
//! User-facing text the layer writes into the page.

use serde::Deserialize;

use crate::{A11yError, Theme};

/// Display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Locale {
    /// Parse a BCP 47 tag; only the primary language is significant
    pub fn parse(tag: &str) -> Result<Self, A11yError> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "pt" => Ok(Self::PtBr),
            _ => Err(A11yError::UnknownLocale(tag.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::PtBr => "pt-BR",
        }
    }

    /// Human-readable theme name
    pub fn theme_name(&self, theme: Theme) -> &'static str {
        match (self, theme) {
            (Self::En, Theme::Default) => "default",
            (Self::En, Theme::Dark) => "dark mode",
            (Self::En, Theme::HighContrast) => "high contrast",
            (Self::PtBr, Theme::Default) => "padrão",
            (Self::PtBr, Theme::Dark) => "modo escuro",
            (Self::PtBr, Theme::HighContrast) => "alto contraste",
        }
    }

    /// Announcement after a theme change
    pub fn theme_changed(&self, theme: Theme) -> String {
        match self {
            Self::En => format!("Theme changed to {}", self.theme_name(theme)),
            Self::PtBr => format!("Tema alterado para {}", self.theme_name(theme)),
        }
    }

    /// `aria-label` for the main navigation landmark
    pub fn navigation_label(&self) -> &'static str {
        match self {
            Self::En => "Main navigation",
            Self::PtBr => "Navegação principal",
        }
    }
}
