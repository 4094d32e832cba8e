//! Supported UI locales.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of UI languages.
///
/// [`Locale::Uz`] is the designated fallback and the [`Default`].
/// Serialized as its lowercase language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Uzbek.
    #[default]
    Uz,
    /// Russian.
    Ru,
    /// English.
    En,
}

impl Locale {
    /// Every supported locale, fallback first.
    pub const ALL: [Self; 3] = [Self::Uz, Self::Ru, Self::En];

    /// The locale used when nothing else is known.
    pub const FALLBACK: Self = Self::Uz;

    /// Returns the language code (`"uz"`, `"ru"`, `"en"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Uz => "uz",
            Self::Ru => "ru",
            Self::En => "en",
        }
    }

    /// Parses a language tag, ignoring case and any region subtag.
    ///
    /// ```
    /// use sesame_types::Locale;
    ///
    /// assert_eq!(Locale::parse("ru"), Some(Locale::Ru));
    /// assert_eq!(Locale::parse("uz-Latn-UZ"), Some(Locale::Uz));
    /// assert_eq!(Locale::parse("EN_us"), Some(Locale::En));
    /// assert_eq!(Locale::parse("de"), None);
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(primary))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string names no supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale '{0}'")]
pub struct LocaleParseError(pub String);

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LocaleParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_default() {
        assert_eq!(Locale::default(), Locale::FALLBACK);
        assert_eq!(Locale::ALL[0], Locale::FALLBACK);
    }

    #[test]
    fn code_and_display_agree() {
        for locale in Locale::ALL {
            assert_eq!(locale.to_string(), locale.code());
            assert_eq!(locale.code().parse::<Locale>(), Ok(locale));
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "kk".parse::<Locale>().unwrap_err();
        assert_eq!(err, LocaleParseError("kk".into()));
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Locale::Ru).unwrap(), r#""ru""#);
        let parsed: Locale = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(parsed, Locale::En);
        assert!(serde_json::from_str::<Locale>(r#""RU""#).is_err());
    }
}
