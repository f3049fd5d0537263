//! Locale selection.

use std::fmt;

/// A rendering locale.
///
/// Only the languages with a full cardinal speller are listed; anything
/// else normalizes to English rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Normalizes an `Accept-Language`-style tag to a supported locale.
    ///
    /// Takes the first comma-separated entry, drops any quality suffix,
    /// keeps the primary subtag, and matches it case-insensitively.
    /// Unsupported or unparseable input yields [`Locale::En`].
    ///
    /// ```rust
    /// use arbordb_format::Locale;
    ///
    /// assert_eq!(Locale::from_tag("es-MX,es;q=0.9,en;q=0.8"), Locale::Es);
    /// assert_eq!(Locale::from_tag("EN-us"), Locale::En);
    /// assert_eq!(Locale::from_tag("de"), Locale::En);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let entry = tag.split(',').next().unwrap_or("");
        let entry = entry.split(';').next().unwrap_or("").trim();
        let primary = entry.split(['-', '_']).next().unwrap_or("").trim();
        match primary.to_ascii_lowercase().as_str() {
            "es" => Self::Es,
            _ => Self::En,
        }
    }

    /// The primary language subtag for this locale.
    #[must_use]
    pub const fn as_tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
