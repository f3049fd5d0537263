//! Per-request locale and zone extraction.

use arbordb_format::{zone_from_tag, Locale};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use chrono_tz::Tz;
use std::convert::Infallible;

/// Rendering context for one request.
///
/// Extracted from the `Accept-Language` and `timezone` headers; endpoints
/// whose body carries `language`/`timezone` fields apply those on top via
/// [`RequestContext::with_overrides`]. Extraction never fails: anything
/// unrecognized lands on English and UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Label rendering locale.
    pub locale: Locale,
    /// Timestamp rendering zone.
    pub zone: Tz,
}

impl RequestContext {
    fn from_headers(headers: &HeaderMap) -> Self {
        let locale = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_tag)
            .unwrap_or_default();
        let zone = headers
            .get("timezone")
            .and_then(|value| value.to_str().ok())
            .map(zone_from_tag)
            .unwrap_or(Tz::UTC);
        Self { locale, zone }
    }

    /// Applies body-level overrides; fields present in the body win over
    /// the headers.
    #[must_use]
    pub fn with_overrides(self, language: Option<&str>, timezone: Option<&str>) -> Self {
        Self {
            locale: language.map_or(self.locale, Locale::from_tag),
            zone: timezone.map_or(self.zone, zone_from_tag),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            zone: Tz::UTC,
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
