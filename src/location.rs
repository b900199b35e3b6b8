//! Cell-site location decoding.
//!
//! Carrier exports embed tower locations as free text of the shape
//! `"<SiteName> (Cell: <id> Long: <lon> Lat: <lat> Azimut: <az>)"`, with the
//! site name and the parenthesized metadata both optional and irregular.
//! Decoding never fails: malformed input degrades to `None` or to the most
//! specific partial value the fallback rules can recover.

use crate::models::LocationData;
use crate::validation::InputValidator;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder used by carriers when the cell site is unknown
pub const UNKNOWN_SITE: &str = "Site inconnu";

static COORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)long:\s*(-?[0-9.]+)\s*lat:\s*(-?[0-9.]+)").unwrap()
});

static CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)cell:\s*([^\s)]*)").unwrap()
});

static AZIMUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)azimut:\s*([^\s)]*)").unwrap()
});

/// Decode a raw location string into structured coordinates and metadata.
///
/// Returns `None` for empty/whitespace input, the `"--"` placeholder, the
/// literal `"Site inconnu"`, missing or non-numeric `Long:`/`Lat:` tokens,
/// and coordinates outside valid geographic ranges.
#[must_use]
pub fn decode_location(raw: &str) -> Option<LocationData> {
    let text = raw.trim();
    if text.is_empty() || text == "--" || text == UNKNOWN_SITE {
        return None;
    }

    let caps = COORD_RE.captures(text)?;
    let longitude: f64 = caps.get(1)?.as_str().parse().ok()?;
    let latitude: f64 = caps.get(2)?.as_str().parse().ok()?;
    if !InputValidator::coordinates_in_range(longitude, latitude) {
        return None;
    }

    // The coordinate tag's position doubles as the site-name boundary when
    // the parenthesis is absent and the tag leaked into the "before" text.
    let coord_start = caps.get(0).map_or(0, |m| m.start());

    let site_name = site_name_for(text, coord_start);
    let cell_id = CELL_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or_else(String::new, |m| m.as_str().to_string());
    let azimuth = AZIMUT_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("-")
        .to_string();

    Some(LocationData {
        site_name,
        cell_id,
        longitude,
        latitude,
        azimuth,
    })
}

/// Site name = text before the first `(`; re-derived from the text before
/// the `Long:` token when that slice is empty or itself contains the tag.
fn site_name_for(text: &str, coord_start: usize) -> String {
    let before_paren = text.split('(').next().unwrap_or("").trim();
    let name = if before_paren.is_empty() || before_paren.to_lowercase().contains("long:") {
        text[..coord_start].trim()
    } else {
        before_paren
    };
    if name.is_empty() {
        UNKNOWN_SITE.to_string()
    } else {
        name.to_string()
    }
}
