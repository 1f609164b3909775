//! Sentinel markers: reserved text tokens that stand in for generated content
//!
//! A template author writes `SPECIALTIES_PLACEHOLDER` (or a `{{ ... .map( ... }}`
//! mapping body) as the sole text child of a container; processing replaces it
//! with a generated array of nodes. Markers are plain strings on purpose: the
//! template JSON stays valid and serializes verbatim, and an unprocessed
//! marker is trivially visible in output.

/// Marker for the seller-specialties list.
pub const SPECIALTIES_MARKER: &str = "SPECIALTIES_PLACEHOLDER";

/// Marker for the seller-achievements list.
pub const ACHIEVEMENTS_MARKER: &str = "ACHIEVEMENTS_PLACEHOLDER";

/// Id prefixes of generated array items. Extraction walks children by these
/// prefixes, so they must stay in sync with the expansion code.
pub const SPECIALTY_ID_PREFIX: &str = "specialty-";
pub const ACHIEVEMENT_ID_PREFIX: &str = "achievement-";

/// Bullet prefix applied to classic-style list entries. Extraction strips
/// exactly one occurrence so stored values round-trip unchanged.
pub const BULLET_PREFIX: &str = "\u{2022} ";

/// True for the two reserved all-caps tokens.
pub fn is_sentinel_token(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed == SPECIALTIES_MARKER || trimmed == ACHIEVEMENTS_MARKER
}

/// True for interpolation bodies that map over a collection, e.g.
/// `{{content.features.map(f => ...)}}`. These never evaluate as ordinary
/// expressions; they are expansion sites.
pub fn is_mapping_body(text: &str) -> bool {
    text.contains("{{") && text.contains(".map(")
}

/// True if the text is any kind of expansion site.
pub fn is_placeholder(text: &str) -> bool {
    is_sentinel_token(text) || is_mapping_body(text)
}
