//! Field validators shared by request DTOs.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Slug length bounds.
pub const SLUG_MIN_LEN: usize = 3;
pub const SLUG_MAX_LEN: usize = 60;

lazy_static! {
    /// Lowercase alphanumeric words joined by single hyphens.
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    /// Lowercase ceremony label such as `akad` or `ngunduh-mantu`.
    static ref LABEL_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9_-]*$").unwrap();
}

/// Trims and lower-cases a slug before validation and storage.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_ascii_lowercase()
}

/// Validates a URL slug after normalization, so `" Ana-Budi "` passes and is
/// stored as `ana-budi`.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let slug = normalize_slug(slug);
    if slug.len() < SLUG_MIN_LEN || slug.len() > SLUG_MAX_LEN {
        let mut err = ValidationError::new("slug_length");
        err.message = Some(
            format!(
                "Slug must be between {} and {} characters",
                SLUG_MIN_LEN, SLUG_MAX_LEN
            )
            .into(),
        );
        return Err(err);
    }
    if !SLUG_REGEX.is_match(&slug) {
        let mut err = ValidationError::new("slug_format");
        err.message = Some(
            "Slug may only contain lowercase letters, digits and single hyphens".into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Validates a lowercase label used for extensible enumerations.
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() || label.len() > 40 || !LABEL_REGEX.is_match(label) {
        let mut err = ValidationError::new("label_format");
        err.message = Some("Must be a lowercase label of at most 40 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Rejects strings that are empty after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        return Err(err);
    }
    Ok(())
}
