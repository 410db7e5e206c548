//! URL slug helpers for content records that arrive without one.
//!
//! Punctuation is dropped before slugification so `"Don't"` becomes `dont`
//! rather than `don-t`; accented letters are transliterated by the `slug`
//! crate. Uniqueness is delegated to a caller-provided predicate so the
//! helpers stay pure.

use slug::slugify;
use thiserror::Error;

const MAX_SUFFIX_ATTEMPTS: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
    #[error("exhausted attempts to find a unique slug for `{base}`")]
    Exhausted { base: String },
}

/// Lowercase, hyphen-separated slug; empty when nothing usable remains.
pub fn generate_slug(text: &str) -> String {
    let kept: String = text
        .trim()
        .chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace() || matches!(ch, '_' | '-'))
        .collect();
    slugify(kept)
}

/// Like [`generate_slug`], but rejects input that yields no slug.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = generate_slug(input);
    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Produce a slug that does not collide according to `is_unique`.
///
/// `is_unique` returns `true` when the candidate is free. Collisions retry with
/// a counter suffix (`-2`, `-3`, …).
pub fn generate_unique_slug<F>(input: &str, mut is_unique: F) -> Result<String, SlugError>
where
    F: FnMut(&str) -> bool,
{
    let base = derive_slug(input)?;

    if is_unique(&base) {
        return Ok(base);
    }

    for attempt in 2..=MAX_SUFFIX_ATTEMPTS + 1 {
        let candidate = format!("{base}-{attempt}");
        if is_unique(&candidate) {
            return Ok(candidate);
        }
    }

    Err(SlugError::Exhausted { base })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_slug_collapses_separators() {
        assert_eq!(generate_slug("  Laser Hair -- Removal_Pro "), "laser-hair-removal-pro");
    }

    #[test]
    fn generate_slug_drops_punctuation() {
        assert_eq!(generate_slug("Don't Stop!"), "dont-stop");
        assert_eq!(generate_slug("Peel & Glow"), "peel-glow");
    }

    #[test]
    fn generate_slug_transliterates_accents() {
        assert_eq!(generate_slug("Soin Éclat Visage"), "soin-eclat-visage");
    }

    #[test]
    fn derive_slug_rejects_empty_and_symbol_only_input() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
        assert_eq!(
            derive_slug("!!!"),
            Err(SlugError::Unrepresentable {
                input: "!!!".to_string()
            })
        );
    }

    #[test]
    fn generate_unique_slug_appends_counter() {
        let mut existing = vec!["claire-dubois".to_string()];
        let slug = generate_unique_slug("Claire Dubois", |candidate| {
            if existing.iter().any(|taken| taken == candidate) {
                false
            } else {
                existing.push(candidate.to_string());
                true
            }
        })
        .expect("unique slug");

        assert_eq!(slug, "claire-dubois-2");
    }

    #[test]
    fn generate_unique_slug_exhausted() {
        let result = generate_unique_slug("Example", |_| false).expect_err("should exhaust");
        assert_eq!(
            result,
            SlugError::Exhausted {
                base: "example".to_string()
            }
        );
    }
}
