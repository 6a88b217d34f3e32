//! Input validation for collection construction.
//!
//! Collection names are interpolated into SQL as literals (see
//! [`crate::collection`]), so the name grammar is the safety boundary:
//! letters, digits, and a fixed set of punctuation that can never close a
//! string literal or start a comment.

use crate::error::{Error, Result};

/// Punctuation allowed in collection names besides ASCII alphanumerics.
const NAME_PUNCTUATION: &str = "-_+~#=/";

/// Validate a collection name: non-empty, matching `[-A-Za-z0-9_+~#=/]+`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an empty name or any character
/// outside the allowed set.
pub fn collection_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid("collection name must not be empty"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !NAME_PUNCTUATION.contains(*c))
    {
        return Err(Error::invalid(format!(
            "collection name {name:?} contains invalid character {bad:?} \
             (allowed: A-Z a-z 0-9 {NAME_PUNCTUATION})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["docs", "my_prefix", "a/b", "v1", "A-Z_+~#=/9"] {
            assert!(collection_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            collection_name(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        for name in ["has space", "quote'name", "semi;colon", "dot.name", "percent%"] {
            assert!(
                matches!(collection_name(name), Err(Error::InvalidArgument(_))),
                "{name} should be rejected"
            );
        }
    }
}
