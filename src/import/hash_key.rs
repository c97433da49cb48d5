//! Content-derived surrogate keys

use sha2::{Digest, Sha256};

/// Stand-in hashed for a null value.
///
/// NUL cannot occur in XML 1.0 text, so no value read from a document can
/// produce the same bytes. An absent value and an empty string hash differently.
pub const NULL_SENTINEL: &str = "\u{0}NUL";

pub struct HashKeyDeriver;

impl HashKeyDeriver {
    /// SHA-256 over the UTF-8 concatenation of `values` (no separator), as 64
    /// lowercase hex characters.
    pub fn derive<'v, I>(values: I) -> String
    where
        I: IntoIterator<Item = Option<&'v str>>,
    {
        let mut hasher = Sha256::new();
        for value in values {
            hasher.update(value.unwrap_or(NULL_SENTINEL).as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}
