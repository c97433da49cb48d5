//! Slash-delimited XML tag paths

use crate::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// Literal XML element names only: no predicates, wildcards or attributes.
static TAG_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-:]*$").unwrap());

/// A parsed tag path such as `person/record`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPath {
    segments: Vec<String>,
}

impl TagPath {
    pub fn parse(path: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidTagPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if path.trim().is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        for segment in path.split('/') {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            if !TAG_SEGMENT.is_match(segment) {
                return Err(invalid(&format!("'{}' is not a literal tag name", segment)));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
