//! Record node resolution
//!
//! `top_tag` paths are anchored at the document root: the first segment names
//! the root element. Every segment before the last must match at least one
//! element, otherwise the document does not have the declared structure and is
//! reported as malformed. The last segment may match nothing (zero records).
//!
//! `tag_name` paths are resolved relative to each parent node. A parent missing
//! an intermediate container simply has no nested records.

use super::ImportError;
use super::xml::{XmlDocument, XmlElement};
use crate::models::TagPath;
use tracing::debug;

pub struct XmlRecordWalker<'a> {
    document: &'a XmlDocument,
}

impl<'a> XmlRecordWalker<'a> {
    pub fn new(document: &'a XmlDocument) -> Self {
        Self { document }
    }

    /// Repeating record elements for a `top_tag`, in document order
    pub fn records(&self, top_tag: &TagPath) -> Result<Vec<&'a XmlElement>, ImportError> {
        let root = self.document.root();
        let segments = top_tag.segments();

        if root.name() != segments[0] {
            if segments.len() == 1 {
                return Ok(Vec::new());
            }
            return Err(self.malformed(format!(
                "root element is '{}', expected '{}' from path '{}'",
                root.name(),
                segments[0],
                top_tag
            )));
        }

        let mut frontier = vec![root];
        for (depth, segment) in segments.iter().enumerate().skip(1) {
            frontier = frontier
                .iter()
                .copied()
                .flat_map(|node| node.children_named(segment))
                .collect();

            let terminal = depth == segments.len() - 1;
            if frontier.is_empty() && !terminal {
                return Err(self.malformed(format!(
                    "no '{}' element along path '{}'",
                    segments[..=depth].join("/"),
                    top_tag
                )));
            }
        }

        debug!("Resolved {} records for {} in {}", frontier.len(), top_tag, self.document.source());
        Ok(frontier)
    }

    /// Nested elements for `tag_name` under each parent, grouped per parent in
    /// the same order as `parents`.
    pub fn nested(&self, parents: &[&'a XmlElement], tag_name: &TagPath) -> Vec<Vec<&'a XmlElement>> {
        parents
            .iter()
            .map(|parent| {
                let mut frontier = vec![*parent];
                for segment in tag_name.segments() {
                    frontier = frontier
                        .iter()
                        .copied()
                        .flat_map(|node| node.children_named(segment))
                        .collect();
                }
                frontier
            })
            .collect()
    }

    fn malformed(&self, reason: String) -> ImportError {
        ImportError::MalformedDocument {
            source_name: self.document.source().to_string(),
            reason,
        }
    }
}
