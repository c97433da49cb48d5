//! Table reading: from an XML file to the rows of one table

use super::ImportError;
use super::row_builder::RowBuilder;
use super::walker::XmlRecordWalker;
use super::xml::{XmlDocument, XmlElement};
use crate::models::{Row, Schema, TableId};
use crate::validation::ValidationError;
use std::path::Path;

/// Reads the rows of a table out of its XML file.
///
/// The top-level ancestor's `top_tag` yields the record nodes. Each embedded
/// level then resolves its `tag_name` under every node of the level above.
/// Rows of an embedded table carry the key of the node they were found under,
/// recomputed from that node's content, so reading a child never depends on
/// stored identifiers.
pub struct TableReader<'s> {
    schema: &'s Schema,
}

impl<'s> TableReader<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// All rows of table `id` from the document at `path`, or the first error.
    pub fn read(&self, id: TableId, path: &Path) -> Result<Vec<Row>, ImportError> {
        let lineage = self.schema.lineage(id)?;
        let document = XmlDocument::from_file(path)?;
        let walker = XmlRecordWalker::new(&document);

        let (root, descendants) = lineage
            .split_first()
            .ok_or_else(|| ImportError::UnknownTable(format!("#{}", id.index())))?;

        let mut nodes = walker.records(root.top_tag())?;
        if let Some(tag_name) = root.tag_name() {
            nodes = walker.nested(&nodes, tag_name).into_iter().flatten().collect();
        }

        // Data nodes of the current level, grouped by the key of their parent node
        let mut groups: Vec<(Option<String>, Vec<&XmlElement>)> = vec![(None, nodes)];
        let mut owner = *root;
        for table in descendants {
            let tag_name = table.tag_name().ok_or_else(|| ValidationError::MissingTagName {
                table: table.name().to_string(),
            })?;
            let parents: Vec<&XmlElement> = groups.into_iter().flat_map(|(_, nodes)| nodes).collect();
            let nested = walker.nested(&parents, tag_name);

            let keys = RowBuilder::new(owner);
            groups = parents
                .iter()
                .zip(nested)
                .map(|(parent, children)| (keys.hash_id(parent), children))
                .collect();
            owner = *table;
        }

        let builder = RowBuilder::new(owner);
        let mut rows = Vec::new();
        for (parent_hash, nodes) in &groups {
            for node in nodes {
                let row = builder.build(node, parent_hash.as_deref(), rows.len() + 1)?;
                rows.push(row);
            }
        }
        Ok(rows)
    }
}
