//! Declaration validation tests

use xml_orm_sdk::models::{Column, ColumnKind, ForeignKey, Index, Schema, TableBuilder, TableId};
use xml_orm_sdk::validation::ValidationError;

fn people() -> TableBuilder {
    TableBuilder::new("people")
        .top_tag("person/record")
        .column(Column::new("name").unwrap().not_null())
        .column(Column::new("last_name").unwrap().not_null())
}

fn employers(parent: TableId) -> TableBuilder {
    TableBuilder::new("employers")
        .top_tag("person/record")
        .tag_name("employers/employer")
        .column(Column::new("name").unwrap().not_null())
        .parent(parent)
}

mod column_tests {
    use super::*;

    #[test]
    fn test_empty_column_name() {
        assert_eq!(Column::new("").unwrap_err(), ValidationError::EmptyColumnName);
        assert_eq!(Column::new("   ").unwrap_err(), ValidationError::EmptyColumnName);
    }
}

mod table_tests {
    use super::*;

    #[test]
    fn test_unknown_hash_key_fails_at_declaration() {
        let mut schema = Schema::new();
        let err = schema
            .add_table(people().hash_key(["name", "nonexistent_column"]))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownHashKeyColumn {
                table: "people".to_string(),
                column: "nonexistent_column".to_string(),
            }
        );
        assert!(schema.is_empty());
    }

    #[test]
    fn test_duplicate_columns() {
        let mut schema = Schema::new();
        let err = schema
            .add_table(people().column(Column::new("name").unwrap()))
            .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_missing_top_tag() {
        let mut schema = Schema::new();
        let err = schema
            .add_table(
                TableBuilder::new("employers")
                    .tag_name("employers/employer")
                    .column(Column::new("name").unwrap()),
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingTopTag { .. }));
    }

    #[test]
    fn test_invalid_tag_path() {
        let mut schema = Schema::new();
        let err = schema
            .add_table(TableBuilder::new("people").top_tag("person//record"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTagPath { .. }));
    }

    #[test]
    fn test_duplicate_table_names() {
        let mut schema = Schema::new();
        schema.add_table(people()).unwrap();
        assert!(matches!(
            schema.add_table(people()),
            Err(ValidationError::DuplicateTable { .. })
        ));
    }

    #[test]
    fn test_effective_columns() {
        let mut schema = Schema::new();
        let parent = schema.add_table(people().hash_key(["last_name", "name"])).unwrap();
        let child = schema.add_table(employers(parent)).unwrap();

        let parent_table = schema.table(parent).unwrap();
        let names: Vec<&str> = parent_table.columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["name", "last_name", "hash_id"]);
        assert_eq!(parent_table.declared_columns().count(), 2);
        assert_eq!(
            parent_table.hash_key().unwrap(),
            &["last_name".to_string(), "name".to_string()]
        );

        let child_table = schema.table(child).unwrap();
        let names: Vec<&str> = child_table.columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["name", "parent_hash"]);
        assert_eq!(
            child_table.column("parent_hash").unwrap().kind(),
            &ColumnKind::ParentHash {
                parent_table: "people".to_string()
            }
        );
    }

    #[test]
    fn test_index_may_use_synthetic_column() {
        let mut schema = Schema::new();
        let parent = schema.add_table(people().hash_key(["name"])).unwrap();
        assert!(
            schema
                .add_table(employers(parent).index(Index::new("employers_parent_idx", ["parent_hash"]).unique()))
                .is_ok()
        );
    }
}

mod parent_tests {
    use super::*;

    #[test]
    fn test_parent_without_hash_key() {
        let mut schema = Schema::new();
        let parent = schema.add_table(people()).unwrap();
        assert_eq!(
            schema.add_table(employers(parent)).unwrap_err(),
            ValidationError::ParentWithoutHashKey {
                table: "employers".to_string(),
                parent: "people".to_string(),
            }
        );
    }

    #[test]
    fn test_embedded_table_needs_tag_name() {
        let mut schema = Schema::new();
        let parent = schema.add_table(people().hash_key(["name"])).unwrap();
        let err = schema
            .add_table(
                TableBuilder::new("employers")
                    .top_tag("person/record")
                    .column(Column::new("name").unwrap())
                    .parent(parent),
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingTagName { .. }));
    }

    #[test]
    fn test_embedded_table_shares_top_tag() {
        let mut schema = Schema::new();
        let parent = schema.add_table(people().hash_key(["name"])).unwrap();
        let err = schema
            .add_table(
                TableBuilder::new("employers")
                    .top_tag("person/entry")
                    .tag_name("employers/employer")
                    .column(Column::new("name").unwrap())
                    .parent(parent),
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::TopTagMismatch { .. }));
    }

    #[test]
    fn test_reserved_parent_hash_column() {
        let mut schema = Schema::new();
        let parent = schema.add_table(people().hash_key(["name"])).unwrap();
        let err = schema
            .add_table(employers(parent).column(Column::new("parent_hash").unwrap()))
            .unwrap_err();
        assert!(matches!(err, ValidationError::ReservedColumnName { .. }));
    }

    #[test]
    fn test_unknown_parent_handle() {
        let mut other = Schema::new();
        other.add_table(people().hash_key(["name"])).unwrap();
        let foreign = other.add_table(TableBuilder::new("x").top_tag("a/b")).unwrap();

        let mut schema = Schema::new();
        assert!(matches!(
            schema.add_table(employers(foreign)),
            Err(ValidationError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_read_order_puts_parents_first() {
        let mut schema = Schema::new();
        let parent = schema.add_table(people().hash_key(["name"])).unwrap();
        let child = schema.add_table(employers(parent)).unwrap();
        assert_eq!(schema.read_order().unwrap(), vec![parent, child]);
    }
}

mod key_tests {
    use super::*;

    fn companies(schema: &mut Schema) -> TableId {
        schema
            .add_table(
                TableBuilder::new("companies")
                    .top_tag("companies/company")
                    .column(Column::new("code").unwrap().primary_key())
                    .column(Column::new("name").unwrap()),
            )
            .unwrap()
    }

    fn contracts() -> TableBuilder {
        TableBuilder::new("contracts")
            .top_tag("contracts/contract")
            .column(Column::new("company").unwrap().not_null())
            .column(Column::new("contract_no").unwrap().not_null())
    }

    #[test]
    fn test_composite_primary_key() {
        let mut schema = Schema::new();
        let id = schema.add_table(contracts().primary_key(["company", "contract_no"])).unwrap();
        assert_eq!(
            schema.table(id).unwrap().primary_key().unwrap(),
            &["company".to_string(), "contract_no".to_string()]
        );
    }

    #[test]
    fn test_composite_primary_key_excludes_hash_key() {
        let mut schema = Schema::new();
        let err = schema
            .add_table(contracts().primary_key(["company", "contract_no"]).hash_key(["contract_no"]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::PrimaryKeyConflict { .. }));
    }

    #[test]
    fn test_several_primary_key_columns_rejected() {
        let mut schema = Schema::new();
        let err = schema
            .add_table(
                TableBuilder::new("contracts")
                    .top_tag("contracts/contract")
                    .column(Column::new("company").unwrap().primary_key())
                    .column(Column::new("contract_no").unwrap().primary_key()),
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::PrimaryKeyConflict { .. }));
    }

    #[test]
    fn test_foreign_key_resolves_target_name() {
        let mut schema = Schema::new();
        let companies = companies(&mut schema);
        let id = schema
            .add_table(contracts().foreign_key(ForeignKey::new("company", companies, "code")))
            .unwrap();
        let references = schema.table(id).unwrap().references();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].table, "companies");
        assert_eq!(references[0].referenced_column, "code");
    }

    #[test]
    fn test_foreign_key_on_unknown_column() {
        let mut schema = Schema::new();
        let companies = companies(&mut schema);
        let err = schema
            .add_table(contracts().foreign_key(ForeignKey::new("vendor", companies, "code")))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownForeignKeyColumn {
                table: "contracts".to_string(),
                column: "vendor".to_string(),
            }
        );
    }

    #[test]
    fn test_foreign_key_to_unknown_column() {
        let mut schema = Schema::new();
        let companies = companies(&mut schema);
        let err = schema
            .add_table(contracts().foreign_key(ForeignKey::new("company", companies, "vat_id")))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownReferencedColumn { .. }));
    }

    #[test]
    fn test_declared_foreign_keys_precede_parent_hash() {
        let mut schema = Schema::new();
        let companies = companies(&mut schema);
        let parent = schema.add_table(people().hash_key(["name"])).unwrap();
        let id = schema
            .add_table(
                employers(parent)
                    .column(Column::new("company").unwrap())
                    .foreign_key(ForeignKey::new("company", companies, "code")),
            )
            .unwrap();
        let tables: Vec<&str> = schema
            .table(id)
            .unwrap()
            .references()
            .iter()
            .map(|r| r.table.as_str())
            .collect();
        assert_eq!(tables, vec!["companies", "people"]);
    }
}
