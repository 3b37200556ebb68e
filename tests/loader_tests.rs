//! Parameter tables loaded from YAML and JSON.

use std::fs;

use bdd_params::host::memory::SuiteTree;
use bdd_params::loader::{load_records, records_from_json, records_from_yaml};
use bdd_params::{params, ErrorType, Interface};
use tempfile::tempdir;

const TABLE: &str = r#"
- testname: small
  a: 1
- testname: large
  a: 1000
  priority: p2
- testname: broken
  a: 0
  skip: "tracked upstream"
"#;

#[cfg(test)]
mod loader_tests {
    use super::*;

    #[test]
    fn test_yaml_table_expands_like_literal_records() {
        let records = records_from_yaml(TABLE).unwrap();
        assert_eq!(records.len(), 3);

        let mut tree = SuiteTree::new();
        let spec = params(records, |_, r| {
            let a: i64 = r.get_as("a")?;
            assert!(a > 0);
            Ok(())
        })
        .unwrap();
        let ids = Interface::new(&mut tree).it("scales", spec);

        assert_eq!(
            tree.titles(),
            [
                "scales - [small]",
                "[priority=p2] scales - [large]",
                "scales - [broken]"
            ]
        );
        assert!(tree.invoke(ids[0], 0).unwrap().is_ok());
        assert!(tree.invoke(ids[2], 0).is_none());
    }

    #[test]
    fn test_json_table_keeps_field_order() {
        let records = records_from_json(r#"[{"b": 2, "testname": "t", "a": 1}]"#).unwrap();
        assert_eq!(records[0].to_json(), r#"{"b":2,"testname":"t","a":1}"#);
    }

    #[test]
    fn test_loading_does_not_validate() {
        let records = records_from_yaml("- a: 1\n").unwrap();
        let err = params(records, |_, _| Ok(())).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MissingIdentifier);
    }

    #[test]
    fn test_malformed_tables() {
        let err = records_from_yaml("testname: single").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MalformedDeclaration);

        let err = records_from_json(r#"[{"testname": "a"}, 3]"#).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MalformedDeclaration);
        assert!(err.to_string().contains("test param #1"));

        let err = records_from_json("[").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();
        let yaml = dir.path().join("rows.yml");
        fs::write(&yaml, TABLE).unwrap();
        assert_eq!(load_records(&yaml).unwrap().len(), 3);

        let json = dir.path().join("rows.json");
        fs::write(&json, r#"[{"testname": "only"}]"#).unwrap();
        assert_eq!(load_records(&json).unwrap().len(), 1);

        let other = dir.path().join("rows.toml");
        fs::write(&other, "").unwrap();
        let err = load_records(&other).unwrap_err();
        assert!(err.to_string().contains(".yaml, .yml or .json"));

        let err = load_records(dir.path().join("missing.yaml")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
    }
}
