//! Expansion of declarations into host cases, driven through the author-facing
//! interface against the in-memory suite tree.

use std::sync::{Arc, Mutex};

use bdd_params::host::memory::SuiteTree;
use bdd_params::{
    p0, params, Body, CaseContext, Interface, ParameterRecord, ParamsError, Primitive, TestBody,
};
use serde_json::json;

fn record(value: serde_json::Value) -> ParameterRecord {
    ParameterRecord::try_from(value).unwrap()
}

fn abc() -> Vec<ParameterRecord> {
    vec![
        record(json!({"testname": "a"})),
        record(json!({"testname": "b", "skip": true})),
        record(json!({"testname": "c"})),
    ]
}

#[cfg(test)]
mod parameterized_tests {
    use super::*;

    #[test]
    fn test_records_register_in_order() {
        let mut tree = SuiteTree::new();
        let ids = Interface::new(&mut tree).it("sums", params(abc(), |_, _| Ok(())).unwrap());

        assert_eq!(ids.len(), 3);
        assert_eq!(tree.titles(), ["sums - [a]", "sums - [b]", "sums - [c]"]);
        let pending: Vec<bool> = tree.cases().map(|c| c.is_pending()).collect();
        assert_eq!(pending, [false, true, false]);
        assert!(tree.cases().all(|c| !c.exclusive));
    }

    #[test]
    fn test_record_skip_wins_in_only_mode() {
        let mut tree = SuiteTree::new();
        Interface::new(&mut tree).it_only("sums", params(abc(), |_, _| Ok(())).unwrap());

        let pending: Vec<bool> = tree.cases().map(|c| c.is_pending()).collect();
        assert_eq!(pending, [false, true, false]);
        assert!(tree.cases().all(|c| c.exclusive));
    }

    #[test]
    fn test_present_false_skip_is_pending() {
        let table = vec![
            record(json!({"testname": "f", "skip": false})),
            record(json!({"testname": "n", "skip": null})),
        ];
        let mut tree = SuiteTree::new();
        let ids = Interface::new(&mut tree).it("t", params(table, |_, _| Ok(())).unwrap());

        assert_eq!(tree.titles(), ["t - [f]", "t - [n]"]);
        assert!(tree.case(ids[0]).unwrap().is_pending());
        assert!(tree.invoke(ids[0], 0).is_none());
        assert!(tree.invoke(ids[1], 0).unwrap().is_ok());
    }

    #[test]
    fn test_skip_mode_drops_every_body() {
        let table = vec![
            record(json!({"testname": "a"})),
            record(json!({"testname": "b", "skip": false})),
            record(json!({"testname": "c", "skip": null})),
        ];
        let mut tree = SuiteTree::new();
        Interface::new(&mut tree).xit("sums", params(table, |_, _| Ok(())).unwrap());

        assert_eq!(tree.titles(), ["sums - [a]", "sums - [b]", "sums - [c]"]);
        assert!(tree.cases().all(|c| c.is_pending() && !c.exclusive));
    }

    #[test]
    fn test_each_case_is_bound_to_its_record() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let spec = params(
            vec![
                ParameterRecord::new("one").with("n", 1),
                ParameterRecord::new("two").with("n", 2),
            ],
            move |ctx, r| {
                let n: i64 = r.get_as("n")?;
                sink.lock().unwrap().push((ctx.title.clone(), n));
                Ok(())
            },
        )
        .unwrap();

        let mut tree = SuiteTree::new();
        let ids = Interface::new(&mut tree).it("counts", spec);
        for id in ids.iter().rev() {
            tree.invoke(*id, 0).unwrap().unwrap();
        }

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [
                ("counts - [two]".to_string(), 2),
                ("counts - [one]".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_body_failures_reach_the_host() {
        let spec = params(vec![ParameterRecord::new("bad").with("n", "x")], |_, r| {
            let _: i64 = r.get_as("n")?;
            Ok(())
        })
        .unwrap();
        let mut tree = SuiteTree::new();
        let ids = Interface::new(&mut tree).it("parses", spec);

        let err = tree.invoke(ids[0], 0).unwrap().unwrap_err();
        assert!(err.to_string().contains("field 'n' of test param 'bad'"));
    }

    #[test]
    fn test_priority_override_per_record() {
        let table = vec![
            ParameterRecord::new("default"),
            ParameterRecord::new("raised").with("priority", "p1"),
        ];
        let mut tree = SuiteTree::new();
        Interface::new(&mut tree).it(&p0("logs in"), params(table, |_, _| Ok(())).unwrap());

        assert_eq!(
            tree.titles(),
            [
                "[priority=p0] logs in - [default]",
                "[priority=p1] logs in - [raised]"
            ]
        );
    }

    #[test]
    fn test_duplicate_testnames_are_not_deduplicated() {
        let table = vec![ParameterRecord::new("same"), ParameterRecord::new("same")];
        let mut tree = SuiteTree::new();
        Interface::new(&mut tree).it("dup", params(table, |_, _| Ok(())).unwrap());
        assert_eq!(tree.titles(), ["dup - [same]", "dup - [same]"]);
    }

    #[test]
    fn test_empty_table_registers_nothing() {
        let mut tree = SuiteTree::new();
        let ids = Interface::new(&mut tree).it("none", params(vec![], |_, _| Ok(())).unwrap());
        assert!(ids.is_empty());
        assert_eq!(tree.cases().count(), 0);
    }
}

#[cfg(test)]
mod validation_failure_tests {
    use super::*;

    fn declare(tree: &mut SuiteTree) -> Result<(), ParamsError> {
        Interface::new(tree).describe("table", |iface| {
            let table = vec![
                ParameterRecord::new("ok"),
                record(json!({"testname": "", "a": 1})),
            ];
            iface.it("rows", params(table, |_, _| Ok(()))?);
            Ok(())
        })
    }

    #[test]
    fn test_invalid_table_registers_no_cases() {
        let mut tree = SuiteTree::new();
        let err = declare(&mut tree).unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"missing/empty 'testname' in test param {"testname":"","a":1}"#
        );
        assert_eq!(tree.cases().count(), 0);
    }

    #[test]
    fn test_suite_is_closed_after_failure() {
        let mut tree = SuiteTree::new();
        let _ = declare(&mut tree);
        let mut iface = Interface::new(&mut tree);
        let id = iface.it("after", Body::plain(|_| Ok(())))[0];
        assert_eq!(tree.suite_of(id), Some(tree.root()));
    }
}

#[cfg(test)]
mod plain_body_tests {
    use super::*;

    #[test]
    fn test_plain_title_is_unchanged() {
        let mut tree = SuiteTree::new();
        let mut iface = Interface::new(&mut tree);
        iface.it(&p0("Login works"), Body::plain(|_| Ok(())));
        iface.it("todo", Body::none());
        iface.xit("later", Body::plain(|_| Ok(())));
        iface.it_only("focus", Body::plain(|_| Ok(())));

        assert_eq!(
            tree.titles(),
            ["[priority=p0] Login works", "todo", "later", "focus"]
        );
        let shape: Vec<(bool, bool)> = tree.cases().map(|c| (c.is_pending(), c.exclusive)).collect();
        assert_eq!(
            shape,
            [(false, false), (true, false), (true, false), (false, true)]
        );
    }

    #[test]
    fn test_primitive_and_declare_paths_agree() {
        let mut via_declare = SuiteTree::new();
        let mut via_primitive = SuiteTree::new();

        Interface::new(&mut via_declare).it("same", Body::plain(|_| Ok(())));
        let body: TestBody = Arc::new(|_: &mut CaseContext| Ok(()));
        Primitive::new(&mut via_primitive).it("same", Some(body));

        let a = via_declare.cases().next().unwrap();
        let b = via_primitive.cases().next().unwrap();
        assert_eq!(
            (&a.title, a.is_pending(), a.exclusive, &a.file),
            (&b.title, b.is_pending(), b.exclusive, &b.file)
        );
    }
}
