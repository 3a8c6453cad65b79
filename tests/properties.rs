use proptest::prelude::*;

use rowkit::types::{Row, RowSequence, Value};

const CASES: u32 = 64;

fn timesheet_rows() -> impl Strategy<Value = RowSequence> {
    let row = (
        prop::sample::select(vec!["A", "B", "C"]),
        prop::sample::select(vec!["Anna", "Ivan"]),
        0i64..5,
    );
    prop::collection::vec(row, 0..24).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(idx, (project, user, hours))| {
                rowkit::row! { "idx" => idx as i64, "project" => project, "user" => user, "hours" => hours }
            })
            .collect()
    })
}

fn without_idx(rows: &RowSequence) -> RowSequence {
    rows.iter()
        .map(|r| r.iter().filter(|(k, _)| *k != "idx").map(|(k, v)| (k, v.clone())).collect::<Row>())
        .collect()
}

fn hours(row: &Row) -> i64 {
    match row.get("hours") {
        Some(Value::Int64(v)) => *v,
        other => panic!("unexpected hours {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: CASES, .. ProptestConfig::default() })]

    #[test]
    fn unique_keeps_every_row_once(rows in timesheet_rows()) {
        let rows = without_idx(&rows);
        let out = rows.unique().unwrap();

        for (i, a) in out.iter().enumerate() {
            prop_assert!(rows.iter().any(|r| r == a));
            prop_assert!(out.iter().skip(i + 1).all(|b| b != a));
        }
        for r in &rows {
            prop_assert!(out.iter().any(|o| o == r));
        }
    }

    #[test]
    fn distinct_is_sorted_and_duplicate_free(rows in timesheet_rows()) {
        let out = rows.distinct(["project", "user"]).unwrap();
        let keys: Vec<(String, String)> = out
            .iter()
            .map(|r| (r.get("project").unwrap().to_string(), r.get("user").unwrap().to_string()))
            .collect();

        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        for r in &rows {
            let k = (r.get("project").unwrap().to_string(), r.get("user").unwrap().to_string());
            prop_assert!(keys.contains(&k));
        }
    }

    #[test]
    fn sort_is_stable_and_idempotent(rows in timesheet_rows(), reverse in any::<bool>()) {
        let once = rows.sort("hours", reverse).unwrap();
        prop_assert_eq!(once.len(), rows.len());

        for w in once.rows.windows(2) {
            let (a, b) = (hours(&w[0]), hours(&w[1]));
            if reverse {
                prop_assert!(a >= b);
            } else {
                prop_assert!(a <= b);
            }
            if a == b {
                prop_assert!(w[0].get("idx").unwrap().as_f64() < w[1].get("idx").unwrap().as_f64());
            }
        }

        let twice = once.sort("hours", reverse).unwrap();
        prop_assert_eq!(twice.rows, once.rows);
    }

    #[test]
    fn empty_filter_is_identity(rows in timesheet_rows()) {
        let out = rows.filter(&Row::new(), rowkit::types::Fields::none()).unwrap();
        prop_assert_eq!(out.rows, rows.rows);
    }

    #[test]
    fn group_totals_add_up(rows in timesheet_rows()) {
        let expected: i64 = rows.iter().map(hours).sum();
        let report = rows.group_by("project", "hours").unwrap();
        let total: i64 = report.iter().map(hours).sum();
        prop_assert_eq!(total, expected);
    }

    #[test]
    fn self_left_join_on_unique_key_is_identity(rows in timesheet_rows()) {
        let out = rows.left_join(&rows, "idx").unwrap();
        prop_assert_eq!(out.rows, rows.rows);
    }
}
