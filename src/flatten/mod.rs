// src/flatten/mod.rs
pub mod label;
pub mod record;
pub mod state;

pub use label::{GroupLabel, LabelScheme};
pub use record::{FieldKey, HighestCounts, Record};
pub use state::{finish, step, FlattenState};

use crate::{error::FlattenError, load::RawTable};
use tracing::{debug, info};

/// Output of the flattening pass: one record per ID, in input order,
/// plus the per-label maximum sequence numbers.
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    pub records: Vec<Record>,
    pub highest: HighestCounts,
    pub rows_skipped: usize,
}

/// Fold every data row of `table` through `step`.
///
/// - Column 0 non-empty: a new ID begins (and the previous one is sealed).
/// - Column 1 non-empty: a new group begins within the current ID.
/// - Every row takes the next sequence number within its group.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.rows.len()))]
pub fn flatten(table: &RawTable, scheme: LabelScheme) -> Result<Flattened, FlattenError> {
    let mut state = FlattenState::new(table.headers.len(), scheme)?;
    let mut records = Vec::new();

    for row in &table.rows {
        let (next, sealed) = step(state, row)?;
        state = next;
        if let Some(record) = sealed {
            debug!(id = %record.id, fields = record.fields.len(), "sealed record");
            records.push(record);
        }
    }

    let rows_skipped = state.rows_skipped;
    let (last, highest) = finish(state);
    records.extend(last);

    info!(ids = records.len(), groups = highest.len(), "flattened");
    Ok(Flattened {
        records,
        highest,
        rows_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{CellValue, RawRow};
    use std::collections::HashSet;

    fn t(s: &str) -> Option<CellValue> {
        Some(CellValue::Text(s.to_string()))
    }

    fn table(rows: Vec<RawRow>) -> RawTable {
        RawTable::new(vec!["id".into(), "lemma".into(), "morpheme".into()], rows)
    }

    fn label(i: usize) -> GroupLabel {
        LabelScheme::Strict.label(i).unwrap()
    }

    fn sample() -> RawTable {
        table(vec![
            vec![t("1"), t("run"), t("ran")],
            vec![None, None, t("runs")],
            vec![None, t("walk"), t("walked")],
            vec![t("2"), t("go"), t("went")],
            vec![None, None, t("gone")],
            vec![None, None, t("goes")],
            vec![t("3"), t("be"), None],
        ])
    }

    #[test]
    fn one_record_per_distinct_id() -> Result<(), FlattenError> {
        let tbl = sample();
        let out = flatten(&tbl, LabelScheme::Strict)?;
        let ids: HashSet<String> = tbl
            .rows
            .iter()
            .filter_map(|r| RawTable::cell(r, 0).map(|v| v.to_string()))
            .collect();
        assert_eq!(out.records.len(), ids.len());
        let order: Vec<String> = out.records.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
        Ok(())
    }

    #[test]
    fn highest_counts_are_max_group_size_per_label() -> Result<(), FlattenError> {
        let out = flatten(&sample(), LabelScheme::Strict)?;
        // A: ID 1 has 2 rows, ID 2 has 3 rows, ID 3 has 1 row
        assert_eq!(out.highest.get(label(0)), Some(3));
        // B: only ID 1's "walk"
        assert_eq!(out.highest.get(label(1)), Some(1));
        assert_eq!(out.highest.len(), 2);
        Ok(())
    }

    #[test]
    fn record_fields_use_label_and_seq() -> Result<(), FlattenError> {
        let out = flatten(&sample(), LabelScheme::Strict)?;
        let first = &out.records[0];
        let a = label(0);
        let b = label(1);
        assert_eq!(first.get(&FieldKey::group_name(1, a)), t("run").as_ref());
        assert_eq!(first.get(&FieldKey::member(2, a, 1)), t("ran").as_ref());
        assert_eq!(first.get(&FieldKey::member(2, a, 2)), t("runs").as_ref());
        assert_eq!(first.get(&FieldKey::group_name(1, b)), t("walk").as_ref());
        assert_eq!(first.get(&FieldKey::member(2, b, 1)), t("walked").as_ref());
        // the second group name never appears under a sequence suffix
        assert_eq!(first.get(&FieldKey::member(1, b, 1)), None);
        Ok(())
    }

    #[test]
    fn name_only_group_counts_as_one() -> Result<(), FlattenError> {
        let out = flatten(&table(vec![vec![t("9"), t("solo"), None]]), LabelScheme::Strict)?;
        assert_eq!(out.highest.get(label(0)), Some(1));
        assert_eq!(out.records[0].fields.len(), 1);
        Ok(())
    }

    #[test]
    fn labels_restart_for_each_id() -> Result<(), FlattenError> {
        let out = flatten(&sample(), LabelScheme::Strict)?;
        let second = &out.records[1];
        assert_eq!(second.get(&FieldKey::group_name(1, label(0))), t("go").as_ref());
        assert!(second.fields.keys().all(|k| k.label == label(0)));
        Ok(())
    }

    fn many_groups(n: usize) -> RawTable {
        let mut rows = vec![vec![t("1"), t("g0"), None]];
        for i in 1..n {
            rows.push(vec![None, t(&format!("g{}", i)), None]);
        }
        table(rows)
    }

    #[test]
    fn twenty_seventh_group_overflows_strict_labels() {
        assert!(flatten(&many_groups(26), LabelScheme::Strict).is_ok());
        let err = flatten(&many_groups(27), LabelScheme::Strict).unwrap_err();
        assert_eq!(
            err,
            FlattenError::LabelOverflow {
                row: 27,
                id: "1".into(),
                groups: 27,
                limit: 26
            }
        );
    }

    #[test]
    fn extended_labels_accept_more_groups() -> Result<(), FlattenError> {
        let out = flatten(&many_groups(28), LabelScheme::Extended)?;
        let labels: Vec<String> = out.highest.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(labels.len(), 28);
        assert_eq!(labels[26], "AA");
        assert_eq!(labels[27], "AB");
        Ok(())
    }

    #[test]
    fn short_rows_pad_with_no_value() -> Result<(), FlattenError> {
        let out = flatten(&table(vec![vec![t("1"), t("run")]]), LabelScheme::Strict)?;
        assert_eq!(out.highest.get(label(0)), Some(1));
        assert_eq!(out.records[0].get(&FieldKey::member(2, label(0), 1)), None);
        Ok(())
    }

    #[test]
    fn empty_input_has_no_records() -> Result<(), FlattenError> {
        let out = flatten(&table(vec![]), LabelScheme::Strict)?;
        assert!(out.records.is_empty());
        assert!(out.highest.is_empty());
        Ok(())
    }
}
