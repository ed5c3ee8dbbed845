// src/flatten/record.rs
use super::GroupLabel;
use crate::load::CellValue;
use serde::Serialize;
use std::{collections::BTreeMap, fmt};

/// Structured synthetic field name: `{headers[column]}_{label}` when `seq`
/// is `None` (the group-name field), else `{headers[column]}_{label}_{seq}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldKey {
    pub column: usize,
    pub label: GroupLabel,
    pub seq: Option<u32>,
}

impl FieldKey {
    pub fn group_name(column: usize, label: GroupLabel) -> Self {
        FieldKey {
            column,
            label,
            seq: None,
        }
    }

    pub fn member(column: usize, label: GroupLabel, seq: u32) -> Self {
        FieldKey {
            column,
            label,
            seq: Some(seq),
        }
    }

    /// Render against the sheet headers. Out-of-range columns render with an empty header.
    pub fn name(&self, headers: &[String]) -> String {
        let header = headers.get(self.column).map(String::as_str).unwrap_or("");
        match self.seq {
            None => format!("{}_{}", header, self.label),
            Some(seq) => format!("{}_{}_{}", header, self.label, seq),
        }
    }
}

/// One sealed ID: its value plus the sparse fields collected under it.
/// Missing keys are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: CellValue,
    pub fields: BTreeMap<FieldKey, CellValue>,
}

impl Record {
    pub fn get(&self, key: &FieldKey) -> Option<&CellValue> {
        self.fields.get(key)
    }
}

/// Maximum sequence number observed per group label, across every ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HighestCounts(BTreeMap<GroupLabel, u32>);

impl HighestCounts {
    /// Raise the count for `label` to `seq` if `seq` is larger.
    pub fn observe(&mut self, label: GroupLabel, seq: u32) {
        let slot = self.0.entry(label).or_insert(0);
        *slot = (*slot).max(seq);
    }

    pub fn get(&self, label: GroupLabel) -> Option<u32> {
        self.0.get(&label).copied()
    }

    /// Labels in ascending order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (GroupLabel, u32)> + '_ {
        self.0.iter().map(|(l, c)| (*l, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HighestCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", label, count)?;
        }
        Ok(())
    }
}
