// src/flatten/label.rs
use clap::ValueEnum;
use serde::{Serialize, Serializer};
use std::fmt;

const ALPHABET_LEN: usize = 26;

/// How group indices are turned into letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LabelScheme {
    /// A..Z only; a 27th group under one ID is an error.
    #[default]
    Strict,
    /// A..Z, then AA, AB, .. ZZ, AAA, ..
    Extended,
}

impl LabelScheme {
    /// Largest number of groups a single ID may hold, if bounded.
    pub fn limit(self) -> Option<usize> {
        match self {
            LabelScheme::Strict => Some(ALPHABET_LEN),
            LabelScheme::Extended => None,
        }
    }

    /// Label for the `index`-th group (0-based), or `None` past the limit.
    pub fn label(self, index: usize) -> Option<GroupLabel> {
        match self.limit() {
            Some(limit) if index >= limit => None,
            _ => Some(GroupLabel(index)),
        }
    }
}

/// A group label, stored as its 0-based first-seen index within an ID.
/// Ordering follows the index, so `Z < AA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupLabel(usize);

impl GroupLabel {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // bijective base-26
        let mut n = self.0 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % ALPHABET_LEN;
            letters.push(b'A' + rem as u8);
            n = (n - 1) / ALPHABET_LEN;
        }
        letters.reverse();
        f.write_str(std::str::from_utf8(&letters).map_err(|_| fmt::Error)?)
    }
}

impl Serialize for GroupLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(scheme: LabelScheme, index: usize) -> Option<String> {
        scheme.label(index).map(|l| l.to_string())
    }

    #[test]
    fn strict_labels_stop_after_z() {
        assert_eq!(name(LabelScheme::Strict, 0).as_deref(), Some("A"));
        assert_eq!(name(LabelScheme::Strict, 1).as_deref(), Some("B"));
        assert_eq!(name(LabelScheme::Strict, 25).as_deref(), Some("Z"));
        assert_eq!(name(LabelScheme::Strict, 26), None);
    }

    #[test]
    fn extended_labels_continue_past_z() {
        assert_eq!(name(LabelScheme::Extended, 25).as_deref(), Some("Z"));
        assert_eq!(name(LabelScheme::Extended, 26).as_deref(), Some("AA"));
        assert_eq!(name(LabelScheme::Extended, 27).as_deref(), Some("AB"));
        assert_eq!(name(LabelScheme::Extended, 51).as_deref(), Some("AZ"));
        assert_eq!(name(LabelScheme::Extended, 52).as_deref(), Some("BA"));
        assert_eq!(name(LabelScheme::Extended, 701).as_deref(), Some("ZZ"));
        assert_eq!(name(LabelScheme::Extended, 702).as_deref(), Some("AAA"));
    }

    #[test]
    fn labels_order_by_first_seen_index() {
        let z = LabelScheme::Extended.label(25).unwrap();
        let aa = LabelScheme::Extended.label(26).unwrap();
        assert!(z < aa);
    }
}
