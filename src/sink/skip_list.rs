//! Dates that must stay empty
//!
//! A skip list is a text file with one `yyyy-mm-dd` date per line. Blank
//! lines are ignored.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipList {
    dates: HashSet<NaiveDate>,
}

impl SkipList {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read skip list {}", path.display()))?;
        let list = Self::parse(&contents)
            .with_context(|| format!("Invalid skip list {}", path.display()))?;
        tracing::info!("Skip list contained {} dates to skip", list.len());
        Ok(list)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut dates = HashSet::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let date = NaiveDate::parse_from_str(line, "%Y-%m-%d")
                .with_context(|| format!("line {}: expected yyyy-mm-dd, got '{}'", index + 1, line))?;
            dates.insert(date);
        }
        Ok(Self { dates })
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dates() {
        let list = SkipList::parse("2024-01-15\n\n  2024-12-25  \n2024-01-15\n").unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
        assert!(!list.contains(&NaiveDate::from_ymd_opt(2024, 12, 24).unwrap()));
    }

    #[test]
    fn test_bad_line_is_reported() {
        let err = SkipList::parse("2024-01-15\n15/01/2024\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skip.txt");
        fs::write(&path, "2023-03-01\n").unwrap();
        let list = SkipList::load(&path).unwrap();
        assert_eq!(list.len(), 1);
        assert!(SkipList::load(dir.path().join("missing.txt")).is_err());
    }
}
