use std::cmp::Reverse;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::events::{SemesterKey, Series};

pub const INDEX_FILE: &str = "index.json";

/// Entry of the site's semester list. The first entry is the latest semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub year: String,
    pub term: &'static str,
}

/// Regular semesters only, newest first (fall, summer, spring within a year).
pub fn build_index<'a>(keys: impl IntoIterator<Item = &'a SemesterKey>) -> Vec<IndexEntry> {
    let mut keys: Vec<&SemesterKey> = keys
        .into_iter()
        .filter(|k| k.season.series == Series::Regular)
        .collect();
    keys.sort_by(|a, b| {
        Reverse(&a.year)
            .cmp(&Reverse(&b.year))
            .then(Reverse(a.season.term).cmp(&Reverse(b.season.term)))
    });

    keys.into_iter()
        .map(|k| IndexEntry {
            year: k.year.clone(),
            term: k.season.term.as_str(),
        })
        .collect()
}

pub fn write_index(dir: &Path, entries: &[IndexEntry]) -> Result<PathBuf> {
    let path = dir.join(INDEX_FILE);
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Season, Term};

    #[test]
    fn newest_first_without_course_series() {
        let keys = [
            SemesterKey::new("2023", Season::regular(Term::Spring)),
            SemesterKey::new("2024", Season::regular(Term::Spring)),
            SemesterKey::new("2024", Season::intro_proofs(Term::Fall)),
            SemesterKey::new("2024", Season::regular(Term::Fall)),
            SemesterKey::new("2024", Season::regular(Term::Summer)),
            SemesterKey::new("2023", Season::regular(Term::Summer)),
        ];
        let index = build_index(&keys);
        let labels: Vec<String> = index
            .iter()
            .map(|e| format!("{}_{}", e.year, e.term))
            .collect();
        assert_eq!(
            labels,
            ["2024_fall", "2024_summer", "2024_spring", "2023_summer", "2023_spring"]
        );
    }

    #[test]
    fn writes_year_term_objects() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![IndexEntry { year: "2025".into(), term: "fall" }];
        let path = write_index(dir.path(), &entries).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!([{ "year": "2025", "term": "fall" }]));
    }
}
