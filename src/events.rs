use std::fmt;

use serde::Serialize;

/// One row of a schedule table. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub date: String,
    pub speaker: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Spring,
    Summer,
    Fall,
}

impl Term {
    pub fn as_str(self) -> &'static str {
        match self {
            Term::Spring => "spring",
            Term::Summer => "summer",
            Term::Fall => "fall",
        }
    }

    /// Case-insensitive; accepts the three lowercase spellings in any case.
    pub fn parse(s: &str) -> Option<Term> {
        match s.to_ascii_lowercase().as_str() {
            "spring" => Some(Term::Spring),
            "summer" => Some(Term::Summer),
            "fall" => Some(Term::Fall),
            _ => None,
        }
    }
}

/// Regular semester seminar vs. the introductory proofs course series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Series {
    Regular,
    IntroProofs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Season {
    pub series: Series,
    pub term: Term,
}

impl Season {
    pub fn regular(term: Term) -> Self {
        Self { series: Series::Regular, term }
    }

    pub fn intro_proofs(term: Term) -> Self {
        Self { series: Series::IntroProofs, term }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.series {
            Series::Regular => f.write_str(self.term.as_str()),
            Series::IntroProofs => write!(f, "introproofs_{}", self.term.as_str()),
        }
    }
}

/// Grouping key: 4-digit year plus season. Displays as `{year}_{season}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemesterKey {
    pub year: String,
    pub season: Season,
}

impl SemesterKey {
    pub fn new(year: impl Into<String>, season: Season) -> Self {
        Self { year: year.into(), season }
    }

    pub fn file_name(&self) -> String {
        format!("{}_events.json", self)
    }
}

impl fmt::Display for SemesterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.year, self.season)
    }
}

#[derive(Debug, Clone)]
pub struct SemesterGroup {
    pub key: SemesterKey,
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_and_file_name() {
        let k = SemesterKey::new("2024", Season::regular(Term::Fall));
        assert_eq!(k.to_string(), "2024_fall");
        assert_eq!(k.file_name(), "2024_fall_events.json");

        let k = SemesterKey::new("2025", Season::intro_proofs(Term::Spring));
        assert_eq!(k.to_string(), "2025_introproofs_spring");
    }

    #[test]
    fn term_parse_ignores_case() {
        assert_eq!(Term::parse("FALL"), Some(Term::Fall));
        assert_eq!(Term::parse("Summer"), Some(Term::Summer));
        assert_eq!(Term::parse("winter"), None);
    }

    #[test]
    fn event_serializes_with_abstract_key() {
        let e = Event {
            date: "Sep 5".into(),
            speaker: "Émilie Noether".into(),
            title: "Rings".into(),
            abstract_text: String::new(),
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["abstract"], "");
        assert_eq!(v["speaker"], "Émilie Noether");
    }
}
