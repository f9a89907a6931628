use std::sync::LazyLock;

use regex::Regex;

use crate::events::{Season, SemesterKey, Term};

const HTML_SUFFIX: &str = ".html";
const INTRO_PROOFS_MARKER: &str = "IntroToProofs";

static INTRO_PROOFS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"IntroToProofs(Fall|Spring|Summer)(\d{4})").unwrap());
static SEMESTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?i:(fall|spring|summer))").unwrap());

/// Derive the grouping key from a schedule file name.
///
/// `IntroToProofsFall2024.html` → `2024_introproofs_fall`; `2023summer_talks.html`
/// → `2023_summer`. The course-series marker is checked first, so a name that
/// matches both forms resolves to the course series. `None` means the caller
/// should skip the file.
pub fn classify(file_name: &str) -> Option<SemesterKey> {
    let stem = file_name.strip_suffix(HTML_SUFFIX).unwrap_or(file_name);

    if stem.contains(INTRO_PROOFS_MARKER) {
        if let Some(caps) = INTRO_PROOFS_RE.captures(stem) {
            let term = Term::parse(&caps[1])?;
            return Some(SemesterKey::new(&caps[2], Season::intro_proofs(term)));
        }
    }

    let caps = SEMESTER_RE.captures(stem)?;
    let term = Term::parse(&caps[2])?;
    Some(SemesterKey::new(&caps[1], Season::regular(term)))
}

/// Schedule pages are `.html` files; anything named like an index page is not.
pub fn is_candidate(file_name: &str) -> bool {
    file_name.ends_with(HTML_SUFFIX) && !file_name.to_lowercase().contains("index")
}
