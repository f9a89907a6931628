use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::events::{SemesterGroup, SemesterKey};
use crate::settings::Settings;
use crate::{filename, index, parser};

/// What a run did, for the closing report.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// (file name, events found), in processing order.
    pub processed: Vec<(String, usize)>,
    /// Files whose name carries no year/season.
    pub skipped: Vec<String>,
    /// Unreadable files, only collected with `keep_going`.
    pub failed: Vec<(String, String)>,
    /// (artifact, events written); planned artifacts on a dry run.
    pub written: Vec<(PathBuf, usize)>,
    pub index: Option<PathBuf>,
}

impl RunSummary {
    pub fn print(&self, dry_run: bool) {
        let verb = if dry_run { "Would create" } else { "Created" };
        let events: usize = self.processed.iter().map(|(_, n)| n).sum();
        println!(
            "\nProcessing complete! {} {} JSON files ({} events from {} pages).",
            verb,
            self.written.len(),
            events,
            self.processed.len()
        );
        if let Some(path) = &self.index {
            println!("Semester index: {}", path.display());
        }
        if !self.skipped.is_empty() {
            println!("Skipped {} unrecognised file names.", self.skipped.len());
        }
        if !self.failed.is_empty() {
            println!("Failed to read {} files:", self.failed.len());
            for (name, err) in &self.failed {
                println!("  - {}: {}", name, err);
            }
        }
    }
}

/// Schedule pages in `dir`, sorted by file name.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let candidate = path
            .file_name()
            .is_some_and(|n| filename::is_candidate(&n.to_string_lossy()));
        if candidate && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Classify, extract and group every schedule page, then write one artifact per group.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let files = discover(&settings.input_dir)?;
    println!("Found {} HTML files to process:", files.len());
    for path in &files {
        println!("  - {}", display_name(path));
    }

    let mut summary = RunSummary::default();
    let mut groups: BTreeMap<SemesterKey, SemesterGroup> = BTreeMap::new();

    for path in &files {
        let name = display_name(path);
        println!("\nProcessing {}...", name);

        let Some(key) = filename::classify(&name) else {
            warn!(file = %name, "Could not parse year/season from file name");
            summary.skipped.push(name);
            continue;
        };

        let html = match read_page(path) {
            Ok(html) => html,
            Err(e) if settings.keep_going => {
                let reason = format!("{:#}", e);
                warn!(file = %name, error = %reason, "Skipping unreadable file");
                summary.failed.push((name, reason));
                continue;
            }
            Err(e) => return Err(e),
        };

        let events = parser::extract_events(&html);
        println!("  Found {} events", events.len());
        debug!(file = %name, key = %key, events = events.len(), "extracted");
        summary.processed.push((name.clone(), events.len()));

        if let Some(prev) = groups.insert(key.clone(), SemesterGroup { key, events }) {
            info!(key = %prev.key, file = %name, "Replacing events from an earlier file");
        }
    }

    let out_dir = settings.output_dir();
    if settings.dry_run {
        summary.written = groups
            .values()
            .map(|g| (out_dir.join(g.key.file_name()), g.events.len()))
            .collect();
        return Ok(summary);
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    println!("\nCreating JSON files...");
    for group in groups.values() {
        let path = write_group(out_dir, group)?;
        println!("  Created {} with {} events", display_name(&path), group.events.len());
        summary.written.push((path, group.events.len()));
    }

    if settings.write_index {
        let entries = index::build_index(groups.keys());
        let path = index::write_index(out_dir, &entries)?;
        println!("  Created {} with {} semesters", display_name(&path), entries.len());
        summary.index = Some(path);
    }

    Ok(summary)
}

/// Serialise the group's events (not the key) as `{year}_{season}_events.json`.
pub fn write_group(dir: &Path, group: &SemesterGroup) -> Result<PathBuf> {
    let path = dir.join(group.key.file_name());
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &group.events)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(path)
}

fn read_page(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
