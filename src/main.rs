mod events;
mod filename;
mod index;
mod jsonify;
mod parser;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use settings::Settings;

#[derive(Parser)]
#[command(
    name = "jsonifyer",
    about = "Convert semester schedule pages into per-semester JSON event lists"
)]
struct Cli {
    /// Directory holding the schedule pages (default: current directory)
    dir: Option<PathBuf>,
    /// Write JSON files here instead of next to the pages
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Also write index.json listing semesters, newest first
    #[arg(long)]
    index: bool,
    /// Skip unreadable pages instead of aborting
    #[arg(long)]
    keep_going: bool,
    /// Parse and report, write nothing
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn apply(self, settings: &mut Settings) {
        if let Some(dir) = self.dir {
            settings.input_dir = dir;
        }
        if let Some(out) = self.out_dir {
            settings.out_dir = Some(out);
        }
        settings.write_index |= self.index;
        settings.keep_going |= self.keep_going;
        settings.dry_run |= self.dry_run;
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    cli.apply(&mut settings);
    tracing::debug!(?settings, "settings loaded");

    let summary = jsonify::run(&settings)?;
    summary.print(settings.dry_run);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from(["jsonifyer", "pages", "-o", "site/events", "--index"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.input_dir, PathBuf::from("pages"));
        assert_eq!(settings.out_dir, Some(PathBuf::from("site/events")));
        assert!(settings.write_index);
        assert!(!settings.keep_going);
    }

    #[test]
    fn absent_flags_keep_loaded_values() {
        let cli = Cli::parse_from(["jsonifyer"]);
        let mut settings = Settings {
            keep_going: true,
            ..Settings::for_dir("from_env")
        };
        cli.apply(&mut settings);
        assert_eq!(settings.input_dir, PathBuf::from("from_env"));
        assert!(settings.keep_going);
    }
}
