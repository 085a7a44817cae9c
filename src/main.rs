//! tagnotes - CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagnotes::changelog::{WriteOptions, update_changelog};
use tagnotes::config::{Config, resolve_changelog_path, resolve_project_name};
use tagnotes::{GitRepository, prepare_release};

/// Update CHANGELOG.md with a categorized section for a new release tag.
#[derive(Parser, Debug)]
#[command(name = "tagnotes")]
#[command(about = "Update CHANGELOG.md with a categorized section for a new release tag")]
#[command(version)]
struct Cli {
    /// Tag of the new release (e.g. v1.2.3)
    tag: String,

    /// End of commit range (defaults to HEAD)
    #[arg(long, default_value = "HEAD")]
    to: String,

    /// Path to changelog file [default: $TAGNOTES_CHANGELOG or CHANGELOG.md]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Project name for the header of a new changelog [default: $TAGNOTES_PROJECT]
    #[arg(long)]
    project_name: Option<String>,

    /// Print the release section without writing
    #[arg(long)]
    dry_run: bool,

    /// Replace an existing section for the same tag
    #[arg(long)]
    force: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            tag: self.tag,
            to: self.to,
            changelog_path: resolve_changelog_path(self.output),
            project_name: resolve_project_name(self.project_name),
            dry_run: self.dry_run,
            force: self.force,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported as errors by clap but are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_tracing(cli.verbose);

    match run(cli.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`, `debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: Config) -> Result<()> {
    println!("🔍 Updating changelog for release: {}", config.tag);

    // Step 1: Preflight checks
    let repo = GitRepository::discover(Path::new(".")).context(
        "Not in a git repository. Run tagnotes from the root of your git repository.",
    )?;
    repo.ensure_has_commits()
        .context("Cannot build a changelog")?;

    // Step 2: Collect commits since the previous tag
    let release = prepare_release(&repo, &config.tag, &config.to);
    match &release.range.from {
        Some(from) => println!(
            "Found {} commits since last tag: {}",
            release.commits.len(),
            from
        ),
        None => println!("Found {} commits (first release)", release.commits.len()),
    }

    // Step 3: Render
    let section = release.render();

    if config.dry_run {
        println!("\n--- Dry Run Output ---\n");
        print!("{}", section);
        return Ok(());
    }

    // Step 4: Splice into the changelog
    let options = WriteOptions {
        force: config.force,
        project_name: config.project_name.clone(),
    };
    let summary = update_changelog(&config.changelog_path, &section, &config.tag, &options)
        .with_context(|| format!("Failed to update {}", config.changelog_path.display()))?;

    let verb = if summary.created { "created" } else { "updated" };
    println!("✅ {} {} successfully!", config.changelog_path.display(), verb);
    if summary.replaced_existing {
        println!("   - Replaced existing section for {}", config.tag);
    } else {
        println!("   - Added release section for {}", config.tag);
    }
    println!("   - Processed {} commits", release.commits.len());
    for (category, count) in release.section().count_by_category() {
        println!("     {}: {}", category.key(), count);
    }
    println!("   - Release date: {}", release.date.format("%Y-%m-%d"));
    if let Some(backup) = &summary.backup_path {
        println!("   - Backup: {}", backup.display());
    }

    Ok(())
}
