mod cli;

use anyhow::Context;
use bookmark_migrator::services::LinkExtractor;
use bookmark_migrator::{
    BookmarkLoader, BookmarkSource, Classification, DocumentWriter, FolderClassifier,
    MappingConfig, Migrator,
};
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Commands, MigrateArgs};
use std::path::Path;
use tracing::{error, info, Level};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Migrate(args) => handle_migrate_command(args, config, &cli.repo_root),
        Commands::Analyze(args) => handle_analyze_command(args, config),
    });

    if let Err(e) = result {
        error!("Operation failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MappingConfig> {
    match path {
        Some(path) => MappingConfig::load(path)
            .with_context(|| format!("Failed to load mapping config {}", path.display())),
        None => Ok(MappingConfig::default()),
    }
}

fn handle_migrate_command(args: &MigrateArgs, config: MappingConfig, repo_root: &Path) -> anyhow::Result<()> {
    let source = BookmarkLoader::load(&args.input)?;

    info!(
        "Starting migration into {}{}",
        repo_root.display(),
        if args.dry_run { " (dry run)" } else { "" }
    );

    let migrator = Migrator::new(FolderClassifier::new(config), DocumentWriter::new(repo_root))
        .with_dry_run(args.dry_run);
    let report = migrator.run(&source, &args.input.display().to_string());

    info!(
        "Migration finished: {} folders, {} saved ({} links), {} skipped, {} empty, {} failed",
        report.folders_found(),
        report.saved_count(),
        report.links_written(),
        report.skipped_count(),
        report.empty_count(),
        report.failed_count()
    );

    if let Some(json_path) = &args.json_report {
        let json_content = serde_json::to_string_pretty(&report)
            .context("Failed to serialize migration report")?;

        std::fs::write(json_path, json_content)
            .context("Failed to write JSON report file")?;

        info!("Migration report written to: {}", json_path.display());
    }

    Ok(())
}

fn handle_analyze_command(args: &AnalyzeArgs, config: MappingConfig) -> anyhow::Result<()> {
    let source = BookmarkLoader::load(&args.input)?;
    let classifier = FolderClassifier::new(config);
    let folders = source.list_folders();

    println!("\n=== Analysis for '{}' ===", args.input.display());
    println!("Folders found: {}", folders.len());

    let mut plan = Vec::with_capacity(folders.len());

    for folder in &folders {
        let classification = classifier.classify(&folder.name);
        let extracted = match classification {
            Classification::Skip => None,
            _ => source.links_for(folder).map(|list| LinkExtractor::extract(&list)),
        };

        let destination = match &classification {
            Classification::Skip => "skipped".to_string(),
            Classification::Mapped { path, pattern } => format!("{} (rule '{}')", path.display(), pattern),
            Classification::Unsorted { path } => format!("{} (unsorted)", path.display()),
        };
        let rows = extracted.as_ref().map(|e| e.rows.len()).unwrap_or(0);
        let dropped = extracted.as_ref().map(|e| e.dropped).unwrap_or(0);

        println!("  {} -> {}: {} links, {} dropped", folder.name, destination, rows, dropped);

        if args.detailed {
            if let Some(extracted) = &extracted {
                for row in &extracted.rows {
                    println!("      {}", row);
                }
            }
        }

        plan.push(serde_json::json!({
            "folder": folder.name,
            "classification": classification,
            "has_link_list": extracted.is_some(),
            "links": rows,
            "dropped": dropped,
        }));
    }

    // Write JSON output if requested
    if let Some(json_path) = &args.json_output {
        let json_content = serde_json::to_string_pretty(&serde_json::json!({
            "source": args.input.display().to_string(),
            "analyzed_at": chrono::Utc::now().to_rfc3339(),
            "folders": plan,
        }))
        .context("Failed to serialize analysis results")?;

        std::fs::write(json_path, json_content)
            .context("Failed to write JSON analysis file")?;

        info!("Analysis results written to: {}", json_path.display());
    }

    Ok(())
}
