mod cli;

use spinless::{
    applier::Applier,
    config::{self, locations, persist, Config},
    report,
    scanner::{ScanResult, Scanner},
    worker::{self, ScanEvent, ScanTask},
};
use spinless_common::{Environment, NfoProbe, SystemEnvironment};
use spinless_db::pool::{open_texture_pool, open_video_pool};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SelectionArgs};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "spinless=debug,spinless_db=debug,spinless_common=debug".to_string()
        } else {
            "spinless=info,spinless_db=warn,spinless_common=warn".to_string()
        }
    });

    // Reports go to stdout, so logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let env: Arc<dyn Environment> = Arc::new(SystemEnvironment);

    match cli.command {
        Commands::Scan {
            selection,
            preview,
            json,
        } => run_scan(env, cli.config.as_deref(), &selection, preview, json, false),
        Commands::Apply { selection, preview } => {
            run_scan(env, cli.config.as_deref(), &selection, preview, false, true)
        }
        Commands::Locate => locate(env.as_ref(), cli.config.as_deref()),
        Commands::Init { path, force } => {
            init_config(path.as_deref().or(cli.config.as_deref()), force, env.as_ref())
        }
        Commands::Validate { config } => {
            validate_config(config.as_deref().or(cli.config.as_deref()), env.as_ref())
        }
        Commands::Version => {
            println!("spinless {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_scan(
    env: Arc<dyn Environment>,
    config_path: Option<&Path>,
    selection: &SelectionArgs,
    preview: usize,
    json: bool,
    apply: bool,
) -> Result<()> {
    let config_file = config::find_config(config_path, env.as_ref());
    let config = match &config_file {
        Some(path) if path.exists() => config::load_config(path)?,
        _ => Config::default(),
    };

    let policy = selection.apply_to(&config.selection);
    if policy.is_empty() {
        tracing::warn!("Neither movies nor TV shows are selected");
    }

    if selection.save {
        let target = config_file
            .or_else(|| config::user_config_path(env.as_ref()))
            .context("No location to save the configuration to")?;
        persist::update_selection(&target, &policy)?;
        tracing::info!("Saved selection to {:?}", target);
    }

    let video_db = resolve_database(
        selection.video_db.as_ref().or(config.databases.video.as_ref()),
        env.as_ref(),
        locations::VIDEO_DB_PREFIX,
        "--video-db",
    )?;
    let texture_db = resolve_database(
        selection
            .texture_db
            .as_ref()
            .or(config.databases.textures.as_ref()),
        env.as_ref(),
        locations::TEXTURE_DB_PREFIX,
        "--texture-db",
    )?;

    let video_pool = open_video_pool(&video_db)
        .with_context(|| format!("Failed to open video database {:?}", video_db))?;
    let texture_pool = open_texture_pool(&texture_db)
        .with_context(|| format!("Failed to open texture database {:?}", texture_db))?;

    if !json {
        println!("Spinless v{}", env!("CARGO_PKG_VERSION"));
        println!("{}", report::rule());
        println!();
        if !apply {
            println!("DRY RUN - No changes will be made");
            println!("Use `spinless apply` to actually update the database");
            println!();
        }
        println!("{}", report::settings(&video_db, &texture_db, &policy));
    }

    let scanner = Scanner::new(video_pool, texture_pool.clone(), NfoProbe::new(env));
    let rt = tokio::runtime::Runtime::new()?;

    let scan_policy = policy.clone();
    let result: ScanResult =
        rt.block_on(async { drain(worker::spawn_scan(scanner, scan_policy), !json).await })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if result.textures_to_update.is_empty() {
        println!("All textures already up to date. Nothing to do.");
        return Ok(());
    }

    print!("{}", report::preview(&result.textures_to_update, preview));
    println!();
    print!("{}", report::summary(&result, &policy));
    println!();

    if apply {
        let applier = Applier::new(texture_pool, texture_db.display().to_string());
        let updates = result.textures_to_update;
        rt.block_on(async { drain(worker::spawn_apply(applier, updates), true).await })?;
        println!();
        println!("Done!");
    } else {
        println!("{}", report::rule());
        println!("DRY RUN COMPLETE - No changes made");
        println!("Run `spinless apply` to update the database");
        println!("{}", report::rule());
    }

    Ok(())
}

/// Print a task's log lines as they arrive, then return its result.
async fn drain<T>(mut task: ScanTask<T>, print: bool) -> Result<T> {
    while let Some(event) = task.next_event().await {
        match event {
            ScanEvent::Log(line) if print => println!("{}", line),
            ScanEvent::Log(_) => {}
            ScanEvent::Progress(progress) => tracing::debug!("{}", progress.message),
        }
    }
    Ok(task.wait().await?)
}

fn resolve_database(
    configured: Option<&PathBuf>,
    env: &dyn Environment,
    prefix: &str,
    flag: &str,
) -> Result<PathBuf> {
    if let Some(path) = configured {
        return Ok(path.clone());
    }
    let found = locations::find_database(env, prefix).with_context(|| {
        format!(
            "No {}*.db found in the usual Kodi folders. Pass {} to point at it",
            prefix, flag
        )
    })?;
    tracing::info!("Using {:?}", found);
    Ok(found)
}

fn locate(env: &dyn Environment, config_path: Option<&Path>) -> Result<()> {
    println!("Kodi database folders:");
    for dir in locations::kodi_database_dirs(env) {
        let marker = if dir.is_dir() { "✓" } else { "✗" };
        println!("  {} {}", marker, dir.display());
    }
    println!();

    for prefix in [locations::VIDEO_DB_PREFIX, locations::TEXTURE_DB_PREFIX] {
        match locations::find_database(env, prefix) {
            Some(path) => println!("{}: {}", prefix, path.display()),
            None => println!("{}: not found", prefix),
        }
    }
    println!();

    match config::find_config(config_path, env) {
        Some(path) => println!("Config: {}", path.display()),
        None => println!("Config: none (using defaults)"),
    }
    Ok(())
}

fn init_config(path: Option<&Path>, force: bool, env: &dyn Environment) -> Result<()> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => config::user_config_path(env)
            .context("No location to write the configuration to")?,
    };
    if target.exists() && !force {
        anyhow::bail!("{:?} already exists. Pass --force to overwrite it", target);
    }

    persist::save_config(&target, &Config::default())?;
    println!("Wrote default config to {}", target.display());
    Ok(())
}

fn validate_config(path: Option<&Path>, env: &dyn Environment) -> Result<()> {
    let config = match config::find_config(path, env) {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(&p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file found, using defaults");
            Config::default()
        }
    };

    let selection = &config.selection;
    println!("  Movies: {}", selection.include_movies);
    println!("  TV shows: {}", selection.include_tvshows);
    println!("    Seasons: {}", selection.include_seasons);
    println!("    Episodes: {}", selection.include_episodes);
    println!("    NFO logic: {}", selection.episode_nfo_logic);
    println!("  Update all local: {}", selection.update_all_local);

    for (label, path) in [
        ("Video DB", &config.databases.video),
        ("Texture DB", &config.databases.textures),
    ] {
        match path {
            Some(p) => println!("  {}: {}", label, p.display()),
            None => println!("  {}: auto-detect", label),
        }
    }

    Ok(())
}
