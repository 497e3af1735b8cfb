//! Command-line interface for tokengen
//! This binary turns JSON token sources into per-platform artifacts.
//!
//! Usage:
//!   tokengen build [--config `<config>`] [--out `<dir>`] [sources...]  - Run the full pipeline
//!   tokengen resolve [--config `<config>`] [sources...]              - Print the normalized merged tree
//!   tokengen list-platforms                                        - List all emit targets

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Arg, Command};
use tokengen::pipeline::{BuildConfig, PipelineExecutor};

fn main() {
    env_logger::init();

    let matches = Command::new("tokengen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A build pipeline for design tokens")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("build")
                .about("Merge sources and write all platform artifacts")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Path to a JSON or YAML build config"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Output directory (overrides the config)"),
                )
                .arg(
                    Arg::new("sources")
                        .help("Token source files, merged in order (override the config)")
                        .num_args(0..),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the merged, normalized token tree as JSON")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Path to a JSON or YAML build config"),
                )
                .arg(
                    Arg::new("sources")
                        .help("Token source files, merged in order (override the config)")
                        .num_args(0..),
                ),
        )
        .subcommand(Command::new("list-platforms").about("List available emit targets"))
        .get_matches();

    let result = match matches.subcommand() {
        Some(("build", build_matches)) => handle_build_command(
            build_matches.get_one::<String>("config"),
            build_matches.get_one::<String>("out"),
            build_matches.get_many::<String>("sources"),
        ),
        Some(("resolve", resolve_matches)) => handle_resolve_command(
            resolve_matches.get_one::<String>("config"),
            resolve_matches.get_many::<String>("sources"),
        ),
        Some(("list-platforms", _)) => handle_list_platforms_command(),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config<'a>(
    config_path: Option<&String>,
    sources: Option<impl Iterator<Item = &'a String>>,
) -> anyhow::Result<BuildConfig> {
    let mut config = match config_path {
        Some(path) => BuildConfig::load(Path::new(path))
            .with_context(|| format!("loading config '{path}'"))?,
        None => BuildConfig::default(),
    };
    if let Some(sources) = sources {
        let overrides: Vec<PathBuf> = sources.map(PathBuf::from).collect();
        if !overrides.is_empty() {
            config.sources = overrides;
        }
    }
    Ok(config)
}

fn handle_build_command<'a>(
    config_path: Option<&String>,
    out: Option<&String>,
    sources: Option<impl Iterator<Item = &'a String>>,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path, sources)?;
    if let Some(out) = out {
        config.out_dir = PathBuf::from(out);
    }
    let executor = PipelineExecutor::from_config(&config);
    let report = executor.run(&config)?;
    println!(
        "Generated {} files from {} tokens and {} text styles in {}",
        report.files.len(),
        report.token_count,
        report.text_style_count,
        config.out_dir.display()
    );
    Ok(())
}

fn handle_resolve_command<'a>(
    config_path: Option<&String>,
    sources: Option<impl Iterator<Item = &'a String>>,
) -> anyhow::Result<()> {
    let config = load_config(config_path, sources)?;
    let executor = PipelineExecutor::from_config(&config);
    let resolved = executor.resolve_only(&config)?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn handle_list_platforms_command() -> anyhow::Result<()> {
    let executor = PipelineExecutor::from_config(&BuildConfig::default());
    println!("Available platforms:\n");
    for name in executor.registry().list_platforms() {
        let description = executor
            .registry()
            .get(&name)
            .map(|e| e.description().to_string())
            .unwrap_or_default();
        println!("  {name}");
        if !description.is_empty() {
            println!("    {description}");
        }
    }
    Ok(())
}
