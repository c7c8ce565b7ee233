use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use entry_chunk::{
    find_reexports, load_config, parse_chunk_groups, resolve_pathbuf, warn, ChunkOptions,
    EntryChunkPlugin, Entry, EntryDescriptor, EntryMap, EntryValue, Exclude, ImportSource,
    Minify, Mode,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// entry-chunk: split barrel entries into per-group chunk entries
#[derive(Parser, Debug)]
#[command(
    name = "entry-chunk",
    version,
    about = "Split re-export entry files into chunk entries"
)]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate chunk files and print the resulting entry map as JSON
    Split(SplitCmd),
    /// List the re-export statements recognised in a file
    Scan(ScanCmd),
}

#[derive(Parser, Debug)]
struct SplitCmd {
    /// Base directory relative entry paths resolve against
    #[arg(long, value_name = "DIR")]
    context: Option<PathBuf>,

    /// Entry source as KEY=PATH; repeat a key to give it several imports
    #[arg(long = "entry", value_name = "KEY=PATH", action = ArgAction::Append)]
    entries: Vec<String>,

    /// Chunk group rule, e.g. name=vendor,modules=Button|Modal (no modules: catch-all)
    #[arg(long = "chunk", value_name = "RULE", action = ArgAction::Append)]
    chunks: Vec<String>,

    /// add (default), replace, or none
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Also register `<name>.min` entries
    #[arg(long, value_enum)]
    min: Option<Minify>,

    /// Glob over entry paths to leave untouched
    #[arg(long = "exclude", value_name = "GLOB", action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Entry key to leave untouched
    #[arg(long = "exclude-name", value_name = "KEY", action = ArgAction::Append)]
    exclude_names: Vec<String>,

    /// Write the entry map here instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to config file; if omitted, auto-discovers entry-chunk.{toml,yaml,yml,json}
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ScanCmd {
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match cli.command {
        Commands::Split(cmd) => run_split(cmd),
        Commands::Scan(cmd) => run_scan(cmd),
    }
}

// Warnings already get their own coloured stderr line.
const QUIET_WARNINGS: &str = "entry_chunk::diagnostics=off";

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(format!("entry_chunk=debug,{QUIET_WARNINGS}"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("entry_chunk=info,{QUIET_WARNINGS}")))
    };
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn run_split(cli: SplitCmd) -> Result<()> {
    let loaded = load_config(cli.config.as_deref())?;
    let base = loaded.dir.as_deref();

    // Effective options: config < env < CLI (CLI overrides).
    let mode = match (cli.mode, loaded.cfg.mode.as_deref()) {
        (Some(m), _) => m,
        (None, Some(s)) => match s.parse::<Mode>() {
            Ok(m) => m,
            Err(w) => {
                warn(&w);
                return Ok(());
            }
        },
        (None, None) => Mode::default(),
    };
    let min = cli.min.or(loaded.cfg.min).unwrap_or_default();

    let groups = if !cli.chunks.is_empty() {
        parse_chunk_groups(&cli.chunks)?
    } else {
        loaded.cfg.groups.clone().unwrap_or_default()
    };

    let patterns: Vec<String> = if !cli.exclude.is_empty() {
        cli.exclude.clone()
    } else {
        loaded.cfg.exclude.clone().unwrap_or_default()
    };
    let names: Vec<String> = if !cli.exclude_names.is_empty() {
        cli.exclude_names.clone()
    } else {
        loaded.cfg.exclude_names.clone().unwrap_or_default()
    };
    let exclude = Exclude::none().with_names(names).with_patterns(&patterns)?;

    let context: PathBuf = match (&cli.context, loaded.cfg.context.as_deref()) {
        (Some(c), _) => c.clone(),
        (None, Some(c)) => resolve_pathbuf(base, c),
        (None, None) => match base {
            Some(b) => b.to_path_buf(),
            None => std::env::current_dir()?,
        },
    };

    let mut entry = if !cli.entries.is_empty() {
        Entry::Map(parse_entry_flags(&cli.entries)?)
    } else {
        Entry::from_value(loaded.cfg.entry.clone().unwrap_or_default())
    };

    let output_path: Option<PathBuf> = if let Some(o) = &cli.output {
        Some(o.clone())
    } else {
        loaded
            .cfg
            .output
            .as_deref()
            .map(|s| resolve_pathbuf(base, s))
    };

    let options = ChunkOptions::new(groups)
        .with_mode(mode)
        .with_min(min)
        .with_exclude(exclude);
    let plugin = EntryChunkPlugin::new(options);
    tracing::debug!(options = ?plugin.options(), context = %context.display(), "effective options");
    let report = plugin.apply(&context, &mut entry)?;
    if report.aborted() {
        return Ok(());
    }
    tracing::info!(
        sources = report.sources.len(),
        chunks = report.chunks.len(),
        registered = report.registered.len(),
        "entry chunks generated"
    );

    let json = serde_json::to_string_pretty(&entry)?;
    match output_path {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out_path, json + "\n")
                .with_context(|| format!("failed to write entry map to {}", out_path.display()))?;
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn parse_entry_flags(flags: &[String]) -> Result<EntryMap> {
    let mut map = EntryMap::new();
    for raw in flags {
        let (key, path) = raw
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("--entry expects KEY=PATH, got: {}", raw))?;
        let path = ImportSource::Path(path.trim().to_string());
        match map.get_mut(key.trim()) {
            Some(EntryValue::Descriptor(d)) => d.import.push(path),
            _ => {
                map.insert(
                    key.trim().to_string(),
                    EntryValue::Descriptor(EntryDescriptor {
                        import: vec![path],
                        extra: Default::default(),
                    }),
                );
            }
        }
    }
    Ok(map)
}

fn run_scan(cli: ScanCmd) -> Result<()> {
    let code = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read input: {}", cli.input.display()))?;
    let found = find_reexports(&code);
    if found.is_empty() {
        eprintln!("no re-export statements in {}", cli.input.display());
    }
    for r in found {
        println!(
            "{}:{}:{} {} -> {}",
            cli.input.display(),
            r.line,
            r.col,
            r.name,
            r.specifier
        );
    }
    Ok(())
}
