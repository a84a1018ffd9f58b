use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use charpron_compile::compile;
use charpron_db::{
    CHARS_FILE, LoadMode, SourceTables, words_file, write_char_table, write_word_table,
};
use charpron_types::Dialect;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Parser)]
#[command(name = "charpron")]
#[command(about = "Compile the character and word pronunciation tables")]
struct Config {
    /// Directory holding the master, frequency and validation tables.
    #[arg(long, env = "CHARPRON_INPUT_DIR", default_value = ".")]
    input_dir: PathBuf,
    /// Where the compiled tables go; defaults to the input directory.
    #[arg(long, env = "CHARPRON_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
    #[arg(
        long,
        env = "CHARPRON_LOAD_MODE",
        default_value = "mmap",
        value_parser = parse_load_mode
    )]
    load_mode: LoadMode,
}

fn main() -> Result<()> {
    init_tracing();

    let config = Config::parse();
    let output_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| config.input_dir.clone());
    info!(
        "reading sources from {} (mode: {:?})",
        config.input_dir.display(),
        config.load_mode
    );

    let start = Instant::now();
    let sources = SourceTables::load_with_mode(&config.input_dir, config.load_mode)?;
    info!("sources loaded in {} ms", start.elapsed().as_millis());

    let compile_start = Instant::now();
    let compiled = compile(&sources);
    info!("compiled in {} ms", compile_start.elapsed().as_millis());

    let write_start = Instant::now();
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;
    write_char_table(output_dir.join(CHARS_FILE), &compiled.chars)?;
    for dialect in Dialect::TARGETS {
        let path = output_dir.join(words_file(dialect));
        let entries = compiled.word_entries(dialect);
        write_word_table(&path, &entries)?;
        info!("{}: {} words -> {}", dialect, entries.len(), path.display());
    }
    info!(
        "{} character rows written to {} in {} ms",
        compiled.chars.len(),
        output_dir.display(),
        write_start.elapsed().as_millis()
    );
    Ok(())
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Ok(LoadMode::Mmap),
        "owned" => Ok(LoadMode::Owned),
        other => Err(format!("unknown load mode `{other}` (expected mmap or owned)")),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
