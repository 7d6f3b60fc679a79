//! Binary entrypoint: read a ScoreRequest from stdin, write a ScoreReport to stdout.
//!
//! With `--lines`, each input line is a ScoreRequest and each output line is
//! either a ScoreReport or an ErrorOutput. Blank lines produce no output.
//! Logs go to stderr so stdout stays pure JSON.

use std::io::{self, BufRead, Read, Write};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use safety_engine::normalize::parse_now;
use safety_engine::{Config, Engine, EngineError, ScoreRequest};

#[derive(Parser, Debug)]
#[command(
  name = "safety-engine",
  about = "Compute a 0-100 safety score from location-tagged incident reports",
  version
)]
struct Cli {
  /// Evaluation time (RFC 3339) for requests without their own `now`; defaults to the wall clock per request
  #[arg(long)]
  now: Option<String>,

  /// Include per-incident contributions and explanations
  #[arg(long)]
  breakdown: bool,

  /// Read one request per line and write one report per line
  #[arg(long)]
  lines: bool,

  /// Override SAFETY_ENGINE_MAX_INCIDENTS (0 = no cap)
  #[arg(long)]
  max_incidents: Option<usize>,
}

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "safety-engine error: {:#}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let mut config = Config::from_env().context("loading configuration")?;
  if let Some(cap) = cli.max_incidents {
    config.max_incidents = cap;
  }
  init_tracing(&config.log_filter);

  let cli_now = cli.now.as_deref().map(parse_now).transpose().context("--now")?;
  let engine = Engine::new(config);

  if cli.lines {
    run_lines(&engine, cli_now, cli.breakdown)
  } else {
    run_single(&engine, cli_now.unwrap_or_else(Utc::now), cli.breakdown)
  }
}

fn init_tracing(fallback_filter: &str) {
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(fallback_filter))
    .unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .with_ansi(false)
    .compact()
    .try_init();
}

fn run_single(engine: &Engine, now: DateTime<Utc>, breakdown: bool) -> anyhow::Result<()> {
  let mut raw = String::new();
  io::stdin()
    .lock()
    .read_to_string(&mut raw)
    .context("reading stdin")?;
  let request: ScoreRequest = serde_json::from_str(&raw).map_err(EngineError::from)?;

  let report = engine.evaluate(&request, now, breakdown)?;
  let json = serde_json::to_vec(&report)?;
  io::stdout().write_all(&json)?;
  Ok(())
}

fn run_lines(
  engine: &Engine,
  cli_now: Option<DateTime<Utc>>,
  breakdown: bool,
) -> anyhow::Result<()> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  for line in stdin.lock().lines() {
    let line = line.context("reading stdin")?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    match engine.evaluate_line(trimmed, cli_now, breakdown) {
      Ok(report) => serde_json::to_writer(&mut out, &report)?,
      Err(err) => serde_json::to_writer(&mut out, &err)?,
    }
    writeln!(out)?;
    out.flush()?;
  }

  Ok(())
}
