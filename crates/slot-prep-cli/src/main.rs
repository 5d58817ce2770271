// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod tables;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slot_prep_gen::{
    builder::ScenarioBuilder, config::GeneratorConfig, framework::expand_sessions,
    weights::generate_flights,
};
use slot_prep_model::loader::TableLoader;
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slot-prep")]
#[command(about = "Prepare slot-assignment optimizer input and synthetic benchmark scenarios")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert margin and parameter tables into optimizer flight JSON
    Convert {
        /// Margins table, one row per flight
        margins: PathBuf,

        /// Optimization parameter table, one row per session
        params: PathBuf,

        /// Output JSON file; prints to stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write per-flight weight tables, one directory per session
        #[arg(long)]
        tables_dir: Option<PathBuf>,
    },

    /// Read a weight-table directory back into flight JSON
    Tables {
        /// Session directory written by `convert --tables-dir`
        dir: PathBuf,

        /// Output JSON file; prints to stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate synthetic benchmark sessions from a JSON configuration
    Generate {
        /// Generator configuration (JSON)
        config: PathBuf,

        /// Output directory; defaults to the configuration's directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Seed for priority sampling; drawn from the OS when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() {
    enable_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Convert {
            margins,
            params,
            out,
            tables_dir,
        } => convert(&margins, &params, out.as_deref(), tables_dir.as_deref()),
        Command::Tables { dir, out } => read_tables(&dir, out.as_deref()),
        Command::Generate {
            config,
            out_dir,
            seed,
        } => generate(&config, out_dir.as_deref(), seed),
    }
}

fn convert(
    margins_path: &Path,
    params_path: &Path,
    out: Option<&Path>,
    tables_dir: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let loader = TableLoader::new();
    let margins = loader.margins_from_path(margins_path)?;
    let sessions = loader.parameters_from_path(params_path)?;
    tracing::info!(
        "Read {} margin entries and {} optimization session(s) from {}",
        margins.len(),
        sessions.len(),
        margins_path.display()
    );

    let mut flight_lists = Vec::with_capacity(sessions.len());
    for params in &sessions {
        let flights = generate_flights(&margins, params)?;
        if let Some(dir) = tables_dir {
            tables::write_weight_tables(&dir.join(params.opt_id()), &margins, &flights, params)?;
        }
        flight_lists.push(flights);
    }

    emit(out, serde_json::to_string_pretty(&flight_lists)?)
}

fn read_tables(dir: &Path, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let flights = tables::read_weight_tables(dir)?;
    tracing::info!("Read {} flight(s) from {}", flights.len(), dir.display());
    emit(out, serde_json::to_string_pretty(&flights)?)
}

fn generate(
    config_path: &Path,
    out_dir: Option<&Path>,
    seed: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    tracing::info!("Generating test data from {}", config_path.display());
    let raw = fs::read_to_string(config_path)?;
    let config: GeneratorConfig = serde_json::from_str(&raw)?;
    let config = config.normalized();

    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    let mut builder = ScenarioBuilder::new(rng);
    let base = builder.build(&config)?;

    let out_dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| config_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)?;
    let stem = config_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scenario");

    let sessions = expand_sessions(&base, config.max_time);
    let count = sessions.len();
    for session in sessions {
        let path = out_dir.join(format!("{}{}.json", stem, session.file_tag));
        fs::write(&path, serde_json::to_string_pretty(&session.document)?)?;
        tracing::info!("Wrote {}", path.display());
    }
    tracing::info!("Wrote {count} session file(s) to {}", out_dir.display());
    Ok(())
}

fn emit(out: Option<&Path>, json: String) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => {
            fs::write(path, json)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
