use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
pub struct Args {
    /// Optional TOML file overriding the default game rules.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed for the tile-spawn RNG (entropy-seeded if omitted).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Host interface to bind (default 0.0.0.0).
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Optional tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    pub log: String,
}
