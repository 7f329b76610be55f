//! Bouncing "dvd" rectangle with confetti on corner hits.

mod config;
mod engine;
mod font;
mod shapes;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use dvd_framework::logging::{init_logging, LoggingConfig};

use crate::config::{BounceConfig, DEFAULT_CONFIG_PATH};
use crate::engine::Engine;

#[derive(Debug, Parser)]
#[command(name = "dvd-bounce", version, about = "Bouncing rectangle demo")]
struct Cli {
    /// Enable GPU validation and debug logging.
    #[arg(long)]
    debug: bool,

    /// TOML settings file [default: ./dvd-bounce.toml if present]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Font used for the overlay text.
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Seed for confetti placement and colors.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn apply(self, config: &mut BounceConfig) {
        config.debug |= self.debug;
        if let Some(font) = self.font {
            config.font_path = Some(font);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

fn main() {
    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => BounceConfig::from_file(path),
        None => BounceConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };

    // Logging comes up before the config error is reported so it is not lost.
    let (filter, debug) = match &loaded {
        Ok(cfg) => (cfg.log_filter.clone(), cfg.debug || cli.debug),
        Err(_) => (None, cli.debug),
    };
    init_logging(LoggingConfig { env_filter: filter, debug, ..LoggingConfig::default() });

    let mut config = loaded?;
    cli.apply(&mut config);
    log::debug!("config: {config:?}");

    let debug = config.debug;
    let mut engine = Engine::new(config);
    engine.init_window(debug);
    engine.init_shaders()?;
    engine.init_shapes();
    engine.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from(["dvd-bounce", "--debug", "--seed", "9", "--font", "a.ttf"]);
        let mut cfg = BounceConfig { seed: Some(1), ..BounceConfig::default() };
        cli.apply(&mut cfg);
        assert!(cfg.debug);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.font_path, Some(PathBuf::from("a.ttf")));
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["dvd-bounce"]);
        let mut cfg = BounceConfig { debug: true, seed: Some(4), ..BounceConfig::default() };
        cli.apply(&mut cfg);
        assert!(cfg.debug);
        assert_eq!(cfg.seed, Some(4));
    }
}
