use anyhow::{Context, Result};
use clap::Parser;
use field_simulation::FieldParams;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hero-field",
    version,
    about = "Animated particle field behind the DataGlimpse hero banner"
)]
pub struct Cli {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1440)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Seed for particle placement (random when omitted)
    #[arg(long, env = "HERO_FIELD_SEED")]
    pub seed: Option<u64>,

    /// TOML file overriding field parameters
    #[arg(long, value_name = "FILE", env = "HERO_FIELD_PARAMS")]
    pub params: Option<PathBuf>,

    /// Print the effective field parameters as TOML and exit
    #[arg(long)]
    pub dump_params: bool,

    /// Length of the virtual page, in viewport heights, for scroll progress
    #[arg(long, default_value_t = 4.0)]
    pub page_heights: f32,

    /// Draw only the particle field, without the hero overlay
    #[arg(long)]
    pub no_overlay: bool,

    /// Run this many frames without a window and print statistics
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u64>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Defaults, overridden by the `--params` file when one is given
    pub fn load_params(&self) -> Result<FieldParams> {
        let Some(path) = &self.params else {
            return Ok(FieldParams::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let params = FieldParams::from_toml_str(&text)
            .with_context(|| format!("invalid field parameters in {}", path.display()))?;

        log::info!("loaded field parameters from {}", path.display());
        Ok(params)
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, true) => Some(log::LevelFilter::Error),
            (0, false) => None,
            (1, _) => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hero-field"]).unwrap();
        assert_eq!((cli.width, cli.height), (1440, 900));
        assert!(cli.params.is_none());
        assert!(cli.headless.is_none());
        assert!(!cli.no_overlay);
        assert_eq!(cli.log_level(), None);
        assert_eq!(cli.load_params().unwrap(), FieldParams::default());
    }

    #[test]
    fn test_headless_with_seed() {
        let cli =
            Cli::try_parse_from(["hero-field", "--headless", "120", "--seed", "7", "-vv"]).unwrap();
        assert_eq!(cli.headless, Some(120));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.log_level(), Some(log::LevelFilter::Trace));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["hero-field", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["hero-field", "-q"]).unwrap();
        assert_eq!(cli.log_level(), Some(log::LevelFilter::Error));
    }

    #[test]
    fn test_params_file() {
        let path = std::env::temp_dir().join(format!("hero-field-{}.toml", std::process::id()));
        std::fs::write(&path, "link_distance = 90.0\nmax_speed = 1.2\n").unwrap();

        let cli = Cli::try_parse_from(["hero-field", "--params", path.to_str().unwrap()]).unwrap();
        let params = cli.load_params().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(params.link_distance, 90.0);
        assert_eq!(params.max_speed, 1.2);
        assert_eq!(params.pointer_radius, FieldParams::default().pointer_radius);
    }

    #[test]
    fn test_missing_params_file_is_an_error() {
        let cli = Cli::try_parse_from(["hero-field", "--params", "/nonexistent/field.toml"]).unwrap();
        let err = cli.load_params().unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
