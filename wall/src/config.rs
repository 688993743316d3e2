use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use lights::{link, Timings};
use serde::Deserialize;
use url::Url;

use crate::state_store::PlaybackOptions;

const DEFAULT_BASE_URL: &str = "http://localhost:5173/";

#[derive(Parser, Debug)]
#[command(name = "wall", about = "Spell out messages on a wall of light bulbs")]
pub struct Args {
    /// Location to open the wall at. A share link plays its message right away
    #[arg(long, short)]
    pub location: Option<String>,
    /// TOML file with the wall settings
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// File to write logs to, the terminal is busy drawing the wall
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Settings read from the config file, every key is optional
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Location used when none is given on the command line, share links are built on it
    pub base_url: String,
    /// Wait before playing a message found in the location
    pub autoplay_delay_ms: u64,
    pub timings: Timings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            autoplay_delay_ms: 0,
            timings: Timings::default(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;

        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// The location to open, the command line one wins over the configured base url
    pub fn location(&self, from_args: Option<&str>) -> anyhow::Result<Url> {
        let raw = from_args.unwrap_or(&self.base_url);

        link::parse_location(raw).context("could not use the location")
    }

    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            timings: self.timings,
            autoplay_delay: Duration::from_millis(self.autoplay_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            r#"
            base_url = "https://wall.example/hawkins"
            autoplay_delay_ms = 1000

            [timings]
            letter_hold_ms = 500
            "#,
        )
        .unwrap();

        let options = config.playback_options();
        assert_eq!(options.autoplay_delay, Duration::from_secs(1));
        assert_eq!(options.timings.letter_hold, Duration::from_millis(500));
        assert_eq!(options.timings.flicker, Timings::default().flicker);
        assert_eq!(
            config.location(None).unwrap().as_str(),
            "https://wall.example/hawkins"
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("base = \"https://wall.example\"").is_err());
        assert!(toml::from_str::<Config>("[timings]\nhold = 1").is_err());
    }

    #[test]
    fn test_location_from_args_wins() {
        let config = Config::default();

        let location = config
            .location(Some("https://wall.example/?msg=T0s%3D"))
            .unwrap();
        assert_eq!(location.query(), Some("msg=T0s%3D"));

        assert_eq!(config.location(None).unwrap().as_str(), DEFAULT_BASE_URL);
        assert!(config.location(Some("nowhere")).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(Config::load(None).is_ok());
        assert!(Config::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["wall", "-l", "https://wall.example/", "--log-file", "wall.log"]);

        assert_eq!(args.location.as_deref(), Some("https://wall.example/"));
        assert_eq!(args.log_file, Some(PathBuf::from("wall.log")));
        assert!(args.config.is_none());
    }
}
