//! glyphclock: a desktop clock drawn from per-digit animation frames.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use glyphclock_engine::logging::{init_logging, LoggingConfig};
use glyphclock_engine::paint::Color;
use glyphclock_face::{ClockApplication, ClockConfig, DEFAULT_FRAME_COUNT, MAX_FRAME_COUNT};

#[derive(Parser, Debug)]
#[command(
    name = "glyphclock",
    about = "Animated clock face built from per-symbol glyph frames",
    version,
)]
struct Cli {
    /// Directory with one folder per symbol (0-9, colon, space, A, P)
    #[arg(long, default_value = "letters")]
    glyphs: PathBuf,

    /// Animation frames per symbol
    #[arg(
        long,
        default_value_t = DEFAULT_FRAME_COUNT,
        value_parser = clap::value_parser!(u32).range(1..=MAX_FRAME_COUNT as i64),
    )]
    frames: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 67, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Width each glyph is scaled to, in pixels
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u32).range(1..=8192))]
    glyph_width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 240.0)]
    height: f64,

    /// Window title
    #[arg(long, default_value = "glyphclock")]
    title: String,

    /// Background color as #rrggbb or #rrggbbaa
    #[arg(long, default_value = "#101010", value_parser = parse_color)]
    background: Color,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    fn into_config(self) -> ClockConfig {
        ClockConfig {
            title: self.title,
            glyph_root: self.glyphs,
            glyph_folders: Vec::new(),
            frame_count: self.frames,
            tick_interval: Duration::from_millis(self.interval_ms),
            glyph_width: self.glyph_width,
            window_height: self.height,
            background: self.background,
        }
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_hex(s).ok_or_else(|| format!("expected #rrggbb or #rrggbbaa, got {s:?}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::with_level(cli.log_level()));

    let config = cli.into_config();
    log::debug!("{config:?}");

    ClockApplication::from_config(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["glyphclock"]).unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Info);

        let config = cli.into_config();
        assert_eq!(config, ClockConfig::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "glyphclock",
            "--glyphs", "/srv/glyphs",
            "--frames", "4",
            "--interval-ms", "100",
            "--glyph-width", "64",
            "--background", "#ff0000",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Trace);

        let config = cli.into_config();
        assert_eq!(config.glyph_root, PathBuf::from("/srv/glyphs"));
        assert_eq!(config.frame_count, 4);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.glyph_width, 64);
        assert_eq!(config.background, Color::from_srgb_u8(255, 0, 0, 255));
    }

    #[test]
    fn zero_frames_and_interval_are_rejected() {
        assert!(Cli::try_parse_from(["glyphclock", "--frames", "0"]).is_err());
        assert!(Cli::try_parse_from(["glyphclock", "--frames", "4294967295"]).is_err());
        assert!(Cli::try_parse_from(["glyphclock", "--frames", "1025"]).is_err());
        assert!(Cli::try_parse_from(["glyphclock", "--frames", "1024"]).is_ok());
        assert!(Cli::try_parse_from(["glyphclock", "--interval-ms", "0"]).is_err());
        assert!(Cli::try_parse_from(["glyphclock", "--background", "red"]).is_err());
    }
}
