//! puyotui: a falling-pair colour-matching puzzle in the terminal.

mod app;
mod board;
mod config;
mod game;
mod input;
mod piece;
mod score;
mod theme;
mod ui;

use anyhow::{Context, Result, ensure};
use app::App;
use clap::{Parser, ValueEnum};
use config::Config;
use game::{Game, Phase};

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(
        args.tick_rate.is_finite() && args.tick_rate > 0.0,
        "tick rate must be a positive number, got {}",
        args.tick_rate
    );
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette)
        .context("failed to load theme")?;
    let mut game = Game::new(args.config()).context("invalid game configuration")?;
    if args.no_title {
        game.set_phase(Phase::Start);
    }
    let mut app = App::new(args, game, theme);
    app.run()?;
    Ok(())
}

/// Falling-pair colour-matching puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "puyotui",
    version,
    about = "Falling-pair colour-matching puzzle in the terminal. Connect four or more of a colour to pop them; chain pops for bonus score.",
    long_about = "puyotui is a terminal puzzle game in the falling-pair genre.\n\n\
        Pairs of coloured blobs fall into the well. Steer and rotate them; when a pair lands, \
        unsupported blobs drop. Four or more same-coloured blobs touching edge-to-edge pop. \
        Blobs above then fall and may pop again: each further pop is a chain worth more. \
        Empty the whole board with a chain for an all-clear bonus.\n\n\
        CONTROLS (normal):\n  Left/Right  Move    Up / x     Rotate CW   z          Rotate CCW\n  Down        Fast drop  Enter/Space Start/restart   P  Pause   Q / Esc  Quit\n\n\
        CONTROLS (vim):\n  h/l         Move    k          Rotate CW   u          Rotate CCW\n  j           Fast drop\n\n\
        Use --theme to load a btop-style theme (e.g. onedark.theme) and --seed for a repeatable colour sequence."
)]
pub struct Args {
    /// Board width in cells.
    #[arg(long, default_value = "6", value_name = "COLS")]
    pub cols: usize,

    /// Board height in cells.
    #[arg(long, default_value = "12", value_name = "ROWS")]
    pub rows: usize,

    /// Number of distinct colours (1-6).
    #[arg(short, long, default_value = "4", value_name = "N")]
    pub colors: u8,

    /// Milliseconds between automatic one-row drops.
    #[arg(long, default_value = "500", value_name = "MS")]
    pub drop_interval_ms: u32,

    /// Speed-up applied to the drop timer while fast drop is held.
    #[arg(long, default_value = "10", value_name = "N")]
    pub fast_drop_multiplier: u32,

    /// Fixed seed for a reproducible colour sequence.
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Simulation ticks per second.
    #[arg(long, default_value = "60.0", value_name = "RATE")]
    pub tick_rate: f64,

    /// Skip the title screen and start immediately.
    #[arg(long)]
    pub no_title: bool,

    /// Disable the erase fade (popped blobs vanish instantly).
    #[arg(long)]
    pub no_animation: bool,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            cols: self.cols,
            rows: self.rows,
            colors: self.colors,
            drop_interval_ms: self.drop_interval_ms,
            fast_drop_multiplier: self.fast_drop_multiplier,
            seed: self.seed,
            ..Config::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_match_default_config() {
        let args = Args::parse_from(["puyotui"]);
        assert_eq!(args.config(), Config::default());
        assert_eq!(args.palette, Palette::Normal);
    }

    #[test]
    fn test_args_build_config() {
        let args = Args::parse_from([
            "puyotui",
            "--cols",
            "8",
            "--rows",
            "14",
            "--colors",
            "5",
            "--seed",
            "42",
            "--palette",
            "colourblind",
        ]);
        let config = args.config();
        assert_eq!((config.cols, config.rows, config.colors), (8, 14, 5));
        assert_eq!(config.seed, Some(42));
        assert_eq!(args.palette, Palette::Colorblind);
    }

    #[test]
    fn test_bad_args_are_rejected_by_game() {
        let args = Args::parse_from(["puyotui", "--colors", "9"]);
        assert!(Game::new(args.config()).is_err());
    }
}
