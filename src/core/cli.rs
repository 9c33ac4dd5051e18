//! Command line interface for ghht
//!
//! Handles parsing command line arguments and provides validation for
//! user inputs before any font is loaded or any commit is made.

use crate::geometry::RasterStrategy;
use clap::Parser;
use std::path::{Path, PathBuf};

/// ghht CLI arguments
///
/// Examples:
///   ghht "hello" 2024 --font-file tiny.ufo --debug       # List squares and dates
///   ghht "hello" 2024 --font-file tiny.ufo --sink ./art  # Commit into ./art
///   ghht "hi" 2024 --sink ./art --intensity 4            # Darker squares
///   ghht "hi" 2024 --sink ./art --skip-list holidays.txt # Leave some days empty
///   ghht --new-config                                    # Write default settings
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "ghht",
    version,
    about = "Paint text onto a commit activity heatmap",
    long_about = "ghht rasterizes the glyphs of a UFO, TrueType or OpenType font onto the 7-row weekly grid of a commit activity heatmap and turns every painted square into a dated commit. Text that does not fit into one year continues in the year before."
)]
pub struct CliArgs {
    /// Text to render on the heatmap
    #[clap(help = "Text to render on the commit heatmap")]
    pub text: Option<String>,

    /// Year of the first (newest) heatmap
    #[clap(help = "Year for the first commit; long text spills into earlier years")]
    pub start_year: Option<i32>,

    /// Git repository receiving the generated commits
    #[clap(
        long = "sink",
        short = 's',
        help = "Path to a git repository to be used for generating commits",
        long_help = "Path to a git repository to be used for generating commits. The directory is initialized with `git init` if it has no .git directory. Required unless --debug is given."
    )]
    pub sink: Option<PathBuf>,

    /// Font providing the glyph outlines
    #[clap(
        long = "font-file",
        short = 'f',
        help = "UFO, TTF or OTF font to take glyph outlines from",
        long_help = "Path to a UFO font directory or a TrueType/OpenType file. Overrides \
                     font_file from the settings file. Without either, a built-in 5-row \
                     pixel font is used."
    )]
    pub font_file: Option<PathBuf>,

    #[clap(
        long = "background",
        help = "Generate a single commit on every day of the start year to paint a background"
    )]
    pub background: bool,

    #[clap(
        long = "debug",
        help = "Print squares and dates instead of generating commits"
    )]
    pub debug: bool,

    #[clap(
        long = "intensity",
        short = 'i',
        help = "How many commits to generate for every text square"
    )]
    pub intensity: Option<u32>,

    #[clap(
        long = "skip-list",
        help = "File of yyyy-mm-dd lines for dates that should not have a commit"
    )]
    pub skip_list: Option<PathBuf>,

    #[clap(
        long = "px-step",
        help = "Font units per heatmap square",
        long_help = "Font units per heatmap square. Glyph coordinates are floor-divided by this value. Defaults to 200."
    )]
    pub px_step: Option<u32>,

    #[clap(
        long = "line-height",
        help = "Font-wide glyph height in squares",
        long_help = "Font-wide glyph height in squares, used to flip glyph rows top-down. Defaults to the font's cap height (or ascender) divided by px-step, else the tallest glyph."
    )]
    pub line_height: Option<i32>,

    #[clap(
        long = "per-glyph-height",
        help = "Flip each glyph by its own top instead of one font-wide height",
        long_help = "Flip each glyph by its own top instead of one font-wide height. Glyphs of different heights are then aligned at the top row rather than sharing a baseline."
    )]
    pub per_glyph_height: bool,

    /// Rasterization strategy
    ///
    /// Available strategies: flood-fill (default), even-odd.
    #[clap(
        long = "raster",
        help = "Rasterization strategy",
        long_help = "Rasterization strategy. Available strategies: flood-fill (default), even-odd"
    )]
    pub raster: Option<String>,

    /// Write ~/.config/ghht/settings.json and the logs directory, then exit
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings"
    )]
    pub new_config: bool,

    #[clap(long = "verbose", short = 'v', help = "Log debug output")]
    pub verbose: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// Checks that paths exist and numbers are in range, so that mistakes
    /// surface before any commit is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        if self.text.is_none() {
            return Err("Missing TEXT argument".to_string());
        }
        if self.start_year.is_none() {
            return Err("Missing START_YEAR argument".to_string());
        }

        if self.sink.is_none() && !self.debug {
            return Err("Either --sink or --debug must be given".to_string());
        }

        if let Some(path) = &self.font_file {
            if !path.exists() {
                return Err(format!(
                    "Font file does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
            if path.is_dir() {
                if !path.join("metainfo.plist").exists() {
                    return Err(format!(
                        "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
                        path.display()
                    ));
                }
            } else if !has_outline_font_extension(path) {
                return Err(format!(
                    "Unsupported font file: {}\nUse a UFO directory or a .ttf/.otf file.",
                    path.display()
                ));
            }
        }

        if let Some(path) = &self.sink {
            if path.exists() && !path.is_dir() {
                return Err(format!("Sink is not a directory: {}", path.display()));
            }
        }

        if let Some(path) = &self.skip_list {
            if !path.is_file() {
                return Err(format!("Skip list does not exist: {}", path.display()));
            }
        }

        if self.intensity == Some(0) {
            return Err("Intensity must be at least 1".to_string());
        }
        if self.px_step == Some(0) {
            return Err("px-step must be at least 1".to_string());
        }
        if matches!(self.line_height, Some(h) if h <= 0) {
            return Err("line-height must be positive".to_string());
        }

        if let Some(name) = &self.raster {
            name.parse::<RasterStrategy>()?;
        }

        Ok(())
    }

    /// Rasterization strategy from the CLI, if one was given and valid
    pub fn raster_strategy(&self) -> Option<RasterStrategy> {
        self.raster.as_deref().and_then(|name| name.parse().ok())
    }
}

/// TrueType and OpenType files, by extension
fn has_outline_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
}
