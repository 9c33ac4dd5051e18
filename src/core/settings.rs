//! Resolved run settings
//!
//! Priority order for every value:
//! 1. CLI argument
//! 2. Config file setting (~/.config/ghht/settings.json)
//! 3. Built-in default

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::font_source::GlyphSourceOptions;
use crate::geometry::RasterStrategy;
use crate::layout::{LayoutOptions, Padding};
use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_PX_STEP: u32 = 200;
pub const DEFAULT_INTENSITY: u32 = 1;
pub const DEFAULT_BLANK_ADVANCE: i32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct GhhtSettings {
    /// Font to load; the built-in pixel font when unset
    pub font_file: Option<PathBuf>,
    pub glyphs: GlyphSourceOptions,
    pub padding: Padding,
    pub strategy: RasterStrategy,
    pub intensity: u32,
}

impl GhhtSettings {
    pub fn resolve(cli: &CliArgs, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let font_file = match (&cli.font_file, &config.font_file) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(path)) => {
                debug!("Using font from config file: {}", path.display());
                Some(path.clone())
            }
            (None, None) => None,
        };

        let px_step = cli.px_step.or(config.px_step).unwrap_or(DEFAULT_PX_STEP);
        if px_step == 0 {
            bail!("px_step must be at least 1");
        }
        let intensity = cli.intensity.or(config.intensity).unwrap_or(DEFAULT_INTENSITY);
        if intensity == 0 {
            bail!("intensity must be at least 1");
        }

        let strategy = cli
            .raster_strategy()
            .or(config.raster)
            .unwrap_or_default();
        debug!("Using raster strategy: {}", strategy);

        Ok(Self {
            font_file,
            glyphs: GlyphSourceOptions {
                px_step,
                line_height: cli.line_height.or(config.line_height),
                per_glyph_height: cli.per_glyph_height
                    || config.per_glyph_height.unwrap_or(false),
                blank_advance: DEFAULT_BLANK_ADVANCE,
            },
            padding: config.padding.unwrap_or_default(),
            strategy,
            intensity,
        })
    }

    pub fn layout_options(&self, start_year: i32) -> LayoutOptions {
        LayoutOptions {
            start_year,
            padding: self.padding,
            strategy: self.strategy,
        }
    }
}
