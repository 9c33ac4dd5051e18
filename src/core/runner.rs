//! Application runner logic
//!
//! Loads the font, lays out the text and hands the squares to either the
//! debug listing or the git sink.

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::core::errors::LayoutError;
use crate::core::settings::GhhtSettings;
use crate::font_source::{GlyphSource, LoadedFont};
use crate::layout::{CommitSquare, LayoutOptions, LayoutPipeline};
use crate::sink::{write_listing, GitSink, SkipList};
use anyhow::{anyhow, Context, Result};
use tracing::info;

/// Run ghht with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory();
    }

    cli_args
        .validate()
        .map_err(|e| anyhow!("CLI validation failed: {}", e))?;
    let text = cli_args.text.as_deref().context("Missing TEXT argument")?;
    let start_year = cli_args.start_year.context("Missing START_YEAR argument")?;

    let settings = GhhtSettings::resolve(&cli_args, ConfigFile::load())?;
    let source = LoadedFont::open(settings.font_file.as_deref(), settings.glyphs)?;
    check_font(&source, text)?;

    let skip_list = match &cli_args.skip_list {
        Some(path) => SkipList::load(path)?,
        None => SkipList::default(),
    };

    let squares = plan_squares(&source, text, settings.layout_options(start_year), &skip_list)?;
    info!("Laid out {} squares", squares.len());

    if cli_args.debug {
        info!("Debug mode, will not generate commits");
        write_listing(std::io::stdout().lock(), &squares)?;
        return Ok(());
    }

    let sink_path = cli_args
        .sink
        .as_ref()
        .context("--sink is required unless --debug is given")?;
    let sink = GitSink::open(sink_path)?;

    info!("Generating commits");
    commit_squares(&sink, &squares, settings.intensity)?;

    if cli_args.background {
        info!("Generating commits for background");
        sink.commit_year(start_year)?;
    }

    Ok(())
}

/// Report every character of `text` and fail on the first missing one.
pub fn check_font<S: GlyphSource>(source: &S, text: &str) -> Result<(), LayoutError> {
    info!("Checking font has all chars in text '{}'", text);
    for ch in text.chars() {
        if !source.has_char(ch) {
            return Err(LayoutError::GlyphNotFound(ch));
        }
        info!("'{}' ok", ch);
    }
    Ok(())
}

/// Lay out the whole text and drop skipped dates.
///
/// The full layout is computed before anything is committed, so a layout
/// error never leaves a half-painted repository behind.
pub fn plan_squares<S: GlyphSource>(
    source: S,
    text: &str,
    options: LayoutOptions,
    skip_list: &SkipList,
) -> Result<Vec<CommitSquare>, LayoutError> {
    let pipeline = LayoutPipeline::new(source, options);
    let mut squares = Vec::new();
    for square in pipeline.run(text)? {
        let square = square?;
        if skip_list.contains(&square.date.date()) {
            tracing::debug!("Skipping {}", square.date.date());
            continue;
        }
        squares.push(square);
    }
    Ok(squares)
}

/// Commit every square `intensity` times.
pub fn commit_squares(sink: &GitSink, squares: &[CommitSquare], intensity: u32) -> Result<()> {
    for square in squares {
        let message = format!("({},{})", square.column, square.row);
        for _ in 0..intensity {
            sink.commit(square.date, &message)?;
        }
    }
    info!(
        "Created {} commits in {}",
        squares.len() * intensity as usize,
        sink.repo().display()
    );
    Ok(())
}
