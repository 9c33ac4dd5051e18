//! Git commit sink
//!
//! Every painted square becomes a commit whose author date is the square's
//! date. Each commit appends one line to `commits.txt` so that there is
//! always something to commit.

use crate::layout::HOUR_OFFSET;
use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const COMMITS_FILE: &str = "commits.txt";

#[derive(Debug, Clone)]
pub struct GitSink {
    repo: PathBuf,
}

impl GitSink {
    /// Use `repo` as the target, running `git init` when it has no .git
    pub fn open(repo: impl Into<PathBuf>) -> Result<Self> {
        let repo = repo.into();
        fs::create_dir_all(&repo)
            .with_context(|| format!("Failed to create sink directory {}", repo.display()))?;
        let sink = Self { repo };
        if !sink.repo.join(".git").is_dir() {
            tracing::info!(
                "'{}' does not have a .git directory, initializing repo",
                sink.repo.display()
            );
            sink.run(&["init"])?;
        }
        Ok(sink)
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Commit with `date` as the author date, read in local time
    pub fn commit(&self, date: NaiveDateTime, message: &str) -> Result<()> {
        let local = Local
            .from_local_datetime(&date)
            .earliest()
            .ok_or_else(|| anyhow!("{} does not exist in the local time zone", date))?;

        let path = self.repo.join(COMMITS_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        writeln!(file, "{} {}", local.timestamp(), message)?;

        self.run(&["add", COMMITS_FILE])?;
        let date_arg = format!("--date={}", local.to_rfc2822());
        let message_arg = format!("--message={}", message);
        self.run(&["commit", "--quiet", &date_arg, &message_arg])?;
        tracing::debug!("Committed '{}' at {}", message, local);
        Ok(())
    }

    /// One background commit on every day of `year`
    pub fn commit_year(&self, year: i32) -> Result<usize> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| anyhow!("Invalid year {}", year))?;
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .ok_or_else(|| anyhow!("Invalid year {}", year + 1))?;
        let time = NaiveTime::from_hms_opt(HOUR_OFFSET, 0, 0)
            .ok_or_else(|| anyhow!("Invalid hour offset {}", HOUR_OFFSET))?;

        let mut count = 0;
        let mut day = start;
        while day < end {
            count += 1;
            self.commit(day.and_time(time), &format!("bg-{:03}", count))?;
            day += Duration::days(1);
        }
        tracing::info!("Generated {} background commits for {}", count, year);
        Ok(count)
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .output()
            .context("Failed to execute git")?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("git {}: {}", args.join(" "), stdout.trim());
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(())
    }
}
