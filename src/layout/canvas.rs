//! One year's week grid
//!
//! Columns are weeks starting on Sunday, rows are weekdays with Sunday at
//! row 0. The canvas value carries its own write cursor and is replaced,
//! never mutated, when the cursor advances or the layout rolls over into the
//! previous year.

use crate::core::errors::{CapacityExceeded, LayoutError, LayoutResult};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Weekday rows, Sunday through Saturday
pub const ROWS: i32 = 7;
/// Most week columns a year can span
pub const MAX_COLUMNS: i32 = 53;
/// Time of day given to every date, away from midnight so that time zone
/// and DST shifts cannot move it to a neighbouring day
pub const HOUR_OFFSET: u32 = 6;

/// Margins around the painted text, in grid squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub left: i32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 1,
            right: 1,
            left: 1,
        }
    }
}

/// An absolute grid position and the moment it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitSquare {
    pub column: i32,
    pub row: i32,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCanvas {
    year: i32,
    padding: Padding,
    dx: i32,
    weeks_delta: i32,
    begin_date: NaiveDate,
}

impl CalendarCanvas {
    /// Fresh canvas for `year` with the cursor at column 0
    pub fn new(year: i32, padding: Padding) -> LayoutResult<Self> {
        let begin = Self::topleft(year)?;
        let end = Self::bottomright(year)?;
        // Sunday-based week numbers, so this is the count of Sunday columns
        // from `begin` through the week ending on `end`.
        let weeks = 1 + (end - begin).num_days().div_euclid(7);
        if weeks <= 0 || weeks > i64::from(MAX_COLUMNS) {
            return Err(CapacityExceeded::WeeksOutOfRange {
                year,
                weeks,
                max: MAX_COLUMNS,
            }
            .into());
        }

        tracing::debug!("Canvas for {} starts {} and spans {} weeks", year, begin, weeks);
        Ok(Self {
            year,
            padding,
            dx: 0,
            weeks_delta: weeks as i32,
            begin_date: begin,
        })
    }

    /// First Sunday on or after January 1st
    pub fn topleft(year: i32) -> LayoutResult<NaiveDate> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(LayoutError::InvalidYear(year))?;
        let days = (7 - jan1.weekday().num_days_from_sunday()) % 7;
        Ok(jan1 + Duration::days(i64::from(days)))
    }

    /// Saturday before the last Sunday on or before December 31st
    pub fn bottomright(year: i32) -> LayoutResult<NaiveDate> {
        let dec31 = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(LayoutError::InvalidYear(year))?;
        let last_sunday = dec31 - Duration::days(i64::from(dec31.weekday().num_days_from_sunday()));
        Ok(last_sunday - Duration::days(1))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Columns already consumed by laid out characters
    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn weeks_delta(&self) -> i32 {
        self.weeks_delta
    }

    pub fn begin_date(&self) -> NaiveDate {
        self.begin_date
    }

    /// Whether a character of `width` still fits before the right margin
    pub fn is_inside(&self, width: i32) -> bool {
        width + self.dx + self.padding.left < self.weeks_delta - self.padding.right
    }

    /// This canvas with the cursor moved right by `width`
    pub fn advanced(&self, width: i32) -> Self {
        Self {
            dx: self.dx + width,
            ..*self
        }
    }

    /// Fresh canvas for the year before, cursor back at 0
    pub fn previous_year(&self) -> LayoutResult<Self> {
        let year = self.year.checked_sub(1).ok_or(LayoutError::InvalidYear(self.year))?;
        Self::new(year, self.padding)
    }

    /// Absolute position and date of a glyph-local square
    pub fn local_to_date(&self, x: i32, y: i32) -> LayoutResult<CommitSquare> {
        let column = x + self.dx + self.padding.left;
        let row = y + self.padding.top;
        if !(0..ROWS).contains(&row) {
            return Err(CapacityExceeded::RowOutOfRange {
                year: self.year,
                row,
                rows: ROWS,
            }
            .into());
        }
        let date = self.begin_date.and_time(NaiveTime::MIN)
            + Duration::weeks(i64::from(column))
            + Duration::days(i64::from(row))
            + Duration::hours(i64::from(HOUR_OFFSET));
        Ok(CommitSquare { column, row, date })
    }
}
