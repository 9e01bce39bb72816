//! Calendar engine
//!
//! Pure arithmetic over one validated [`CalendarDefinition`]: forward
//! conversion from an instant to a calendar year, the exact inverse back to
//! a year's first moment, and era resolution with announcement rendering.
//! The engine holds no mutable state and performs no I/O.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

use crate::definition::CalendarDefinition;
use crate::error::{HeraldError, Result};
use crate::numerals::{era_ordinal, roman};
use crate::timestamp;

/// Joins era labels belonging to one owner
const LABEL_SEP: &str = "・";
/// Joins owner groups
const GROUP_SEP: &str = "、";
/// Joins owner groups once any single owner carries multiple labels.
/// The switch is global across the whole result, not per group.
const GROUP_SEP_WIDE: &str = "；";

/// Arithmetic engine over one calendar definition
pub struct CalendarEngine<'a> {
    def: &'a CalendarDefinition,
    start: DateTime<FixedOffset>,
    cycle_ms: i64,
}

impl<'a> CalendarEngine<'a> {
    /// Build an engine, parsing the epoch and guarding the cycle.
    ///
    /// A non-positive `calendarCycle` is structurally legal in the data file
    /// but is refused here, before any conversion can divide by it.
    pub fn new(def: &'a CalendarDefinition) -> Result<Self> {
        let start = timestamp::parse(&def.start_at).ok_or_else(|| {
            HeraldError::InvalidArgument(format!("startAt is not a valid timestamp: '{}'", def.start_at))
        })?;

        if def.calendar_cycle <= 0 {
            return Err(HeraldError::InvalidArgument(format!(
                "calendarCycle must be positive, got {}",
                def.calendar_cycle
            )));
        }
        let cycle_ms = def
            .calendar_cycle
            .checked_mul(1000)
            .ok_or_else(|| HeraldError::InvalidArgument("calendarCycle overflows milliseconds".to_string()))?;

        Ok(Self { def, start, cycle_ms })
    }

    /// The definition this engine reads from
    pub fn definition(&self) -> &CalendarDefinition {
        self.def
    }

    /// Calendar year containing `instant`, if it lands on (or within
    /// tolerance of) a year boundary.
    ///
    /// `deviation_fix_digits` is the number of decimal digits of slack: when
    /// positive, a raw fractional year within `10^-digits` of the nearest
    /// integer snaps to it. `Ok(None)` means "between years" and is a normal
    /// outcome, not an error. The instant must be strictly later than the
    /// epoch.
    pub fn year_from_instant<Tz: TimeZone>(
        &self,
        instant: DateTime<Tz>,
        deviation_fix_digits: u32,
    ) -> Result<Option<i64>> {
        let delta_ms = instant
            .with_timezone(&Utc)
            .signed_duration_since(self.start)
            .num_milliseconds();
        if delta_ms <= 0 {
            return Err(HeraldError::InvalidArgument(format!(
                "instant must be strictly later than startAt ({})",
                self.def.start_at
            )));
        }

        let raw = delta_ms as f64 / self.cycle_ms as f64 + 1.0;
        let year = apply_deviation_fix(raw, deviation_fix_digits);

        if year.fract() == 0.0 && year >= 1.0 {
            Ok(Some(year as i64))
        } else {
            Ok(None)
        }
    }

    /// [`Self::year_from_instant`] over a raw timestamp string, parsed under
    /// the same strict grammar the validator enforces.
    pub fn year_from_timestamp(&self, instant: &str, deviation_fix_digits: u32) -> Result<Option<i64>> {
        let parsed = timestamp::parse(instant).ok_or_else(|| {
            HeraldError::InvalidArgument(format!("not a valid timestamp: '{}'", instant))
        })?;
        self.year_from_instant(parsed, deviation_fix_digits)
    }

    /// The first moment of the given calendar year.
    ///
    /// Exact inverse of the forward conversion's core formula; the rounding
    /// tolerance is a measurement concern and plays no part here.
    pub fn year_start_instant(&self, year: i64) -> Result<DateTime<FixedOffset>> {
        self.require_positive_year(year)?;

        let offset_ms = year
            .checked_sub(1)
            .and_then(|y| y.checked_mul(self.cycle_ms))
            .ok_or_else(|| HeraldError::InvalidArgument(format!("year {} overflows the calendar", year)))?;
        Duration::try_milliseconds(offset_ms)
            .and_then(|d| self.start.checked_add_signed(d))
            .ok_or_else(|| HeraldError::InvalidArgument(format!("year {} overflows the calendar", year)))
    }

    /// Render the announcement for a calendar year.
    ///
    /// Scans the era list in definition order, groups matches by owner
    /// (first-encounter order), and labels each match with its era name and
    /// the ordinal of the year within that era. A year no entry covers is
    /// [`HeraldError::NotFound`].
    pub fn announce(&self, year: i64) -> Result<String> {
        self.require_positive_year(year)?;

        let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
        for entry in self.def.list.iter().filter(|e| e.covers(year)) {
            let label = format!("{}{}年", entry.year, era_ordinal(year - entry.from + 1));
            match groups.iter_mut().find(|(who, _)| *who == entry.who) {
                Some((_, labels)) => labels.push(label),
                None => groups.push((&entry.who, vec![label])),
            }
        }

        if groups.is_empty() {
            return Err(HeraldError::NotFound {
                calendar: self.def.calendar_id.clone(),
                year,
            });
        }
        tracing::debug!(calendar = %self.def.calendar_id, year, owners = groups.len(), "resolved eras");

        // One owner with several labels upgrades the separator between ALL
        // owner groups, not just around that owner.
        let group_sep = if groups.iter().any(|(_, labels)| labels.len() > 1) {
            GROUP_SEP_WIDE
        } else {
            GROUP_SEP
        };
        let body = groups
            .iter()
            .map(|(who, labels)| format!("{}：{}", who, labels.join(LABEL_SEP)))
            .collect::<Vec<_>>()
            .join(group_sep);

        Ok(format!(
            "【{}】\n{}年 ({})\n{}",
            self.def.calendar_name,
            year,
            roman(year),
            body
        ))
    }

    fn require_positive_year(&self, year: i64) -> Result<()> {
        if year < 1 {
            return Err(HeraldError::InvalidArgument(format!(
                "year must be a positive integer, got {}",
                year
            )));
        }
        Ok(())
    }
}

/// Snap a raw fractional year to the nearest integer when it falls within
/// `10^-digits` of it; zero digits means no snapping.
fn apply_deviation_fix(raw: f64, digits: u32) -> f64 {
    if digits == 0 {
        return raw;
    }
    let nearest = raw.round();
    if (raw - nearest).abs() <= 10f64.powi(-(digits as i32)) {
        nearest
    } else {
        raw
    }
}
