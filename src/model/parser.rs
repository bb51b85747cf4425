// File: src/model/parser.rs
// Turns a reconstructed cell's text and bounding box into a structured
// event: grammar matching over the text, slot-table lookup over the
// geometry.
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::config::Layout;
use crate::model::event::{Event, EventDate, EventTime, EventType, Recurrence, Subgroup};
use crate::model::segment::Unit;

/// Delimiter between the sentence-like segments of a cell.
const SEGMENT_DELIMITER: &str = ". ";
/// Delimiter between date items inside the bracketed date list.
const DATE_ITEM_DELIMITER: &str = ", ";

/// All class times on the page are civil UTC+3.
fn page_zone() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap()
}

/// Everything that can be wrong with a cell's content. These are data
/// faults of the source page, never transient conditions; retrying is
/// meaningless and no recovery is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no recognized class type in cell text")]
    TypeNotFound,
    #[error("cell text does not match the event grammar")]
    EventInvalid,
    #[error("cell left edge {0} lies outside every time band")]
    StartInvalid(i32),
    #[error("cell right edge {0} lies outside every time band")]
    EndInvalid(i32),
    #[error("unparseable date token {0:?}")]
    DateInvalid(String),
    #[error("unrecognized recurrence keyword {0:?}")]
    IntervalInvalid(String),
}

/// Parses cells into events against one fixed page calibration.
pub struct EventParser {
    layout: Layout,
}

impl EventParser {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Parses every cell in input order under one year. The first
    /// failure aborts the whole batch; there is no partial-result mode.
    pub fn parse_all(&self, units: &[Unit], year: i32) -> Result<Vec<Event>, ParseError> {
        units.iter().map(|unit| self.parse(unit, year)).collect()
    }

    /// Parses a single cell.
    ///
    /// The year is caller-supplied because the page never encodes one.
    pub fn parse(&self, unit: &Unit, year: i32) -> Result<Event, ParseError> {
        let (kind, type_start, type_end) =
            find_type(&unit.data).ok_or(ParseError::TypeNotFound)?;

        // "<title>" or "<title>. <teacher>"
        let prefix: Vec<&str> = unit.data[..type_start].split(SEGMENT_DELIMITER).collect();
        if prefix.len() > 2 {
            return Err(ParseError::EventInvalid);
        }

        // "<location>. [<dates>]" or "(<subgroup>). <location>. [<dates>]"
        let suffix: Vec<&str> = unit.data[type_end..].split(SEGMENT_DELIMITER).collect();
        if suffix.len() < 2 || suffix.len() > 3 {
            return Err(ParseError::EventInvalid);
        }

        let (title, teacher) = if prefix.len() == 1 {
            // A lone title keeps its period out of the event.
            let title = prefix[0].strip_suffix('.').unwrap_or(prefix[0]);
            (title.to_string(), String::new())
        } else {
            (prefix[0].to_string(), prefix[1].to_string())
        };

        let time = self.resolve_time(unit.left, unit.right)?;

        let zone = page_zone();
        let list = suffix[suffix.len() - 1].trim_matches(|c| c == '[' || c == ']');
        let mut dates = Vec::new();
        for item in list.split(DATE_ITEM_DELIMITER) {
            dates.push(parse_date_item(item, year, time.start, &zone)?);
        }

        let (subgroup, location) = if suffix.len() == 2 {
            (None, suffix[0].to_string())
        } else {
            let code = suffix[0].trim_matches(|c| c == '(' || c == ')');
            let subgroup = Subgroup::from_str(code).map_err(|_| ParseError::EventInvalid)?;
            (Some(subgroup), suffix[1].to_string())
        };

        Ok(Event {
            title,
            teacher,
            kind,
            subgroup,
            location,
            time,
            dates,
        })
    }

    fn resolve_time(&self, left: i32, right: i32) -> Result<EventTime, ParseError> {
        let start = self
            .layout
            .start_time(left)
            .ok_or(ParseError::StartInvalid(left))?;
        let end = self
            .layout
            .end_time(right)
            .ok_or(ParseError::EndInvalid(right))?;
        Ok(EventTime { start, end })
    }
}

/// Locates the class-type token: a label surrounded by single spaces
/// with a trailing period. Returns the match and the byte range of the
/// full ` <label>. ` pattern; the earliest match in the text wins.
fn find_type(data: &str) -> Option<(EventType, usize, usize)> {
    let mut found: Option<(usize, usize, EventType)> = None;
    for kind in EventType::iter() {
        let needle = format!(" {}. ", kind.as_ref());
        if let Some(pos) = data.find(&needle)
            && found.is_none_or(|(best, _, _)| pos < best)
        {
            found = Some((pos, pos + needle.len(), kind));
        }
    }
    found.map(|(start, end, kind)| (kind, start, end))
}

/// Parses one item of the bracketed date list.
///
/// An item is up to three tokens separated by `-` or spaces: a start
/// date, an optional end date and an optional recurrence keyword.
/// Tokens beyond the third are ignored. The resolved class start time
/// becomes the time-of-day component of the range bounds.
fn parse_date_item(
    item: &str,
    year: i32,
    start_of_class: NaiveTime,
    zone: &FixedOffset,
) -> Result<EventDate, ParseError> {
    let mut tokens = item.split(['-', ' ']).filter(|t| !t.is_empty());
    let first = tokens.next().unwrap_or("");
    let second = tokens.next().unwrap_or("");
    let third = tokens.next().unwrap_or("");

    let recurrence = match third {
        "" => Recurrence::Once,
        "к.н." => Recurrence::Weekly,
        "ч.н." => Recurrence::Biweekly,
        other => return Err(ParseError::IntervalInvalid(other.to_string())),
    };

    let start = resolve_day(first, year, start_of_class, zone)?;
    let end = match recurrence {
        Recurrence::Once => start,
        _ => resolve_day(second, year, start_of_class, zone)?,
    };

    Ok(EventDate {
        start,
        end,
        recurrence,
    })
}

fn resolve_day(
    token: &str,
    year: i32,
    time_of_day: NaiveTime,
    zone: &FixedOffset,
) -> Result<DateTime<FixedOffset>, ParseError> {
    let day = parse_day_month(token, year)
        .ok_or_else(|| ParseError::DateInvalid(token.to_string()))?;
    // A fixed offset has no gaps or folds, so the conversion is total.
    Ok(day.and_time(time_of_day).and_local_timezone(*zone).unwrap())
}

/// Parses a `day.month` token against the given year. Calendar
/// validation happens here too: 29.02 of a non-leap year is rejected.
fn parse_day_month(token: &str, year: i32) -> Option<NaiveDate> {
    let (day, month) = token.split_once('.')?;
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
