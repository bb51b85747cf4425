// File: src/export/mod.rs
// Output encoders for parsed timetables.
pub mod ical;
pub mod json;

use anyhow::Result;
use std::io::Write;
use strum::EnumString;

use crate::model::{Event, Subgroup};

pub use ical::IcalEncoder;
pub use json::JsonEncoder;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    Ical,
    Json,
}

/// Encodes events into `w` in the chosen format, applying the optional
/// subgroup filter. Filtering happens only here; the parser itself
/// never drops events.
pub fn encode<W: Write>(
    format: Format,
    w: W,
    events: &[Event],
    group: &str,
    subgroup: Option<Subgroup>,
) -> Result<()> {
    match format {
        Format::Ical => IcalEncoder::new(w).encode(events, group, subgroup),
        Format::Json => JsonEncoder::new(w).encode(events, group, subgroup),
    }
}

/// An event passes the filter when no filter is set, when the event is
/// not split into subgroups, or when the codes match.
pub(crate) fn keeps(filter: Option<Subgroup>, event: &Event) -> bool {
    match (filter, event.subgroup) {
        (None, _) | (_, None) => true,
        (Some(wanted), Some(actual)) => wanted == actual,
    }
}
