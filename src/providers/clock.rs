use chrono::{DateTime, Local, TimeZone};

use crate::{colors::Palette, colors::Tone, segment::Segment};

pub fn clock_at<Tz: TimeZone>(now: &DateTime<Tz>, palette: &Palette) -> Segment
where
    Tz::Offset: std::fmt::Display,
{
    let text = now.format("%H:%M").to_string();
    Segment::painted(&text, Tone::Yellow, palette)
}

/// Local wall-clock time.
pub fn clock(palette: &Palette) -> Segment {
    clock_at(&Local::now(), palette)
}
