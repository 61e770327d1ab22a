//! Count and duration labels
//!
//! Builds strings like "3 albums | 41 songs" or "1:02:05" from templates
//! supplied by a [`LabelStrings`] provider. Every call formats into its own
//! buffer, so labels can be built from any number of threads at once.

use crate::error::SongkeyResult;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

lazy_static! {
    /// printf-style specifier: optional `N$` position, optional zero flag and width
    static ref SPECIFIER: Regex =
        Regex::new(r"%(?:(\d+)\$)?(0?)(\d*)([sd%])").expect("specifier pattern is valid");
}

/// Single strings a label may need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    OneFolder,
    OneSong,
    UnknownYear,
    /// Args: sign, hours, minutes, minutes % 60, seconds, seconds % 60
    DurationShort,
    /// Same args as `DurationShort`
    DurationLong,
    /// Args: songs label, long duration
    SongsAndTime,
}

impl Text {
    fn key(self) -> &'static str {
        match self {
            Text::OneFolder => "one_folder",
            Text::OneSong => "one_song",
            Text::UnknownYear => "unknown_year",
            Text::DurationShort => "duration_short",
            Text::DurationLong => "duration_long",
            Text::SongsAndTime => "songs_and_time",
        }
    }
}

/// Pluralized count templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Folders,
    Songs,
    Albums,
}

impl Quantity {
    fn key(self) -> &'static str {
        match self {
            Quantity::Folders => "folders",
            Quantity::Songs => "songs",
            Quantity::Albums => "albums",
        }
    }
}

/// Source of localized label templates
pub trait LabelStrings: Send + Sync {
    /// Template or literal text for `key`
    fn text(&self, key: Text) -> Cow<'_, str>;

    /// Template for `count` items of `kind`, containing one `%d`
    fn quantity(&self, kind: Quantity, count: i64) -> Cow<'_, str>;
}

/// Built-in English strings
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStrings;

impl LabelStrings for EnglishStrings {
    fn text(&self, key: Text) -> Cow<'_, str> {
        Cow::Borrowed(match key {
            Text::OneFolder => "1 folder",
            Text::OneSong => "1 song",
            Text::UnknownYear => "Unknown year",
            Text::DurationShort => "%1$s%3$d:%6$02d",
            Text::DurationLong => "%1$s%2$d:%4$02d:%6$02d",
            Text::SongsAndTime => "%1$s | %2$s",
        })
    }

    fn quantity(&self, kind: Quantity, count: i64) -> Cow<'_, str> {
        let one = count == 1;
        Cow::Borrowed(match (kind, one) {
            (Quantity::Folders, true) => "%d folder",
            (Quantity::Folders, false) => "%d folders",
            (Quantity::Songs, true) => "%d song",
            (Quantity::Songs, false) => "%d songs",
            (Quantity::Albums, true) => "%d album",
            (Quantity::Albums, false) => "%d albums",
        })
    }
}

/// Strings from a flat JSON table, falling back to English for missing keys
///
/// Text keys are `one_folder`, `one_song`, `unknown_year`, `duration_short`,
/// `duration_long` and `songs_and_time`. Quantities use `<kind>.one` and
/// `<kind>.other`, e.g. `songs.other`.
#[derive(Debug, Clone, Default)]
pub struct TableStrings {
    table: HashMap<String, String>,
}

impl TableStrings {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    pub fn from_json_str(json: &str) -> SongkeyResult<Self> {
        let table: HashMap<String, String> = serde_json::from_str(json)?;
        debug!("Loaded {} label strings", table.len());
        Ok(Self::new(table))
    }

    pub fn load(path: &Path) -> SongkeyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl LabelStrings for TableStrings {
    fn text(&self, key: Text) -> Cow<'_, str> {
        match self.table.get(key.key()) {
            Some(value) => Cow::Borrowed(value.as_str()),
            None => EnglishStrings.text(key),
        }
    }

    fn quantity(&self, kind: Quantity, count: i64) -> Cow<'_, str> {
        let form = if count == 1 { "one" } else { "other" };
        let key = format!("{}.{}", kind.key(), form);
        match self.table.get(&key) {
            Some(value) => Cow::Borrowed(value.as_str()),
            None => EnglishStrings.quantity(kind, count),
        }
    }
}

/// Argument for [`format_template`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    Int(i64),
    Str(&'a str),
}

impl FormatArg<'_> {
    fn render(&self, zero_pad: bool, width: usize) -> String {
        match (self, zero_pad) {
            (FormatArg::Int(n), true) => format!("{:0width$}", n, width = width),
            (FormatArg::Int(n), false) => format!("{:>width$}", n, width = width),
            (FormatArg::Str(s), _) => format!("{:>width$}", s, width = width),
        }
    }
}

/// Fill a printf-style template.
///
/// Supports `%N$s`, `%N$d`, zero padding and width (`%6$02d`), sequential
/// `%s`/`%d`, and `%%`. Specifiers that name a missing argument are kept as
/// written.
pub fn format_template(template: &str, args: &[FormatArg<'_>]) -> String {
    let mut next_arg = 0;

    SPECIFIER
        .replace_all(template, |caps: &Captures| {
            if &caps[4] == "%" {
                return "%".to_string();
            }

            let index = match caps.get(1) {
                Some(pos) => match pos.as_str().parse::<usize>() {
                    Ok(n) if n > 0 => n - 1,
                    _ => return caps[0].to_string(),
                },
                None => {
                    next_arg += 1;
                    next_arg - 1
                }
            };

            let Some(arg) = args.get(index) else {
                warn!("Template {:?} has no argument {}", template, index + 1);
                return caps[0].to_string();
            };

            let zero_pad = !caps[2].is_empty();
            let width = caps[3].parse::<usize>().unwrap_or(0);
            arg.render(zero_pad, width)
        })
        .into_owned()
}

fn quantity_label(strings: &dyn LabelStrings, kind: Quantity, count: i64) -> String {
    format_template(&strings.quantity(kind, count), &[FormatArg::Int(count)])
}

/// Duration as "m:ss" under an hour and "h:mm:ss" from an hour, "- " prefixed when negative.
pub fn make_time_string(strings: &dyn LabelStrings, secs: i64) -> String {
    let template = if secs.saturating_abs() < 3600 {
        Text::DurationShort
    } else {
        Text::DurationLong
    };
    duration_with(strings, template, secs)
}

fn make_long_time_string(strings: &dyn LabelStrings, secs: i64) -> String {
    duration_with(strings, Text::DurationLong, secs)
}

fn duration_with(strings: &dyn LabelStrings, template: Text, secs: i64) -> String {
    let abs = secs.saturating_abs();
    let sign = if secs < 0 { "- " } else { "" };
    format_template(
        &strings.text(template),
        &[
            FormatArg::Str(sign),
            FormatArg::Int(abs / 3600),
            FormatArg::Int(abs / 60),
            FormatArg::Int(abs / 60 % 60),
            FormatArg::Int(abs),
            FormatArg::Int(abs % 60),
        ],
    )
}

/// A label like "5 folders | 3 songs", or "-" for an empty folder.
pub fn make_subfolders_label(strings: &dyn LabelStrings, folders: i64, files: i64) -> String {
    let mut label = String::new();

    if folders == 1 {
        label.push_str(&strings.text(Text::OneFolder));
    } else if folders != 0 {
        label.push_str(&quantity_label(strings, Quantity::Folders, folders));
    }

    if files > 0 && folders > 0 {
        label.push_str(" | ");
    }

    if files == 1 {
        label.push_str(&strings.text(Text::OneSong));
    } else if files != 0 {
        label.push_str(&quantity_label(strings, Quantity::Songs, files));
    }

    if folders == 0 && files == 0 {
        label.push('-');
    }

    label
}

/// A label like "3 albums | 41 songs". Zero counts are left out.
pub fn make_album_and_songs_label(strings: &dyn LabelStrings, albums: i64, songs: i64) -> String {
    let mut label = String::new();

    if albums > 0 {
        label.push_str(&quantity_label(strings, Quantity::Albums, albums));
    }

    if albums > 0 && songs > 0 {
        label.push_str(" | ");
    }

    if songs == 1 {
        label.push_str(&strings.text(Text::OneSong));
    } else if songs > 0 {
        label.push_str(&quantity_label(strings, Quantity::Songs, songs));
    }

    label
}

pub fn make_albums_label(strings: &dyn LabelStrings, albums: i64) -> String {
    quantity_label(strings, Quantity::Albums, albums)
}

pub fn make_songs_label(strings: &dyn LabelStrings, songs: i64) -> String {
    quantity_label(strings, Quantity::Songs, songs)
}

/// The year, or the "unknown year" text when it is not positive.
pub fn make_year_label(strings: &dyn LabelStrings, year: i32) -> String {
    if year <= 0 {
        return strings.text(Text::UnknownYear).into_owned();
    }
    year.to_string()
}

/// Songs label followed by the total duration in long form.
pub fn make_songs_and_time_label(strings: &dyn LabelStrings, songs: i64, secs: i64) -> String {
    let songs_label = make_songs_label(strings, songs);
    let time = make_long_time_string(strings, secs);
    format_template(
        &strings.text(Text::SongsAndTime),
        &[FormatArg::Str(&songs_label), FormatArg::Str(&time)],
    )
}
