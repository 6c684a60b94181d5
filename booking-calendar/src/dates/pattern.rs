//! Date format patterns.
//!
//! A small template language in the style of Unicode date patterns: runs of
//! a letter are fields (`yyyy`, `MMM`, `d`, `EEE`, ...), text inside single
//! quotes is literal, and every other character passes through unchanged.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::error::DateError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A date field and the width it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year(usize),
    Month(usize),
    Day(usize),
    Weekday(usize),
    Hour(usize),
    Minute(usize),
    Second(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Field(Field),
    Literal(String),
}

/// A compiled format pattern.
///
/// # Examples
///
/// ```
/// use booking_calendar::dates::{DatePattern, parse_iso};
///
/// let pattern = DatePattern::parse("EEE, MMM d ''yy").unwrap();
/// let date = parse_iso("2024-06-03").unwrap();
/// assert_eq!(pattern.format(date), "Mon, Jun 3 '24");
///
/// // Unknown letters are rejected rather than printed.
/// assert!(DatePattern::parse("yyyy-QQ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    items: Vec<Item>,
}

impl DatePattern {
    /// Compile a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, DateError> {
        let mut items = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                // '' is an escaped quote, otherwise read up to the closing quote
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    push_literal(&mut items, '\'');
                    continue;
                }
                while let Some(q) = chars.next() {
                    if q == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            push_literal(&mut items, '\'');
                            continue;
                        }
                        break;
                    }
                    push_literal(&mut items, q);
                }
            } else if c.is_ascii_alphabetic() {
                let mut width = 1;
                while chars.peek() == Some(&c) {
                    chars.next();
                    width += 1;
                }
                items.push(Item::Field(field_for(c, width)?));
            } else {
                push_literal(&mut items, c);
            }
        }

        Ok(Self { items })
    }

    /// Render a date-time with this pattern.
    pub fn format(&self, datetime: NaiveDateTime) -> String {
        Rendered {
            pattern: self,
            datetime,
        }
        .to_string()
    }
}

fn push_literal(items: &mut Vec<Item>, c: char) {
    if let Some(Item::Literal(text)) = items.last_mut() {
        text.push(c);
    } else {
        items.push(Item::Literal(c.to_string()));
    }
}

fn field_for(letter: char, width: usize) -> Result<Field, DateError> {
    let field = match (letter, width) {
        ('y', _) => Field::Year(width),
        ('M', 1..=4) => Field::Month(width),
        ('d', 1..=2) => Field::Day(width),
        ('E', 1..=4) => Field::Weekday(width),
        ('H', 1..=2) => Field::Hour(width),
        ('m', 1..=2) => Field::Minute(width),
        ('s', 1..=2) => Field::Second(width),
        _ => {
            return Err(DateError::Pattern {
                token: std::iter::repeat_n(letter, width).collect(),
            });
        }
    };
    Ok(field)
}

struct Rendered<'a> {
    pattern: &'a DatePattern,
    datetime: NaiveDateTime,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.pattern.items {
            match item {
                Item::Literal(text) => f.write_str(text)?,
                Item::Field(field) => write_field(f, *field, self.datetime)?,
            }
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: Field, dt: NaiveDateTime) -> fmt::Result {
    match field {
        Field::Year(2) => write!(f, "{:02}", dt.year().rem_euclid(100)),
        Field::Year(width) => write!(f, "{:0width$}", dt.year()),
        Field::Month(1) => write!(f, "{}", dt.month()),
        Field::Month(2) => write!(f, "{:02}", dt.month()),
        Field::Month(3) => f.write_str(&MONTH_NAMES[dt.month0() as usize][..3]),
        Field::Month(_) => f.write_str(MONTH_NAMES[dt.month0() as usize]),
        Field::Day(width) => write!(f, "{:0width$}", dt.day()),
        Field::Weekday(4) => {
            f.write_str(WEEKDAY_NAMES[dt.weekday().num_days_from_monday() as usize])
        }
        Field::Weekday(_) => {
            f.write_str(&WEEKDAY_NAMES[dt.weekday().num_days_from_monday() as usize][..3])
        }
        Field::Hour(width) => write!(f, "{:0width$}", dt.hour()),
        Field::Minute(width) => write!(f, "{:0width$}", dt.minute()),
        Field::Second(width) => write!(f, "{:0width$}", dt.second()),
    }
}
