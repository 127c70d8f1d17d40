//! Cue settings scanner
//!
//! Applies the whitespace-separated `key:value` list after a cue's end
//! timestamp. A rejected value is reported and leaves the current value in
//! place; an empty value stops the scan.

use alloc::{format, string::String, vec::Vec};

use bitflags::bitflags;

use super::{
    ast::{
        Cue, LineAlign, LinePosition, PositionAlign, TextAlign, TextPosition, WritingDirection,
    },
    errors::ErrorKind,
    session::ParseSession,
};
use crate::utils::is_vtt_space;

bitflags! {
    /// Settings already seen on the current timing line
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SeenSettings: u8 {
        const VERTICAL = 1 << 0;
        const LINE = 1 << 1;
        const POSITION = 1 << 2;
        const SIZE = 1 << 3;
        const ALIGN = 1 << 4;
    }
}

impl SeenSettings {
    /// Flag for a known setting name
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "vertical" => Some(Self::VERTICAL),
            "line" => Some(Self::LINE),
            "position" => Some(Self::POSITION),
            "size" => Some(Self::SIZE),
            "align" => Some(Self::ALIGN),
            _ => None,
        }
    }
}

/// Scan a settings list into `cue`
///
/// `first_column` is the column of the first character of `input` within
/// the timing line.
pub fn parse_settings(input: &str, first_column: usize, cue: &mut Cue, session: &mut ParseSession) {
    let mut seen = SeenSettings::empty();

    for (column, token) in split_settings(input, first_column) {
        let Some((key, value)) = token.split_once(':') else {
            session.report_column(ErrorKind::InvalidSetting, column);
            continue;
        };

        if let Some(flag) = SeenSettings::from_key(key) {
            if seen.contains(flag) {
                session.report_column(ErrorKind::DuplicateSetting, column);
            }
            seen.insert(flag);
        }

        if value.is_empty() {
            session.report_column(ErrorKind::MissingSettingValue, column);
            return;
        }

        let applied = match key {
            "vertical" => apply_vertical(value, cue),
            "line" => apply_line(value, cue),
            "position" => apply_position(value, cue),
            "size" => apply_size(value, cue),
            "align" => apply_align(value, cue),
            _ => Err(ErrorKind::InvalidSetting),
        };

        if let Err(kind) = applied {
            session.report_column(kind, column);
        }
    }
}

/// Split on whitespace, pairing each token with its starting column
fn split_settings(input: &str, first_column: usize) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (column, (offset, ch)) in (first_column..).zip(input.char_indices()) {
        if is_vtt_space(ch) {
            if let Some((begin, begin_column)) = start.take() {
                tokens.push((begin_column, &input[begin..offset]));
            }
        } else if start.is_none() {
            start = Some((offset, column));
        }
    }
    if let Some((begin, begin_column)) = start {
        tokens.push((begin_column, &input[begin..]));
    }

    tokens
}

/// Split `value,align` at the first comma
fn split_alignment(value: &str) -> (&str, Option<&str>) {
    value
        .split_once(',')
        .map_or((value, None), |(number, align)| (number, Some(align)))
}

fn apply_vertical(value: &str, cue: &mut Cue) -> Result<(), ErrorKind> {
    let direction =
        WritingDirection::from_value(value).ok_or(ErrorKind::InvalidWritingDirection)?;
    cue.settings.direction = direction;
    Ok(())
}

fn apply_line(value: &str, cue: &mut Cue) -> Result<(), ErrorKind> {
    let (number, align) = split_alignment(value);
    if !is_line_number(number) {
        return Err(ErrorKind::InvalidLinePosition);
    }

    let (digits, is_percent) = number
        .strip_suffix('%')
        .map_or((number, false), |digits| (digits, true));
    let position: f64 = digits
        .parse()
        .map_err(|_| ErrorKind::InvalidLinePosition)?;

    if is_percent {
        if digits.starts_with('-') {
            return Err(ErrorKind::NegativeLinePercentage);
        }
        if position > 100.0 {
            return Err(ErrorKind::LinePercentageOutOfRange);
        }
    }

    let line_align = align
        .map(|align| LineAlign::from_value(align).ok_or(ErrorKind::InvalidLineAlignment))
        .transpose()?;

    if let Some(line_align) = line_align {
        cue.settings.line_align = line_align;
    }
    cue.settings.snap_to_lines = !is_percent;
    cue.settings.line_position = LinePosition::Number(position);
    if canonical_number(position) != digits {
        cue.non_serializable = true;
    }
    Ok(())
}

fn apply_position(value: &str, cue: &mut Cue) -> Result<(), ErrorKind> {
    let (number, align) = split_alignment(value);
    let digits = number
        .strip_suffix('%')
        .ok_or(ErrorKind::TextPositionNotPercentage)?;
    let position = parse_decimal(digits).ok_or(ErrorKind::InvalidTextPosition)?;
    if !(0.0..=100.0).contains(&position) {
        return Err(ErrorKind::TextPositionOutOfRange);
    }

    let position_align = align
        .map(|align| PositionAlign::from_value(align).ok_or(ErrorKind::InvalidPositionAlignment))
        .transpose()?;

    if let Some(position_align) = position_align {
        cue.settings.position_align = position_align;
    }
    cue.settings.text_position = TextPosition::Percentage(position);
    Ok(())
}

fn apply_size(value: &str, cue: &mut Cue) -> Result<(), ErrorKind> {
    let digits = value.strip_suffix('%').ok_or(ErrorKind::SizeNotPercentage)?;
    let size = parse_decimal(digits).ok_or(ErrorKind::InvalidSize)?;
    if !(0.0..=100.0).contains(&size) {
        return Err(ErrorKind::SizeOutOfRange);
    }
    cue.settings.size = size;
    Ok(())
}

fn apply_align(value: &str, cue: &mut Cue) -> Result<(), ErrorKind> {
    cue.settings.alignment = TextAlign::from_value(value).ok_or(ErrorKind::InvalidAlignment)?;
    Ok(())
}

/// `-` or a digit, then digits, an optional fraction and an optional `%`
fn is_line_number(text: &str) -> bool {
    let body = text.strip_suffix('%').unwrap_or(text);
    let unsigned = body.strip_prefix('-').unwrap_or(body);
    let (integer, fraction) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(integer, fraction)| {
            (integer, Some(fraction))
        });

    !integer.is_empty()
        && is_digits(integer)
        && fraction.map_or(true, |fraction| !fraction.is_empty() && is_digits(fraction))
}

/// Optionally signed decimal number without exponent
fn parse_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "0"));
    if integer.is_empty() || fraction.is_empty() || !is_digits(integer) || !is_digits(fraction) {
        return None;
    }
    text.parse().ok()
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Shortest decimal form of a number, as it would be written back out
#[allow(clippy::float_cmp)]
fn canonical_number(value: f64) -> String {
    if value == 0.0 {
        String::from("0")
    } else {
        format!("{value}")
    }
}
