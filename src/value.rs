// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/value.rs - Component value parsing for magnitude-aware ordering.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

/*!
 * # `value` Module
 *
 * This module derives a totally-ordered key from a component's free-form
 * display value, so that values with different magnitude prefixes sort
 * correctly ("100n" before "4.7k" before "1M").
 *
 * Both common value notations are supported: a trailing magnitude suffix
 * ("4.7k", optionally followed by a unit as in "10uF") and the embedded
 * form where the magnitude letter stands in for the decimal point ("4k7",
 * "0R1"). Magnitude letters are case-sensitive: "m" is milli, "M" is mega.
 *
 * Parsing never fails. A string with no usable numeric part ("DNF", an
 * empty value) gets a text key that sorts after every numeric key.
 */

use std::str::FromStr;

use rust_decimal::Decimal;

/// Ordering key derived from a component's display value.
///
/// Numeric keys order by magnitude-scaled value; text keys order by their
/// original text and always sort after every numeric key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKey {
    /// The value scaled by its magnitude prefix.
    Numeric(Decimal),
    /// Fallback for values with no usable numeric part.
    Text(String),
}

fn multiplier(c: char) -> Option<Decimal> {
    match c {
        'p' => Some(Decimal::new(1, 12)),
        'n' => Some(Decimal::new(1, 9)),
        'u' | 'µ' => Some(Decimal::new(1, 6)),
        'm' => Some(Decimal::new(1, 3)),
        'R' => Some(Decimal::ONE),
        'k' => Some(Decimal::new(1_000, 0)),
        'M' => Some(Decimal::new(1_000_000, 0)),
        'G' => Some(Decimal::new(1_000_000_000, 0)),
        _ => None,
    }
}

/// Derives the ordering key for a display value string.
///
/// Total over all inputs: anything that is not a recognizable number with
/// an optional magnitude prefix and unit becomes a [ValueKey::Text] key.
pub fn parse(raw: &str) -> ValueKey {
    let trimmed = raw.trim();

    let split = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    let (lead, rest) = trimmed.split_at(split);

    let Ok(base) = Decimal::from_str(lead) else {
        return ValueKey::Text(trimmed.to_string());
    };

    let mut rest_chars = rest.chars();
    let Some(first) = rest_chars.next() else {
        return ValueKey::Numeric(base);
    };
    let tail = rest_chars.as_str();

    if let Some(mult) = multiplier(first) {
        if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
            // Embedded form: the magnitude letter is the decimal point, so
            // the leading part must not carry one of its own.
            if lead.contains('.') {
                return ValueKey::Text(trimmed.to_string());
            }
            let Ok(value) = Decimal::from_str(&format!("{lead}.{tail}")) else {
                return ValueKey::Text(trimmed.to_string());
            };
            return ValueKey::Numeric(value * mult);
        }
        if tail.chars().all(|c| c.is_alphabetic()) {
            // Suffix form, with an optional unit after the prefix ("10uF").
            return ValueKey::Numeric(base * mult);
        }
        return ValueKey::Text(trimmed.to_string());
    }

    if rest.chars().all(|c| c.is_alphabetic()) {
        // Bare unit with no magnitude prefix ("10F", "50Hz").
        return ValueKey::Numeric(base);
    }

    ValueKey::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_monotonic() {
        let keys: Vec<ValueKey> = ["1p", "1n", "1u", "1m", "1", "1k", "1M", "1G"]
            .iter()
            .map(|v| parse(v))
            .collect();
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should sort before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_embedded_equals_suffix() {
        assert_eq!(parse("4k7"), parse("4.7k"));
        assert_eq!(parse("0R1"), parse("0.1"));
        assert_eq!(parse("1M2"), parse("1.2M"));
    }

    #[test]
    fn test_magnitude_letters_are_case_sensitive() {
        assert!(parse("1m") < parse("1"));
        assert!(parse("1") < parse("1M"));
        assert_ne!(parse("1m"), parse("1M"));
    }

    #[test]
    fn test_units_are_ignored() {
        assert_eq!(parse("10uF"), parse("10u"));
        assert_eq!(parse("100nF"), parse("100n"));
        assert_eq!(parse("10Hz"), parse("10"));
        assert_eq!(parse("10R"), parse("10"));
    }

    #[test]
    fn test_unparseable_sorts_last() {
        for parseable in ["1G", "10M", "999k"] {
            assert!(parse(parseable) < parse("DNF"));
        }
        assert_eq!(parse(""), ValueKey::Text(String::new()));
    }

    #[test]
    fn test_unparseable_ties_break_on_text() {
        assert!(parse("ABC") < parse("DNF"));
        assert_eq!(parse("DNF"), parse("DNF"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse(" 4.7k "), parse("4.7k"));
    }
}
