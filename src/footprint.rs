// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/footprint.rs - Footprint canonicalization via substitution rules.
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
 * # `footprint` Module
 *
 * This module maps raw CAD footprint identifiers (e.g.
 * "Resistor_SMD:R_0402_1005Metric") to the short canonical labels that
 * appear in the BOM (e.g. "0402"), driven by an ordered substitution rule
 * table loaded once per run.
 *
 * Footprints marked as mechanical-only ("no part", matched
 * case-insensitively anywhere in the raw string) canonicalize to `None`
 * and must be dropped before the component enters the BOM pipeline.
 */

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use log::debug;

const NO_PART_MARKER: &str = "no part";

/// Ordered footprint substitution rules, applied first-match-wins.
#[derive(Debug)]
pub struct SubstitutionTable {
    rules: Vec<(String, String)>,
}

impl SubstitutionTable {
    /// An empty table: every footprint passes through unchanged.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads rules from tab-delimited `pattern<TAB>replacement` records.
    ///
    /// A record with fewer than two fields is a fatal error; the rest of
    /// the pipeline cannot canonicalize without a complete rule table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Box<dyn std::error::Error>> {
        let mut rule_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut rules = Vec::new();
        for result in rule_reader.byte_records() {
            let record = result?;
            if record.len() < 2 {
                return Err("Substitution rule needs a pattern and a replacement".into());
            }
            rules.push((
                String::from_utf8_lossy(&record[0]).to_string(),
                String::from_utf8_lossy(&record[1]).to_string(),
            ));
        }

        debug!("loaded {} substitution rules", rules.len());

        Ok(Self { rules })
    }

    /// Canonicalizes a raw footprint string.
    ///
    /// Returns `None` for mechanical-only entries. Otherwise the first rule
    /// whose pattern occurs in the raw string supplies the canonical label;
    /// later rules are not consulted. With no match the raw string passes
    /// through unchanged.
    pub fn canonicalize(&self, raw: &str) -> Option<String> {
        if raw.to_ascii_lowercase().contains(NO_PART_MARKER) {
            return None;
        }

        for (pattern, replacement) in &self.rules {
            if raw.contains(pattern.as_str()) {
                return Some(replacement.clone());
            }
        }

        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rules: &[(&str, &str)]) -> SubstitutionTable {
        SubstitutionTable {
            rules: rules
                .iter()
                .map(|(p, r)| (p.to_string(), r.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_first_match_wins() {
        let table = table(&[("R_0402", "0402"), ("0402", "wrong")]);
        assert_eq!(
            table.canonicalize("Resistor_SMD:R_0402_1005Metric"),
            Some("0402".to_string())
        );
    }

    #[test]
    fn test_unmatched_passes_through() {
        let table = table(&[("R_0402", "0402")]);
        assert_eq!(
            table.canonicalize("TO-220"),
            Some("TO-220".to_string())
        );
    }

    #[test]
    fn test_no_part_is_excluded_case_insensitively() {
        let table = SubstitutionTable::empty();
        assert_eq!(table.canonicalize("no part"), None);
        assert_eq!(table.canonicalize("Mechanical:NO PART"), None);
        assert_eq!(table.canonicalize("fiducial, No Part"), None);
    }

    #[test]
    fn test_load_from_reader() {
        let rules = "R_0402\t0402\nC_0603\t0603\n";
        let table = SubstitutionTable::from_reader(rules.as_bytes()).unwrap();
        assert_eq!(table.canonicalize("C_0603"), Some("0603".to_string()));
    }

    #[test]
    fn test_malformed_rule_is_fatal() {
        let rules = "R_0402\t0402\nonly_a_pattern\n";
        assert!(SubstitutionTable::from_reader(rules.as_bytes()).is_err());
    }
}
