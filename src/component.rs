// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/component.rs - Component normalization and designator classing.
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
 * # `component` Module
 *
 * This module turns raw netlist records into normalized, immutable
 * components: the designator class ("R" for "R12"), the magnitude-aware
 * ordering key, and the canonical footprint are all derived at
 * construction time and never change afterwards.
 *
 * It also holds the default-component table, a per-class annotation
 * (long name, default type) consulted only when rendering group headers.
 */

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::footprint::SubstitutionTable;
use crate::value;
use crate::value::ValueKey;

/// One component record as read from the netlist, before normalization.
#[derive(Debug, Clone, Default)]
pub struct ComponentRecord {
    /// The reference designator (e.g. "R12").
    pub reference: String,
    /// The display value (e.g. "4.7k").
    pub value: String,
    /// The raw footprint identifier from the CAD export.
    pub footprint: String,
    /// Replaces the canonical footprint label when present.
    pub footprint_override: Option<String>,
    pub precision: Option<String>,
    pub note: Option<String>,
    pub part_number: Option<String>,
    pub code: Option<String>,
}

/// A normalized component, immutable after construction.
#[derive(Debug, Clone)]
pub struct Component {
    /// The reference designator (e.g. "R12"), unique across a design.
    pub reference: String,
    /// The designator class (e.g. "R"), derived from the reference.
    pub class: String,
    /// The display value (e.g. "4.7k").
    pub value: String,
    /// Ordering key derived from [Component::value].
    pub value_key: ValueKey,
    /// The raw footprint identifier from the CAD export.
    pub footprint: String,
    /// The footprint label after substitution-rule application.
    pub canonical_footprint: String,
    pub precision: Option<String>,
    pub note: Option<String>,
    pub part_number: Option<String>,
    pub code: Option<String>,
}

impl Component {
    /// Normalizes a netlist record against the substitution rules.
    ///
    /// Returns `None` for mechanical-only ("no part") entries, which never
    /// enter the BOM pipeline.
    pub fn from_record(record: ComponentRecord, subs: &SubstitutionTable) -> Option<Self> {
        let Some(canonical) = subs.canonicalize(&record.footprint) else {
            debug!("excluding {} (no part)", record.reference);
            return None;
        };
        let canonical = record.footprint_override.unwrap_or(canonical);

        Some(Self {
            class: designator_class(&record.reference).to_string(),
            value_key: value::parse(&record.value),
            reference: record.reference,
            value: record.value,
            footprint: record.footprint,
            canonical_footprint: canonical,
            precision: record.precision,
            note: record.note,
            part_number: record.part_number,
            code: record.code,
        })
    }
}

/// Returns the maximal leading run of non-digit characters of a reference.
///
/// A reference with no digit at all classifies as itself.
pub fn designator_class(reference: &str) -> &str {
    match reference.find(|c: char| c.is_ascii_digit()) {
        Some(first_digit) => &reference[..first_digit],
        None => reference,
    }
}

/// Per-class header annotation. Never part of the merge key.
#[derive(Debug, Clone)]
pub struct DefaultComponent {
    /// The human-readable class name (e.g. "Resistors").
    pub long_name: String,
    /// Whether the class has a default type worth calling out.
    pub has_default: bool,
    /// The default type text (e.g. "0402 1%").
    pub default_type: String,
}

/// The default-component table, mapping designator classes to their
/// header annotations.
#[derive(Debug)]
pub struct DefaultsTable {
    entries: HashMap<String, DefaultComponent>,
}

impl DefaultsTable {
    /// An empty table: no group gets an annotation.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads entries from tab-delimited
    /// `class<TAB>long name<TAB>has default<TAB>default type` records.
    ///
    /// The has-default field accepts "yes", "true", or "1" in any case.
    /// A record with fewer than four fields is a fatal error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Box<dyn std::error::Error>> {
        let mut entry_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for result in entry_reader.byte_records() {
            let record = result?;
            if record.len() < 4 {
                return Err("Default component entry needs four fields".into());
            }

            let class = String::from_utf8_lossy(&record[0]).to_string();
            let has_default_raw = String::from_utf8_lossy(&record[2]).to_string();
            let has_default = has_default_raw.eq_ignore_ascii_case("yes")
                || has_default_raw.eq_ignore_ascii_case("true")
                || has_default_raw == "1";

            entries.insert(
                class,
                DefaultComponent {
                    long_name: String::from_utf8_lossy(&record[1]).to_string(),
                    has_default,
                    default_type: String::from_utf8_lossy(&record[3]).to_string(),
                },
            );
        }

        debug!("loaded {} default component entries", entries.len());

        Ok(Self { entries })
    }

    /// Looks up the annotation for a designator class.
    pub fn find(&self, class: &str) -> Option<&DefaultComponent> {
        self.entries.get(class)
    }
}
