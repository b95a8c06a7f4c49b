// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/output.rs - TSV and plain-text report rendering for finished BOMs.
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
 * # `output` Module
 *
 * Renderers for a finished [Bom](crate::bom::Bom). Both treat the BOM as
 * read-only and consult the default-component table only for group header
 * annotations.
 *
 * - [write_tsv]: a tab-separated listing, one `Group:` header per class
 *   followed by one record per merged row.
 * - [write_report]: an aligned plain-text table with the columns No.,
 *   Qty., Reference, Value, Type, Manufacturer Part No., and Notes, with
 *   sequence numbers running continuously across groups.
 */

use std::io::Write;

use crate::bom::Bom;
use crate::component::DefaultsTable;

const REPORT_HEADERS: [&str; 7] = [
    "No.",
    "Qty.",
    "Reference",
    "Value",
    "Type",
    "Manufacturer Part No.",
    "Notes",
];

fn header_annotation(defaults: &DefaultsTable, class: &str) -> Option<String> {
    let def = defaults.find(class)?;
    if def.has_default {
        Some(format!(
            "({}, {} unless otherwise stated)",
            def.long_name, def.default_type
        ))
    } else {
        Some(format!("({})", def.long_name))
    }
}

/// Writes the tab-separated BOM listing.
pub fn write_tsv<W: Write>(bom: &Bom, defaults: &DefaultsTable, mut out: W) -> std::io::Result<()> {
    for group in &bom.groups {
        writeln!(out, "Group: {} ({})", group.class, group.component_count())?;
        if let Some(annotation) = header_annotation(defaults, &group.class) {
            writeln!(out, "{}", annotation)?;
        }
        for row in &group.rows {
            writeln!(
                out,
                "\t{}\t{}\t{}\t{}\t{}",
                row.count,
                row.reference_list(),
                row.value,
                row.footprint,
                row.precision.as_deref().unwrap_or("")
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

enum ReportLine {
    GroupHeader(String, Option<String>),
    Cells([String; 7]),
}

/// Writes the BOM as an aligned plain-text table.
pub fn write_report<W: Write>(
    bom: &Bom,
    defaults: &DefaultsTable,
    mut out: W,
) -> std::io::Result<()> {
    let mut lines = Vec::new();
    let mut sequence = 1usize;

    for group in &bom.groups {
        let (title, note) = match defaults.find(&group.class) {
            Some(def) => (
                def.long_name.clone(),
                def.has_default
                    .then(|| format!("All {} unless otherwise stated", def.default_type)),
            ),
            None => (group.class.clone(), None),
        };
        lines.push(ReportLine::GroupHeader(title, note));

        for row in &group.rows {
            lines.push(ReportLine::Cells([
                sequence.to_string(),
                row.count.to_string(),
                row.reference_list(),
                row.value.clone(),
                row.footprint_details(),
                row.part_number.clone().unwrap_or_default(),
                row.note.clone().unwrap_or_default(),
            ]));
            sequence += 1;
        }
    }

    let mut widths = REPORT_HEADERS.map(str::len);
    for line in &lines {
        if let ReportLine::Cells(cells) = line {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let header: Vec<String> = REPORT_HEADERS
        .iter()
        .zip(&widths)
        .map(|(title, &width)| format!("{title:<width$}"))
        .collect();
    writeln!(out, "{}", header.join("  "))?;

    for line in &lines {
        match line {
            ReportLine::GroupHeader(title, note) => {
                writeln!(out)?;
                writeln!(out, "{}", title)?;
                if let Some(note) = note {
                    writeln!(out, "{}", note)?;
                }
            }
            ReportLine::Cells(cells) => {
                let padded: Vec<String> = cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &width)| format!("{cell:<width$}"))
                    .collect();
                writeln!(out, "{}", padded.join("  ").trim_end())?;
            }
        }
    }

    Ok(())
}
