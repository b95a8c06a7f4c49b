// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/lib.rs - BOM generation library for KiCad netlist exports.
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
 * # `pcbbom` Crate
 *
 * A library for turning a flat KiCad netlist export into a grouped,
 * deduplicated bill of materials.
 *
 * This crate provides a full pipeline for working with netlist exports:
 *
 * 1. [netlist]: Reads the XML export into raw component records.
 * 2. [component]: Normalizes each record into an immutable component
 *    (designator class, ordering key, canonical footprint), dropping
 *    mechanical-only entries.
 * 3. [bom]: Groups components by designator class, sorts each group by
 *    engineering value, merges identical members, and orders the groups.
 * 4. [output]: Renders the finished BOM as a TSV listing or a plain-text
 *    report.
 *
 * ## Usage Example
 *
 * ```no_run
 * use std::fs::File;
 * use std::path::Path;
 *
 * use pcbbom::bom::Bom;
 * use pcbbom::component::{Component, DefaultsTable};
 * use pcbbom::footprint::SubstitutionTable;
 * use pcbbom::netlist::Netlist;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     // Load the configuration tables
 *     let subs = SubstitutionTable::from_path(Path::new("subs.txt"))?;
 *     let defaults = DefaultsTable::from_path(Path::new("defaults.txt"))?;
 *
 *     // Read the netlist export
 *     let netlist = Netlist::from_path(Path::new("design.xml"))?;
 *
 *     // Normalize the component records
 *     let components: Vec<Component> = netlist
 *         .components
 *         .into_iter()
 *         .filter_map(|record| Component::from_record(record, &subs))
 *         .collect();
 *
 *     // Build and write the BOM
 *     let bom = Bom::from_components(components);
 *     pcbbom::output::write_tsv(&bom, &defaults, File::create("design_bom.txt")?)?;
 *
 *     Ok(())
 * }
 * ```
 */

pub mod bom;
pub mod component;
pub mod footprint;
pub mod netlist;
pub mod output;
pub mod value;
