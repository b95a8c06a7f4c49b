// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  bomgen.rs - BOM generation demo for KiCad netlist exports.
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

use std::fs::File;
use std::path::Path;

use clap::Parser;

use pcbbom::bom::Bom;
use pcbbom::component::*;
use pcbbom::footprint::*;
use pcbbom::netlist::*;
use pcbbom::output::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The netlist file to read.
    file: String,

    /// The footprint substitution rules file.
    #[arg(long, default_value = "subs.txt")]
    subs: String,

    /// The default component table file.
    #[arg(long, default_value = "defaults.txt")]
    defaults: String,

    /// Where to write the TSV listing, if anywhere.
    #[arg(long)]
    tsv: Option<String>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let subs = match SubstitutionTable::from_path(Path::new(&args.subs)) {
        Ok(table) => table,
        Err(error) => {
            eprintln!("Error loading substitution rules {:?}: {:?}", &args.subs, error);
            return;
        }
    };

    let defaults = match DefaultsTable::from_path(Path::new(&args.defaults)) {
        Ok(table) => table,
        Err(error) => {
            eprintln!("Error loading default components {:?}: {:?}", &args.defaults, error);
            return;
        }
    };

    let netlist = match Netlist::from_path(Path::new(&args.file)) {
        Ok(netlist) => netlist,
        Err(error) => {
            eprintln!("Error reading netlist {:?}: {:?}", &args.file, error);
            return;
        }
    };

    if let Some(source) = &netlist.source {
        println!("Source: {}", source);
    }
    if let Some(date) = &netlist.date {
        println!("Exported: {}", date);
    }
    let now = chrono::Utc::now();
    println!("Generated: {}", now.format("%Y-%m-%d"));
    println!();

    let components: Vec<Component> = netlist
        .components
        .into_iter()
        .filter_map(|record| Component::from_record(record, &subs))
        .collect();

    let bom = Bom::from_components(components);

    if let Some(tsv_path) = &args.tsv {
        let file = match File::create(tsv_path) {
            Ok(file) => file,
            Err(error) => {
                eprintln!("Error creating output file {:?}: {:?}", tsv_path, error);
                return;
            }
        };
        if let Err(error) = write_tsv(&bom, &defaults, file) {
            eprintln!("Error writing TSV {:?}: {:?}", tsv_path, error);
            return;
        }
    }

    if let Err(error) = write_report(&bom, &defaults, std::io::stdout().lock()) {
        eprintln!("Error writing report: {:?}", error);
    }
}
