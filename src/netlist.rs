// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/netlist.rs - Reader for KiCad XML netlist exports.
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
 * # `netlist` Module
 *
 * This module reads a KiCad XML netlist export (`<export>` root with a
 * `<design>` header and a `<components>` list) into raw component records.
 *
 * Custom BOM fields under `<fields>` are matched by case-insensitive name:
 * `bom_footprint`, `precision`, `bom_note`, `bom_partno`, and `code`.
 * A component missing its value or footprint element is not an error; the
 * empty string flows through and the pipeline's fallbacks absorb it.
 */

use std::fs;
use std::path::Path;

use log::debug;
use roxmltree::Document;
use roxmltree::Node;

use crate::component::ComponentRecord;

/// A parsed netlist export: the design header plus the raw component
/// records in file order.
#[derive(Debug)]
pub struct Netlist {
    /// The source design file named in the header.
    pub source: Option<String>,
    /// The export date from the header.
    pub date: Option<String>,
    /// Raw component records, in file order.
    pub components: Vec<ComponentRecord>,
}

impl Netlist {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        Self::from_xml(&text)
    }

    /// Parses the XML text of a netlist export.
    pub fn from_xml(xml: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != "export" {
            return Err("Expected root element 'export'".into());
        }

        let mut source = None;
        let mut date = None;
        if let Some(design) = child_element(root, "design") {
            source = child_text(design, "source");
            date = child_text(design, "date");
        }

        let components_node =
            child_element(root, "components").ok_or("Netlist has no 'components' section")?;

        let mut components = Vec::new();
        for comp in components_node
            .children()
            .filter(|n| n.has_tag_name("comp"))
        {
            let reference = comp
                .attribute("ref")
                .ok_or("Component without 'ref' attribute")?
                .to_string();

            let mut record = ComponentRecord {
                reference,
                value: child_text(comp, "value").unwrap_or_default(),
                footprint: child_text(comp, "footprint").unwrap_or_default(),
                ..Default::default()
            };

            if let Some(fields) = child_element(comp, "fields") {
                for field in fields.children().filter(|n| n.has_tag_name("field")) {
                    let Some(name) = field.attribute("name") else {
                        continue;
                    };
                    let text = field.text().unwrap_or_default().to_string();
                    match name.to_ascii_lowercase().as_str() {
                        "bom_footprint" => record.footprint_override = Some(text),
                        "precision" => record.precision = Some(text),
                        "bom_note" => record.note = Some(text),
                        "bom_partno" => record.part_number = Some(text),
                        "code" => record.code = Some(text),
                        _ => (),
                    }
                }
            }

            components.push(record);
        }

        debug!("read {} component records", components.len());

        Ok(Self {
            source,
            date,
            components,
        })
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text(node: Node, name: &str) -> Option<String> {
    child_element(node, name)
        .and_then(|n| n.text())
        .map(str::to_string)
}
