// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/bom.rs - Grouping, sorting, and merging of normalized components.
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
 * # `bom` Module
 *
 * This module runs the core BOM pipeline over normalized components:
 *
 * 1. Partition into per-class buckets, preserving first-seen order.
 * 2. Stable ascending sort of each bucket by the value ordering key.
 * 3. Merge members that share every canonical attribute into one row.
 * 4. Order the finished groups alphabetically by class.
 *
 * Each phase consumes the previous phase's complete output and builds new
 * structures; nothing is mutated in place across phases and the result is
 * read-only for the renderers.
 *
 * ## Usage Example
 *
 * ```
 * use pcbbom::bom::Bom;
 * use pcbbom::component::{Component, ComponentRecord};
 * use pcbbom::footprint::SubstitutionTable;
 *
 * let subs = SubstitutionTable::empty();
 * let components = [("R1", "10k"), ("R2", "4.7k"), ("C1", "100n")]
 *     .into_iter()
 *     .filter_map(|(reference, value)| {
 *         Component::from_record(
 *             ComponentRecord {
 *                 reference: reference.to_string(),
 *                 value: value.to_string(),
 *                 footprint: "0402".to_string(),
 *                 ..Default::default()
 *             },
 *             &subs,
 *         )
 *     })
 *     .collect();
 *
 * let bom = Bom::from_components(components);
 * assert_eq!(bom.groups[0].class, "C");
 * assert_eq!(bom.groups[1].rows[0].value, "4.7k");
 * ```
 */

use std::collections::HashMap;

use log::debug;

use crate::component::Component;

/// One aggregated BOM line: every component that shares the same canonical
/// attributes, collapsed into a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    /// Number of components collapsed into this row.
    pub count: usize,
    /// Contributing reference designators, in value-sorted order.
    pub references: Vec<String>,
    /// The display value, from the first contributing member.
    pub value: String,
    /// The canonical footprint. Never the "no part" sentinel.
    pub footprint: String,
    pub precision: Option<String>,
    pub note: Option<String>,
    pub part_number: Option<String>,
    pub code: Option<String>,
}

impl MergedRow {
    /// The reference designators joined for display.
    pub fn reference_list(&self) -> String {
        self.references.join(", ")
    }

    /// The canonical footprint with code and precision appended when present.
    pub fn footprint_details(&self) -> String {
        let mut details = self.footprint.clone();
        if let Some(code) = &self.code {
            details.push_str(", ");
            details.push_str(code);
        }
        if let Some(precision) = &self.precision {
            details.push_str(", ");
            details.push_str(precision);
        }
        details
    }
}

/// The merged rows of one designator class, in ascending value order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The designator class (e.g. "R").
    pub class: String,
    /// The merged rows of this class.
    pub rows: Vec<MergedRow>,
}

impl Group {
    /// Total number of components represented by this group.
    pub fn component_count(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }
}

/// A complete bill of materials: groups in class order, rows in value order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bom {
    pub groups: Vec<Group>,
}

/// Everything that must match for two components to share a row.
#[derive(Hash, PartialEq, Eq)]
struct MergeKey {
    footprint: String,
    value: String,
    precision: Option<String>,
    note: Option<String>,
    part_number: Option<String>,
    code: Option<String>,
}

impl Bom {
    /// Builds the BOM from normalized components.
    ///
    /// The input order only matters as a tie-break: components with equal
    /// ordering keys keep their relative input order.
    pub fn from_components(components: Vec<Component>) -> Self {
        let mut groups: Vec<Group> = group_by_class(components)
            .into_iter()
            .map(|(class, members)| Group {
                class,
                rows: merge_members(sort_by_value(members)),
            })
            .collect();

        groups.sort_by(|a, b| a.class.cmp(&b.class));

        debug!("built {} groups", groups.len());

        Self { groups }
    }
}

/// Partitions components into per-class buckets in one linear pass,
/// preserving first-seen order within each bucket.
fn group_by_class(components: Vec<Component>) -> Vec<(String, Vec<Component>)> {
    let mut buckets: Vec<(String, Vec<Component>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for component in components {
        match index.get(&component.class) {
            Some(&i) => buckets[i].1.push(component),
            None => {
                index.insert(component.class.clone(), buckets.len());
                buckets.push((component.class.clone(), vec![component]));
            }
        }
    }

    buckets
}

/// Stable ascending sort by the value ordering key.
fn sort_by_value(mut members: Vec<Component>) -> Vec<Component> {
    members.sort_by(|a, b| a.value_key.cmp(&b.value_key));
    members
}

/// Collapses members that share every canonical attribute into one row,
/// keeping the rows in the order their first member appears.
fn merge_members(members: Vec<Component>) -> Vec<MergedRow> {
    let mut rows: Vec<MergedRow> = Vec::new();
    let mut index: HashMap<MergeKey, usize> = HashMap::new();

    for member in members {
        let key = MergeKey {
            footprint: member.canonical_footprint.clone(),
            value: member.value.clone(),
            precision: member.precision.clone(),
            note: member.note.clone(),
            part_number: member.part_number.clone(),
            code: member.code.clone(),
        };

        match index.get(&key) {
            Some(&i) => {
                rows[i].count += 1;
                rows[i].references.push(member.reference);
            }
            None => {
                index.insert(key, rows.len());
                rows.push(MergedRow {
                    count: 1,
                    references: vec![member.reference],
                    value: member.value,
                    footprint: member.canonical_footprint,
                    precision: member.precision,
                    note: member.note,
                    part_number: member.part_number,
                    code: member.code,
                });
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRecord;
    use crate::footprint::SubstitutionTable;

    fn component(reference: &str, value: &str, footprint: &str) -> Component {
        Component::from_record(
            ComponentRecord {
                reference: reference.to_string(),
                value: value.to_string(),
                footprint: footprint.to_string(),
                ..Default::default()
            },
            &SubstitutionTable::empty(),
        )
        .unwrap()
    }

    #[test]
    fn test_resistors_merge_and_sort_by_value() {
        let bom = Bom::from_components(vec![
            component("R1", "10k", "0402"),
            component("R2", "4.7k", "0402"),
            component("R3", "10k", "0402"),
        ]);

        assert_eq!(bom.groups.len(), 1);
        let group = &bom.groups[0];
        assert_eq!(group.class, "R");
        assert_eq!(group.rows.len(), 2);

        assert_eq!(group.rows[0].value, "4.7k");
        assert_eq!(group.rows[0].count, 1);
        assert_eq!(group.rows[0].references, vec!["R2"]);

        assert_eq!(group.rows[1].value, "10k");
        assert_eq!(group.rows[1].count, 2);
        assert_eq!(group.rows[1].references, vec!["R1", "R3"]);
    }

    #[test]
    fn test_groups_are_ordered_alphabetically() {
        let bom = Bom::from_components(vec![
            component("U1", "MCU", "QFP"),
            component("R1", "10k", "0402"),
            component("C1", "100n", "0402"),
        ]);

        let classes: Vec<&str> = bom.groups.iter().map(|g| g.class.as_str()).collect();
        assert_eq!(classes, vec!["C", "R", "U"]);
    }

    #[test]
    fn test_counts_are_conserved() {
        let components = vec![
            component("R1", "10k", "0402"),
            component("R2", "10k", "0402"),
            component("R3", "4.7k", "0603"),
            component("C1", "100n", "0402"),
            component("C2", "100n", "0402"),
        ];
        let per_class: Vec<(String, usize)> = [("C", 2), ("R", 3)]
            .into_iter()
            .map(|(class, count)| (class.to_string(), count))
            .collect();

        let bom = Bom::from_components(components);
        for (class, count) in per_class {
            let group = bom.groups.iter().find(|g| g.class == class).unwrap();
            assert_eq!(group.component_count(), count);
        }
    }

    #[test]
    fn test_distinct_rows_do_not_collapse_further() {
        // Merging a set that is already one-per-key leaves it unchanged.
        let components = vec![
            component("R1", "1k", "0402"),
            component("R2", "2k", "0402"),
            component("R3", "2k", "0603"),
        ];

        let bom = Bom::from_components(components);
        assert_eq!(bom.groups[0].rows.len(), 3);
        for row in &bom.groups[0].rows {
            assert_eq!(row.count, 1);
        }
    }

    #[test]
    fn test_no_part_components_never_reach_a_row() {
        let subs = SubstitutionTable::empty();
        let records = vec![
            ComponentRecord {
                reference: "R1".to_string(),
                value: "10k".to_string(),
                footprint: "0402".to_string(),
                ..Default::default()
            },
            ComponentRecord {
                reference: "TP1".to_string(),
                value: "".to_string(),
                footprint: "TestPoint (no part)".to_string(),
                ..Default::default()
            },
        ];

        let components: Vec<Component> = records
            .into_iter()
            .filter_map(|record| Component::from_record(record, &subs))
            .collect();
        let bom = Bom::from_components(components);

        for group in &bom.groups {
            for row in &group.rows {
                assert!(!row.references.contains(&"TP1".to_string()));
                assert!(!row.footprint.to_ascii_lowercase().contains("no part"));
            }
        }
        assert_eq!(bom.groups.len(), 1);
    }

    #[test]
    fn test_differing_precision_blocks_merge() {
        let mut precise = component("R1", "10k", "0402");
        precise.precision = Some("1%".to_string());
        let plain = component("R2", "10k", "0402");

        let bom = Bom::from_components(vec![precise, plain]);
        assert_eq!(bom.groups[0].rows.len(), 2);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        // Unparseable values share the same key and must stay in input order.
        let bom = Bom::from_components(vec![
            component("U2", "DNF", "QFP"),
            component("U1", "DNF", "SOIC"),
        ]);

        let references: Vec<&str> = bom.groups[0]
            .rows
            .iter()
            .flat_map(|row| row.references.iter().map(String::as_str))
            .collect();
        assert_eq!(references, vec!["U2", "U1"]);
    }

    #[test]
    fn test_unparseable_values_sort_after_numeric() {
        let bom = Bom::from_components(vec![
            component("R1", "DNF", "0402"),
            component("R2", "1M", "0402"),
        ]);

        assert_eq!(bom.groups[0].rows[0].value, "1M");
        assert_eq!(bom.groups[0].rows[1].value, "DNF");
    }

    #[test]
    fn test_footprint_details_appends_code_and_precision() {
        let row = MergedRow {
            count: 1,
            references: vec!["R1".to_string()],
            value: "10k".to_string(),
            footprint: "0402".to_string(),
            precision: Some("1%".to_string()),
            note: None,
            part_number: None,
            code: Some("ERJ".to_string()),
        };
        assert_eq!(row.footprint_details(), "0402, ERJ, 1%");
        assert_eq!(row.reference_list(), "R1");
    }
}
