// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit listing returned by the stick's pairing database.

use serde::{Deserialize, Serialize};

/// One row of the stick's unit database.
///
/// The driver returns rows in ascending order of an internal unit id it
/// does not expose. That order is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Unit code programmed into paired receivers.
    pub unit_code: String,
    /// Rolling code increment of the unit.
    pub increment: u32,
}

impl UnitRecord {
    /// Creates a unit record.
    #[must_use]
    pub fn new(unit_code: impl Into<String>, increment: u32) -> Self {
        Self {
            unit_code: unit_code.into(),
            increment,
        }
    }
}

/// A [`UnitRecord`] labelled with its position in the listing.
///
/// The id is only meaningful for display. It shifts whenever the driver's
/// database changes and must not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedUnit {
    /// 1-based position in the driver listing.
    pub id: usize,
    /// The underlying record.
    #[serde(flatten)]
    pub record: UnitRecord,
}

/// Labels records with sequential ids starting at 1, preserving order.
///
/// # Examples
///
/// ```
/// use centronic_lib::response::{number_units, UnitRecord};
///
/// let numbered = number_units(vec![
///     UnitRecord::new("12345", 7),
///     UnitRecord::new("0abcd", 2),
/// ]);
/// assert_eq!(numbered[0].id, 1);
/// assert_eq!(numbered[1].record.unit_code, "0abcd");
/// ```
#[must_use]
pub fn number_units(records: Vec<UnitRecord>) -> Vec<NumberedUnit> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| NumberedUnit { id: i + 1, record })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_ignores_unit_codes() {
        let numbered = number_units(vec![
            UnitRecord::new("fffff", 1),
            UnitRecord::new("00001", 9),
            UnitRecord::new("80000", 3),
        ]);

        let ids: Vec<_> = numbered.iter().map(|u| u.id).collect();
        let codes: Vec<_> = numbered.iter().map(|u| u.record.unit_code.as_str()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(codes, vec!["fffff", "00001", "80000"]);
    }

    #[test]
    fn numbering_empty_listing() {
        assert!(number_units(Vec::new()).is_empty());
    }

    #[test]
    fn numbered_unit_serializes_flat() {
        let numbered = number_units(vec![UnitRecord::new("12345", 4)]);
        let json = serde_json::to_value(&numbered[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "unit_code": "12345", "increment": 4})
        );
    }
}
