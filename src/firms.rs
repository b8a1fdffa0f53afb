//! Firm frequency index used to populate the filter control.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::models::RawRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmIndex {
    /// Sorted by descending count; ties keep first-seen order
    pub firms: Vec<FirmCount>,
    pub total_firms: usize,
    pub total_projects: usize,
}

impl FirmIndex {
    /// Count every author across all records, geolocated or not
    pub fn from_records(records: &[RawRecord]) -> Self {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut firms: Vec<FirmCount> = Vec::new();

        for name in records.iter().flat_map(|r| r.author.iter()) {
            match slots.get(name.as_str()) {
                Some(&slot) => firms[slot].count += 1,
                None => {
                    slots.insert(name.as_str(), firms.len());
                    firms.push(FirmCount {
                        name: name.clone(),
                        count: 1,
                    });
                }
            }
        }

        firms.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_firms: firms.len(),
            total_projects: records.len(),
            firms,
        }
    }

    /// Top `n` firms by project count
    pub fn top(&self, n: usize) -> &[FirmCount] {
        &self.firms[..n.min(self.firms.len())]
    }
}
