//! Author/firm membership filter.

use hashbrown::HashSet;

use crate::models::RawRecord;

/// Selected firm names. Empty selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirmFilter {
    selected: HashSet<String>,
}

impl FirmFilter {
    /// Build a filter from names, trimmed. A blank name is still a
    /// selection; it just matches no record.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .collect();
        Self { selected }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name.trim())
    }

    /// Exact, case-sensitive match on any of the record's authors
    pub fn matches(&self, record: &RawRecord) -> bool {
        self.is_empty() || record.author.iter().any(|a| self.contains(a))
    }
}

impl<S: AsRef<str>> FromIterator<S> for FirmFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Keep records by firm, in input order. An empty filter keeps all.
pub fn filter_by_firms<'a, I>(records: I, filter: &FirmFilter) -> Vec<&'a RawRecord>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records.into_iter().filter(|r| filter.matches(r)).collect()
}
