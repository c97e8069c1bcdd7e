use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Registry of entity strings the user has confirmed (for example, selected emails).
///
/// Membership is the primary query. Confirmation order is also kept, duplicates
/// included, because the postable form numbers each entity by the position of
/// its first confirmation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KnownEntitySet {
    /// Every confirmation, oldest first
    entries: Vec<String>,
    /// Distinct members mapped to the position of their first confirmation
    members: HashMap<String, usize>,
}

impl KnownEntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a confirmation of `entity`.
    ///
    /// Returns `true` when the entity was not a member before.
    pub fn insert(&mut self, entity: impl Into<String>) -> bool {
        let entity = entity.into();
        let position = self.entries.len();
        let newly_added = !self.members.contains_key(&entity);
        if newly_added {
            self.members.insert(entity.clone(), position);
        }
        self.entries.push(entity);
        newly_added
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.members.contains_key(entity)
    }

    /// Position of the first confirmation of `entity`, if any.
    pub fn first_index(&self, entity: &str) -> Option<usize> {
        self.members.get(entity).copied()
    }

    /// Forget every confirmation of `entity`. Returns how many entries were removed.
    pub fn remove(&mut self, entity: &str) -> usize {
        if self.members.remove(entity).is_none() {
            return 0;
        }
        let before = self.entries.len();
        self.entries.retain(|existing| existing != entity);
        self.members = first_positions(&self.entries);
        before - self.entries.len()
    }

    /// Number of confirmations, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct members.
    pub fn distinct_len(&self) -> usize {
        self.members.len()
    }

    /// All confirmations in order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Distinct members ordered by their first confirmation.
    pub fn iter_distinct(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, entity)| self.members.get(entity.as_str()) == Some(index))
            .map(|(index, entity)| (index, entity.as_str()))
    }
}

impl From<Vec<String>> for KnownEntitySet {
    fn from(entries: Vec<String>) -> Self {
        let members = first_positions(&entries);
        Self { entries, members }
    }
}

fn first_positions(entries: &[String]) -> HashMap<String, usize> {
    let mut positions = HashMap::with_capacity(entries.len());
    for (index, entity) in entries.iter().enumerate() {
        positions.entry(entity.clone()).or_insert(index);
    }
    positions
}

impl From<KnownEntitySet> for Vec<String> {
    fn from(set: KnownEntitySet) -> Self {
        set.entries
    }
}

impl<S: Into<String>> FromIterator<S> for KnownEntitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for entity in iter {
            set.insert(entity);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for KnownEntitySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for entity in iter {
            self.insert(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_keep_first_index() {
        let mut set = KnownEntitySet::new();
        assert!(set.insert("a@example.com"));
        assert!(set.insert("b@example.com"));
        assert!(!set.insert("a@example.com"));
        assert!(set.insert("c@example.com"));

        assert_eq!(set.len(), 4);
        assert_eq!(set.distinct_len(), 3);
        assert_eq!(set.first_index("a@example.com"), Some(0));
        assert_eq!(set.first_index("c@example.com"), Some(3));
        assert_eq!(set.first_index("missing@example.com"), None);
    }

    #[test]
    fn iter_distinct_reports_first_positions() {
        let set: KnownEntitySet = ["x", "y", "x", "z"].into_iter().collect();
        let distinct: Vec<_> = set.iter_distinct().collect();
        assert_eq!(distinct, vec![(0, "x"), (1, "y"), (3, "z")]);
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut set: KnownEntitySet = ["x", "y", "x"].into_iter().collect();
        assert_eq!(set.remove("x"), 2);
        assert!(!set.contains("x"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["y"]);
        assert_eq!(set.remove("x"), 0);
    }

    #[test]
    fn first_positions_shift_after_remove() {
        let mut set: KnownEntitySet = ["x", "y", "x", "z", "y"].into_iter().collect();
        set.remove("x");
        assert_eq!(set.first_index("y"), Some(0));
        assert_eq!(set.first_index("z"), Some(1));
        assert_eq!(set.iter_distinct().collect::<Vec<_>>(), vec![(0, "y"), (1, "z")]);
    }

    #[test]
    fn many_duplicates_keep_distinct_view_small() {
        let mut set = KnownEntitySet::new();
        for round in 0..500 {
            set.insert(format!("user{}@example.com", round % 3));
        }
        assert_eq!(set.len(), 500);
        assert_eq!(set.iter_distinct().map(|(index, _)| index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn deserializes_from_plain_list() {
        let set: KnownEntitySet = serde_json::from_str(r#"["a@example.com","a@example.com"]"#).expect("deserialize");
        assert!(set.contains("a@example.com"));
        assert_eq!(set.len(), 2);
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["a@example.com","a@example.com"]"#);
    }
}
