//! Reference set - the target side of a many-to-many relation
//!
//! Keyed by the target's id, so a set can never hold the same target twice.

use std::collections::BTreeMap;

use super::EntityId;

/// Set of referenced entities, unique by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSet<T> {
    items: BTreeMap<EntityId, T>,
}

impl<T> ReferenceSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Add a reference. Returns false if `id` was already present,
    /// in which case the existing entry is kept.
    pub fn insert(&mut self, id: EntityId, item: T) -> bool {
        if self.items.contains_key(&id) {
            return false;
        }
        self.items.insert(id, item);
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(&id)
    }

    /// Referenced ids, ascending
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.items.keys().copied()
    }

    /// Referenced entities, ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Id and entity pairs, ordered by id
    pub fn entries(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn into_values(self) -> impl Iterator<Item = T> {
        self.items.into_values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ReferenceSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(EntityId, T)> for ReferenceSet<T> {
    fn from_iter<I: IntoIterator<Item = (EntityId, T)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (id, item) in iter {
            set.insert(id, item);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let mut set = ReferenceSet::new();
        assert!(set.insert(EntityId::new(1), "Electronics"));
        assert!(!set.insert(EntityId::new(1), "Duplicate"));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(EntityId::new(1)), Some(&"Electronics"));
    }

    #[test]
    fn test_from_iterator_deduplicates() {
        let set: ReferenceSet<&str> = vec![
            (EntityId::new(3), "Computers"),
            (EntityId::new(1), "Electronics"),
            (EntityId::new(3), "Computers again"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains(EntityId::new(1)));
        assert!(set.contains(EntityId::new(3)));
        assert!(!set.contains(EntityId::new(2)));
    }

    #[test]
    fn test_empty_set() {
        let set: ReferenceSet<String> = ReferenceSet::default();
        assert!(set.is_empty());
        assert_eq!(set.ids().count(), 0);
    }
}
