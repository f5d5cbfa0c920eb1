//! InstanceRegistry — marker name → owned instance handle

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Ownership table: не больше одного instance на marker
///
/// Entry существует iff instance создан и ещё не уничтожен.
#[derive(Debug, Clone)]
pub struct InstanceRegistry<I> {
    instances: HashMap<String, I>,
}

impl<I> Default for InstanceRegistry<I> {
    fn default() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }
}

impl<I> InstanceRegistry<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.instances.contains_key(marker)
    }

    pub fn get(&self, marker: &str) -> Option<&I> {
        self.instances.get(marker)
    }

    /// Создаёт instance только для пустого slot; занятый slot → `create` не вызывается
    pub fn insert_with(&mut self, marker: &str, create: impl FnOnce() -> I) -> bool {
        match self.instances.entry(marker.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(create());
                true
            }
        }
    }

    pub fn remove(&mut self, marker: &str) -> Option<I> {
        self.instances.remove(marker)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Имена маркеров с instance (отсортированы — для стабильного вывода)
    pub fn markers(&self) -> Vec<&str> {
        let mut markers: Vec<&str> = self.instances.keys().map(String::as_str).collect();
        markers.sort_unstable();
        markers
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &I)> {
        self.instances.iter().map(|(marker, instance)| (marker.as_str(), instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_slot_skips_create() {
        let mut registry = InstanceRegistry::new();
        let mut calls = 0;

        assert!(registry.insert_with("A", || {
            calls += 1;
            1u32
        }));
        assert!(!registry.insert_with("A", || {
            calls += 1;
            2u32
        }));

        assert_eq!(calls, 1);
        assert_eq!(registry.get("A"), Some(&1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_clears_entry() {
        let mut registry = InstanceRegistry::new();
        registry.insert_with("B", || 7u32);
        registry.insert_with("A", || 3u32);
        assert_eq!(registry.markers(), vec!["A", "B"]);

        let mut entries: Vec<(&str, u32)> = registry.iter().map(|(m, i)| (m, *i)).collect();
        entries.sort_unstable();
        assert_eq!(entries, vec![("A", 3), ("B", 7)]);

        assert_eq!(registry.remove("B"), Some(7));
        assert_eq!(registry.remove("B"), None);
        assert!(!registry.contains("B"));
        assert_eq!(registry.len(), 1);
    }
}
