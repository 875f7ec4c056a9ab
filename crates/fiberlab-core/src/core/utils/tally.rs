use std::collections::HashMap;
use std::ops::AddAssign;

/// A string-keyed accumulator that remembers the order in which keys first appeared.
///
/// Reports list fibers in first-seen order, so iteration follows insertion order rather than
/// hash order. Keys are matched exactly; "Cotton" and "cotton" are different fibers.
#[derive(Debug, Clone)]
pub struct FiberTally<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for FiberTally<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> FiberTally<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                self.entries.push((name.to_string(), make()));
                let slot = self.entries.len() - 1;
                self.index.insert(name.to_string(), slot);
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<V: Default + AddAssign> FiberTally<V> {
    pub fn add(&mut self, name: &str, value: V) {
        *self.entry_or_insert_with(name, V::default) += value;
    }
}

impl<V> IntoIterator for FiberTally<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_first_insertion_order() {
        let mut tally = FiberTally::new();
        tally.add("Wool", 1.0);
        tally.add("Cotton", 2.0);
        tally.add("Acrylic", 3.0);
        tally.add("Wool", 4.0);

        let names: Vec<&str> = tally.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Wool", "Cotton", "Acrylic"]);
    }

    #[test]
    fn add_accumulates_values_for_repeated_keys() {
        let mut tally = FiberTally::new();
        tally.add("Cotton", 60.0);
        tally.add("Cotton", 15.0);
        assert_eq!(tally.get("Cotton"), Some(&75.0));
        assert_eq!(tally.len(), 1);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut tally = FiberTally::new();
        tally.add("Cotton", 1.0);
        tally.add("cotton", 1.0);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn entry_or_insert_with_only_builds_missing_values() {
        let mut tally: FiberTally<Vec<u32>> = FiberTally::new();
        tally.entry_or_insert_with("Silk", Vec::new).push(1);
        tally.entry_or_insert_with("Silk", || panic!("must not rebuild")).push(2);
        assert_eq!(tally.get("Silk"), Some(&vec![1, 2]));
    }

    #[test]
    fn into_iter_yields_owned_pairs_in_order() {
        let mut tally = FiberTally::new();
        tally.add("B", 2.0);
        tally.add("A", 1.0);
        let pairs: Vec<(String, f64)> = tally.into_iter().collect();
        assert_eq!(pairs, vec![("B".to_string(), 2.0), ("A".to_string(), 1.0)]);
    }

    #[test]
    fn empty_tally_reports_empty() {
        let tally: FiberTally<f64> = FiberTally::default();
        assert!(tally.is_empty());
        assert_eq!(tally.get("Cotton"), None);
    }
}
