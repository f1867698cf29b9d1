//! Event database
//!
//! Holds the parsed events grouped by category. Categories are kept in the
//! order they were first seen, which is the order they are stacked in.

use crate::types::{Category, Event, Time};
use std::collections::HashMap;

/// Parsed events, grouped by category in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDatabase {
    /// Categories in first-seen order
    categories: Vec<Category>,

    /// Category name lookup
    /// Key: category name, Value: index into `categories`
    index: HashMap<String, usize>,
}

impl EventDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to `category`, creating the category on first sight
    pub(crate) fn push(&mut self, category: &str, event: Event) {
        let idx = match self.index.get(category) {
            Some(&idx) => idx,
            None => {
                log::debug!("New category #{}: {}", self.categories.len(), category);
                let idx = self.categories.len();
                self.categories.push(Category::new(category));
                self.index.insert(category.to_string(), idx);
                idx
            }
        };
        self.categories[idx].events.push(event);
    }

    /// Categories in first-seen order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Get a category by name
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&idx| &self.categories[idx])
    }

    /// Position of a category in the stacking order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Largest event time, or `None` for an empty database
    pub fn max_time(&self) -> Option<Time> {
        self.categories
            .iter()
            .flat_map(|c| c.events.iter())
            .map(|e| e.time)
            .max()
    }

    /// Get database statistics
    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            num_categories: self.categories.len(),
            num_events: self.categories.iter().map(|c| c.events.len()).sum(),
            num_labels: self
                .categories
                .iter()
                .flat_map(|c| c.events.iter())
                .filter(|e| e.has_label())
                .count(),
        }
    }
}

/// Statistics about the event database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub num_categories: usize,
    pub num_events: usize,
    pub num_labels: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut db = EventDatabase::new();
        db.push("zeta", Event::new(9, ""));
        db.push("alpha", Event::new(1, "a"));
        db.push("zeta", Event::new(2, "z"));

        let names: Vec<_> = db.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(db.position("alpha"), Some(1));
        assert_eq!(db.position("missing"), None);

        // Insertion order kept within a category
        let zeta = db.get("zeta").unwrap();
        assert_eq!(zeta.events, vec![Event::new(9, ""), Event::new(2, "z")]);
    }

    #[test]
    fn test_stats_and_max_time() {
        let mut db = EventDatabase::new();
        assert_eq!(db.max_time(), None);
        assert!(db.is_empty());

        db.push("x", Event::new(5, "a"));
        db.push("x", Event::new(5, "b"));
        db.push("y", Event::new(7, ""));

        assert_eq!(db.max_time(), Some(7));
        assert_eq!(
            db.stats(),
            DatabaseStats {
                num_categories: 2,
                num_events: 3,
                num_labels: 2,
            }
        );
    }
}
