//! The generator table.
//!
//! The set of generators is fixed at compile time; a registry is just an
//! ordered, shared list of them that layers pick from by index.

use std::fmt;
use std::sync::Arc;

use crate::config::GeneratorSet;
use crate::generator::{experimental_generators, production_generators, Generator};

/// An ordered catalog of generators.
#[derive(Clone, Default)]
pub struct Registry {
    generators: Vec<Arc<dyn Generator>>,
}

impl Registry {
    /// The production table.
    pub fn load() -> Self {
        Self::load_set(GeneratorSet::Production)
    }

    /// The table for a generator set.
    pub fn load_set(set: GeneratorSet) -> Self {
        let mut generators = production_generators();
        if set == GeneratorSet::All {
            generators.extend(experimental_generators());
        }
        Self { generators }
    }

    /// A table with exactly these generators, in order.
    pub fn from_generators(generators: Vec<Arc<dyn Generator>>) -> Self {
        Self { generators }
    }

    /// A table with no generators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of generators.
    pub fn count(&self) -> usize {
        self.generators.len()
    }

    /// Returns true when there is nothing to pick from.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generator at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Arc<dyn Generator>> {
        self.generators.get(index).cloned()
    }

    /// Iterate over the table in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Generator>> {
        self.generators.iter()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.generators.iter().map(|g| g.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_table() {
        let registry = Registry::load();
        assert_eq!(registry.count(), 5);
        let names: Vec<_> = registry.iter().map(|g| g.name()).collect();
        assert_eq!(
            names,
            vec!["coswave", "spinflake", "rangefrac", "flatwave", "bubble"]
        );
    }

    #[test]
    fn test_all_table_appends_experimental() {
        let registry = Registry::load_set(GeneratorSet::All);
        assert_eq!(registry.count(), 8);
        assert_eq!(registry.get(0).map(|g| g.name()), Some("coswave"));
        assert_eq!(registry.get(7).map(|g| g.name()), Some("ramp"));
    }

    #[test]
    fn test_get_past_end() {
        let registry = Registry::load();
        assert!(registry.get(5).is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::empty();
        assert_eq!(registry.count(), 0);
        assert!(registry.is_empty());
        assert!(registry.get(0).is_none());
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = Registry::load();
        assert_eq!(
            format!("{:?}", registry),
            r#"["coswave", "spinflake", "rangefrac", "flatwave", "bubble"]"#
        );
    }
}
