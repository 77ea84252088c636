//! Ordered topic catalog with legacy file-name compatibility.

use std::collections::{HashMap, HashSet};

use super::topic::{Topic, TopicId};
use crate::domain::errors::CatalogError;

/// Built-in topic sequence: `(file, label)`.
const DEFAULT_TOPICS: &[(&str, &str)] = &[
    ("Overview.md", "Overview"),
    ("1-OOP.md", "Object-Oriented Programming"),
    ("2-Inheritance.md", "Inheritance"),
    ("3-Polymorphism.md", "Polymorphism"),
    ("4-Templates.md", "Templates"),
    ("5-SmartPointers.md", "Smart Pointers"),
    ("6-OperatorOverloading.md", "Operator Overloading"),
    ("7-Algorithms.md", "Algorithms"),
    ("0-StudyGuide.md", "Study Guide"),
    ("CheatSheet.md", "Cheat Sheet"),
];

/// Length of the numbered lesson prefix in [`DEFAULT_TOPICS`].
const DEFAULT_MAIN_COUNT: usize = 8;

/// File names used by earlier layouts of the guide: `(old, current)`.
const DEFAULT_LEGACY: &[(&str, &str)] = &[
    ("README.md", "Overview.md"),
    ("00-Overview.md", "Overview.md"),
    ("OOP.md", "1-OOP.md"),
    ("01-OOP.md", "1-OOP.md"),
    ("Inheritance.md", "2-Inheritance.md"),
    ("02-Inheritance.md", "2-Inheritance.md"),
    ("Polymorphism.md", "3-Polymorphism.md"),
    ("03-Polymorphism.md", "3-Polymorphism.md"),
    ("Templates.md", "4-Templates.md"),
    ("04-Templates.md", "4-Templates.md"),
    ("SmartPointers.md", "5-SmartPointers.md"),
    ("05-SmartPointers.md", "5-SmartPointers.md"),
    ("OperatorOverloading.md", "6-OperatorOverloading.md"),
    ("06-OperatorOverloading.md", "6-OperatorOverloading.md"),
    ("Algorithms.md", "7-Algorithms.md"),
    ("07-Algorithms.md", "7-Algorithms.md"),
    ("StudyGuide.md", "0-StudyGuide.md"),
    ("08-StudyGuide.md", "0-StudyGuide.md"),
    ("Cheatsheet.md", "CheatSheet.md"),
    ("09-CheatSheet.md", "CheatSheet.md"),
];

/// The fixed, ordered topic sequence of a guide.
///
/// The first `main_count` topics form the main curriculum; the rest is
/// reference material.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
    main_count: usize,
    legacy: HashMap<String, TopicId>,
}

impl TopicCatalog {
    /// Builds and validates a catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the sequence is empty, an id repeats,
    /// `main_count` is out of range or an alias points at an unknown topic.
    pub fn new<T, L>(topics: T, main_count: usize, legacy: L) -> Result<Self, CatalogError>
    where
        T: IntoIterator<Item = (String, String)>,
        L: IntoIterator<Item = (String, String)>,
    {
        let topics: Vec<Topic> = topics
            .into_iter()
            .enumerate()
            .map(|(index, (file, label))| Topic::new(file, label, index))
            .collect();

        if topics.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for topic in &topics {
            if !seen.insert(topic.id().as_str()) {
                return Err(CatalogError::DuplicateTopic {
                    id: topic.id().to_string(),
                });
            }
        }

        if main_count == 0 || main_count > topics.len() {
            return Err(CatalogError::InvalidMainCount {
                main_count,
                len: topics.len(),
            });
        }

        let mut aliases = HashMap::new();
        for (old, current) in legacy {
            if !seen.contains(current.as_str()) {
                return Err(CatalogError::UnknownAliasTarget {
                    alias: old,
                    target: current,
                });
            }
            aliases.insert(old, TopicId::new(current));
        }

        Ok(Self {
            topics,
            main_count,
            legacy: aliases,
        })
    }

    /// The C++ study guide shipped with the reader.
    #[must_use]
    pub fn builtin() -> Self {
        let topics = DEFAULT_TOPICS
            .iter()
            .map(|(file, label)| ((*file).to_string(), (*label).to_string()));
        let legacy = DEFAULT_LEGACY
            .iter()
            .map(|(old, current)| ((*old).to_string(), (*current).to_string()));

        match Self::new(topics, DEFAULT_MAIN_COUNT, legacy) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("built-in catalog is valid: {e}"),
        }
    }

    /// Built-in alias table. A custom guide inherits the entries whose
    /// target it still lists.
    #[must_use]
    pub fn builtin_legacy() -> Vec<(String, String)> {
        DEFAULT_LEGACY
            .iter()
            .map(|(old, current)| ((*old).to_string(), (*current).to_string()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    #[must_use]
    pub fn first(&self) -> &Topic {
        &self.topics[0]
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.topics.len() - 1
    }

    /// Number of topics in the main curriculum.
    #[must_use]
    pub const fn main_count(&self) -> usize {
        self.main_count
    }

    /// Returns whether the index lies in the main curriculum.
    #[must_use]
    pub const fn is_main(&self, index: usize) -> bool {
        index < self.main_count
    }

    /// Exact lookup by current file name.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id() == id)
    }

    /// Looks a reference up by current name first, then through the legacy
    /// alias table. A leading `./` is ignored.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<&Topic> {
        let reference = reference.trim().trim_start_matches("./");
        if reference.is_empty() {
            return None;
        }

        self.find(reference).or_else(|| {
            self.legacy
                .get(reference)
                .and_then(|current| self.find(current.as_str()))
        })
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = TopicCatalog::builtin();

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.main_count(), 8);
        assert_eq!(catalog.first().id(), "Overview.md");
        assert_eq!(catalog.get(8).unwrap().id(), "0-StudyGuide.md");
        assert_eq!(catalog.get(9).unwrap().id(), "CheatSheet.md");
        assert!(catalog.is_main(7));
        assert!(!catalog.is_main(8));
    }

    #[test]
    fn test_indices_follow_sequence() {
        let catalog = TopicCatalog::builtin();
        for (i, topic) in catalog.topics().iter().enumerate() {
            assert_eq!(topic.index(), i);
        }
    }

    #[test_case("OOP.md", "1-OOP.md")]
    #[test_case("01-OOP.md", "1-OOP.md")]
    #[test_case("README.md", "Overview.md")]
    #[test_case("StudyGuide.md", "0-StudyGuide.md")]
    #[test_case("Cheatsheet.md", "CheatSheet.md")]
    #[test_case("./2-Inheritance.md", "2-Inheritance.md")]
    fn test_resolve_legacy_names(reference: &str, expected: &str) {
        let catalog = TopicCatalog::builtin();
        let via_alias = catalog.resolve(reference).unwrap();
        let via_current = catalog.resolve(expected).unwrap();

        assert_eq!(via_alias.id(), expected);
        assert_eq!(via_alias, via_current);
    }

    #[test]
    fn test_every_builtin_alias_resolves() {
        let catalog = TopicCatalog::builtin();
        for (old, current) in TopicCatalog::builtin_legacy() {
            assert_eq!(catalog.resolve(&old).unwrap().id(), current.as_str());
        }
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let catalog = TopicCatalog::builtin();
        assert!(catalog.resolve("Nope.md").is_none());
        assert!(catalog.resolve("").is_none());
        assert!(catalog.find("OOP.md").is_none());
    }

    #[test]
    fn test_rejects_empty() {
        let result = TopicCatalog::new(Vec::new(), 1, Vec::new());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = TopicCatalog::new(vec![pair("a.md", "A"), pair("a.md", "A again")], 1, vec![]);
        assert!(matches!(result, Err(CatalogError::DuplicateTopic { .. })));
    }

    #[test_case(0)]
    #[test_case(3)]
    fn test_rejects_main_count_out_of_range(main_count: usize) {
        let result = TopicCatalog::new(vec![pair("a.md", "A"), pair("b.md", "B")], main_count, vec![]);
        assert!(matches!(result, Err(CatalogError::InvalidMainCount { .. })));
    }

    #[test]
    fn test_rejects_dangling_alias() {
        let result = TopicCatalog::new(vec![pair("a.md", "A")], 1, vec![pair("old.md", "gone.md")]);
        assert!(matches!(result, Err(CatalogError::UnknownAliasTarget { .. })));
    }
}
