use super::{ElectionError, ElectionResult};
use serde::{Deserialize, Serialize};

/// Ordered set of candidate names for the current round.
///
/// Insertion order is the canonical display order; the tally keeps its
/// counts index-aligned with it. A runoff replaces the whole set with
/// the tied names, preserving their relative order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateRegistry {
    names: Vec<String>,
}

impl CandidateRegistry {
    pub fn register(&mut self, name: &str) -> ElectionResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ElectionError::InvalidCandidateName);
        }
        if self.contains(name) {
            return Err(ElectionError::DuplicateCandidate(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Index of `name` in display order, used as the tally slot.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Wholesale replacement for a runoff round.
    pub fn replace_with(&mut self, names: &[String]) {
        self.names = names.to_vec();
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut registry = CandidateRegistry::default();
        registry.register("carol").unwrap();
        registry.register("alice").unwrap();
        registry.register("bob").unwrap();
        assert_eq!(
            registry.names(),
            ["carol".to_string(), "alice".to_string(), "bob".to_string()]
        );
        assert_eq!(registry.position("bob"), Some(2));
    }

    #[test]
    fn rejects_duplicates_and_empty_names() {
        let mut registry = CandidateRegistry::default();
        registry.register("alice").unwrap();
        assert_eq!(
            registry.register("alice"),
            Err(ElectionError::DuplicateCandidate("alice".to_string()))
        );
        assert_eq!(
            registry.register("   "),
            Err(ElectionError::InvalidCandidateName)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn replace_with_drops_untied_names() {
        let mut registry = CandidateRegistry::default();
        registry.register("alice").unwrap();
        registry.register("bob").unwrap();
        registry.register("carol").unwrap();
        registry.replace_with(&["alice".to_string(), "carol".to_string()]);
        assert_eq!(
            registry.names(),
            ["alice".to_string(), "carol".to_string()]
        );
        assert!(!registry.contains("bob"));
    }
}
