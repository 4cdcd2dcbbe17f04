//! Per-session belief tracking: a running score per item plus the set of
//! already-resolved questions. Created fresh per session, cloned for
//! snapshots, discarded at session end.

use crate::compile::QuestionIndex;
use crate::model::question::QuestionId;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Mutable per-session state. The score list is kept sorted descending after
/// every update; ties preserve prior relative order. The asked set only ever
/// grows — "go back" is implemented by restoring a cloned snapshot, never by
/// shrinking the set in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeliefState {
    scores: Vec<(String, i64)>,
    asked: HashSet<QuestionId>,
}

impl BeliefState {
    /// Fresh session state with every score at zero, ranked in catalog
    /// order. Deterministic; tests rely on it.
    pub fn new(index: &QuestionIndex) -> Self {
        Self {
            scores: index
                .entries()
                .iter()
                .map(|entry| (entry.item_id().to_string(), 0))
                .collect(),
            asked: HashSet::new(),
        }
    }

    /// Fresh session state with the zero-score ranking shuffled, so replayed
    /// games do not always open with the same tie-break. The rng is injected
    /// for reproducibility.
    pub fn new_shuffled(index: &QuestionIndex, rng: &mut impl Rng) -> Self {
        let mut state = Self::new(index);
        state.scores.shuffle(rng);
        state
    }

    /// Ranked scores, highest first.
    pub fn scores(&self) -> &[(String, i64)] {
        &self.scores
    }

    pub fn score(&self, item_id: &str) -> Option<i64> {
        self.scores
            .iter()
            .find(|(id, _)| id == item_id)
            .map(|&(_, score)| score)
    }

    pub fn leader(&self) -> Option<(&str, i64)> {
        self.scores.first().map(|(id, score)| (id.as_str(), *score))
    }

    pub fn runner_up(&self) -> Option<(&str, i64)> {
        self.scores.get(1).map(|(id, score)| (id.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Removes an item from contention (a rejected guess). Returns false when
    /// the item is not present.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.scores.len();
        self.scores.retain(|(id, _)| id != item_id);
        self.scores.len() != before
    }

    pub fn is_asked(&self, id: &QuestionId) -> bool {
        self.asked.contains(id)
    }

    pub fn asked(&self) -> &HashSet<QuestionId> {
        &self.asked
    }

    pub fn mark_asked(&mut self, id: QuestionId) -> bool {
        self.asked.insert(id)
    }

    pub(crate) fn scores_mut(&mut self) -> &mut [(String, i64)] {
        &mut self.scores
    }

    /// Stable descending re-sort; equal scores keep their relative order.
    pub(crate) fn resort(&mut self) {
        self.scores.sort_by(|a, b| b.1.cmp(&a.1));
    }
}

#[cfg(test)]
mod tests {
    use super::BeliefState;
    use crate::compile::compile;
    use crate::model::catalog::{Catalog, Item};
    use crate::model::question::QuestionId;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn index_of(names: &[(&str, &str)]) -> crate::compile::QuestionIndex {
        let items = names
            .iter()
            .map(|(id, name)| Item {
                id: id.to_string(),
                name: name.to_string(),
                tags: Vec::new(),
                enabled_by_default: false,
                settings: false,
                presets: false,
                preview: false,
                info: false,
                secret: false,
                credits: Vec::new(),
                version_added: None,
                latest_update: None,
            })
            .collect();
        compile(&Catalog::new("1.0.0".to_string(), None, items).expect("valid catalog"))
    }

    #[test]
    fn starts_in_catalog_order_with_zero_scores() {
        let index = index_of(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")]);
        let state = BeliefState::new(&index);
        let ids: Vec<&str> = state.scores().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(state.scores().iter().all(|&(_, score)| score == 0));
        assert!(state.asked().is_empty());
    }

    #[test]
    fn shuffled_start_is_seed_reproducible() {
        let index = index_of(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma"), ("d", "Delta")]);
        let mut one = SmallRng::seed_from_u64(7);
        let mut two = SmallRng::seed_from_u64(7);
        assert_eq!(
            BeliefState::new_shuffled(&index, &mut one),
            BeliefState::new_shuffled(&index, &mut two)
        );
    }

    #[test]
    fn resort_is_stable_for_ties() {
        let index = index_of(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")]);
        let mut state = BeliefState::new(&index);
        state.scores_mut()[2].1 = 5;
        state.resort();
        let ids: Vec<&str> = state.scores().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"], "tied a/b keep their relative order");
    }

    #[test]
    fn remove_drops_the_item() {
        let index = index_of(&[("a", "Alpha"), ("b", "Beta")]);
        let mut state = BeliefState::new(&index);
        assert!(state.remove("a"));
        assert!(!state.remove("a"));
        assert_eq!(state.leader(), Some(("b", 0)));
    }

    #[test]
    fn asked_set_accepts_duplicates_idempotently() {
        let index = index_of(&[("a", "Alpha")]);
        let mut state = BeliefState::new(&index);
        assert!(state.mark_asked(QuestionId::new("name-start:A")));
        assert!(!state.mark_asked(QuestionId::new("name-start:A")));
        assert_eq!(state.asked().len(), 1);
    }
}
