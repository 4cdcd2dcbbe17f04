//! Question compilation: derives the full read-only question set from the
//! catalog, once per process. Compiling the same catalog twice yields a
//! byte-identical serialized index.

mod rules;
mod texts;

use crate::model::catalog::Catalog;
use crate::model::question::{Expectation, Question, QuestionId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Compiled question data for one catalog item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemEntry {
    item_id: String,
    item_name: String,
    questions: Vec<Question>,
    #[serde(skip)]
    candidates: HashSet<QuestionId>,
    #[serde(skip)]
    expectations: HashMap<QuestionId, Expectation>,
}

impl ItemEntry {
    fn new(item_id: String, item_name: String, questions: Vec<Question>) -> Self {
        let candidates = questions.iter().map(|question| question.id.clone()).collect();

        // Union of every question's dependency map; the first entry for an id
        // wins, mirroring candidate order.
        let mut expectations = HashMap::new();
        for question in &questions {
            for (id, expectation) in &question.dependencies {
                expectations.entry(id.clone()).or_insert(*expectation);
            }
        }

        Self {
            item_id,
            item_name,
            questions,
            candidates,
            expectations,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Whether this question is in the item's candidate list ("the item's
    /// answer to it is yes").
    pub fn has_candidate(&self, id: &QuestionId) -> bool {
        self.candidates.contains(id)
    }

    /// The expected answer for `id` recorded anywhere in this item's
    /// dependency maps.
    pub fn expectation_for(&self, id: &QuestionId) -> Option<Expectation> {
        self.expectations.get(id).copied()
    }

    /// Candidate questions of this item that list `id` as a prerequisite.
    pub fn dependents_of<'a>(&'a self, id: &'a QuestionId) -> impl Iterator<Item = &'a Question> {
        self.questions.iter().filter(move |question| question.depends_on(id))
    }
}

/// Read-only mapping from item to compiled questions, plus derived lookup
/// tables. Never mutated after construction; rebuilding requires recompiling
/// the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionIndex {
    entries: Vec<ItemEntry>,
    #[serde(skip)]
    by_item: HashMap<String, usize>,
    #[serde(skip)]
    wording: HashMap<QuestionId, (String, String)>,
    #[serde(skip)]
    merged_dependencies: HashMap<QuestionId, Vec<(QuestionId, Expectation)>>,
}

impl QuestionIndex {
    fn from_entries(entries: Vec<ItemEntry>) -> Self {
        let by_item = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.item_id.clone(), position))
            .collect();

        let mut wording: HashMap<QuestionId, (String, String)> = HashMap::new();
        let mut merged_dependencies: HashMap<QuestionId, Vec<(QuestionId, Expectation)>> =
            HashMap::new();
        for entry in &entries {
            for question in &entry.questions {
                wording
                    .entry(question.id.clone())
                    .or_insert_with(|| (question.text.clone(), question.statement.clone()));

                let merged = merged_dependencies.entry(question.id.clone()).or_default();
                for (id, expectation) in &question.dependencies {
                    if !merged.iter().any(|(existing, _)| existing == id) {
                        merged.push((id.clone(), *expectation));
                    }
                }
            }
        }

        Self {
            entries,
            by_item,
            wording,
            merged_dependencies,
        }
    }

    pub fn entries(&self) -> &[ItemEntry] {
        &self.entries
    }

    pub fn entry(&self, item_id: &str) -> Option<&ItemEntry> {
        self.by_item.get(item_id).map(|&position| &self.entries[position])
    }

    pub fn questions_for(&self, item_id: &str) -> Option<&[Question]> {
        self.entry(item_id).map(ItemEntry::questions)
    }

    /// Declarative facts for a resolved item, used to summarize a finished
    /// game.
    pub fn statements_for(&self, item_id: &str) -> Option<Vec<&str>> {
        self.entry(item_id)
            .map(|entry| entry.questions.iter().map(|question| question.statement.as_str()).collect())
    }

    pub fn question_text(&self, id: &QuestionId) -> Option<&str> {
        self.wording.get(id).map(|(text, _)| text.as_str())
    }

    pub fn question_statement(&self, id: &QuestionId) -> Option<&str> {
        self.wording.get(id).map(|(_, statement)| statement.as_str())
    }

    /// Dependency entries of `id`, merged across every item that owns it
    /// (first occurrence wins).
    pub fn dependencies_of(&self, id: &QuestionId) -> &[(QuestionId, Expectation)] {
        self.merged_dependencies
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct questions across the whole index.
    pub fn distinct_question_count(&self) -> usize {
        self.wording.len()
    }
}

/// Compiles the catalog into a [`QuestionIndex`]. Pure and deterministic:
/// items are visited in catalog order and every derived list preserves
/// insertion order.
pub fn compile(catalog: &Catalog) -> QuestionIndex {
    let letters = rules::LetterSets::from_catalog(catalog);
    let entries = catalog
        .items()
        .iter()
        .map(|item| {
            ItemEntry::new(
                item.id.clone(),
                item.name.clone(),
                rules::questions_for_item(item, catalog, &letters),
            )
        })
        .collect();
    QuestionIndex::from_entries(entries)
}
