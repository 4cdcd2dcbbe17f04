//! Belief updates for an answered question, including the dependency
//! cascade: a confirmed question implies expected answers for its
//! prerequisites, which are integrated in the same turn via a worklist
//! rather than unbounded recursion.

use crate::belief::BeliefState;
use crate::compile::QuestionIndex;
use crate::model::question::{Expectation, QuestionId};
use std::collections::{HashSet, VecDeque};

/// Applies an answered question to the belief state in place; the mutated
/// `belief` is the authoritative new state.
///
/// `strength` is the signed answer weight (positive = affirmed, negative =
/// denied, zero = "don't know"). Zero still marks the question asked so the
/// caller's pool shrinks monotonically. A question unknown to every item is
/// a harmless abstain.
///
/// A positive answer cascades through the question's dependency map:
/// each prerequisite expected `Yes` is integrated with the same strength,
/// each expected `No` (or left `Unknown`) with the negated strength.
/// Questions already asked, or already queued in this cascade, are never
/// re-integrated, so malformed cyclic dependency data cannot loop.
pub fn integrate(
    index: &QuestionIndex,
    question: &QuestionId,
    strength: i64,
    belief: &mut BeliefState,
) {
    let mut queue: VecDeque<(QuestionId, i64)> = VecDeque::new();
    let mut queued: HashSet<QuestionId> = HashSet::new();
    queue.push_back((question.clone(), strength));
    queued.insert(question.clone());

    while let Some((current, signed)) = queue.pop_front() {
        apply_one(index, &current, signed, belief);

        if signed > 0 {
            for (dependency, expectation) in index.dependencies_of(&current) {
                if belief.is_asked(dependency) || queued.contains(dependency) {
                    continue;
                }
                queued.insert(dependency.clone());
                queue.push_back((dependency.clone(), expectation.cascade_sign() * signed));
            }
        }

        belief.resort();
    }
}

/// Scores a single question against every item, without cascading.
fn apply_one(index: &QuestionIndex, question: &QuestionId, strength: i64, belief: &mut BeliefState) {
    let mut foreclosed: Vec<QuestionId> = Vec::new();

    for (item_id, score) in belief.scores_mut() {
        let Some(entry) = index.entry(item_id) else {
            continue;
        };

        let mut delta = if entry.has_candidate(question) { strength } else { 0 };

        if let Some(expectation) = entry.expectation_for(question) {
            let contradicted = match expectation {
                Expectation::No => strength > 0,
                Expectation::Yes => strength < 0,
                Expectation::Unknown => false,
            };
            if contradicted {
                // Doubly penalized: no credit, plus a contradiction cost.
                delta -= strength.abs();
                // Questions only relevant under the contradicted premise are
                // foreclosed so they are not independently re-asked.
                foreclosed.extend(
                    entry
                        .dependents_of(question)
                        .map(|dependent| dependent.id.clone()),
                );
            }
        }

        *score += delta;
    }

    belief.mark_asked(question.clone());
    for id in foreclosed {
        belief.mark_asked(id);
    }
}

#[cfg(test)]
mod tests {
    use super::integrate;
    use crate::belief::BeliefState;
    use crate::compile::{QuestionIndex, compile};
    use crate::model::catalog::{Catalog, Item, Tag};
    use crate::model::question::QuestionId;

    fn item(id: &str, name: &str, tags: &[Tag]) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            tags: tags.to_vec(),
            enabled_by_default: false,
            settings: false,
            presets: false,
            preview: false,
            info: false,
            secret: false,
            credits: Vec::new(),
            version_added: None,
            latest_update: None,
        }
    }

    fn two_item_index() -> QuestionIndex {
        compile(
            &Catalog::new(
                "1.0.0".to_string(),
                None,
                vec![
                    item("a", "Alpha", &[Tag::Editor, Tag::CodeEditor]),
                    item("b", "Beta", &[Tag::Popup]),
                ],
            )
            .expect("valid catalog"),
        )
    }

    #[test]
    fn credits_owners_and_penalizes_contradictions() {
        let index = two_item_index();
        let mut belief = BeliefState::new(&index);

        integrate(&index, &QuestionId::new("category:popup"), 2, &mut belief);

        // "b" owns the popup question: +2. "a" expects popup to be denied
        // (editor root lists it at No): 0 credit and -2 contradiction, plus
        // cascaded denials of b's dependency map hitting a's candidates.
        assert_eq!(belief.leader().expect("leader exists").0, "b");
        assert!(belief.score("a").expect("a is tracked") < 0);
        assert_eq!(belief.score("b"), Some(2));
    }

    #[test]
    fn abstains_on_unknown_questions_but_marks_them_asked() {
        let index = two_item_index();
        let mut belief = BeliefState::new(&index);
        let before: Vec<(String, i64)> = belief.scores().to_vec();

        let phantom = QuestionId::new("tag:recommended");
        integrate(&index, &phantom, 2, &mut belief);

        assert_eq!(belief.scores(), &before[..]);
        assert!(belief.is_asked(&phantom));
    }

    #[test]
    fn dont_know_is_a_scoring_no_op() {
        let index = two_item_index();
        let mut belief = BeliefState::new(&index);

        integrate(&index, &QuestionId::new("category:popup"), 0, &mut belief);

        assert!(belief.scores().iter().all(|&(_, score)| score == 0));
        assert!(belief.is_asked(&QuestionId::new("category:popup")));
    }

    #[test]
    fn asked_set_grows_monotonically_through_cascades() {
        let index = two_item_index();
        let mut belief = BeliefState::new(&index);

        integrate(&index, &QuestionId::new("category:editor"), 2, &mut belief);
        let after_first = belief.asked().clone();
        assert!(after_first.contains(&QuestionId::new("category:editor")));
        // Positive editor answer cascades into its dependency map (themes,
        // website, popup, easter egg are all denied in the same turn).
        assert!(after_first.contains(&QuestionId::new("category:popup")));

        integrate(&index, &QuestionId::new("name-start:A"), 2, &mut belief);
        assert!(belief.asked().is_superset(&after_first));
    }

    #[test]
    fn cascade_confirms_the_implied_category_chain() {
        let index = two_item_index();
        let mut belief = BeliefState::new(&index);

        // Confirming the code-editor sub-question implies the editor root
        // (expected Yes) and denies the sibling subs.
        integrate(&index, &QuestionId::new("category:editor/code"), 2, &mut belief);

        assert_eq!(belief.leader().expect("leader exists").0, "a");
        assert!(belief.is_asked(&QuestionId::new("category:editor")));
        assert!(belief.score("a").expect("a is tracked") >= 4);
        assert!(belief.score("b").expect("b is tracked") < 0);
    }

    #[test]
    fn negative_answers_do_not_cascade() {
        let index = two_item_index();
        let mut belief = BeliefState::new(&index);

        integrate(&index, &QuestionId::new("category:editor"), -2, &mut belief);

        assert!(belief.is_asked(&QuestionId::new("category:editor")));
        assert!(!belief.is_asked(&QuestionId::new("category:themes")));
    }

    #[test]
    fn contradiction_penalty_exceeds_mere_irrelevance() {
        let index = compile(
            &Catalog::new(
                "1.0.0".to_string(),
                None,
                vec![
                    item("editor", "Editor thing", &[Tag::CodeEditor]),
                    item("popup", "Popup thing", &[Tag::Popup]),
                    item("neutral", "Neutral thing", &[Tag::Theme]),
                ],
            )
            .expect("valid catalog"),
        );
        let mut belief = BeliefState::new(&index);

        // The editor item expects the popup question at No; the theme item
        // also lists popup at No. An item with no popup entry at all would
        // merely abstain at 0, so both contradicting items must fall below
        // that baseline.
        integrate(&index, &QuestionId::new("category:popup"), 2, &mut belief);
        assert!(belief.score("editor").expect("tracked") <= -2);
        assert!(belief.score("neutral").expect("tracked") <= -2);
        assert_eq!(belief.score("popup"), Some(2));
    }
}
