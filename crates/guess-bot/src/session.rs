//! One game session: select a question, wait for the caller to collect an
//! answer, integrate it, repeat until a confident guess or defeat. Strictly
//! sequential per session; independent sessions share only the read-only
//! [`QuestionIndex`].

use crate::params::EngineParams;
use guess_core::{BeliefState, QuestionId, QuestionIndex, integrate, select_next};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::fmt;
use tracing::{Level, event};

/// Graded answer collected from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    Probably,
    DontKnow,
    ProbablyNot,
    No,
}

/// What the engine wants to happen next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Present this question and collect an answer.
    Ask { id: QuestionId, text: String },
    /// Confident enough to guess the leading item.
    Guess {
        item_id: String,
        item_name: String,
        score: i64,
        runner_up: Option<String>,
    },
    /// Nothing left to ask and no item is strictly ahead; the player won.
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `answer` was called with no question outstanding.
    NoPendingQuestion,
    /// `reject_guess` was called with no items left in contention.
    NothingToReject,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoPendingQuestion => {
                write!(f, "no question is pending an answer")
            }
            SessionError::NothingToReject => {
                write!(f, "no item left in contention to reject")
            }
        }
    }
}

impl std::error::Error for SessionError {}

struct HistoryFrame {
    belief: BeliefState,
    question: QuestionId,
}

/// A single player's game. Owns the per-session belief and the snapshot
/// stack used by "back"; the compiled index is shared and read-only.
pub struct Session<'a> {
    index: &'a QuestionIndex,
    params: EngineParams,
    belief: BeliefState,
    rng: SmallRng,
    turns: u32,
    pending: Option<QuestionId>,
    history: Vec<HistoryFrame>,
}

impl<'a> Session<'a> {
    /// Starts a session with a shuffled zero-score ranking. The seed drives
    /// both the opening shuffle and selector tie-breaks, so a fixed seed
    /// replays identically.
    pub fn new(index: &'a QuestionIndex, params: EngineParams, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let belief = BeliefState::new_shuffled(index, &mut rng);
        Self::with_belief(index, params, belief, rng)
    }

    /// Starts a session over an explicit belief state, for tests that need
    /// the deterministic catalog-order ranking.
    pub fn with_belief(
        index: &'a QuestionIndex,
        params: EngineParams,
        belief: BeliefState,
        rng: SmallRng,
    ) -> Self {
        Self {
            index,
            params,
            belief,
            rng,
            turns: 0,
            pending: None,
            history: Vec::new(),
        }
    }

    pub fn belief(&self) -> &BeliefState {
        &self.belief
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Decides the next step: a confident guess, another question, or
    /// defeat. Re-presents the pending question if one is outstanding.
    pub fn next_turn(&mut self) -> Turn {
        if let Some(turn) = self.confident_guess() {
            self.log_turn("guess", &turn);
            return turn;
        }

        if let Some(id) = self.pending.clone() {
            return self.ask(id);
        }

        let candidates = select_next(self.index, &self.belief, &mut self.rng);
        match candidates.into_iter().next() {
            Some(id) => self.ask(id),
            None => {
                let leader = self.belief.leader();
                let runner_up = self.belief.runner_up();
                let strictly_ahead = match (leader, runner_up) {
                    (Some((_, first)), Some((_, second))) => first > second,
                    (Some(_), None) => true,
                    _ => false,
                };
                if strictly_ahead {
                    let turn = self.guess_turn();
                    self.log_turn("forced_guess", &turn);
                    turn
                } else {
                    let turn = Turn::Defeat;
                    self.log_turn("defeat", &turn);
                    turn
                }
            }
        }
    }

    /// Integrates the answer to the outstanding question, snapshotting the
    /// prior state for "back".
    pub fn answer(&mut self, answer: Answer) -> Result<(), SessionError> {
        let question = self.pending.take().ok_or(SessionError::NoPendingQuestion)?;
        self.history.push(HistoryFrame {
            belief: self.belief.clone(),
            question: question.clone(),
        });

        let strength = self.params.weight(answer);
        integrate(self.index, &question, strength, &mut self.belief);
        self.turns += 1;

        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "guess_bot::session",
                Level::DEBUG,
                question = %question,
                strength,
                turn = self.turns,
                leader = self.belief.leader().map(|(id, _)| id),
                asked = self.belief.asked().len(),
            );
        }
        Ok(())
    }

    /// Restores the state from before the previous answer and re-presents
    /// that question. The restored asked-set is the prior snapshot's value;
    /// nothing is removed from the current one.
    pub fn go_back(&mut self) -> Option<QuestionId> {
        let frame = self.history.pop()?;
        self.belief = frame.belief;
        self.turns = self.turns.saturating_sub(1);
        self.pending = Some(frame.question.clone());
        Some(frame.question)
    }

    /// The player said "no it's not": the rejected leader leaves contention
    /// and the game continues with the same belief.
    pub fn reject_guess(&mut self) -> Result<(), SessionError> {
        let leader = self
            .belief
            .leader()
            .map(|(id, _)| id.to_string())
            .ok_or(SessionError::NothingToReject)?;
        self.belief.remove(&leader);
        self.turns += 1;
        self.pending = None;
        Ok(())
    }

    /// Declarative facts about an item, for summarizing a finished game.
    pub fn statements_for(&self, item_id: &str) -> Option<Vec<&str>> {
        self.index.statements_for(item_id)
    }

    fn ask(&mut self, id: QuestionId) -> Turn {
        let text = self
            .index
            .question_text(&id)
            .unwrap_or(id.as_str())
            .to_string();
        self.pending = Some(id.clone());
        Turn::Ask { id, text }
    }

    fn confident_guess(&self) -> Option<Turn> {
        if self.turns <= self.params.min_turns {
            return None;
        }
        let (_, first) = self.belief.leader()?;
        let second = self.belief.runner_up().map_or(0, |(_, score)| score);
        if first > second + self.params.guess_margin {
            Some(self.guess_turn())
        } else {
            None
        }
    }

    fn guess_turn(&self) -> Turn {
        let (item_id, score) = self
            .belief
            .leader()
            .map(|(id, score)| (id.to_string(), score))
            .unwrap_or_default();
        let item_name = self
            .index
            .entry(&item_id)
            .map(|entry| entry.item_name().to_string())
            .unwrap_or_else(|| item_id.clone());
        Turn::Guess {
            item_id,
            item_name,
            score,
            runner_up: self.belief.runner_up().map(|(id, _)| id.to_string()),
        }
    }

    fn log_turn(&self, outcome: &str, turn: &Turn) {
        if !tracing::enabled!(Level::INFO) {
            return;
        }

        let guessed = match turn {
            Turn::Guess { item_id, .. } => Some(item_id.as_str()),
            _ => None,
        };
        event!(
            target: "guess_bot::session",
            Level::INFO,
            outcome,
            turn = self.turns,
            remaining = self.belief.len(),
            leader_score = self.belief.leader().map(|(_, score)| score),
            runner_up_score = self.belief.runner_up().map(|(_, score)| score),
            guessed,
        );
    }
}
