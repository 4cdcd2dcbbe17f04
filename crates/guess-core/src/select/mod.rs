//! Next-question selection. Builds a frequency table over unasked questions,
//! weighted so higher-ranked items contribute more repetitions, then prefers
//! the question that splits the plausible pool closest in half.

use crate::belief::BeliefState;
use crate::compile::QuestionIndex;
use crate::model::question::QuestionId;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Distance comparisons operate on count/len ratios; identical ratios must
/// compare equal despite the float round-trip.
const TIE_EPSILON: f64 = 1e-9;

/// Picks the next question(s) to ask. Returns the full tied set of
/// maximally-informative candidates, shuffled by the injected rng, or an
/// empty vec when the pool is exhausted or the best candidate carries too
/// little signal to be worth asking.
pub fn select_next(
    index: &QuestionIndex,
    belief: &BeliefState,
    rng: &mut impl Rng,
) -> Vec<QuestionId> {
    let n = belief.len();
    if n == 0 {
        return Vec::new();
    }

    let mut frequencies: Vec<(QuestionId, usize)> = Vec::new();
    let mut positions: HashMap<QuestionId, usize> = HashMap::new();

    for (rank, (item_id, score)) in belief.scores().iter().enumerate() {
        let Some(entry) = index.entry(item_id) else {
            continue;
        };

        // Items near the top of the ranking repeat their candidates more
        // often, biasing selection toward currently-plausible items.
        let reverse_rank = (n - 1 - rank) as f64;
        let weight = (reverse_rank + 1.0) / n as f64 + *score as f64 + 1.0;
        let repetitions = if weight <= 1.0 { 1 } else { weight.round() as usize };

        for question in entry.questions() {
            if belief.is_asked(&question.id) {
                continue;
            }
            match positions.get(&question.id) {
                Some(&position) => frequencies[position].1 += repetitions,
                None => {
                    positions.insert(question.id.clone(), frequencies.len());
                    frequencies.push((question.id.clone(), repetitions));
                }
            }
        }
    }

    if frequencies.is_empty() {
        return Vec::new();
    }

    frequencies.shuffle(rng);

    let pool = frequencies.len() as f64;
    let mut best_distance = f64::INFINITY;
    let mut tied: Vec<usize> = Vec::new();
    for (position, (_, count)) in frequencies.iter().enumerate() {
        let distance = (*count as f64 / pool - 0.5).abs();
        if distance + TIE_EPSILON < best_distance {
            best_distance = distance;
            tied.clear();
            tied.push(position);
        } else if (distance - best_distance).abs() <= TIE_EPSILON {
            tied.push(position);
        }
    }

    // Low-signal cutoff: a winner asked by almost nobody in a large pool is
    // not worth spending a turn on.
    let cutoff = (pool / 9.0).round() as usize;
    if let Some(&first) = tied.first()
        && frequencies[first].1 < cutoff
    {
        return Vec::new();
    }

    tied.into_iter()
        .map(|position| frequencies[position].0.clone())
        .collect()
}
