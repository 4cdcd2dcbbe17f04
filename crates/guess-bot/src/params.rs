use crate::session::Answer;

/// Tunable knobs for the questioner. Defaults match the shipped behavior;
/// the environment overrides exist for experiments without a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineParams {
    /// Turns that must pass before a confident guess is allowed.
    pub min_turns: u32,
    /// The lead over the runner-up that makes a guess confident.
    pub guess_margin: i64,
    pub yes_weight: i64,
    pub probably_weight: i64,
    pub probably_not_weight: i64,
    /// Steeper than `yes_weight` when set to -3: disconfirmed items fall out
    /// of contention faster than confirmed ones rise.
    pub no_weight: i64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            min_turns: 5,
            guess_margin: 4,
            yes_weight: 2,
            probably_weight: 1,
            probably_not_weight: -1,
            no_weight: -2,
        }
    }
}

impl EngineParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let min_turns = read("GSR_MIN_TURNS")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(defaults.min_turns);

        let guess_margin = read("GSR_GUESS_MARGIN")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|margin| *margin >= 0)
            .unwrap_or(defaults.guess_margin);

        let no_weight = read("GSR_NO_WEIGHT")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|weight| *weight < 0)
            .unwrap_or(defaults.no_weight);

        Self {
            min_turns,
            guess_margin,
            no_weight,
            ..defaults
        }
    }

    /// Signed answer strength fed into the integrator.
    pub fn weight(&self, answer: Answer) -> i64 {
        match answer {
            Answer::Yes => self.yes_weight,
            Answer::Probably => self.probably_weight,
            Answer::DontKnow => 0,
            Answer::ProbablyNot => self.probably_not_weight,
            Answer::No => self.no_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineParams;
    use crate::session::Answer;

    #[test]
    fn defaults_keep_the_asymmetric_scale() {
        let params = EngineParams::default();
        assert_eq!(params.weight(Answer::Yes), 2);
        assert_eq!(params.weight(Answer::Probably), 1);
        assert_eq!(params.weight(Answer::DontKnow), 0);
        assert_eq!(params.weight(Answer::ProbablyNot), -1);
        assert_eq!(params.weight(Answer::No), -2);
    }

    #[test]
    fn env_overrides_are_validated() {
        let params = EngineParams::from_reader(|key| match key {
            "GSR_MIN_TURNS" => Some("8".to_string()),
            "GSR_GUESS_MARGIN" => Some("-1".to_string()),
            "GSR_NO_WEIGHT" => Some("-3".to_string()),
            _ => None,
        });
        assert_eq!(params.min_turns, 8);
        assert_eq!(params.guess_margin, EngineParams::default().guess_margin);
        assert_eq!(params.weight(Answer::No), -3);
    }
}
