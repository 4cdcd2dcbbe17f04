use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a compiled question.
///
/// The same id may be generated for several items (e.g. two items whose
/// names start with the same letter); all occurrences are the same logical
/// question. Dependencies are keyed by id, never by the rendered wording, so
/// rewording a question cannot break the inference logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tri-state expected answer recorded in a dependency map.
///
/// `Unknown` keeps a prerequisite listed without committing to a polarity: it
/// never triggers the contradiction penalty, but cascades treat it like a
/// denial. Collapsing this to a boolean changes scoring behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expectation {
    Yes,
    No,
    Unknown,
}

impl Expectation {
    /// Sign applied to the answer strength when this dependency is cascaded.
    pub const fn cascade_sign(self) -> i64 {
        match self {
            Expectation::Yes => 1,
            Expectation::No | Expectation::Unknown => -1,
        }
    }
}

/// Presentation bucket for a question. Ignored by the algorithms, preserved
/// for callers that group questions in menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionGroup {
    Name,
    Categories,
    Groups,
    History,
    Settings,
    Tags,
}

/// A compiled question: the interrogative form used while asking, the
/// declarative form used when summarizing a finished game, and the
/// dependency map driving score cascades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub statement: String,
    pub group: QuestionGroup,
    pub order: Option<u32>,
    pub dependencies: Vec<(QuestionId, Expectation)>,
}

impl Question {
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        statement: impl Into<String>,
        group: QuestionGroup,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            statement: statement.into(),
            group,
            order: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_dependency(mut self, id: QuestionId, expectation: Expectation) -> Self {
        self.dependencies.push((id, expectation));
        self
    }

    pub fn with_dependencies(
        mut self,
        dependencies: impl IntoIterator<Item = (QuestionId, Expectation)>,
    ) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    pub fn depends_on(&self, id: &QuestionId) -> bool {
        self.dependencies.iter().any(|(dep, _)| dep == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Expectation, Question, QuestionGroup, QuestionId};

    #[test]
    fn cascade_sign_treats_unknown_as_denial() {
        assert_eq!(Expectation::Yes.cascade_sign(), 1);
        assert_eq!(Expectation::No.cascade_sign(), -1);
        assert_eq!(Expectation::Unknown.cascade_sign(), -1);
    }

    #[test]
    fn builder_collects_dependencies() {
        let question = Question::new(
            QuestionId::new("settings:presets"),
            "does your addon have any presets for its settings?",
            "This addon has presets for its settings!",
            QuestionGroup::Settings,
        )
        .with_dependency(QuestionId::new("settings:settings"), Expectation::Yes);

        assert!(question.depends_on(&QuestionId::new("settings:settings")));
        assert!(!question.depends_on(&QuestionId::new("settings:credits")));
        assert_eq!(question.order, None);
    }
}
