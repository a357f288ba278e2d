// game/quiz.rs

use std::fmt;

/// Answers offered by the reality-check question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizOption {
    Chaos,
    RegularRing,
    Star,
}

impl QuizOption {
    pub const ALL: [QuizOption; 3] = [QuizOption::Chaos, QuizOption::RegularRing, QuizOption::Star];

    pub fn label(self) -> &'static str {
        match self {
            QuizOption::Chaos => "Chaos",
            QuizOption::RegularRing => "Regular Ring",
            QuizOption::Star => "Star",
        }
    }

    /// Match user text against the option labels, ignoring case and spacing
    pub fn parse(input: &str) -> Option<Self> {
        let wanted: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL.into_iter().find(|option| {
            let label: String = option
                .label()
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect();
            label == wanted
        })
    }
}

impl fmt::Display for QuizOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The single stateless reality-check question
pub struct RealityCheck;

impl RealityCheck {
    pub const QUESTION: &'static str =
        "If the rewire probability is 0, what does the network look like?";

    /// With nothing rewired the construction leaves the plain ring lattice
    pub const ANSWER: QuizOption = QuizOption::RegularRing;

    pub fn check(answer: QuizOption) -> bool {
        answer == Self::ANSWER
    }
}
