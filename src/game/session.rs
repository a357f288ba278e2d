// game/session.rs

use crate::game::audio::{AudioClip, SignalSpec};
use crate::graph::*;
use bevy::prelude::Resource;
use log::info;
use rand::Rng;
use std::fmt;

/// Item placed in the inventory when the source is found
pub const INVENTORY_TOKEN: &str = "Project_Moriarty_Log.wav";

pub const SUCCESS_MESSAGE: &str = "SUCCESS! Source isolated.";

/// Real-world footnote shown next to a success
pub const SUCCESS_NOTE: &str = "Real world: the same measure is used to detect bot accounts.";

pub const FAILURE_MESSAGE: &str = "CRITICAL ERROR: You shut down the wrong server! \
The server you shut down was the London City Hospital database and the system crashed. \
In network analysis a false positive carries vital risks.";

/// Which framing the presentation layer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Story,
    Math,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Story => Mode::Math,
            Mode::Math => Mode::Story,
        }
    }

    /// Framing text for this mode
    pub fn briefing(self) -> &'static str {
        match self {
            Mode::Story => {
                "Mission: locate the main server spreading the virus. \
                 Shut down the wrong one and the hospital system crashes! \
                 Hint: which node reaches the others the fastest?"
            }
            Mode::Math => "Closeness centrality: C(x) = 1 / sum_y d(x, y)",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Story => write!(f, "story"),
            Mode::Math => write!(f, "math"),
        }
    }
}

/// A guess the caller should never have passed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    OutOfRange { guess: i64, node_count: usize },
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessError::OutOfRange { guess, node_count } => write!(
                f,
                "Guess {} is outside the node range 0..={}",
                guess,
                node_count.saturating_sub(1)
            ),
        }
    }
}

impl std::error::Error for GuessError {}

/// Result of scanning a suspect node
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        inventory_token: &'static str,
        audio: AudioClip,
    },
    Failure {
        message: &'static str,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// One player's puzzle: the network, its answer and the player's progress
///
/// The graph is built once when the session is created and never rebuilt.
/// `solved` and `inventory_unlocked` only ever go from false to true.
#[derive(Debug, Clone, Resource)]
pub struct PuzzleSession {
    puzzle: PuzzleGraph,
    mode: Mode,
    solved: bool,
    inventory_unlocked: bool,
    signal: SignalSpec,
}

impl PuzzleSession {
    /// Build the puzzle graph and start an unsolved session in story mode
    pub fn new(generator: &PuzzleGraphGenerator) -> Result<Self, ConfigurationError> {
        Ok(Self::from_puzzle(generator.build()?))
    }

    pub fn from_puzzle(puzzle: PuzzleGraph) -> Self {
        PuzzleSession {
            puzzle,
            mode: Mode::default(),
            solved: false,
            inventory_unlocked: false,
            signal: SignalSpec::RECOVERED_LOG,
        }
    }

    // === Query Methods ===

    pub fn graph(&self) -> &SmallWorldGraph {
        &self.puzzle.graph
    }

    pub fn scores(&self) -> &CentralityScores {
        &self.puzzle.scores
    }

    pub fn ground_truth(&self) -> NodeId {
        self.puzzle.ground_truth
    }

    pub fn node_count(&self) -> usize {
        self.puzzle.graph.node_count()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn inventory_unlocked(&self) -> bool {
        self.inventory_unlocked
    }

    /// The recovered item, once unlocked
    pub fn inventory(&self) -> Option<&'static str> {
        self.inventory_unlocked.then_some(INVENTORY_TOKEN)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.puzzle.graph.snapshot()
    }

    /// Map a raw guess onto a node, rejecting anything outside the graph
    pub fn validate_guess(&self, guess: i64) -> Result<NodeId, GuessError> {
        usize::try_from(guess)
            .ok()
            .map(NodeId)
            .filter(|&node| self.puzzle.graph.contains_node(node))
            .ok_or(GuessError::OutOfRange {
                guess,
                node_count: self.node_count(),
            })
    }

    /// Pure decision: is this node the outbreak source?
    pub fn is_correct(&self, node: NodeId) -> bool {
        node == self.puzzle.ground_truth
    }

    // === Mutation Methods ===

    /// Scan a suspect node
    ///
    /// A correct guess marks the session solved, unlocks the inventory and
    /// renders the recovered audio with noise from `rng`. A wrong guess
    /// changes nothing, even after the puzzle has been solved.
    pub fn evaluate_guess<R: Rng + ?Sized>(
        &mut self,
        guess: i64,
        rng: &mut R,
    ) -> Result<Outcome, GuessError> {
        let node = self.validate_guess(guess)?;

        if !self.is_correct(node) {
            info!("Guess {} rejected", node);
            return Ok(Outcome::Failure {
                message: FAILURE_MESSAGE,
            });
        }

        if !self.solved {
            info!("Puzzle solved: node {} isolated", node);
        }
        self.solved = true;
        self.inventory_unlocked = true;

        Ok(Outcome::Success {
            inventory_token: INVENTORY_TOKEN,
            audio: self.signal.synthesize(rng),
        })
    }

    /// Flip between story and math framing, returning the new mode
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        info!("Switched to {} mode", self.mode);
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> PuzzleSession {
        PuzzleSession::new(&PuzzleGraphGenerator::default()).unwrap()
    }

    #[test]
    fn test_new_session_state() {
        let session = session();

        assert_eq!(session.mode(), Mode::Story);
        assert!(!session.is_solved());
        assert!(!session.inventory_unlocked());
        assert_eq!(session.inventory(), None);
        assert_eq!(session.node_count(), 15);
        assert_eq!(session.graph().edge_count(), 30);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(session.ground_truth(), NodeId(10));

        let outcome = session.evaluate_guess(10, &mut rng).unwrap();
        match outcome {
            Outcome::Success {
                inventory_token,
                audio,
            } => {
                assert_eq!(inventory_token, "Project_Moriarty_Log.wav");
                assert_eq!(audio.len(), 88_200);
                assert_eq!(audio.sample_rate(), 44_100);
            }
            Outcome::Failure { .. } => panic!("Ground truth should succeed"),
        }

        let wrong = (10 + 1) % 15;
        assert_eq!(
            session.evaluate_guess(wrong, &mut rng).unwrap(),
            Outcome::Failure {
                message: FAILURE_MESSAGE
            }
        );
    }

    #[test]
    fn test_every_wrong_guess_fails_without_state_change() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(0);
        let answer = session.ground_truth().index() as i64;

        for guess in (0..15).filter(|&g| g != answer) {
            let outcome = session.evaluate_guess(guess, &mut rng).unwrap();
            assert!(!outcome.is_success(), "guess {} should fail", guess);
            assert!(!session.is_solved());
            assert!(!session.inventory_unlocked());
        }
    }

    #[test]
    fn test_solved_is_permanent() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(1);
        let answer = session.ground_truth().index() as i64;

        assert!(session.evaluate_guess(answer, &mut rng).unwrap().is_success());
        assert!(session.is_solved());
        assert_eq!(session.inventory(), Some(INVENTORY_TOKEN));

        for guess in (0..15).filter(|&g| g != answer) {
            assert!(!session.evaluate_guess(guess, &mut rng).unwrap().is_success());
        }
        assert!(session.is_solved());
        assert!(session.inventory_unlocked());

        // Solving again is allowed and produces a fresh recording
        assert!(session.evaluate_guess(answer, &mut rng).unwrap().is_success());
        assert!(session.is_solved());
    }

    #[test]
    fn test_out_of_range_guesses_are_rejected() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(0);

        for guess in [-1, 15, 100, i64::MIN, i64::MAX] {
            assert_eq!(
                session.evaluate_guess(guess, &mut rng),
                Err(GuessError::OutOfRange {
                    guess,
                    node_count: 15
                })
            );
        }
        assert!(!session.is_solved());
    }

    #[test]
    fn test_validate_guess_bounds() {
        let session = session();

        assert_eq!(session.validate_guess(0), Ok(NodeId(0)));
        assert_eq!(session.validate_guess(14), Ok(NodeId(14)));
        assert!(session.validate_guess(15).is_err());
    }

    #[test]
    fn test_toggle_mode_is_an_involution() {
        let mut session = session();

        assert_eq!(session.toggle_mode(), Mode::Math);
        assert_eq!(session.mode(), Mode::Math);
        assert_eq!(session.toggle_mode(), Mode::Story);
        assert_eq!(session.mode(), Mode::Story);
    }

    #[test]
    fn test_toggle_mode_leaves_progress_alone() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(5);
        let answer = session.ground_truth().index() as i64;

        session.evaluate_guess(answer, &mut rng).unwrap();
        session.toggle_mode();

        assert!(session.is_solved());
        assert_eq!(session.ground_truth().index() as i64, answer);
    }

    #[test]
    fn test_briefings_differ() {
        assert_ne!(Mode::Story.briefing(), Mode::Math.briefing());
        assert_eq!(Mode::Story.to_string(), "story");
    }

    #[test]
    fn test_guess_error_message() {
        let err = GuessError::OutOfRange {
            guess: 20,
            node_count: 15,
        };
        assert_eq!(err.to_string(), "Guess 20 is outside the node range 0..=14");
    }
}
