pub mod audio;
pub mod quiz;
pub mod session;

pub use audio::{AudioClip, SignalSpec};
pub use quiz::{QuizOption, RealityCheck};
pub use session::{GuessError, Mode, Outcome, PuzzleSession};
