use crate::game::{GuessError, Mode, Outcome, PuzzleSession, QuizOption, RealityCheck};
use crate::graph::{PuzzleGraphGenerator, SmallWorldParams};
use bevy::prelude::*;

/// Graph parameters used when the session is created
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GraphSettings(pub SmallWorldParams);

/// Player scanned a suspect node
#[derive(Message, Debug, Clone, Copy)]
pub struct GuessSubmitted(pub i64);

/// Player took the red pill
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ModeToggleRequested;

#[derive(Message, Debug, Clone, Copy)]
pub struct QuizAnswered(pub QuizOption);

#[derive(Message, Debug, Clone)]
pub struct GuessEvaluated {
    pub guess: i64,
    pub result: Result<Outcome, GuessError>,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct ModeChanged(pub Mode);

#[derive(Message, Debug, Clone, Copy)]
pub struct QuizGraded {
    pub answer: QuizOption,
    pub correct: bool,
}

pub struct PuzzlePlugin;

impl Plugin for PuzzlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GraphSettings>()
            .add_message::<GuessSubmitted>()
            .add_message::<ModeToggleRequested>()
            .add_message::<QuizAnswered>()
            .add_message::<GuessEvaluated>()
            .add_message::<ModeChanged>()
            .add_message::<QuizGraded>()
            .add_systems(Startup, setup_puzzle_session)
            .add_systems(
                Update,
                (handle_guesses, handle_mode_toggles, handle_quiz_answers)
                    .chain()
                    .run_if(resource_exists::<PuzzleSession>),
            );
    }
}

/// System: build the graph once and insert the session
pub fn setup_puzzle_session(
    mut commands: Commands,
    settings: Res<GraphSettings>,
    mut exit: MessageWriter<AppExit>,
) {
    let generator = PuzzleGraphGenerator::new(settings.0);

    match PuzzleSession::new(&generator) {
        Ok(session) => {
            info!(
                "✓ Puzzle session started: {} nodes, {} edges, rewire p = {}",
                session.node_count(),
                session.graph().edge_count(),
                generator.params().rewire_probability
            );
            commands.insert_resource(session);
        }
        Err(e) => {
            error!("Failed to build puzzle graph: {}", e);
            exit.write(AppExit::error());
        }
    }
}

fn handle_guesses(
    mut guesses: MessageReader<GuessSubmitted>,
    mut session: ResMut<PuzzleSession>,
    mut evaluated: MessageWriter<GuessEvaluated>,
) {
    let mut rng = rand::rng();

    for &GuessSubmitted(guess) in guesses.read() {
        let result = session.evaluate_guess(guess, &mut rng);
        if let Err(e) = &result {
            warn!("{}", e);
        }
        evaluated.write(GuessEvaluated { guess, result });
    }
}

fn handle_mode_toggles(
    mut requests: MessageReader<ModeToggleRequested>,
    mut session: ResMut<PuzzleSession>,
    mut changed: MessageWriter<ModeChanged>,
) {
    for _ in requests.read() {
        let mode = session.toggle_mode();
        changed.write(ModeChanged(mode));
    }
}

fn handle_quiz_answers(
    mut answers: MessageReader<QuizAnswered>,
    mut graded: MessageWriter<QuizGraded>,
) {
    for &QuizAnswered(answer) in answers.read() {
        graded.write(QuizGraded {
            answer,
            correct: RealityCheck::check(answer),
        });
    }
}
