use bevy::prelude::*;
use ghost_protocol::game::session::{SUCCESS_MESSAGE, SUCCESS_NOTE};
use ghost_protocol::game::{Outcome, PuzzleSession, QuizOption, RealityCheck};
use ghost_protocol::graph::CentralityScores;
use ghost_protocol::plugin::{
    GuessEvaluated, GuessSubmitted, ModeChanged, ModeToggleRequested, QuizAnswered, QuizGraded,
};
use std::io::BufRead;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Terminal front end: stdin lines in, narrative text out
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostStartup, spawn_stdin_reader)
            .add_systems(
                Update,
                read_console_commands.run_if(resource_exists::<ConsoleInput>),
            )
            .add_systems(PostUpdate, print_results);
    }
}

/// Lines typed by the player, fed from a background thread
#[derive(Resource)]
struct ConsoleInput(Mutex<Receiver<String>>);

#[derive(Debug, Clone, PartialEq)]
enum ConsoleCommand {
    Guess(i64),
    ToggleMode,
    ShowQuiz,
    Quiz(QuizOption),
    Graph,
    Scores,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl ConsoleCommand {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Ok(guess) = line.parse::<i64>() {
            return Some(ConsoleCommand::Guess(guess));
        }

        let lower = line.to_lowercase();
        let (head, rest) = match lower.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (lower.as_str(), ""),
        };

        let command = match (head, rest) {
            ("pill" | "red" | "toggle", _) => ConsoleCommand::ToggleMode,
            ("quiz", "") => ConsoleCommand::ShowQuiz,
            ("quiz", answer) => match QuizOption::parse(answer) {
                Some(option) => ConsoleCommand::Quiz(option),
                None => ConsoleCommand::Unknown(line.to_string()),
            },
            ("graph", _) => ConsoleCommand::Graph,
            ("scores", _) => ConsoleCommand::Scores,
            ("status", _) => ConsoleCommand::Status,
            ("help", _) => ConsoleCommand::Help,
            ("quit" | "exit", _) => ConsoleCommand::Quit,
            _ => ConsoleCommand::Unknown(line.to_string()),
        };

        Some(command)
    }
}

const HELP: &str = "\
Commands:
  <id>           scan the server with that id
  pill           red pill: switch between story and math framing
  quiz           show the reality check
  quiz <answer>  answer it (chaos, regular ring, star)
  graph          print the network as JSON
  scores         closeness of every server (after the case is solved)
  status         show progress
  quit";

fn spawn_stdin_reader(mut commands: Commands, session: Option<Res<PuzzleSession>>) {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    commands.insert_resource(ConsoleInput(Mutex::new(rx)));

    println!("Case 1: Ghost Protocol");
    if let Some(session) = session {
        println!("{}", session.mode().briefing());
        println!(
            "Suspect ids run from 0 to {}.",
            session.node_count().saturating_sub(1)
        );
    }
    println!("{}", HELP);
}

fn read_console_commands(
    input: Res<ConsoleInput>,
    session: Option<Res<PuzzleSession>>,
    mut guesses: MessageWriter<GuessSubmitted>,
    mut toggles: MessageWriter<ModeToggleRequested>,
    mut answers: MessageWriter<QuizAnswered>,
    mut exit: MessageWriter<AppExit>,
) {
    let Ok(rx) = input.0.lock() else {
        error!("Console input lock poisoned");
        exit.write(AppExit::error());
        return;
    };

    loop {
        let line = match rx.try_recv() {
            Ok(line) => line,
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                info!("Console closed");
                exit.write(AppExit::Success);
                break;
            }
        };

        let Some(command) = ConsoleCommand::parse(&line) else {
            continue;
        };

        match command {
            ConsoleCommand::Guess(guess) => {
                guesses.write(GuessSubmitted(guess));
            }
            ConsoleCommand::ToggleMode => {
                toggles.write(ModeToggleRequested);
            }
            ConsoleCommand::ShowQuiz => {
                println!("{}", RealityCheck::QUESTION);
                for option in QuizOption::ALL {
                    println!("  - {}", option);
                }
            }
            ConsoleCommand::Quiz(option) => {
                answers.write(QuizAnswered(option));
            }
            ConsoleCommand::Graph => match session.as_ref().map(|s| s.snapshot().to_json()) {
                Some(Ok(json)) => println!("{}", json),
                Some(Err(e)) => error!("Failed to serialize graph: {}", e),
                None => warn!("No puzzle session yet"),
            },
            ConsoleCommand::Scores => match &session {
                Some(session) if session.is_solved() => {
                    print!("{}", closeness_table(session.scores()));
                }
                Some(_) => println!("Solve the case first."),
                None => warn!("No puzzle session yet"),
            },
            ConsoleCommand::Status => {
                if let Some(session) = &session {
                    println!(
                        "Mode: {} | Solved: {} | Inventory: {}",
                        session.mode(),
                        session.is_solved(),
                        session.inventory().unwrap_or("empty")
                    );
                }
            }
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => {
                exit.write(AppExit::Success);
            }
            ConsoleCommand::Unknown(text) => {
                println!("Unknown command '{}'. Type 'help'.", text);
            }
        }
    }
}

/// One line per node, the most central marked with '*'
fn closeness_table(scores: &CentralityScores) -> String {
    let best = scores.argmax();
    let mut table = String::from("node  closeness\n");

    for (node, score) in scores.iter() {
        let marker = if Some(node) == best { " *" } else { "" };
        table.push_str(&format!("{:>4}  {:.4}{}\n", node.index(), score, marker));
    }

    table
}

fn print_results(
    mut evaluated: MessageReader<GuessEvaluated>,
    mut modes: MessageReader<ModeChanged>,
    mut grades: MessageReader<QuizGraded>,
) {
    for GuessEvaluated { guess, result } in evaluated.read() {
        match result {
            Ok(Outcome::Success {
                inventory_token,
                audio,
            }) => {
                println!("{}", SUCCESS_MESSAGE);
                println!("{}", SUCCESS_NOTE);
                println!("Inventory: {}", inventory_token);
                println!(
                    "Recovered file: {:.1}s at {} Hz, peak {:.2}, rms {:.2} (very noisy!)",
                    audio.duration_secs(),
                    audio.sample_rate(),
                    audio.peak(),
                    audio.rms()
                );
            }
            Ok(Outcome::Failure { message }) => {
                println!("Server {}: {}", guess, message);
            }
            Err(e) => println!("{}", e),
        }
    }

    for ModeChanged(mode) in modes.read() {
        println!("{}", mode.briefing());
    }

    for grade in grades.read() {
        if grade.correct {
            println!("Correct!");
        } else {
            println!("Wrong. '{}' is not it.", grade.answer);
        }
    }
}
