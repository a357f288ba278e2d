use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::time::Duration;

mod console;

use console::ConsolePlugin;
use ghost_protocol::graph::SmallWorldParams;
use ghost_protocol::plugin::{GraphSettings, PuzzlePlugin};

/// Graph parameters from the JSON file named on the command line, or the defaults
fn load_params() -> Result<SmallWorldParams, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SmallWorldParams::default());
    };

    let json = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read parameter file {}: {}", path, e))?;

    SmallWorldParams::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

fn main() -> AppExit {
    let params = match load_params() {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(50))),
        )
        .add_plugins(LogPlugin {
            filter: "ghost_protocol=info".into(),
            ..default()
        })
        .insert_resource(GraphSettings(params))
        .add_plugins(PuzzlePlugin)
        .add_plugins(ConsolePlugin)
        .run()
}
