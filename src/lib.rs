pub mod game;
pub mod graph;
pub mod plugin;
