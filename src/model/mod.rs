pub mod game;
pub mod team;
