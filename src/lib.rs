//! OneMatch - term-to-definition memory game with signed result proofs

pub mod achievements;
pub mod core;
pub mod game;
pub mod proof;
pub mod server;
