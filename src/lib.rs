// Library exports for the Connect Four bot
// This allows the replay tool and other utilities to use the core engine

pub mod board;
pub mod bot;
pub mod client;
pub mod config;
pub mod debug_logger;
pub mod replay;
pub mod types;
