pub mod chat;
pub mod config;
pub mod monitor;
pub mod quiz;
pub mod stats;
