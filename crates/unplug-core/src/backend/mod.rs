//! Backend HTTP API -- liveness probe, question fetch, chat relay.

mod chat;
mod client;

pub use chat::{ChatEntry, ChatRelay, SendGate, Sender, NEUTRAL_PERSONALITY};
pub use client::BackendClient;
