//! Chat relay -- transcript state and the single-in-flight send gate.
//!
//! The relay owns the visible transcript and guarantees at most one
//! request in flight: a send attempted while another is pending is
//! rejected, and sending re-enables once the pending attempt resolves,
//! successfully or not. Empty input never produces a request.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::backend::client::BackendClient;
use crate::error::BackendError;
use crate::personality::PersonalityLabel;

/// Greeting shown when a chat session opens.
const GREETING: &str = "Hello! I'm your Unplug assistant. Let's chat.";

/// Personality sent to the backend when no label is stored.
pub const NEUTRAL_PERSONALITY: &str = "NEUTRAL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    You,
    Assistant,
    System,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sender::You => "You",
            Sender::Assistant => "Assistant",
            Sender::System => "System",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
}

/// Outcome of asking the relay to start a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendGate {
    /// Message accepted; a request may now be issued.
    Accepted { message: String },
    /// A prior send is still pending.
    Busy,
    /// Trimmed input was empty; silently ignored.
    EmptyInput,
}

pub struct ChatRelay {
    client: BackendClient,
    personality: String,
    transcript: Vec<ChatEntry>,
    in_flight: bool,
}

impl ChatRelay {
    /// Open a relay for the given personality (falling back to
    /// [`NEUTRAL_PERSONALITY`]) with the greeting on the transcript.
    pub fn new(client: BackendClient, personality: Option<&PersonalityLabel>) -> Self {
        let personality = personality
            .map(|label| label.to_string())
            .unwrap_or_else(|| NEUTRAL_PERSONALITY.to_string());
        let mut relay = Self {
            client,
            personality,
            transcript: Vec::new(),
            in_flight: false,
        };
        relay.append(Sender::Assistant, GREETING);
        relay
    }

    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight
    }

    pub fn personality(&self) -> &str {
        &self.personality
    }

    fn append(&mut self, sender: Sender, text: &str) {
        self.transcript.push(ChatEntry {
            sender,
            text: text.to_string(),
        });
    }

    /// Gate a new send.
    ///
    /// Appends the user entry and marks the relay busy only when the
    /// message is accepted.
    pub fn begin_send(&mut self, input: &str) -> SendGate {
        if self.in_flight {
            return SendGate::Busy;
        }
        let message = input.trim();
        if message.is_empty() {
            return SendGate::EmptyInput;
        }
        self.in_flight = true;
        self.append(Sender::You, message);
        SendGate::Accepted {
            message: message.to_string(),
        }
    }

    /// Resolve the pending send. Sending re-enables on success and
    /// failure alike.
    pub fn resolve(&mut self, result: Result<String, BackendError>) {
        match result {
            Ok(reply) => self.append(Sender::Assistant, &reply),
            Err(err) => {
                warn!(error = %err, "chat request failed");
                let text = match &err {
                    BackendError::Server { status } => format!("Server error: {status}"),
                    BackendError::Malformed(_) => "Error parsing server response".to_string(),
                    _ => format!("Error communicating with server: {err}"),
                };
                self.append(Sender::System, &text);
            }
        }
        self.in_flight = false;
    }

    /// Full send path: gate, one `POST /chat`, resolve.
    pub async fn send(&mut self, input: &str) -> SendGate {
        let gate = self.begin_send(input);
        if let SendGate::Accepted { ref message } = gate {
            let result = self.client.chat(&self.personality, message).await;
            self.resolve(result);
        }
        gate
    }
}
