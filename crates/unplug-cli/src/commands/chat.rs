//! Chat subcommand -- interactive transcript with the detox assistant.

use std::io::ErrorKind;

use unplug_core::backend::{ChatRelay, SendGate};
use unplug_core::personality::PersonalityLabel;
use unplug_core::storage::{Config, Preferences};

use crate::common;

pub fn run(personality: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let prefs = Preferences::load()?;
    let label: Option<PersonalityLabel> = match personality {
        Some(s) => Some(s.parse()?),
        None => prefs.personality().cloned(),
    };

    let client = common::backend_client(&config)?;
    let rt = common::runtime()?;
    let mut relay = ChatRelay::new(client, label.as_ref());

    for entry in relay.transcript() {
        println!("{}: {}", entry.sender, entry.text);
    }
    println!("(type /quit to leave)");

    loop {
        let input = match common::read_line("You: ") {
            Ok(line) => line,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };
        if input == "/quit" {
            break;
        }

        let before = relay.transcript().len();
        match rt.block_on(relay.send(&input)) {
            SendGate::EmptyInput | SendGate::Busy => continue,
            SendGate::Accepted { .. } => {}
        }

        // The user entry is already on screen; print what the send added.
        for entry in &relay.transcript()[before + 1..] {
            println!("{}: {}", entry.sender, entry.text);
        }
    }
    Ok(())
}
