//! Quiz subcommand -- run the 16-question flow, inspect or reset the result.

use clap::Subcommand;
use unplug_core::events::Event;
use unplug_core::personality::{Choice, QuizFlow};
use unplug_core::storage::{Config, Preferences};

use crate::common;

#[derive(Subcommand)]
pub enum QuizAction {
    /// Take the personality quiz
    Run,
    /// Show stored completion state and label
    Status,
    /// Clear the stored result
    Reset,
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuizAction::Run => run_quiz(),
        QuizAction::Status => show_status(),
        QuizAction::Reset => reset(),
    }
}

fn show_status() -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::load()?;
    if prefs.has_completed_test() {
        println!("Personality: {}", prefs.personality_or("Unknown"));
    } else {
        println!("Quiz not completed yet. Run `unplug quiz run`.");
    }
    Ok(())
}

fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let mut prefs = Preferences::load()?;
    prefs.reset();
    prefs.save()?;
    println!("quiz result cleared");
    Ok(())
}

fn run_quiz() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut prefs = Preferences::load()?;
    let mut flow = QuizFlow::new();

    if let Some(Event::NavigateToSummary { label, .. }) = flow.begin(&prefs) {
        // Completed on a previous launch -- no re-fetch, no re-quiz.
        let label = label
            .map(|l| l.to_string())
            .unwrap_or_else(|| "Unknown".into());
        println!("Personality: {label}");
        return crate::commands::stats::render_today();
    }

    let client = common::backend_client(&config)?;
    let rt = common::runtime()?;

    println!("Checking server...");
    if let Err(e) = rt.block_on(client.ping()) {
        return Err(format!("Cannot connect to server: {e}").into());
    }

    println!("Loading questions...");
    let prompts = match rt.block_on(client.questions()) {
        Ok(prompts) => prompts,
        Err(e) => {
            flow.fetch_failed();
            return Err(format!("Failed to load questions: {e}").into());
        }
    };
    flow.questions_received(prompts)?;

    while let Some(question) = flow.current_question().cloned() {
        let (answered, total) = flow.progress();
        println!();
        println!("Question {} of {}", answered + 1, total);
        println!("{}", question.prompt);
        println!("  [a] {}", question.option_a);
        println!("  [b] {}", question.option_b);

        let choice = loop {
            match common::read_line("> ")?.to_lowercase().as_str() {
                "a" => break Choice::OptionA,
                "b" => break Choice::OptionB,
                _ => println!("please answer 'a' or 'b'"),
            }
        };

        if let Event::QuizCompleted { label, .. } = flow.answer(choice)? {
            prefs.complete(label.clone());
            prefs.save()?;
            println!();
            println!("Personality: {label}");
        }
    }

    crate::commands::stats::render_today()
}
