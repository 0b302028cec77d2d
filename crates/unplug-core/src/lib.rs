//! # Unplug Core Library
//!
//! This library provides the core logic for Unplug, a screen-time detox
//! companion. It implements a CLI-first philosophy where all operations
//! are available via a standalone CLI binary built as a thin layer over
//! this library.
//!
//! ## Architecture
//!
//! - **Personality**: a table-driven classifier over 16 quiz answers and
//!   the question-flow state machine that collects them
//! - **Backend**: JSON-over-HTTP client for the quiz/chat backend and the
//!   chat relay with its single-in-flight send gate
//! - **Usage**: read-only seams over the OS usage statistics, the daily
//!   screen-time summary and the foreground-transition poller
//! - **Storage**: TOML preferences/configuration and the read-only SQLite
//!   usage database
//!
//! ## Key Components
//!
//! - [`QuizFlow`]: question flow state machine
//! - [`BackendClient`]: backend HTTP API client
//! - [`ChatRelay`]: chat transcript and send gating
//! - [`UsagePoller`]: cooperative foreground monitor
//! - [`Preferences`]: persisted quiz outcome

pub mod backend;
pub mod error;
pub mod events;
pub mod personality;
pub mod storage;
pub mod usage;

pub use backend::{BackendClient, ChatEntry, ChatRelay, SendGate, Sender};
pub use error::{
    BackendError, ClassifierError, ConfigError, CoreError, PrefsError, QuizError, UsageError,
};
pub use events::Event;
pub use personality::{classify, Answer, Choice, PersonalityLabel, Question, QuizFlow, QuizState};
pub use storage::{Config, Preferences, UsageDb};
pub use usage::{
    summarize_today, DailySummary, ForegroundHit, PollerHandle, UsagePoller, UsageRecord,
    UsageSource,
};
