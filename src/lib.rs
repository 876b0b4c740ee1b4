pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use self::core::{
    draw::{DrawEngine, DrawOptions},
    engine::{generate, generate_with_attempts, generate_with_rng, MAX_SHUFFLE_ATTEMPTS},
    report::OutputFormat,
    roster::Roster,
    schedule::DrawSchedule,
    store::{AssignmentStore, StoredDraw},
};
pub use domain::model::{Assignment, AssignmentSet, Participant};
pub use utils::error::{DrawError, Result};
