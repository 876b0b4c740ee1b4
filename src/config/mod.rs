pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::core::roster::Roster;
    use crate::core::ConfigProvider;
    use crate::utils::error::{DrawError, Result};
    use crate::utils::validation::{self, Validate};
    use chrono::NaiveDate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "gift-exchange")]
    #[command(about = "Draw gift exchange assignments where nobody gets themself")]
    pub struct CliConfig {
        /// Participant names, comma separated
        #[arg(long, value_delimiter = ',')]
        pub names: Vec<String>,

        /// File with one name per line (commas also work)
        #[arg(long)]
        pub participants_file: Option<String>,

        /// Names to leave out of this draw
        #[arg(long, value_delimiter = ',')]
        pub exclude: Vec<String>,

        /// Year the draw is stored under, defaults to the current year
        #[arg(long)]
        pub year: Option<i32>,

        /// Seed for a reproducible draw
        #[arg(long)]
        pub seed: Option<u64>,

        #[arg(long, default_value = "100")]
        pub max_attempts: usize,

        #[arg(long, default_value = "table", help = "Output format: table, csv or json")]
        pub format: String,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, help = "Store the result under <output_path>/assignments/<year>.json")]
        pub save: bool,

        /// Only draw on or after this date (YYYY-MM-DD)
        #[arg(long)]
        pub draw_date: Option<NaiveDate>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// 從 --names 與 --participants-file 組出名單，再套用 --exclude
        pub fn load_roster(&self) -> Result<Roster> {
            let mut roster = Roster::new();

            if let Some(path) = &self.participants_file {
                let content = std::fs::read_to_string(path)?;
                let report = roster.add_multiple_names(&content);
                tracing::debug!(
                    "Loaded {} names from {} ({} skipped)",
                    report.added,
                    path,
                    report.skipped
                );
                for message in &report.errors {
                    tracing::warn!("⚠️ {}: {}", path, message);
                }
            }

            if !self.names.is_empty() {
                let report = roster.add_multiple_names(&self.names.join("\n"));
                for message in &report.errors {
                    tracing::warn!("⚠️ --names: {}", message);
                }
            }

            for name in &self.exclude {
                if !roster.exclude_name(name) {
                    tracing::warn!("⚠️ Cannot exclude unknown participant: {}", name);
                }
            }

            Ok(roster)
        }
    }

    impl ConfigProvider for CliConfig {
        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_format(&self) -> &str {
            &self.format
        }

        fn max_shuffle_attempts(&self) -> usize {
            self.max_attempts
        }

        fn seed(&self) -> Option<u64> {
            self.seed
        }

        fn year(&self) -> Option<i32> {
            self.year
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if self.names.is_empty() && self.participants_file.is_none() {
                return Err(DrawError::MissingConfigError {
                    field: "names or participants_file".to_string(),
                });
            }
            if let Some(path) = &self.participants_file {
                validation::validate_path("participants_file", path)?;
            }
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_output_format("format", &self.format)?;
            if let Some(year) = self.year {
                validation::validate_range("year", year, 1, 9999)?;
            }
            Ok(())
        }
    }

}
