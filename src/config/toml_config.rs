use crate::core::engine::MAX_SHUFFLE_ATTEMPTS;
use crate::core::schedule::DrawSchedule;
use crate::core::{ConfigProvider, Participant};
use crate::utils::error::{DrawError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub draw: DrawConfig,
    #[serde(default)]
    pub participants: Vec<ParticipantConfig>,
    pub schedule: Option<ScheduleConfig>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    pub name: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub seed: Option<u64>,
    pub max_shuffle_attempts: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantConfig {
    pub name: String,
    pub id: Option<String>,
    pub excluded: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub draw_date: NaiveDate, // "YYYY-MM-DD"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub format: Option<String>,
    pub save: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DrawError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DrawError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SANTA_SEED})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrawError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("draw.name", &self.draw.name)?;
        validation::validate_path("output.path", &self.output.path)?;

        if let Some(format) = &self.output.format {
            validation::validate_output_format("output.format", format)?;
        }

        if let Some(year) = self.draw.year {
            validation::validate_range("draw.year", year, 1, 9999)?;
        }

        for (index, participant) in self.participants.iter().enumerate() {
            validation::validate_non_empty_string(
                &format!("participants[{}].name", index),
                &participant.name,
            )?;
            if let Some(id) = &participant.id {
                validation::validate_non_empty_string(&format!("participants[{}].id", index), id)?;
            }
        }

        Ok(())
    }

    /// 未排除的參與者；沒有指定 id 的以 person-N 編號
    pub fn eligible_participants(&self) -> Vec<Participant<String>> {
        self.participants
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.excluded.unwrap_or(false))
            .map(|(index, p)| {
                let id = p
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("person-{}", index + 1));
                Participant::new(id, p.name.trim())
            })
            .collect()
    }

    /// 有 [schedule] 時回傳排程，年份以 draw.year 為準
    pub fn schedule(&self) -> Option<DrawSchedule> {
        self.schedule.as_ref().map(|s| match self.draw.year {
            Some(year) => DrawSchedule::for_year(year, s.draw_date),
            None => DrawSchedule::new(s.draw_date),
        })
    }

    pub fn save_enabled(&self) -> bool {
        self.output.save.unwrap_or(true)
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("table")
    }

    fn max_shuffle_attempts(&self) -> usize {
        self.draw.max_shuffle_attempts.unwrap_or(MAX_SHUFFLE_ATTEMPTS)
    }

    fn seed(&self) -> Option<u64> {
        self.draw.seed
    }

    fn year(&self) -> Option<i32> {
        self.draw.year
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
