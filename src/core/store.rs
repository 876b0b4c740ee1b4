use crate::core::engine::validate_assignments;
use crate::domain::model::{Assignment, AssignmentSet};
use crate::domain::ports::Storage;
use crate::utils::error::{DrawError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDraw {
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub assignments: AssignmentSet<String>,
}

/// 以年份為鍵保存抽籤結果，每年一個 JSON 檔
pub struct AssignmentStore<S: Storage> {
    storage: S,
}

impl<S: Storage> AssignmentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn path_for(year: i32) -> String {
        format!("assignments/{}.json", year)
    }

    /// Replace whatever set was stored for `year`.
    pub async fn save(&self, year: i32, assignments: &AssignmentSet<String>) -> Result<StoredDraw> {
        let draw = StoredDraw {
            year,
            created_at: Utc::now(),
            assignments: assignments.clone(),
        };
        let json = serde_json::to_vec_pretty(&draw)?;
        let path = Self::path_for(year);
        self.storage.write_file(&path, &json).await?;

        tracing::info!(
            "💾 Saved {} assignments for {} to {}",
            assignments.len(),
            year,
            path
        );
        Ok(draw)
    }

    pub async fn load(&self, year: i32) -> Result<Option<StoredDraw>> {
        let data = match self.storage.read_file(&Self::path_for(year)).await {
            Ok(data) => data,
            Err(DrawError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None)
            }
            Err(e) => return Err(e),
        };
        let draw: StoredDraw = serde_json::from_slice(&data)?;
        Self::check_stored(year, &draw)?;
        Ok(Some(draw))
    }

    /// 存檔內容不可信任，讀回時重新驗證
    fn check_stored(year: i32, draw: &StoredDraw) -> Result<()> {
        if draw.year != year {
            return Err(DrawError::AssignmentFailure {
                message: format!("stored draw for {} is labelled {}", year, draw.year),
            });
        }
        if draw.assignments.len() < 2 {
            return Err(DrawError::AssignmentFailure {
                message: format!(
                    "stored draw for {} has {} assignment(s)",
                    year,
                    draw.assignments.len()
                ),
            });
        }

        let givers: Vec<String> = draw
            .assignments
            .iter()
            .map(|a| a.giver_id.clone())
            .collect();
        validate_assignments(draw.assignments.as_slice(), &givers)
    }

    pub async fn exists(&self, year: i32) -> Result<bool> {
        Ok(self.load(year).await?.is_some())
    }

    pub async fn receiver_for(&self, giver_id: &str, year: i32) -> Result<Option<Assignment<String>>> {
        let draw = self.load(year).await?;
        Ok(draw.and_then(|d| d.assignments.receiver_of(&giver_id.to_string()).cloned()))
    }
}
