use crate::core::engine::{self, MAX_SHUFFLE_ATTEMPTS};
use crate::core::schedule::DrawSchedule;
use crate::core::store::{AssignmentStore, StoredDraw};
use crate::domain::model::{AssignmentSet, Participant};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    pub max_shuffle_attempts: usize,
    pub seed: Option<u64>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            max_shuffle_attempts: MAX_SHUFFLE_ATTEMPTS,
            seed: None,
        }
    }
}

impl DrawOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            max_shuffle_attempts: config.max_shuffle_attempts(),
            seed: config.seed(),
        }
    }

    /// 有設定 seed 時用可重現的 StdRng，否則用 thread_rng
    pub fn draw(&self, participants: &[Participant<String>]) -> Result<AssignmentSet<String>> {
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                engine::generate_with_attempts(participants, self.max_shuffle_attempts, &mut rng)
            }
            None => engine::generate_with_attempts(
                participants,
                self.max_shuffle_attempts,
                &mut rand::thread_rng(),
            ),
        }
    }
}

pub struct DrawEngine<S: Storage> {
    store: AssignmentStore<S>,
    options: DrawOptions,
}

impl<S: Storage> DrawEngine<S> {
    pub fn new(storage: S, options: DrawOptions) -> Self {
        Self {
            store: AssignmentStore::new(storage),
            options,
        }
    }

    pub fn store(&self) -> &AssignmentStore<S> {
        &self.store
    }

    /// Draw for `year` and replace any set previously stored for it.
    pub async fn run(&self, year: i32, participants: &[Participant<String>]) -> Result<StoredDraw> {
        tracing::info!(
            "🎲 Drawing assignments for {} with {} participants",
            year,
            participants.len()
        );

        let assignments = self.options.draw(participants)?;
        tracing::debug!("Drew {} assignments", assignments.len());

        self.store.save(year, &assignments).await
    }

    /// Run only when the schedule is due and nothing is stored for its year yet.
    pub async fn run_if_due(
        &self,
        schedule: &DrawSchedule,
        today: NaiveDate,
        participants: &[Participant<String>],
    ) -> Result<Option<StoredDraw>> {
        let already_drawn = self.store.exists(schedule.year).await?;
        if !schedule.should_run(today, already_drawn) {
            tracing::info!(
                "⏳ Draw for {} not scheduled to run (date: {}, already drawn: {})",
                schedule.year,
                schedule.draw_date,
                already_drawn
            );
            return Ok(None);
        }

        self.run(schedule.year, participants).await.map(Some)
    }
}
