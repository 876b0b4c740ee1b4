use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// When the yearly draw should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSchedule {
    pub year: i32,
    pub draw_date: NaiveDate,
}

impl DrawSchedule {
    pub fn new(draw_date: NaiveDate) -> Self {
        Self {
            year: draw_date.year(),
            draw_date,
        }
    }

    pub fn for_year(year: i32, draw_date: NaiveDate) -> Self {
        Self { year, draw_date }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        today >= self.draw_date
    }

    /// 到了預定日期且當年尚未抽過才執行
    pub fn should_run(&self, today: NaiveDate, already_drawn: bool) -> bool {
        self.is_due(today) && !already_drawn
    }
}
