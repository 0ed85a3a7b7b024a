use serde::Serialize;

use super::entities::WeeklySchedule;
use crate::models::classes::entities::Slot;

#[derive(Debug, Serialize)]
pub struct CreateWeeklyScheduleResponse {
    pub schedule: WeeklySchedule,
    pub slots: Vec<Slot>,
}
