//! 课表时间计算
//!
//! 所有课时以 UTC 秒存储，展示与日期边界按配置的固定时区偏移计算。
//! 固定偏移下没有夏令时，因此同一模板展开出的课时本地时刻始终一致。

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc,
};

use crate::errors::{LinkLearnError, Result};
use crate::models::classes::entities::{AvailabilitySlot, Slot};

pub const SECONDS_PER_WEEK: i64 = 7 * 24 * 60 * 60;

/// 每个模板展开出的周数
pub const WEEKS_PER_MONTH: i64 = 4;

/// 构造固定时区偏移
pub fn fixed_offset(hours: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| LinkLearnError::validation(format!("Invalid UTC offset: {hours} hours")))
}

/// 解析 `HH:MM:SS` 或 `HH:MM`
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            LinkLearnError::validation(format!("Invalid time '{value}', expected HH:MM:SS"))
        })
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

fn localize(offset: &FixedOffset, naive: NaiveDateTime) -> Result<DateTime<FixedOffset>> {
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| LinkLearnError::date_parse(format!("Ambiguous local time: {naive}")))
}

/// 模板展开后的 4 个课时时间戳：base + 0/7/14/21 天
pub fn weekly_instances(base: DateTime<FixedOffset>) -> Vec<i64> {
    let base = base.timestamp();
    (0..WEEKS_PER_MONTH)
        .map(|week| base + week * SECONDS_PER_WEEK)
        .collect()
}

/// 假期窗口 [start 当天 00:00:00, end 当天 23:59:59]，返回 UTC 秒
pub fn vacation_window(
    start: NaiveDate,
    end: NaiveDate,
    offset: &FixedOffset,
) -> Result<(i64, i64)> {
    if start > end {
        return Err(LinkLearnError::validation(
            "Vacation start date must not be after end date",
        ));
    }
    let from = localize(offset, start.and_time(NaiveTime::MIN))?;
    let until = localize(offset, end.and_time(NaiveTime::MIN))? + Duration::days(1)
        - Duration::seconds(1);
    Ok((from.timestamp(), until.timestamp()))
}

/// 从 `now` 起下一次出现的 (星期, 开始时间)，严格晚于 `now`
pub fn next_occurrence(
    now: DateTime<Utc>,
    day_of_week: u32,
    start_time: NaiveTime,
    offset: &FixedOffset,
) -> Result<DateTime<FixedOffset>> {
    if !(1..=7).contains(&day_of_week) {
        return Err(LinkLearnError::validation(
            "day_of_week must be between 1 (Monday) and 7 (Sunday)",
        ));
    }
    let local_now = now.with_timezone(offset);
    let today = local_now.weekday().number_from_monday();
    let days_ahead = (day_of_week + 7 - today) % 7;
    let date = local_now.date_naive() + Duration::days(i64::from(days_ahead));
    let mut candidate = localize(offset, date.and_time(start_time))?;
    if candidate <= local_now {
        candidate += Duration::days(7);
    }
    Ok(candidate)
}

/// 将课时转换为展示视图
pub fn availability_view(
    slot: &Slot,
    offset: &FixedOffset,
    slot_duration_minutes: i64,
) -> AvailabilitySlot {
    let start = slot.datetime.with_timezone(offset);
    let end = start + Duration::minutes(slot_duration_minutes);
    AvailabilitySlot {
        scheduleid: slot.id.to_string(),
        start_time: format_time(start.time()),
        end_time: format_time(end.time()),
        teacherid: slot.teacher_id.to_string(),
        dayofmonth: start.day(),
        dayofweek: start.weekday().number_from_monday(),
        maxstudents: slot.max_students,
    }
}

/// 校验调用方提供的时间信息与课时一致
pub fn ensure_matches_slot(
    slot_datetime: i64,
    datetime: Option<DateTime<Utc>>,
    day_of_week: Option<u32>,
    start_time: Option<NaiveTime>,
    offset: &FixedOffset,
) -> Result<()> {
    let local = DateTime::<Utc>::from_timestamp(slot_datetime, 0)
        .ok_or_else(|| LinkLearnError::date_parse("Slot datetime out of range"))?
        .with_timezone(offset);

    if let Some(expected) = datetime
        && expected.timestamp() != slot_datetime
    {
        return Err(LinkLearnError::validation(
            "Reservation datetime does not match the selected slot",
        ));
    }
    if let Some(expected) = day_of_week
        && expected != local.weekday().number_from_monday()
    {
        return Err(LinkLearnError::validation(
            "Reservation day_of_week does not match the selected slot",
        ));
    }
    if let Some(expected) = start_time
        && expected != local.time()
    {
        return Err(LinkLearnError::validation(
            "Reservation start_time does not match the selected slot",
        ));
    }
    Ok(())
}
