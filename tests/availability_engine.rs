//! 课时展开、开放课时查询与假期处理

mod common;

use chrono::{Datelike, Duration, NaiveTime, Utc};

use linklearn::errors::LinkLearnError;
use linklearn::models::reservations::requests::NewReservation;
use linklearn::models::schedules::requests::NewWeeklySchedule;
use linklearn::utils::schedule::{SECONDS_PER_WEEK, next_occurrence, vacation_window};

fn booking(student_id: i64, teacher_id: i64, subject_id: i64, schedule_id: i64) -> NewReservation {
    NewReservation {
        student_id,
        teacher_id,
        subject_id,
        schedule_id,
        datetime: None,
        day_of_week: None,
        start_time: None,
    }
}

#[tokio::test]
async fn test_expansion_creates_four_weekly_slots() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let base = common::upcoming(2, 10);

    let slots = common::slots(&storage, teacher.id, base, 1).await;

    assert_eq!(slots.len(), 4);
    for (week, slot) in slots.iter().enumerate() {
        let local = slot.datetime.with_timezone(&common::offset());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(local.weekday().number_from_monday(), 2);
        assert_eq!(
            slot.datetime.timestamp() - base.timestamp(),
            week as i64 * SECONDS_PER_WEEK
        );
        assert_eq!(slot.current_students, 0);
        assert!(slot.is_open());
    }

    let stored = common::slot(&storage, slots[3].id).await;
    assert_eq!(stored, slots[3]);
}

#[tokio::test]
async fn test_expansion_rejects_invalid_occupancy() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let base = common::upcoming(2, 10);

    let err = storage
        .expand_weekly_to_monthly(base, teacher.id, 2, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Validation(_)));

    let err = storage
        .expand_weekly_to_monthly(base, teacher.id + 100, 1, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));
    assert!(storage.list_individual_open_slots().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_prefilled_expansion_is_full() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;

    let slots = storage
        .expand_weekly_to_monthly(common::upcoming(3, 9), teacher.id, 2, 2)
        .await
        .unwrap();

    assert!(slots.iter().all(|s| s.is_full() && s.is_taken));
    assert!(storage.list_group_open_slots().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_individual_and_group_listings() {
    let storage = common::storage().await;
    let subject = common::subject(&storage, "Math").await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[subject.id]).await;

    let individual = common::slots(&storage, teacher.id, common::upcoming(1, 8), 1).await;
    let group = common::slots(&storage, teacher.id, common::upcoming(4, 15), 3).await;

    let listed = storage.list_individual_open_slots().await.unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed.iter().all(|s| s.max_students == 1));
    assert!(listed.windows(2).all(|w| w[0].datetime <= w[1].datetime));

    let listed = storage.list_group_open_slots().await.unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed.iter().all(|s| s.max_students > 1));

    // 一对一课时被预约后从列表中消失
    storage
        .create_reservation(
            booking(student.id, teacher.id, subject.id, individual[0].id),
            common::offset(),
        )
        .await
        .unwrap();
    let listed = storage.list_individual_open_slots().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|s| s.id != individual[0].id));

    // 小组课时有人预约但未满时仍然开放
    storage
        .create_reservation(
            booking(student.id, teacher.id, subject.id, group[0].id),
            common::offset(),
        )
        .await
        .unwrap();
    let listed = storage.list_group_open_slots().await.unwrap();
    assert_eq!(listed.len(), 4);
    let partially = listed.iter().find(|s| s.id == group[0].id).unwrap();
    assert_eq!(partially.current_students, 1);
    assert!(partially.is_open());
}

#[tokio::test]
async fn test_teacher_open_slots_subject_filter() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;
    let physics = common::subject(&storage, "Physics").await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher =
        common::teacher(&storage, "Ana", "ana@example.com", &[math.id, physics.id]).await;

    let group = common::slots(&storage, teacher.id, common::upcoming(5, 18), 3).await;
    storage
        .create_reservation(
            booking(student.id, teacher.id, math.id, group[1].id),
            common::offset(),
        )
        .await
        .unwrap();

    let all = storage.list_teacher_open_slots(teacher.id, None).await.unwrap();
    assert_eq!(all.len(), 4);

    let for_math = storage
        .list_teacher_open_slots(teacher.id, Some(math.id))
        .await
        .unwrap();
    assert_eq!(for_math.len(), 4);

    let for_physics = storage
        .list_teacher_open_slots(teacher.id, Some(physics.id))
        .await
        .unwrap();
    assert_eq!(for_physics.len(), 3);
    assert!(for_physics.iter().all(|s| s.id != group[1].id));
}

#[tokio::test]
async fn test_weekly_schedule_expands_in_same_call() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let start_time = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
    let first = next_occurrence(Utc::now(), 6, start_time, &common::offset()).unwrap();

    let (schedule, slots) = storage
        .create_weekly_schedule(
            NewWeeklySchedule {
                teacher_id: teacher.id,
                day_of_week: 6,
                start_time,
                end_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
                max_students: 2,
            },
            first,
        )
        .await
        .unwrap();

    assert_eq!(schedule.teacher_id, teacher.id);
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0].datetime.timestamp(), first.timestamp());
    assert!(slots.iter().all(|s| s.max_students == 2));

    let templates = storage.list_weekly_schedules(teacher.id).await.unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].id, schedule.id);
}

#[tokio::test]
async fn test_vacation_assign_and_stop() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let base = common::upcoming(2, 10);
    let slots = common::slots(&storage, teacher.id, base, 1).await;

    // 覆盖前两周
    let start = base.date_naive();
    let end = start + Duration::days(7);
    let (from, until) = vacation_window(start, end, &common::offset()).unwrap();

    let blocked = storage.assign_vacation(teacher.id, from, until).await.unwrap();
    assert_eq!(blocked.len(), 2);
    assert!(blocked.iter().all(|s| s.is_taken));
    assert!(common::slot(&storage, slots[2].id).await.is_open());

    let teacher_now = storage.get_teacher_by_id(teacher.id).await.unwrap().unwrap();
    assert!(teacher_now.on_vacation);
    assert_eq!(storage.list_individual_open_slots().await.unwrap().len(), 2);

    let released = storage.stop_vacation(teacher.id).await.unwrap();
    assert_eq!(released, 2);
    assert!(common::slot(&storage, slots[0].id).await.is_open());
    let teacher_now = storage.get_teacher_by_id(teacher.id).await.unwrap().unwrap();
    assert!(!teacher_now.on_vacation);
}

#[tokio::test]
async fn test_vacation_conflict_changes_nothing() {
    let storage = common::storage().await;
    let subject = common::subject(&storage, "Math").await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[subject.id]).await;
    let base = common::upcoming(2, 10);
    let slots = common::slots(&storage, teacher.id, base, 3).await;

    storage
        .create_reservation(
            booking(student.id, teacher.id, subject.id, slots[1].id),
            common::offset(),
        )
        .await
        .unwrap();

    let start = base.date_naive();
    let (from, until) =
        vacation_window(start, start + Duration::days(14), &common::offset()).unwrap();
    let err = storage.assign_vacation(teacher.id, from, until).await.unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));

    for slot in &slots {
        assert!(!common::slot(&storage, slot.id).await.is_taken);
    }
    let teacher_now = storage.get_teacher_by_id(teacher.id).await.unwrap().unwrap();
    assert!(!teacher_now.on_vacation);
}

#[tokio::test]
async fn test_vacation_without_classes_in_window() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let base = common::upcoming(2, 10);
    common::slots(&storage, teacher.id, base, 1).await;

    // 最后一个课时之后的一周
    let start = base.date_naive() + Duration::days(30);
    let (from, until) =
        vacation_window(start, start + Duration::days(6), &common::offset()).unwrap();
    let err = storage.assign_vacation(teacher.id, from, until).await.unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));

    let err = storage.stop_vacation(teacher.id + 100).await.unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));
}
