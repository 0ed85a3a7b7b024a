//! 预约创建、删除、状态变更与座位计数

mod common;

use std::sync::Arc;

use chrono::{Datelike, Utc};

use linklearn::errors::LinkLearnError;
use linklearn::models::reservations::{entities::ReservationStatus, requests::NewReservation};
use linklearn::storage::Storage;

struct Fixture {
    storage: Arc<dyn Storage>,
    student_id: i64,
    teacher_id: i64,
    subject_id: i64,
}

async fn fixture() -> Fixture {
    let storage = common::storage().await;
    let subject = common::subject(&storage, "Math").await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[subject.id]).await;
    Fixture {
        storage,
        student_id: student.id,
        teacher_id: teacher.id,
        subject_id: subject.id,
    }
}

impl Fixture {
    fn booking(&self, schedule_id: i64) -> NewReservation {
        NewReservation {
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            schedule_id,
            datetime: None,
            day_of_week: None,
            start_time: None,
        }
    }
}

#[tokio::test]
async fn test_booking_individual_slot_takes_it() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    let local = slots[0].datetime.with_timezone(&common::offset());

    let mut request = f.booking(slots[0].id);
    request.datetime = Some(slots[0].datetime);
    request.day_of_week = Some(local.weekday().number_from_monday());
    request.start_time = Some(local.time());

    let reservation = f
        .storage
        .create_reservation(request, common::offset())
        .await
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Booked);
    assert_eq!(reservation.datetime, slots[0].datetime);
    assert_eq!(reservation.student_rated, 0);
    assert_eq!(reservation.is_rated, 0);

    let slot = common::slot(&f.storage, slots[0].id).await;
    assert_eq!(slot.current_students, 1);
    assert!(slot.is_taken);

    let listed = f.storage.list_student_reservations(f.student_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, reservation.id);
}

#[tokio::test]
async fn test_collision_on_same_teacher_and_time() {
    let f = fixture().await;
    let other = common::student(&f.storage, "lee@example.com").await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 3).await;

    f.storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();

    let mut second = f.booking(slots[0].id);
    second.student_id = other.id;
    let err = f
        .storage
        .create_reservation(second, common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));

    let slot = common::slot(&f.storage, slots[0].id).await;
    assert_eq!(slot.current_students, 1);
    assert!(!slot.is_taken);
}

#[tokio::test]
async fn test_rejects_mismatched_requests() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    let intruder = common::teacher(&f.storage, "Bob", "bob@example.com", &[]).await;

    let mut wrong_teacher = f.booking(slots[0].id);
    wrong_teacher.teacher_id = intruder.id;
    let err = f
        .storage
        .create_reservation(wrong_teacher, common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Validation(_)));

    let local = slots[0].datetime.with_timezone(&common::offset());
    let mut wrong_day = f.booking(slots[0].id);
    wrong_day.day_of_week = Some(local.weekday().number_from_monday() % 7 + 1);
    let err = f
        .storage
        .create_reservation(wrong_day, common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Validation(_)));

    let mut wrong_datetime = f.booking(slots[0].id);
    wrong_datetime.datetime = Some(slots[1].datetime);
    let err = f
        .storage
        .create_reservation(wrong_datetime, common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Validation(_)));

    let err = f
        .storage
        .create_reservation(f.booking(slots[3].id + 50), common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));

    let mut unknown_subject = f.booking(slots[0].id);
    unknown_subject.subject_id = f.subject_id + 50;
    let err = f
        .storage
        .create_reservation(unknown_subject, common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));

    assert!(common::slot(&f.storage, slots[0].id).await.is_open());
    assert!(
        f.storage
            .list_student_reservations(f.student_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_full_slot_is_rejected() {
    let f = fixture().await;
    let slots = f
        .storage
        .expand_weekly_to_monthly(common::upcoming(2, 10), f.teacher_id, 2, 2)
        .await
        .unwrap();

    let err = f
        .storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));
    assert_eq!(common::slot(&f.storage, slots[0].id).await.current_students, 2);
}

#[tokio::test]
async fn test_delete_releases_seat() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    let reservation = f
        .storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();

    assert!(f.storage.delete_reservation(reservation.id).await.unwrap());
    let slot = common::slot(&f.storage, slots[0].id).await;
    assert_eq!(slot.current_students, 0);
    assert!(slot.is_open());

    assert!(!f.storage.delete_reservation(reservation.id).await.unwrap());

    // 删除后同一时段可以再次预约
    f.storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancel_releases_seat_once() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 2).await;
    let reservation = f
        .storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();

    let cancelled = f
        .storage
        .update_reservation_status(reservation.id, ReservationStatus::Cancelled)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(common::slot(&f.storage, slots[0].id).await.current_students, 0);

    let err = f
        .storage
        .update_reservation_status(reservation.id, ReservationStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Validation(_)));

    // 已取消的预约删除时不再重复释放
    assert!(f.storage.delete_reservation(reservation.id).await.unwrap());
    assert_eq!(common::slot(&f.storage, slots[0].id).await.current_students, 0);

    assert!(
        f.storage
            .update_reservation_status(reservation.id, ReservationStatus::Completed)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_completed_keeps_seat() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    let reservation = f
        .storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();

    f.storage
        .update_reservation_status(reservation.id, ReservationStatus::Completed)
        .await
        .unwrap();
    let slot = common::slot(&f.storage, slots[0].id).await;
    assert_eq!(slot.current_students, 1);
    assert!(slot.is_taken);
}

#[tokio::test]
async fn test_student_delete_releases_all_seats() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    for slot in &slots[..2] {
        f.storage
            .create_reservation(f.booking(slot.id), common::offset())
            .await
            .unwrap();
    }

    assert!(f.storage.delete_student(f.student_id).await.unwrap());
    for slot in &slots[..2] {
        assert!(common::slot(&f.storage, slot.id).await.is_open());
    }
    assert!(f.storage.get_student_by_id(f.student_id).await.unwrap().is_none());
    assert!(!f.storage.delete_student(f.student_id).await.unwrap());
}

#[tokio::test]
async fn test_teacher_window_listing() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    for slot in &slots {
        f.storage
            .create_reservation(f.booking(slot.id), common::offset())
            .await
            .unwrap();
    }

    let from = slots[0].datetime.timestamp();
    let until = slots[1].datetime.timestamp();
    let window = f
        .storage
        .list_teacher_reservations_between(f.teacher_id, from, until)
        .await
        .unwrap();
    assert_eq!(window.len(), 2);
    assert!(window[0].datetime < window[1].datetime);
}

#[tokio::test]
async fn test_teacher_with_upcoming_classes_cannot_be_deleted() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    f.storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();

    let err = f
        .storage
        .delete_teacher(f.teacher_id, Utc::now().timestamp())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));
    assert!(f.storage.get_teacher_by_id(f.teacher_id).await.unwrap().is_some());

    // 全部课程结束后可以删除
    let after = slots[3].datetime.timestamp() + 1;
    assert!(f.storage.delete_teacher(f.teacher_id, after).await.unwrap());
    assert!(f.storage.get_teacher_by_id(f.teacher_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_cancelled_slot_can_be_rebooked() {
    let f = fixture().await;
    let other = common::student(&f.storage, "lee@example.com").await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;

    let first = f
        .storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();
    f.storage
        .update_reservation_status(first.id, ReservationStatus::Cancelled)
        .await
        .unwrap();

    // 取消后课时重新出现在开放列表中
    let open = f.storage.list_individual_open_slots().await.unwrap();
    assert!(open.iter().any(|s| s.id == slots[0].id));

    let mut rebooking = f.booking(slots[0].id);
    rebooking.student_id = other.id;
    let second = f
        .storage
        .create_reservation(rebooking, common::offset())
        .await
        .unwrap();
    assert_eq!(second.status, ReservationStatus::Booked);
    assert!(common::slot(&f.storage, slots[0].id).await.is_taken);

    // 有效预约仍然独占该时段
    let err = f
        .storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));

    // 再次取消与预约同样可行，多条已取消记录互不冲突
    f.storage
        .update_reservation_status(second.id, ReservationStatus::Cancelled)
        .await
        .unwrap();
    f.storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();

    let history = f.storage.list_student_reservations(f.student_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(common::slot(&f.storage, slots[0].id).await.current_students, 1);
}

#[tokio::test]
async fn test_cancelled_classes_do_not_block_teacher_delete() {
    let f = fixture().await;
    let slots = common::slots(&f.storage, f.teacher_id, common::upcoming(2, 10), 1).await;
    let reservation = f
        .storage
        .create_reservation(f.booking(slots[0].id), common::offset())
        .await
        .unwrap();
    f.storage
        .update_reservation_status(reservation.id, ReservationStatus::Cancelled)
        .await
        .unwrap();

    assert!(
        f.storage
            .delete_teacher(f.teacher_id, Utc::now().timestamp())
            .await
            .unwrap()
    );
    assert!(f.storage.get_teacher_by_id(f.teacher_id).await.unwrap().is_none());
}
