//! 评分均值、预约评分记录与未评分课程

mod common;

use linklearn::errors::LinkLearnError;
use linklearn::models::common::Party;
use linklearn::models::reservations::{entities::ReservationStatus, requests::NewReservation};
use linklearn::utils::rating::format_rating;

#[tokio::test]
async fn test_teacher_rating_sequence() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;

    let unrated = storage.get_rating(Party::Teacher, teacher.id).await.unwrap().unwrap();
    assert_eq!(unrated.total_ratings, 0);
    assert_eq!(format_rating(&unrated), "0.00");

    let mut last = None;
    for (rating, expected) in [(4, "4.00"), (5, "4.50"), (5, "4.67"), (1, "3.75")] {
        let summary = storage
            .submit_rating(Party::Teacher, teacher.id, rating, None)
            .await
            .unwrap();
        assert_eq!(format_rating(&summary), expected);
        last = Some(summary);
    }

    let stored = storage.get_rating(Party::Teacher, teacher.id).await.unwrap().unwrap();
    assert_eq!(stored.total_ratings, 4);
    assert_eq!(format_rating(&stored), format_rating(&last.unwrap()));
}

#[tokio::test]
async fn test_out_of_range_rating_is_ignored() {
    let storage = common::storage().await;
    let student = common::student(&storage, "sam@example.com").await;

    storage
        .submit_rating(Party::Student, student.id, 3, None)
        .await
        .unwrap();
    for bad in [0, 6, -1] {
        let err = storage
            .submit_rating(Party::Student, student.id, bad, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LinkLearnError::Validation(_)));
    }

    let stored = storage.get_rating(Party::Student, student.id).await.unwrap().unwrap();
    assert_eq!(stored.total_ratings, 1);
    assert_eq!(format_rating(&stored), "3.00");
}

#[tokio::test]
async fn test_unknown_party_rating() {
    let storage = common::storage().await;

    assert!(storage.get_rating(Party::Student, 404).await.unwrap().is_none());
    assert!(storage.get_rating(Party::Teacher, 404).await.unwrap().is_none());

    let err = storage
        .submit_rating(Party::Teacher, 404, 5, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));
}

#[tokio::test]
async fn test_rating_stamps_reservation_and_clears_unrated() {
    let storage = common::storage().await;
    let subject = common::subject(&storage, "Chemistry").await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[subject.id]).await;
    let slots = common::slots(&storage, teacher.id, common::upcoming(2, 10), 1).await;

    let reservation = storage
        .create_reservation(
            NewReservation {
                student_id: student.id,
                teacher_id: teacher.id,
                subject_id: subject.id,
                schedule_id: slots[0].id,
                datetime: None,
                day_of_week: None,
                start_time: None,
            },
            common::offset(),
        )
        .await
        .unwrap();

    // 仍处于 booked 的课程不算待评分
    assert!(storage.list_unrated_classes(student.id).await.unwrap().is_empty());

    storage
        .update_reservation_status(reservation.id, ReservationStatus::Completed)
        .await
        .unwrap();
    let pending = storage.list_unrated_classes(student.id).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].reservation_id, reservation.id);
    assert_eq!(pending[0].subject, "Chemistry");
    assert_eq!(pending[0].teacher.teacherid, teacher.id);

    storage
        .submit_rating(Party::Teacher, teacher.id, 5, Some(reservation.id))
        .await
        .unwrap();

    let stamped = storage
        .get_reservation_by_id(reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stamped.student_rated, 5);
    assert_eq!(stamped.is_rated, 0);
    assert!(storage.list_unrated_classes(student.id).await.unwrap().is_empty());

    storage
        .submit_rating(Party::Student, student.id, 2, Some(reservation.id))
        .await
        .unwrap();
    let stamped = storage
        .get_reservation_by_id(reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stamped.is_rated, 2);
}

#[tokio::test]
async fn test_rating_with_foreign_reservation_rolls_back() {
    let storage = common::storage().await;
    let subject = common::subject(&storage, "Math").await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[subject.id]).await;
    let stranger = common::teacher(&storage, "Bob", "bob@example.com", &[]).await;
    let slots = common::slots(&storage, teacher.id, common::upcoming(2, 10), 1).await;

    let reservation = storage
        .create_reservation(
            NewReservation {
                student_id: student.id,
                teacher_id: teacher.id,
                subject_id: subject.id,
                schedule_id: slots[0].id,
                datetime: None,
                day_of_week: None,
                start_time: None,
            },
            common::offset(),
        )
        .await
        .unwrap();

    let err = storage
        .submit_rating(Party::Teacher, stranger.id, 4, Some(reservation.id))
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Validation(_)));

    let err = storage
        .submit_rating(Party::Teacher, teacher.id, 4, Some(reservation.id + 10))
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));

    let stranger_rating = storage
        .get_rating(Party::Teacher, stranger.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stranger_rating.total_ratings, 0);
    let untouched = storage
        .get_reservation_by_id(reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.student_rated, 0);
}
