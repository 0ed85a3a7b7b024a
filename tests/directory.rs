//! 学生、教师、科目目录与评论

mod common;

use chrono::Duration;

use linklearn::errors::LinkLearnError;
use linklearn::models::common::Party;
use linklearn::models::reservations::requests::NewReservation;
use linklearn::models::teachers::requests::CreateTeacherRequest;

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
async fn test_subject_names_are_unique() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;

    let err = storage.create_subject("Math").await.unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));

    let all = storage.list_subjects().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(storage.get_subject_by_id(math.id).await.unwrap().unwrap().name, "Math");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let storage = common::storage().await;
    common::student(&storage, "sam@example.com").await;

    let err = storage
        .create_student(linklearn::models::students::requests::CreateStudentRequest {
            first_name: "Other".into(),
            last_name: "Sam".into(),
            email: "sam@example.com".into(),
            password_hash: "x".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));
}

#[tokio::test]
async fn test_teacher_with_unknown_subject_is_not_created() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;

    let err = storage
        .create_teacher(
            CreateTeacherRequest {
                first_name: "Ana".into(),
                last_name: "Teacher".into(),
                email: "ana@example.com".into(),
                password_hash: "x".into(),
            },
            vec![math.id, math.id + 99],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));
    assert!(storage.list_teachers().await.unwrap().is_empty());
    assert!(
        storage
            .get_teacher_by_email("ana@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_new_teacher_is_inactive_until_activated() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    assert!(!teacher.is_active);

    let activated = storage.activate_teacher(teacher.id).await.unwrap().unwrap();
    assert!(activated.is_active);
    assert!(storage.activate_teacher(teacher.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_teacher_subject_management() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;
    let physics = common::subject(&storage, "Physics").await;
    let art = common::subject(&storage, "Art").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[math.id]).await;

    let subjects = storage.assign_subject(teacher.id, physics.id).await.unwrap();
    assert_eq!(subjects.len(), 2);

    let err = storage.assign_subject(teacher.id, physics.id).await.unwrap_err();
    assert!(matches!(err, LinkLearnError::Conflict(_)));
    let err = storage.assign_subject(teacher.id + 9, art.id).await.unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));

    assert!(storage.remove_subject(teacher.id, math.id).await.unwrap());
    assert!(!storage.remove_subject(teacher.id, math.id).await.unwrap());

    let replaced = storage
        .replace_teacher_subjects(teacher.id, vec![art.id, math.id, art.id])
        .await
        .unwrap();
    let mut ids: Vec<i64> = replaced.iter().map(|s| s.id).collect();
    ids.sort();
    assert_eq!(ids, vec![math.id, art.id]);

    // 替换失败时保持原集合
    let err = storage
        .replace_teacher_subjects(teacher.id, vec![physics.id, 999])
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));
    assert_eq!(storage.list_teacher_subjects(teacher.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_dictating_requires_an_untaken_slot() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;
    let student = common::student(&storage, "sam@example.com").await;
    let open = common::teacher(&storage, "Bea", "bea@example.com", &[math.id]).await;
    let booked = common::teacher(&storage, "Cid", "cid@example.com", &[math.id]).await;
    common::teacher(&storage, "Dan", "dan@example.com", &[math.id]).await;
    let elsewhere = common::teacher(&storage, "Eve", "eve@example.com", &[]).await;

    common::slots(&storage, open.id, common::upcoming(1, 9), 1).await;
    common::slots(&storage, elsewhere.id, common::upcoming(1, 9), 1).await;
    let full = common::slots(&storage, booked.id, common::upcoming(1, 9), 1).await;
    for slot in &full {
        storage
            .create_reservation(
                booking(student.id, booked.id, math.id, slot.id),
                common::offset(),
            )
            .await
            .unwrap();
    }

    let dictating = storage.list_teachers_dictating(math.id).await.unwrap();
    assert_eq!(dictating.len(), 1);
    assert_eq!(dictating[0].id, open.id);
}

#[tokio::test]
async fn test_previous_teachers_are_distinct_and_recent() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;
    let student = common::student(&storage, "sam@example.com").await;
    let base = common::upcoming(2, 8);

    let mut teachers = Vec::new();
    for (i, name) in ["Ana", "Bea", "Cid", "Dan"].iter().enumerate() {
        let email = format!("{}@example.com", name.to_lowercase());
        let teacher = common::teacher(&storage, name, &email, &[math.id]).await;
        let slots =
            common::slots(&storage, teacher.id, base + Duration::hours(i as i64), 1).await;
        teachers.push((teacher, slots));
    }
    let outsider = common::teacher(&storage, "Eve", "eve@example.com", &[]).await;
    let outsider_slots =
        common::slots(&storage, outsider.id, base + Duration::hours(5), 1).await;

    for (teacher, slots) in &teachers {
        storage
            .create_reservation(
                booking(student.id, teacher.id, math.id, slots[0].id),
                common::offset(),
            )
            .await
            .unwrap();
    }
    // Ana 下一周再上一次课，成为最近的教师
    let (ana, ana_slots) = &teachers[0];
    storage
        .create_reservation(
            booking(student.id, ana.id, math.id, ana_slots[1].id),
            common::offset(),
        )
        .await
        .unwrap();
    storage
        .create_reservation(
            booking(student.id, outsider.id, math.id, outsider_slots[2].id),
            common::offset(),
        )
        .await
        .unwrap();

    let previous = storage.list_previous_teachers(student.id, math.id).await.unwrap();
    let ids: Vec<i64> = previous.iter().map(|p| p.teacherid).collect();
    assert_eq!(ids, vec![ana.id, teachers[3].0.id, teachers[2].0.id]);
    assert_eq!(previous[0].firstname, "Ana");

    let other = common::subject(&storage, "Art").await;
    assert!(
        storage
            .list_previous_teachers(student.id, other.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_comments_append_in_order() {
    let storage = common::storage().await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let student = common::student(&storage, "sam@example.com").await;

    assert!(storage.list_comments(Party::Teacher, teacher.id).await.unwrap().is_empty());

    storage
        .add_comment(Party::Teacher, teacher.id, "Clear explanations", "Sam")
        .await
        .unwrap();
    storage
        .add_comment(Party::Teacher, teacher.id, "Very patient", "Lee")
        .await
        .unwrap();
    storage
        .add_comment(Party::Student, student.id, "Always prepared", "Ana")
        .await
        .unwrap();

    let comments = storage.list_comments(Party::Teacher, teacher.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].comment, "Clear explanations");
    assert_eq!(comments[1].commenter_name, "Lee");
    assert!(comments[0].comment_id < comments[1].comment_id);
    assert!(comments.iter().all(|c| c.owner_id == teacher.id));

    let err = storage
        .add_comment(Party::Student, student.id + 40, "Hello", "Ana")
        .await
        .unwrap_err();
    assert!(matches!(err, LinkLearnError::NotFound(_)));
}
