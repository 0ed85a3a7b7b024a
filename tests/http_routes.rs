//! 完整路由表上的 HTTP 行为：认证、角色、课表、预约与评分

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use linklearn::models::auth::Role;
use linklearn::models::reservations::{entities::ReservationStatus, requests::NewReservation};
use linklearn::models::{
    students::requests::CreateStudentRequest, teachers::requests::CreateTeacherRequest,
};
use linklearn::routes;
use linklearn::storage::Storage;
use linklearn::utils::jwt::JwtUtils;
use linklearn::utils::password::hash_password;
use linklearn::utils::{json_error_handler, path_error_handler, query_error_handler};

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .configure(routes::configure_routes),
        )
        .await
    };
}

fn bearer(id: i64, role: Role) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(id, role).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([10, 20, 0, last_octet], 40000))
}

const PASSWORD: &str = "Tut0ringRocks";

/// 带真实密码哈希的学生或教师账号
async fn member(storage: &Arc<dyn Storage>, role: Role, email: &str, subjects: &[i64]) -> i64 {
    let password_hash = hash_password(PASSWORD).unwrap();
    match role {
        Role::Teacher => {
            let request = CreateTeacherRequest {
                first_name: "Ana".to_string(),
                last_name: "Lopez".to_string(),
                email: email.to_string(),
                password_hash,
            };
            storage.create_teacher(request, subjects.to_vec()).await.unwrap().id
        }
        _ => {
            let request = CreateStudentRequest {
                first_name: "Sam".to_string(),
                last_name: "Rivera".to_string(),
                email: email.to_string(),
                password_hash,
            };
            storage.create_student(request).await.unwrap().id
        }
    }
}

async fn admin_id(storage: &Arc<dyn Storage>) -> i64 {
    let hash = hash_password("AdminPass123").unwrap();
    storage
        .create_admin("admin@example.com", &hash)
        .await
        .unwrap()
        .id
}

#[actix_web::test]
async fn test_register_login_and_me() {
    let storage = common::storage().await;
    let app = app!(storage);

    let register = json!({
        "firstname": "Sam",
        "lastname": "Rivera",
        "email": "Sam@Example.com",
        "password": "Tut0ringRocks",
        "role": "STUDENT"
    });
    let req = test::TestRequest::post()
        .uri("/authentication/register")
        .peer_addr(peer(1))
        .set_json(&register)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["email"], "sam@example.com");

    let req = test::TestRequest::post()
        .uri("/authentication/register")
        .peer_addr(peer(1))
        .set_json(&register)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/authentication/login")
        .peer_addr(peer(1))
        .set_json(json!({
            "email": "sam@example.com",
            "password": "WrongPass999",
            "role": "STUDENT"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 密码正确但角色不对同样失败
    let req = test::TestRequest::post()
        .uri("/authentication/login")
        .peer_addr(peer(1))
        .set_json(json!({
            "email": "sam@example.com",
            "password": "Tut0ringRocks",
            "role": "TEACHER"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/authentication/login")
        .peer_addr(peer(1))
        .set_json(json!({
            "email": "sam@example.com",
            "password": "Tut0ringRocks",
            "role": "STUDENT"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["role"], "STUDENT");
    assert_eq!(body["data"]["expires_in"], 3600);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/authentication/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["principal"]["email"], "sam@example.com");

    let req = test::TestRequest::get().uri("/authentication/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_rate_limit() {
    let storage = common::storage().await;
    let app = app!(storage);

    let mut statuses = Vec::new();
    for i in 0..4 {
        let req = test::TestRequest::post()
            .uri("/authentication/register")
            .peer_addr(peer(2))
            .set_json(json!({
                "firstname": "Lee",
                "lastname": "Park",
                "email": format!("lee{i}@example.com"),
                "password": "Tut0ringRocks",
                "role": "STUDENT"
            }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }
    assert_eq!(&statuses[..3], &[StatusCode::CREATED; 3]);
    assert_eq!(statuses[3], StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_roles_guard_subject_creation() {
    let storage = common::storage().await;
    let student = common::student(&storage, "sam@example.com").await;
    let admin = admin_id(&storage).await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri("/subject/create")
        .insert_header(bearer(student.id, Role::Student))
        .set_json(json!({ "name": "Math" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/subject/create")
        .insert_header(bearer(admin, Role::Admin))
        .set_json(json!({ "name": "Math" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/subject/create")
        .insert_header(bearer(admin, Role::Admin))
        .set_json(json!({ "name": "Math" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/subject/all-subjects")
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_token_for_deleted_account_is_rejected() {
    let storage = common::storage().await;
    let student = common::student(&storage, "sam@example.com").await;
    let auth = bearer(student.id, Role::Student);
    storage.delete_student(student.id).await.unwrap();
    let app = app!(storage);

    let req = test::TestRequest::get()
        .uri("/subject/all-subjects")
        .insert_header(auth)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_schedule_to_reservation_flow() {
    let storage = common::storage().await;
    let subject = common::subject(&storage, "Math").await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[subject.id]).await;
    let app = app!(storage);

    // 学生不能创建课表
    let schedule = json!({
        "day_of_week": 1,
        "start_time": "10:00:00",
        "end_time": "11:00:00",
        "max_students": 1
    });
    let req = test::TestRequest::post()
        .uri("/schedule/create")
        .insert_header(bearer(student.id, Role::Student))
        .set_json(&schedule)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/schedule/create")
        .insert_header(bearer(teacher.id, Role::Teacher))
        .set_json(json!({
            "day_of_week": 1,
            "start_time": "11:00:00",
            "end_time": "10:00:00"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/schedule/create")
        .insert_header(bearer(teacher.id, Role::Teacher))
        .set_json(&schedule)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let slots = body["data"]["slots"].as_array().unwrap().clone();
    assert_eq!(slots.len(), 4);

    let req = test::TestRequest::get()
        .uri(&format!("/classes/{}", teacher.id))
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let available = body["data"].as_array().unwrap();
    assert_eq!(available.len(), 4);
    assert!(available.iter().all(|s| s["dayofweek"] == 1));
    assert!(available.iter().all(|s| s["start_time"] == "10:00:00"));
    assert!(available.iter().all(|s| s["end_time"] == "11:00:00"));

    let schedule_id = slots[0]["id"].as_i64().unwrap();
    let booking = json!({
        "teacher_id": teacher.id,
        "subject_id": subject.id,
        "schedule_id": schedule_id,
        "day_of_week": 1,
        "start_time": "10:00"
    });
    let req = test::TestRequest::post()
        .uri("/reservation/create")
        .insert_header(bearer(student.id, Role::Student))
        .set_json(&booking)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let reservation_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/reservation/create")
        .insert_header(bearer(student.id, Role::Student))
        .set_json(&booking)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/classes/individual")
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::get()
        .uri(&format!("/reservation/student/{}", student.id))
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"][0]["id"], reservation_id);

    // 其他教师不能修改该预约状态
    let other = common::teacher(&storage, "Bob", "bob@example.com", &[]).await;
    let req = test::TestRequest::put()
        .uri(&format!("/reservation/status/{reservation_id}"))
        .insert_header(bearer(other.id, Role::Teacher))
        .set_json(json!({ "status": "completed" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/reservation/delete/{reservation_id}"))
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/classes/individual")
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn test_teacher_rating_endpoints() {
    let storage = common::storage().await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let app = app!(storage);

    let req = test::TestRequest::put()
        .uri(&format!("/teachers/update-rating/{}", teacher.id))
        .insert_header(bearer(student.id, Role::Student))
        .set_json(json!({ "rating": 4 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["rating"], "4.00");
    assert_eq!(body["data"]["total_ratings"], 1);

    let req = test::TestRequest::put()
        .uri(&format!("/teachers/update-rating/{}", teacher.id))
        .insert_header(bearer(student.id, Role::Student))
        .set_json(json!({ "rating": 6 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/teachers/update-rating/{}", teacher.id))
        .insert_header(bearer(teacher.id, Role::Teacher))
        .set_json(json!({ "rating": 5 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/teachers/get-rating/{}", teacher.id))
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["rating"], "4.00");
    assert_eq!(body["data"]["total_ratings"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/teachers/get-rating/{}", teacher.id + 100))
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_comment_endpoints() {
    let storage = common::storage().await;
    let student = common::student(&storage, "sam@example.com").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[]).await;
    let app = app!(storage);

    let uri = format!("/teachers/get-comments/{}", teacher.id);
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/teachers/add-comment/{}", teacher.id))
        .insert_header(bearer(student.id, Role::Student))
        .set_json(json!({ "comment": "   " , "commenter_name": "Sam" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/teachers/add-comment/{}", teacher.id))
        .insert_header(bearer(student.id, Role::Student))
        .set_json(json!({ "comment": " Great class ", "commenter_name": "Sam" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"][0]["comment"], "Great class");
}

#[actix_web::test]
async fn test_invalid_path_ids_are_rejected() {
    let storage = common::storage().await;
    let student = common::student(&storage, "sam@example.com").await;
    let app = app!(storage);

    for uri in ["/students/abc", "/students/0", "/teachers/-4"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(student.id, Role::Student))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST,
            "{uri}"
        );
    }

    let req = test::TestRequest::get()
        .uri(&format!("/students/{}", student.id))
        .insert_header(bearer(student.id, Role::Student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_change_password() {
    let storage = common::storage().await;
    let student = member(&storage, Role::Student, "sam@example.com", &[]).await;
    let other = member(&storage, Role::Student, "lee@example.com", &[]).await;
    let teacher = member(&storage, Role::Teacher, "ana@example.com", &[]).await;
    let app = app!(storage);

    let change = |email: &str, old: &str, new: &str| {
        json!({ "email": email, "old_password": old, "new_password": new })
    };

    let req = test::TestRequest::put()
        .uri("/authentication/change-password")
        .insert_header(bearer(student, Role::Student))
        .set_json(change("nobody@example.com", PASSWORD, "N3wPassword"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User not found");

    let req = test::TestRequest::put()
        .uri("/authentication/change-password")
        .insert_header(bearer(student, Role::Student))
        .set_json(change("sam@example.com", "Wr0ngPassword", "N3wPassword"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid password");

    // 只能修改自己的密码
    let req = test::TestRequest::put()
        .uri("/authentication/change-password")
        .insert_header(bearer(other, Role::Student))
        .set_json(change("sam@example.com", PASSWORD, "N3wPassword"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri("/authentication/change-password")
        .insert_header(bearer(student, Role::Student))
        .set_json(change("sam@example.com", PASSWORD, "short"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/authentication/change-password")
        .insert_header(bearer(student, Role::Student))
        .set_json(change("Sam@Example.com", PASSWORD, "N3wPassword"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password changed successfully");

    let login = |password: &str| {
        test::TestRequest::post()
            .uri("/authentication/login")
            .peer_addr(peer(3))
            .set_json(json!({
                "email": "sam@example.com",
                "password": password,
                "role": "STUDENT"
            }))
            .to_request()
    };
    assert_eq!(
        test::call_service(&app, login(PASSWORD)).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(test::call_service(&app, login("N3wPassword")).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/authentication/change-password")
        .insert_header(bearer(teacher, Role::Teacher))
        .set_json(change("ana@example.com", PASSWORD, "N3wPassword"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_edit_profile() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;
    let physics = common::subject(&storage, "Physics").await;
    let student = member(&storage, Role::Student, "sam@example.com", &[]).await;
    let teacher = member(&storage, Role::Teacher, "ana@example.com", &[math.id]).await;
    let admin = admin_id(&storage).await;
    let app = app!(storage);

    let req = test::TestRequest::put()
        .uri("/authentication/edit-profile")
        .insert_header(bearer(student, Role::Student))
        .set_json(json!({ "firstname": "Jackson", "lastname": "Doe", "email": "sam@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["data"]["principal"]["name"], "Jackson Doe");

    let req = test::TestRequest::put()
        .uri("/authentication/edit-profile")
        .insert_header(bearer(student, Role::Student))
        .set_json(json!({ "firstname": "Jackson", "lastname": "Doe", "email": "x@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/authentication/edit-profile")
        .insert_header(bearer(student, Role::Student))
        .set_json(json!({ "firstname": "R2D2", "lastname": "Doe", "email": "sam@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // 教师可同时替换科目集合
    let req = test::TestRequest::put()
        .uri("/authentication/edit-profile")
        .insert_header(bearer(teacher, Role::Teacher))
        .set_json(json!({
            "firstname": "Ana",
            "lastname": "Perez",
            "email": "ana@example.com",
            "subjects": [physics.id]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let subjects = storage.list_teacher_subjects(teacher).await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].id, physics.id);
    assert_eq!(storage.get_teacher_by_id(teacher).await.unwrap().unwrap().last_name, "Perez");

    let req = test::TestRequest::put()
        .uri("/authentication/edit-profile")
        .insert_header(bearer(admin, Role::Admin))
        .set_json(json!({ "firstname": "Root", "lastname": "Admin", "email": "admin@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_confirm_and_delete_account() {
    let storage = common::storage().await;
    let subject = common::subject(&storage, "Math").await;
    let student = member(&storage, Role::Student, "sam@example.com", &[]).await;
    let teacher = member(&storage, Role::Teacher, "ana@example.com", &[subject.id]).await;
    let app = app!(storage);

    let confirm = |email: &str, password: &str, auth: (&'static str, String)| {
        test::TestRequest::post()
            .uri(&format!("/authentication/delete-account/{email}"))
            .insert_header(auth)
            .set_json(json!({ "password": password }))
            .to_request()
    };

    let resp = test::call_service(
        &app,
        confirm("xd@example.com", PASSWORD, bearer(student, Role::Student)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        confirm("sam@example.com", "invalidpassword", bearer(student, Role::Student)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid password");

    let resp = test::call_service(
        &app,
        confirm("ana@example.com", PASSWORD, bearer(teacher, Role::Teacher)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password is correct");

    // 确认密码不会删除账号
    assert!(storage.get_teacher_by_id(teacher).await.unwrap().is_some());

    // 有待上课程的教师不能删除账号，取消后可以
    let slots = common::slots(&storage, teacher, common::upcoming(2, 10), 1).await;
    let reservation = storage
        .create_reservation(
            NewReservation {
                student_id: student,
                teacher_id: teacher,
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

    let delete = |email: &str, auth: (&'static str, String)| {
        test::TestRequest::delete()
            .uri("/authentication/delete-account")
            .insert_header(auth)
            .set_json(json!({ "email": email }))
            .to_request()
    };

    let teacher_auth = || bearer(teacher, Role::Teacher);
    let resp = test::call_service(&app, delete("ana@example.com", teacher_auth())).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    storage
        .update_reservation_status(reservation.id, ReservationStatus::Cancelled)
        .await
        .unwrap();
    let resp = test::call_service(&app, delete("ana@example.com", teacher_auth())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User account deleted successfully");
    assert!(storage.get_teacher_by_id(teacher).await.unwrap().is_none());

    let student_auth = || bearer(student, Role::Student);
    let resp = test::call_service(&app, delete("nobody@example.com", student_auth())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, delete("sam@example.com", student_auth())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(storage.get_student_by_id(student).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_subjects_dictated_by_teachers() {
    let storage = common::storage().await;
    let math = common::subject(&storage, "Math").await;
    common::subject(&storage, "Physics").await;
    let student = common::student(&storage, "sam@example.com").await;
    let app = app!(storage);

    let dictated = || {
        test::TestRequest::get()
            .uri("/subject/all-subjects-dictated")
            .insert_header(bearer(student.id, Role::Student))
            .to_request()
    };

    let body: Value = test::read_body_json(test::call_service(&app, dictated()).await).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    common::teacher(&storage, "Ana", "ana@example.com", &[math.id]).await;
    common::teacher(&storage, "Bob", "bob@example.com", &[math.id]).await;

    let resp = test::call_service(&app, dictated()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Subjects retrieved successfully");
    let subjects = body["data"].as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["name"], "Math");
}
