#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, get_request, json_request, make_test_app};
    use api::auth::generate_jwt;
    use axum::http::StatusCode;
    use db::models::user::{Model as UserModel, Role};
    use db::models::{
        course, course_request, enrollment, major, program, section, student, timetable_entry,
    };
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    struct Catalog {
        program_id: i64,
        major_id: i64,
        section_id: i64,
    }

    async fn seed_catalog(db: &DatabaseConnection) -> Catalog {
        let program = program::Model::create(db, "BSc Computer Science").await.unwrap();
        let major = major::Model::create(db, program.id, "Software Engineering")
            .await
            .unwrap();
        let section = section::Model::create(db, "CS-A", 40).await.unwrap();
        Catalog {
            program_id: program.id,
            major_id: major.id,
            section_id: section.id,
        }
    }

    async fn admin_token(db: &DatabaseConnection) -> String {
        let admin = UserModel::create(db, "admin", "admin@example.com", "adminpass1", Role::Admin)
            .await
            .unwrap();
        generate_jwt(admin.id, admin.role).0
    }

    fn registration_body(catalog: &Catalog) -> serde_json::Value {
        json!({
            "roll_number": "u12345678",
            "name": "Alice Mokoena",
            "email": "alice@example.com",
            "program_id": catalog.program_id,
            "major_id": catalog.major_id,
            "section_id": catalog.section_id
        })
    }

    // --- POST /api/students/register ---

    #[tokio::test]
    #[serial]
    async fn register_student_creates_pending_record() {
        let (app, app_state) = make_test_app().await;
        let catalog = seed_catalog(app_state.db()).await;

        let req = json_request(
            "POST",
            "/api/students/register",
            None,
            registration_body(&catalog),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["roll_number"], "u12345678");
        assert_eq!(json["data"]["status"], "pending");
    }

    #[tokio::test]
    #[serial]
    async fn register_student_rejects_bad_roll_number() {
        let (app, app_state) = make_test_app().await;
        let catalog = seed_catalog(app_state.db()).await;

        let mut body = registration_body(&catalog);
        body["roll_number"] = json!("12345678");

        let response = app
            .oneshot(json_request("POST", "/api/students/register", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Roll number must be in format u12345678")
        );
    }

    #[tokio::test]
    #[serial]
    async fn register_student_rejects_unknown_program() {
        let (app, app_state) = make_test_app().await;
        let catalog = seed_catalog(app_state.db()).await;

        let mut body = registration_body(&catalog);
        body["program_id"] = json!(999);

        let response = app
            .oneshot(json_request("POST", "/api/students/register", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn register_student_rejects_major_from_other_program() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;

        let other_program = program::Model::create(db, "BCom Informatics").await.unwrap();
        let other_major = major::Model::create(db, other_program.id, "Accounting Systems")
            .await
            .unwrap();

        let mut body = registration_body(&catalog);
        body["major_id"] = json!(other_major.id);

        let response = app
            .oneshot(json_request("POST", "/api/students/register", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn register_student_conflicts_on_duplicate_roll() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;

        student::Model::create(
            db,
            "u12345678",
            "Existing Student",
            "existing@example.com",
            catalog.program_id,
            catalog.major_id,
            catalog.section_id,
        )
        .await
        .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/students/register",
                None,
                registration_body(&catalog),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    // --- Catalog lookups ---

    #[tokio::test]
    #[serial]
    async fn catalog_lookups_are_public() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;
        major::Model::create(db, catalog.program_id, "Cybersecurity")
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get_request("/api/students/programs", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["programs"].as_array().unwrap().len(), 1);

        let uri = format!("/api/students/majors?program_id={}", catalog.program_id);
        let response = app
            .clone()
            .oneshot(get_request(&uri, None))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["majors"].as_array().unwrap().len(), 2);

        let response = app
            .oneshot(get_request("/api/students/sections", None))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["sections"].as_array().unwrap().len(), 1);
    }

    // --- Roll number lookups ---

    #[tokio::test]
    #[serial]
    async fn roll_lookup_returns_student_or_404() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;

        student::Model::create(
            db,
            "u11112222",
            "Carol Dlamini",
            "carol@example.com",
            catalog.program_id,
            catalog.major_id,
            catalog.section_id,
        )
        .await
        .unwrap();

        let response = app
            .clone()
            .oneshot(get_request("/api/students/roll/u11112222", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["name"], "Carol Dlamini");

        let response = app
            .oneshot(get_request("/api/students/roll/u00000000", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn student_timetable_is_ordered_by_day_then_start() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;

        let teacher = UserModel::create(db, "teach", "teach@example.com", "teacherpass", Role::Instructor)
            .await
            .unwrap();
        let course = course::Model::create(db, "CS201", "Data Structures", 4)
            .await
            .unwrap();

        let student = student::Model::create(
            db,
            "u33334444",
            "Dan Pillay",
            "dan@example.com",
            catalog.program_id,
            catalog.major_id,
            catalog.section_id,
        )
        .await
        .unwrap();

        // Inserted out of order on purpose.
        timetable_entry::Model::create(db, course.id, student.section_id, teacher.id, 2, "10:00", "11:00")
            .await
            .unwrap();
        timetable_entry::Model::create(db, course.id, student.section_id, teacher.id, 0, "11:00", "12:00")
            .await
            .unwrap();
        timetable_entry::Model::create(db, course.id, student.section_id, teacher.id, 0, "08:00", "09:00")
            .await
            .unwrap();

        let response = app
            .oneshot(get_request("/api/students/roll/u33334444/timetable", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let timetable = json["data"]["timetable"].as_array().unwrap();
        assert_eq!(timetable.len(), 3);
        assert_eq!(timetable[0]["day_of_week"], 0);
        assert_eq!(timetable[0]["start_time"], "08:00");
        assert_eq!(timetable[1]["day_of_week"], 0);
        assert_eq!(timetable[1]["start_time"], "11:00");
        assert_eq!(timetable[2]["day_of_week"], 2);
        assert_eq!(timetable[0]["course_code"], "CS201");
    }

    // --- GET /api/students/list (admin) ---

    #[tokio::test]
    #[serial]
    async fn list_students_requires_auth() {
        let (app, _app_state) = make_test_app().await;

        let response = app
            .oneshot(get_request("/api/students/list", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn list_students_forbidden_for_instructors() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let instructor = UserModel::create(db, "teach", "teach@example.com", "teacherpass", Role::Instructor)
            .await
            .unwrap();
        let (token, _) = generate_jwt(instructor.id, instructor.role);

        let response = app
            .oneshot(get_request("/api/students/list", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn list_students_paginates_and_filters() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;
        let token = admin_token(db).await;

        for (roll, name, email) in [
            ("u10000001", "Thandi Khumalo", "thandi@example.com"),
            ("u10000002", "Sipho Zulu", "sipho@example.com"),
            ("u10000003", "Lerato Molefe", "lerato@example.com"),
        ] {
            student::Model::create(
                db,
                roll,
                name,
                email,
                catalog.program_id,
                catalog.major_id,
                catalog.section_id,
            )
            .await
            .unwrap();
        }

        let response = app
            .clone()
            .oneshot(get_request(
                "/api/students/list?page=1&per_page=2",
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["students"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["students"][0]["roll_number"], "u10000001");

        let response = app
            .clone()
            .oneshot(get_request("/api/students/list?query=sipho", Some(&token)))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        let students = json["data"]["students"].as_array().unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0]["name"], "Sipho Zulu");

        let response = app
            .oneshot(get_request(
                "/api/students/list?status=nonsense",
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // --- GET /api/students/section/{section_id} (admin) ---

    #[tokio::test]
    #[serial]
    async fn students_by_section_handles_unknown_section() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;
        let token = admin_token(db).await;

        student::Model::create(
            db,
            "u10000001",
            "Thandi Khumalo",
            "thandi@example.com",
            catalog.program_id,
            catalog.major_id,
            catalog.section_id,
        )
        .await
        .unwrap();

        let uri = format!("/api/students/section/{}", catalog.section_id);
        let response = app.clone().oneshot(get_request(&uri, Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["students"].as_array().unwrap().len(), 1);

        let response = app
            .oneshot(get_request("/api/students/section/999", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // --- PATCH /api/students/{student_id}/status (admin) ---

    #[tokio::test]
    #[serial]
    async fn status_update_approves_student() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;
        let token = admin_token(db).await;

        let student = student::Model::create(
            db,
            "u55556666",
            "Eve Botha",
            "eve@example.com",
            catalog.program_id,
            catalog.major_id,
            catalog.section_id,
        )
        .await
        .unwrap();

        let uri = format!("/api/students/{}/status", student.id);
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &uri,
                Some(&token),
                json!({ "status": "approved" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["status"], "approved");

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &uri,
                Some(&token),
                json!({ "status": "expelled" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/api/students/999/status",
                Some(&token),
                json!({ "status": "approved" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // --- GET /api/students/instructor-enrolled ---

    #[tokio::test]
    #[serial]
    async fn instructor_enrolled_forbidden_for_students() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let account = UserModel::create(db, "student1", "student1@example.com", "studentpass", Role::Student)
            .await
            .unwrap();
        let (token, _) = generate_jwt(account.id, account.role);

        let response = app
            .oneshot(get_request("/api/students/instructor-enrolled", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn instructor_enrolled_lists_rows_for_taught_courses() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let catalog = seed_catalog(db).await;

        let instructor = UserModel::create(db, "teach", "teach@example.com", "teacherpass", Role::Instructor)
            .await
            .unwrap();
        let (token, _) = generate_jwt(instructor.id, instructor.role.clone());

        let course = course::Model::create(db, "CS201", "Data Structures", 4)
            .await
            .unwrap();
        let request = course_request::Model::create(db, course.id).await.unwrap();
        request.mark_accepted(db, instructor.id).await.unwrap();

        let student = student::Model::create(
            db,
            "u77778888",
            "Frank Meyer",
            "frank@example.com",
            catalog.program_id,
            catalog.major_id,
            catalog.section_id,
        )
        .await
        .unwrap();
        enrollment::Model::create(db, student.id, course.id).await.unwrap();

        let response = app
            .oneshot(get_request("/api/students/instructor-enrolled", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let students = json["data"]["students"].as_array().unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0]["roll_number"], "u77778888");
        assert_eq!(students[0]["course_code"], "CS201");
        assert_eq!(students[0]["section_name"], "CS-A");
    }
}
