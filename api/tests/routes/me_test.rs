#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, get_request, make_test_app};
    use api::auth::generate_jwt;
    use axum::http::StatusCode;
    use db::models::user::{Model as UserModel, Role};
    use db::models::{
        course, course_request, enrollment, major, program, section, student, timetable_entry,
    };
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn dashboard_requires_auth() {
        let (app, _app_state) = make_test_app().await;

        let response = app
            .oneshot(get_request("/api/me/dashboard", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn dashboard_forbidden_for_students() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let account = UserModel::create(db, "student1", "student1@example.com", "studentpass", Role::Student)
            .await
            .unwrap();
        let (token, _) = generate_jwt(account.id, account.role);

        let response = app
            .oneshot(get_request("/api/me/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn dashboard_aggregates_counts_and_enrolled_students() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let instructor = UserModel::create(db, "teach", "teach@example.com", "teacherpass", Role::Instructor)
            .await
            .unwrap();
        let (token, _) = generate_jwt(instructor.id, instructor.role.clone());

        let program = program::Model::create(db, "BSc Computer Science").await.unwrap();
        let major = major::Model::create(db, program.id, "Software Engineering")
            .await
            .unwrap();
        let section = section::Model::create(db, "CS-A", 40).await.unwrap();

        let taught = course::Model::create(db, "CS201", "Data Structures", 4)
            .await
            .unwrap();
        let other_a = course::Model::create(db, "CS202", "Algorithms", 4).await.unwrap();
        let other_b = course::Model::create(db, "CS203", "Compilers", 4).await.unwrap();

        // Two open requests plus one the instructor has accepted.
        course_request::Model::create(db, other_a.id).await.unwrap();
        course_request::Model::create(db, other_b.id).await.unwrap();
        let claimed = course_request::Model::create(db, taught.id).await.unwrap();
        claimed.mark_accepted(db, instructor.id).await.unwrap();

        // Three scheduled classes for this instructor.
        for (day, start, end) in [(0, "08:00", "09:00"), (1, "10:00", "11:00"), (3, "14:00", "15:00")] {
            timetable_entry::Model::create(db, taught.id, section.id, instructor.id, day, start, end)
                .await
                .unwrap();
        }

        // Two students enrolled in the taught course.
        for (roll, name, email) in [
            ("u10000001", "Thandi Khumalo", "thandi@example.com"),
            ("u10000002", "Sipho Zulu", "sipho@example.com"),
        ] {
            let record = student::Model::create(
                db,
                roll,
                name,
                email,
                program.id,
                major.id,
                section.id,
            )
            .await
            .unwrap();
            enrollment::Model::create(db, record.id, taught.id).await.unwrap();
        }

        let response = app
            .oneshot(get_request("/api/me/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["phase"], "ready");
        assert_eq!(json["data"]["stats"]["pending_requests"], 2);
        assert_eq!(json["data"]["stats"]["accepted_courses"], 1);
        assert_eq!(json["data"]["stats"]["total_classes"], 3);

        let students = json["data"]["enrolled_students"].as_array().unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0]["roll_number"], "u10000001");
        assert_eq!(students[0]["course_code"], "CS201");
        assert_eq!(students[1]["roll_number"], "u10000002");
    }

    #[tokio::test]
    #[serial]
    async fn dashboard_with_no_data_renders_empty_state() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let instructor = UserModel::create(db, "teach", "teach@example.com", "teacherpass", Role::Instructor)
            .await
            .unwrap();
        let (token, _) = generate_jwt(instructor.id, instructor.role);

        let response = app
            .oneshot(get_request("/api/me/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["phase"], "ready");
        assert_eq!(json["data"]["stats"]["pending_requests"], 0);
        assert_eq!(json["data"]["stats"]["accepted_courses"], 0);
        assert_eq!(json["data"]["stats"]["total_classes"], 0);
        assert_eq!(json["data"]["enrolled_students"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    #[serial]
    async fn dashboard_admits_admins() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let admin = UserModel::create(db, "admin", "admin@example.com", "adminpass1", Role::Admin)
            .await
            .unwrap();
        let (token, _) = generate_jwt(admin.id, admin.role);

        let response = app
            .oneshot(get_request("/api/me/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
