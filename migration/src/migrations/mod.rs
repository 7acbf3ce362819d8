pub mod m202506010001_create_users;
pub mod m202506010002_create_programs;
pub mod m202506010003_create_majors;
pub mod m202506010004_create_sections;
pub mod m202506010005_create_students;
pub mod m202506010006_create_courses;
pub mod m202506010007_create_course_requests;
pub mod m202506010008_create_timetable_entries;
pub mod m202506010009_create_enrollments;
