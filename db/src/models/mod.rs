pub mod course;
pub mod course_request;
pub mod enrollment;
pub mod major;
pub mod program;
pub mod section;
pub mod student;
pub mod timetable_entry;
pub mod user;

pub use course::Entity as Course;
pub use course_request::Entity as CourseRequest;
pub use enrollment::Entity as Enrollment;
pub use major::Entity as Major;
pub use program::Entity as Program;
pub use section::Entity as Section;
pub use student::Entity as Student;
pub use timetable_entry::Entity as TimetableEntry;
pub use user::Entity as User;
