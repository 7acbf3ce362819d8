mod auth_test;
mod health_test;
mod me_test;
mod students_test;
