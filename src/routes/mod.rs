pub mod admin;

pub mod faculty;

pub mod student;

pub use admin::configure_admin_routes;
pub use faculty::configure_faculty_routes;
pub use student::configure_student_routes;
