pub mod auth;
pub mod dashboard;
pub mod faculties;
pub mod problems;
pub mod students;
pub mod submissions;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use faculties::FacultyService;
pub use problems::ProblemService;
pub use students::StudentService;
pub use submissions::SubmissionService;
