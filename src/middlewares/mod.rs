pub mod rate_limit;
pub mod session_gate;

pub use rate_limit::RateLimit;
pub use session_gate::{
    AdminRole, Authenticated, AuthorizationGate, FacultyRole, GateDenial, SessionRole,
    StudentRole,
};
