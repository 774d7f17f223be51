pub mod form;
pub mod pagination;
pub mod response;

pub use form::FormNumber;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
