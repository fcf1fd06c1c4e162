//! Shared types (pagination, response envelopes).

mod pagination;
mod response;

pub use pagination::{PageRequest, Paginated, PaginationMeta, PaginationParams};
pub use response::{ApiResponse, Created};
