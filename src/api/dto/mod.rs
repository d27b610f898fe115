//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by concern:
//! - `employee` - Employee request/response DTOs
//! - `health` - Health probe responses
//! - `pagination` - List query parameters and the paged wrapper
//! - `probe` - Uniqueness probe query parameters
//! - `response` - The `ApiResponse` envelope

mod employee;
mod health;
mod pagination;
mod probe;
mod response;

pub use employee::{
    CreateEmployeeRequest, EmployeeListItem, EmployeeResponse, StatisticsResponse,
    UpdateEmployeeRequest,
};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{EmployeeListParams, PagedResponse};
pub use probe::{CheckCccdParams, CheckEmailParams, CheckTaxCodeParams};
pub use response::ApiResponse;
