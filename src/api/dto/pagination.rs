//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{EmployeeFilter, EmployeeQuery, EmployeeStatus, Page};

/// Query parameters for the employee list.
///
/// Out-of-range paging values are not rejected; the service clamps them.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct EmployeeListParams {
    /// Page number (1-based)
    #[param(example = 1)]
    pub page_number: Option<i64>,

    /// Number of items per page (1 to 100, default 10)
    #[param(example = 10)]
    pub page_size: Option<i64>,

    /// Case-insensitive match on full name, email, phone or CCCD
    pub search_term: Option<String>,

    pub status: Option<EmployeeStatus>,

    pub department_id: Option<i32>,

    pub role_id: Option<i32>,
}

impl EmployeeListParams {
    /// Converts the query string into the service's listing request.
    pub fn into_query(self) -> EmployeeQuery {
        EmployeeQuery {
            page_number: self.page_number,
            page_size: self.page_size,
            filter: EmployeeFilter {
                search: self.search_term,
                status: self.status,
                department_id: self.department_id,
                role_id: self.role_id,
            },
        }
    }
}

/// Generic paged response wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    /// The items for this page
    pub items: Vec<T>,

    /// Total number of matching items across all pages
    #[schema(example = 42)]
    pub total_count: i64,

    /// Current page number (1-based)
    #[schema(example = 1)]
    pub page_number: i64,

    /// Number of items per page
    #[schema(example = 10)]
    pub page_size: i64,

    #[schema(example = 5)]
    pub total_pages: i64,

    #[schema(example = false)]
    pub has_previous_page: bool,

    #[schema(example = true)]
    pub has_next_page: bool,
}

impl<T> PagedResponse<T> {
    /// Builds the response from a service page, converting each item.
    pub fn from_page<U>(page: Page<U>) -> Self
    where
        T: From<U>,
    {
        let total_pages = page.total_pages();
        let has_previous_page = page.has_previous_page();
        let has_next_page = page.has_next_page();
        let page = page.map(T::from);

        Self {
            items: page.items,
            total_count: page.total_count,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages,
            has_previous_page,
            has_next_page,
        }
    }
}
