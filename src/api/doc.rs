use utoipa::OpenApi;

pub const EMPLOYEE_TAG: &str = "Employees";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS",
        description = "Human resource management API: employee records, lookups and workforce statistics",
    ),
    components(
        schemas(
            crate::models::EmployeeStatus,
            crate::models::Gender,
        )
    ),
    tags(
        (name = EMPLOYEE_TAG, description = "Employee management endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
