//! Employee request handlers.

use crate::api::doc::EMPLOYEE_TAG;
use crate::api::dto::{
    ApiResponse, CheckCccdParams, CheckEmailParams, CheckTaxCodeParams, CreateEmployeeRequest,
    EmployeeListItem, EmployeeListParams, EmployeeResponse, PagedResponse, StatisticsResponse,
    UpdateEmployeeRequest,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::{PathParam, ValidatedJson, ValidatedQuery};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates employee routes.
///
/// Paths are absolute; the static probe paths take priority over `{id}`.
pub fn employee_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_employees, create_employee))
        .routes(routes!(get_employee, update_employee, delete_employee))
        .routes(routes!(check_email))
        .routes(routes!(check_cccd))
        .routes(routes!(check_tax_code))
        .routes(routes!(get_statistics))
}

fn employee_not_found(id: i32) -> AppError {
    AppError::NotFound {
        entity: "employee".to_string(),
        field: "id".to_string(),
        value: id.to_string(),
    }
}

/// GET /api/employees - Paged, filtered employee list
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    params(EmployeeListParams),
    responses(
        (status = 200, description = "One page of employees", body = ApiResponse<PagedResponse<EmployeeListItem>>),
        (status = 400, description = "Malformed query string")
    )
)]
async fn list_employees(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<EmployeeListParams>,
) -> AppResult<Json<ApiResponse<PagedResponse<EmployeeListItem>>>> {
    let page = state.services.employees.list(params.into_query()).await?;
    Ok(Json(ApiResponse::ok(
        PagedResponse::from_page(page),
        "Employees retrieved successfully",
    )))
}

/// GET /api/employees/{id} - Employee detail
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = ApiResponse<EmployeeResponse>),
        (status = 404, description = "Employee not found")
    )
)]
async fn get_employee(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<EmployeeResponse>>> {
    let detail = state
        .services
        .employees
        .get(id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;
    Ok(Json(ApiResponse::ok(
        EmployeeResponse::from(detail),
        "Employee retrieved successfully",
    )))
}

/// POST /api/employees - Create an employee with a zero point balance
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<EmployeeResponse>,
            headers(("Location" = String, description = "URL of the new employee"))),
        (status = 400, description = "Invalid data, duplicate value, or unknown role or department")
    )
)]
async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<impl IntoResponse> {
    let detail = state.services.employees.create(req.into_candidate()).await?;
    let location = format!("/api/employees/{}", detail.employee.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::ok(
            EmployeeResponse::from(detail),
            "Employee created successfully",
        )),
    ))
}

/// PUT /api/employees/{id} - Apply a partial update
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<EmployeeResponse>),
        (status = 400, description = "Invalid data or unknown department"),
        (status = 404, description = "Employee not found")
    )
)]
async fn update_employee(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    ValidatedJson(req): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<ApiResponse<EmployeeResponse>>> {
    let detail = state
        .services
        .employees
        .update(id, req.into_changes())
        .await?;
    Ok(Json(ApiResponse::ok(
        EmployeeResponse::from(detail),
        "Employee updated successfully",
    )))
}

/// DELETE /api/employees/{id} - Soft delete: the employee becomes inactive
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deactivated", body = ApiResponse<bool>),
        (status = 404, description = "Employee not found")
    )
)]
async fn delete_employee(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.services.employees.delete(id).await?;
    Ok(Json(ApiResponse::ok(true, "Employee deleted successfully")))
}

/// GET /api/employees/check-email - Whether an email is already taken
#[utoipa::path(
    get,
    path = "/api/employees/check-email",
    tag = EMPLOYEE_TAG,
    params(CheckEmailParams),
    responses(
        (status = 200, description = "`data` is true when the email is taken", body = ApiResponse<bool>)
    )
)]
async fn check_email(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CheckEmailParams>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let exists = state
        .services
        .employees
        .email_exists(&params.email, params.exclude_id)
        .await?;
    let message = if exists {
        "Email already exists"
    } else {
        "Email is available"
    };
    Ok(Json(ApiResponse::ok(exists, message)))
}

/// GET /api/employees/check-cccd - Whether a CCCD is already registered
#[utoipa::path(
    get,
    path = "/api/employees/check-cccd",
    tag = EMPLOYEE_TAG,
    params(CheckCccdParams),
    responses(
        (status = 200, description = "`data` is true when the CCCD is taken", body = ApiResponse<bool>)
    )
)]
async fn check_cccd(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CheckCccdParams>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let exists = state
        .services
        .employees
        .cccd_exists(&params.cccd, params.exclude_id)
        .await?;
    let message = if exists {
        "CCCD already exists"
    } else {
        "CCCD is available"
    };
    Ok(Json(ApiResponse::ok(exists, message)))
}

/// GET /api/employees/check-tax-code - Whether a tax code is already registered
#[utoipa::path(
    get,
    path = "/api/employees/check-tax-code",
    tag = EMPLOYEE_TAG,
    params(CheckTaxCodeParams),
    responses(
        (status = 200, description = "`data` is true when the tax code is taken", body = ApiResponse<bool>)
    )
)]
async fn check_tax_code(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CheckTaxCodeParams>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let exists = state
        .services
        .employees
        .tax_code_exists(&params.tax_code, params.exclude_id)
        .await?;
    let message = if exists {
        "Tax code already exists"
    } else {
        "Tax code is available"
    };
    Ok(Json(ApiResponse::ok(exists, message)))
}

/// GET /api/employees/statistics - Workforce summary
#[utoipa::path(
    get,
    path = "/api/employees/statistics",
    tag = EMPLOYEE_TAG,
    responses(
        (status = 200, description = "Headcount by status and department", body = ApiResponse<StatisticsResponse>)
    )
)]
async fn get_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StatisticsResponse>>> {
    let stats = state.services.employees.statistics().await?;
    Ok(Json(ApiResponse::ok(
        StatisticsResponse::from(stats),
        "Statistics retrieved successfully",
    )))
}
