//! Query parameters for the uniqueness probes used by the frontend forms.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CheckEmailParams {
    #[validate(length(min = 1, message = "Email is required"))]
    #[param(example = "a@x.com")]
    pub email: String,
    /// Employee whose own email should not count as a match
    pub exclude_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CheckCccdParams {
    #[validate(length(min = 1, message = "CCCD is required"))]
    #[param(example = "079000000001")]
    pub cccd: String,
    pub exclude_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CheckTaxCodeParams {
    #[validate(length(min = 1, message = "Tax code is required"))]
    pub tax_code: String,
    pub exclude_id: Option<i32>,
}
