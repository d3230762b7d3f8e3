//! Request/response types for calculation endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operands and operation for create and update.
///
/// `type` is kept as a string so unknown operations surface as a domain error
/// rather than a body rejection.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct CalculationRequest {
    pub a: f64,
    pub b: f64,
    #[serde(rename = "type")]
    #[schema(example = "Add")]
    pub operation: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalculationResponse {
    pub id: String,
    pub a: f64,
    pub b: f64,
    #[serde(rename = "type")]
    pub operation: String,
    pub result: f64,
    pub created_at: String,
    pub updated_at: String,
}
