//! HTTP handlers for the customer (opportunity) endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::error::{ApiError, AppJson};
use crate::models::opportunity::{
    CustomerListQuery, CustomersResponse, MessageResponse, NewCustomerRequest, NewCustomerResponse,
    SingleCustomerQuery, SingleCustomerResponse, WelcomeResponse,
};
use crate::services::entity_resolver::DealerKey;
use crate::services::{intake, query};
use crate::AppState;

pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the backend CRM application".to_string(),
        status: "Success".to_string(),
    })
}

/// POST /new_customer
pub async fn new_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewCustomerRequest>,
) -> Result<(StatusCode, Json<NewCustomerResponse>), ApiError> {
    info!("registering a new customer");

    let customer_details = intake::register(&state.db, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(NewCustomerResponse {
            message: "Customer created successfully".to_string(),
            customer_details,
        }),
    ))
}

/// GET /get-customers
///
/// Missing credential parameters are treated as a non-matching dealer and
/// answered 401, the same as wrong ones.
pub async fn get_customers(
    State(state): State<AppState>,
    Query(params): Query<CustomerListQuery>,
) -> Result<Response, ApiError> {
    let dealer_id = params.dealer_id.unwrap_or_default();
    let dealer_code = params.dealer_code.unwrap_or_default();
    let opportunity_owner = params.opportunity_owner.unwrap_or_default();

    let customers = query::list_by_dealer(
        &state.db,
        DealerKey {
            dealer_id: &dealer_id,
            dealer_code: &dealer_code,
            opportunity_owner: &opportunity_owner,
        },
        params.opportunity_name.as_deref(),
    )
    .await?;

    if customers.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "No customers found for the given dealer code".to_string(),
            }),
        )
            .into_response());
    }

    info!(count = customers.len(), "customers fetched");

    Ok(Json(CustomersResponse {
        message: "Customers fetched successfully".to_string(),
        customers,
    })
    .into_response())
}

/// GET /single-customer
pub async fn single_customer(
    State(state): State<AppState>,
    Query(params): Query<SingleCustomerQuery>,
) -> Result<Json<SingleCustomerResponse>, ApiError> {
    let dealer_id = params.dealer_id.unwrap_or_default();
    let dealer_code = params.dealer_code.unwrap_or_default();
    let opportunity_owner = params.opportunity_owner.unwrap_or_default();
    let opportunity_id = params.opportunity_id.unwrap_or_default();

    let customer = query::get_by_id(
        &state.db,
        DealerKey {
            dealer_id: &dealer_id,
            dealer_code: &dealer_code,
            opportunity_owner: &opportunity_owner,
        },
        &opportunity_id,
    )
    .await?;

    Ok(Json(SingleCustomerResponse {
        message: "Customer found".to_string(),
        customer,
    }))
}
