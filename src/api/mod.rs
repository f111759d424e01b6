//! HTTP API module for the income eligibility engine.
//!
//! This module provides the REST endpoints wrapping the engine:
//! `POST /calculate` and `GET /health`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{REQUEST_ID_HEADER, create_router};
pub use request::{MAX_MONEY_AMOUNT, check_money_field, parse_calculation_request};
pub use response::{
    API_VERSION, ApiErrorResponse, CalculationData, ErrorResponse, LOGIC_VERSION,
    SuccessResponse, Versions, status_for,
};
pub use state::AppState;
