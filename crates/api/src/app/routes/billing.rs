use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    response::IntoResponse,
};
use chrono::{Datelike, Utc};

use oficina_billing::monthly_summary;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::AuthContext;

/// `GET /api/billing/summary?month=&year=` — revenue balance for one month
/// of the authenticated user's document. Defaults to the current month.
pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<dto::SummaryQuery>,
) -> axum::response::Response {
    let today = Utc::now();
    let month = query.month.unwrap_or_else(|| today.month());
    let year = query.year.unwrap_or_else(|| today.year());

    if !(1..=12).contains(&month) {
        return errors::json_error(
            axum::http::StatusCode::BAD_REQUEST,
            "validation_error",
            "month must be between 1 and 12",
        );
    }

    match services.documents.load(ctx.user_id()) {
        Ok(document) => Json(monthly_summary(&document, month, year)).into_response(),
        Err(e) => errors::domain_error_to_response(e.into()),
    }
}
