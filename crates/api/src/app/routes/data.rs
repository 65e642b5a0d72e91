use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use oficina_store::{Collection, Document, Record};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_document))
        .route("/sync", post(sync_document))
        .route("/:collection", get(get_collection).post(replace_collection))
        .route("/:collection/add", post(append_item))
}

fn parse_collection(segment: &str) -> Result<Collection, axum::response::Response> {
    segment
        .parse::<Collection>()
        .map_err(|e| errors::domain_error_to_response(e.into()))
}

/// `GET /api/data` — the full document (empty default if never saved).
pub async fn get_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    match services.documents.load(ctx.user_id()) {
        Ok(document) => Json(document).into_response(),
        Err(e) => errors::domain_error_to_response(e.into()),
    }
}

/// `GET /api/data/:collection` — one named collection.
pub async fn get_collection(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(collection): Path<String>,
) -> axum::response::Response {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match services.documents.load(ctx.user_id()) {
        Ok(document) => Json(document.collection(collection).to_vec()).into_response(),
        Err(e) => errors::domain_error_to_response(e.into()),
    }
}

/// `POST /api/data/:collection` — replace the whole collection.
pub async fn replace_collection(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(collection): Path<String>,
    Json(items): Json<Vec<Record>>,
) -> axum::response::Response {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match services
        .documents
        .replace_collection(ctx.user_id(), collection, items)
    {
        Ok(count) => Json(serde_json::json!({
            "success": true,
            "message": format!("collection '{collection}' replaced"),
            "count": count,
        }))
        .into_response(),
        Err(e) => errors::domain_error_to_response(e.into()),
    }
}

/// `POST /api/data/:collection/add` — append one record.
pub async fn append_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(collection): Path<String>,
    Json(item): Json<Record>,
) -> axum::response::Response {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match services
        .documents
        .append_item(ctx.user_id(), collection, item)
    {
        Ok(count) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "success": true,
                "message": format!("record appended to '{collection}'"),
                "count": count,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e.into()),
    }
}

/// `POST /api/data/sync` — unconditional full overwrite with the
/// client-reconciled state. The document is re-keyed to the authenticated
/// user; `createdAt` survives from the previous document.
pub async fn sync_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::SyncRequest>,
) -> axum::response::Response {
    if body.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "nothing to sync",
        );
    }

    let existing = match services.documents.load(ctx.user_id()) {
        Ok(document) => document,
        Err(e) => return errors::domain_error_to_response(e.into()),
    };

    let record_count = body.orders.len() + body.sales.len() + body.catalog_items.len();
    let document = Document {
        user_id: ctx.user_id(),
        orders: body.orders,
        sales: body.sales,
        catalog_items: body.catalog_items,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    match services.documents.sync(ctx.user_id(), &document) {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "data synchronized; it is now available on any device",
            "count": record_count,
        }))
        .into_response(),
        Err(e) => errors::domain_error_to_response(e.into()),
    }
}
