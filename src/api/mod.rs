//! HTTP surface: `/api/blog` (collection) and `/api/blog/:id` (item), plus
//! the Swagger UI under `/docs`.

use std::sync::Arc;

use poem::http::StatusCode;
use poem::{Endpoint, EndpointExt, Route, middleware::Cors};
use poem_openapi::OpenApiService;

pub mod collection;
pub mod item;
pub mod schema;

use crate::store::{Store, StoreError};
use collection::CollectionApi;
use item::ItemApi;
use schema::{BAD_REQUEST, ERROR, ErrorEnvelope};

pub struct AppState {
    pub store: Store,
}

pub fn app(state: Arc<AppState>) -> impl Endpoint {
    let api = OpenApiService::new(
        (CollectionApi::new(state.clone()), ItemApi::new(state)),
        "Blog API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");
    let ui = api.swagger_ui();

    Route::new()
        .nest("/api", api)
        .nest("/docs", ui)
        .with(Cors::new())
}

fn internal_error(op: &str, err: &StoreError) -> ErrorEnvelope {
    tracing::error!(op, error = %err, "store operation failed");
    ErrorEnvelope::new(ERROR, err)
}

/// A request the JSON extractor refused, rendered in the usual envelope.
/// `true` when the refusal was about the content type rather than the body.
fn rejected(err: &poem::Error) -> (bool, ErrorEnvelope) {
    tracing::debug!(status = %err.status(), error = %err, "request rejected");
    (
        err.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorEnvelope::new(BAD_REQUEST, err),
    )
}
