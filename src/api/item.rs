use std::sync::Arc;

use poem_openapi::{ApiResponse, OpenApi, param::Path, payload::Json};

use super::schema::{BAD_REQUEST, ErrorEnvelope, NOT_FOUND, PostEnvelope, PostId, PostInput};
use super::{AppState, internal_error, rejected};
use crate::store::{Post, PostDraft, StoreError};

#[derive(ApiResponse)]
#[oai(bad_request_handler = "bad_item_request")]
pub enum ItemResponse {
    #[oai(status = 200)]
    Ok(Json<PostEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorEnvelope>),
    #[oai(status = 404)]
    NotFound(Json<ErrorEnvelope>),
    #[oai(status = 415)]
    UnsupportedMediaType(Json<ErrorEnvelope>),
    #[oai(status = 500)]
    Error(Json<ErrorEnvelope>),
}

fn bad_item_request(err: poem::Error) -> ItemResponse {
    match rejected(&err) {
        (true, envelope) => ItemResponse::UnsupportedMediaType(Json(envelope)),
        (false, envelope) => ItemResponse::BadRequest(Json(envelope)),
    }
}

impl ItemResponse {
    fn from_result(op: &str, result: Result<Post, StoreError>) -> Self {
        match result {
            Ok(post) => Self::Ok(Json(PostEnvelope::success(post))),
            Err(err @ StoreError::NotFound(_)) => {
                tracing::debug!(op, error = %err, "post not found");
                Self::NotFound(Json(ErrorEnvelope::new(NOT_FOUND, err)))
            }
            Err(err) => Self::Error(Json(internal_error(op, &err))),
        }
    }
}

pub struct ItemApi {
    state: Arc<AppState>,
}

impl ItemApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

fn parse_id(raw: &str) -> Result<i32, ItemResponse> {
    raw.parse::<PostId>()
        .map(PostId::get)
        .map_err(|err| ItemResponse::BadRequest(Json(ErrorEnvelope::new(BAD_REQUEST, err))))
}

#[OpenApi]
impl ItemApi {
    /// Fetch one post
    #[oai(path = "/blog/:id", method = "get")]
    async fn get_post(&self, Path(id): Path<String>) -> ItemResponse {
        let id = match parse_id(&id) {
            Ok(id) => id,
            Err(resp) => return resp,
        };
        let result = self
            .state
            .store
            .with_session(move |s| Box::pin(s.find_by_id(id)))
            .await
            .and_then(|found| found.ok_or(StoreError::NotFound(id)));
        ItemResponse::from_result("get", result)
    }

    /// Replace a post's title and description
    #[oai(path = "/blog/:id", method = "put")]
    async fn update_post(&self, Path(id): Path<String>, Json(input): Json<PostInput>) -> ItemResponse {
        let id = match parse_id(&id) {
            Ok(id) => id,
            Err(resp) => return resp,
        };
        let draft = PostDraft::from(input);
        let result = self
            .state
            .store
            .with_session(move |s| Box::pin(s.update(id, draft)))
            .await;
        ItemResponse::from_result("update", result)
    }

    /// Delete a post
    #[oai(path = "/blog/:id", method = "delete")]
    async fn delete_post(&self, Path(id): Path<String>) -> ItemResponse {
        let id = match parse_id(&id) {
            Ok(id) => id,
            Err(resp) => return resp,
        };
        let result = self
            .state
            .store
            .with_session(move |s| Box::pin(s.delete(id)))
            .await;
        ItemResponse::from_result("delete", result)
    }
}
