use std::sync::Arc;

use poem_openapi::{ApiResponse, OpenApi, payload::Json};

use super::schema::{CreatedEnvelope, ErrorEnvelope, PostInput, PostsEnvelope};
use super::{AppState, internal_error, rejected};
use crate::store::PostDraft;

#[derive(ApiResponse)]
pub enum ListResponse {
    #[oai(status = 200)]
    Ok(Json<PostsEnvelope>),
    #[oai(status = 500)]
    Error(Json<ErrorEnvelope>),
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "bad_create_request")]
pub enum CreateResponse {
    #[oai(status = 201)]
    Created(Json<CreatedEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorEnvelope>),
    #[oai(status = 415)]
    UnsupportedMediaType(Json<ErrorEnvelope>),
    #[oai(status = 500)]
    Error(Json<ErrorEnvelope>),
}

fn bad_create_request(err: poem::Error) -> CreateResponse {
    match rejected(&err) {
        (true, envelope) => CreateResponse::UnsupportedMediaType(Json(envelope)),
        (false, envelope) => CreateResponse::BadRequest(Json(envelope)),
    }
}

pub struct CollectionApi {
    state: Arc<AppState>,
}

impl CollectionApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl CollectionApi {
    /// List every post
    #[oai(path = "/blog", method = "get")]
    async fn list_posts(&self) -> ListResponse {
        match self.state.store.with_session(|s| Box::pin(s.find_all())).await {
            Ok(posts) => ListResponse::Ok(Json(PostsEnvelope::success(posts))),
            Err(err) => ListResponse::Error(Json(internal_error("list", &err))),
        }
    }

    /// Create a post
    #[oai(path = "/blog", method = "post")]
    async fn create_post(&self, Json(input): Json<PostInput>) -> CreateResponse {
        let draft = PostDraft::from(input);
        match self.state.store.with_session(move |s| Box::pin(s.create(draft))).await {
            Ok(post) => CreateResponse::Created(Json(CreatedEnvelope::success(post))),
            Err(err) => CreateResponse::Error(Json(internal_error("create", &err))),
        }
    }
}
