use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{BlogClient, PostForm};
use crate::api::schema::{Post, PostInput};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] attohttpc::Error),
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Deserialize)]
struct PostsBody {
    posts: Vec<Post>,
}

#[derive(Deserialize)]
struct CreatedBody {
    posts: Post,
}

#[derive(Deserialize)]
struct PostBody {
    post: Post,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    err: Option<String>,
}

/// [`BlogClient`] over the JSON API at `base_url` (e.g. `http://localhost:3000`).
#[derive(Debug, Clone)]
pub struct HttpBlogClient {
    base_url: String,
}

impl HttpBlogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/blog", self.base_url)
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/api/blog/{id}", self.base_url)
    }

    fn input(form: &PostForm) -> PostInput {
        PostInput {
            title: Some(form.title.clone()),
            description: Some(form.description.clone()),
        }
    }
}

fn decode<T: DeserializeOwned>(resp: attohttpc::Response) -> Result<T, ClientError> {
    if resp.is_success() {
        return Ok(resp.json()?);
    }

    let status = resp.status().as_u16();
    let message = match resp.json::<ErrorBody>() {
        Ok(ErrorBody { message, err: Some(err) }) => format!("{message} {err}"),
        Ok(ErrorBody { message, err: None }) => message,
        Err(_) => "unexpected response".to_string(),
    };
    Err(ClientError::Status { status, message })
}

impl BlogClient for HttpBlogClient {
    fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let resp = attohttpc::get(self.collection_url()).send()?;
        decode::<PostsBody>(resp).map(|body| body.posts)
    }

    fn get_post(&self, id: i32) -> Result<Post, ClientError> {
        let resp = attohttpc::get(self.item_url(id)).send()?;
        decode::<PostBody>(resp).map(|body| body.post)
    }

    fn create_post(&self, form: &PostForm) -> Result<Post, ClientError> {
        let resp = attohttpc::post(self.collection_url())
            .json(&Self::input(form))?
            .send()?;
        decode::<CreatedBody>(resp).map(|body| body.posts)
    }

    fn update_post(&self, id: i32, form: &PostForm) -> Result<Post, ClientError> {
        let resp = attohttpc::put(self.item_url(id))
            .json(&Self::input(form))?
            .send()?;
        decode::<PostBody>(resp).map(|body| body.post)
    }

    fn delete_post(&self, id: i32) -> Result<Post, ClientError> {
        let resp = attohttpc::delete(self.item_url(id)).send()?;
        decode::<PostBody>(resp).map(|body| body.post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = HttpBlogClient::new("http://localhost:3000/");
        assert_eq!(client.collection_url(), "http://localhost:3000/api/blog");
        assert_eq!(client.item_url(5), "http://localhost:3000/api/blog/5");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = HttpBlogClient::new(format!("http://127.0.0.1:{port}"));
        let err = client.list_posts().unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
