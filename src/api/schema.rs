use std::fmt;
use std::str::FromStr;

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::store::{self, PostDraft};

pub const SUCCESS: &str = "Success!";
pub const ERROR: &str = "Error!";
pub const NOT_FOUND: &str = "Not Found!";
pub const BAD_REQUEST: &str = "Bad Request!";

#[derive(Debug, Clone, PartialEq, Eq, Object, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub description: String,
}

impl From<store::Post> for Post {
    fn from(model: store::Post) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
        }
    }
}

/// Request body for create and update. Unknown fields (the edit form also
/// sends `id`) are ignored.
#[derive(Debug, Clone, Default, Object, Serialize, Deserialize)]
pub struct PostInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<PostInput> for PostDraft {
    fn from(input: PostInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
        }
    }
}

#[derive(Debug, Object)]
pub struct PostsEnvelope {
    pub message: String,
    pub posts: Vec<Post>,
}

/// The create response keeps the collection's `posts` key for its single post.
#[derive(Debug, Object)]
pub struct CreatedEnvelope {
    pub message: String,
    pub posts: Post,
}

#[derive(Debug, Object)]
pub struct PostEnvelope {
    pub message: String,
    pub post: Post,
}

#[derive(Debug, Object)]
pub struct ErrorEnvelope {
    pub message: String,
    pub err: String,
}

impl PostsEnvelope {
    pub fn success(posts: Vec<store::Post>) -> Self {
        Self {
            message: SUCCESS.to_string(),
            posts: posts.into_iter().map(Post::from).collect(),
        }
    }
}

impl CreatedEnvelope {
    pub fn success(post: store::Post) -> Self {
        Self {
            message: SUCCESS.to_string(),
            posts: post.into(),
        }
    }
}

impl PostEnvelope {
    pub fn success(post: store::Post) -> Self {
        Self {
            message: SUCCESS.to_string(),
            post: post.into(),
        }
    }
}

impl ErrorEnvelope {
    pub fn new(message: &str, err: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
            err: err.to_string(),
        }
    }
}

/// Positive integer id taken from the `{id}` route parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostId(i32);

impl PostId {
    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid post id {0:?}: expected a positive integer")]
pub struct InvalidPostId(String);

impl FromStr for PostId {
    type Err = InvalidPostId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(InvalidPostId(s.to_string())),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    #[case("2147483647", i32::MAX)]
    fn test_post_id_accepts_positive_integers(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(raw.parse::<PostId>().unwrap().get(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("12abc")]
    #[case("1.5")]
    #[case("2147483648")]
    fn test_post_id_rejects_everything_else(#[case] raw: &str) {
        let err = raw.parse::<PostId>().unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }
}
