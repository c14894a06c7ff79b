//! The authoring pages: a create form and an edit form, driven against the
//! HTTP API through [`BlogClient`].
//!
//! Pages never talk to a terminal or a network directly. They report progress
//! through a [`Notifier`] and move between routes through a [`Navigator`], so
//! the `blog` binary and the tests can plug in their own.

use crate::api::schema::Post;

pub mod client;
pub mod console;
pub mod create;
pub mod edit;

pub use client::{ClientError, HttpBlogClient};
pub use create::{CreatePage, CreateState};
pub use edit::{EditPage, EditState};

pub const HOME: &str = "/";

pub trait BlogClient {
    fn list_posts(&self) -> Result<Vec<Post>, ClientError>;
    fn get_post(&self, id: i32) -> Result<Post, ClientError>;
    fn create_post(&self, form: &PostForm) -> Result<Post, ClientError>;
    fn update_post(&self, id: i32, form: &PostForm) -> Result<Post, ClientError>;
    fn delete_post(&self, id: i32) -> Result<Post, ClientError>;
}

/// Non-blocking progress messages (toasts).
pub trait Notifier {
    fn loading(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub trait Navigator {
    fn push(&self, path: &str);
    /// Re-fetch the data of the current route.
    fn refresh(&self);
}

/// The two form fields, as read when the form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub description: String,
}

impl PostForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<Post> for PostForm {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            description: post.description,
        }
    }
}

/// What every page is rendered with.
pub struct PageContext<'a, C, N, R> {
    pub client: &'a C,
    pub notifier: &'a N,
    pub navigator: &'a R,
}

impl<C, N, R> Clone for PageContext<'_, C, N, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, N, R> Copy for PageContext<'_, C, N, R> {}

impl<'a, C, N, R> PageContext<'a, C, N, R>
where
    C: BlogClient,
    N: Notifier,
    R: Navigator,
{
    pub fn new(client: &'a C, notifier: &'a N, navigator: &'a R) -> Self {
        Self {
            client,
            notifier,
            navigator,
        }
    }

    fn go_home(&self) {
        self.navigator.push(HOME);
        self.navigator.refresh();
    }
}
