use super::{BlogClient, ClientError, Navigator, Notifier, PageContext, PostForm};
use crate::api::schema::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateState {
    Idle,
    Submitting,
    Done,
}

pub struct CreatePage<'a, C, N, R> {
    ctx: PageContext<'a, C, N, R>,
    state: CreateState,
}

impl<'a, C, N, R> CreatePage<'a, C, N, R>
where
    C: BlogClient,
    N: Notifier,
    R: Navigator,
{
    pub fn new(ctx: PageContext<'a, C, N, R>) -> Self {
        Self {
            ctx,
            state: CreateState::Idle,
        }
    }

    pub fn state(&self) -> CreateState {
        self.state
    }

    /// Publishes the form. Only a successful request leaves the page; on
    /// failure the page goes back to [`CreateState::Idle`].
    pub fn submit(&mut self, form: &PostForm) -> Result<Post, ClientError> {
        self.state = CreateState::Submitting;
        self.ctx.notifier.loading("Publishing...");

        match self.ctx.client.create_post(form) {
            Ok(post) => {
                self.ctx.notifier.success("Post published!");
                self.state = CreateState::Done;
                self.ctx.go_home();
                Ok(post)
            }
            Err(err) => {
                tracing::warn!(error = %err, "create request failed");
                self.ctx.notifier.error(&format!("Could not publish: {err}"));
                self.state = CreateState::Idle;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{FakeClient, RecordingNavigator, RecordingNotifier};

    #[test]
    fn test_submit_publishes_and_navigates_home() {
        let client = FakeClient::default();
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let mut page = CreatePage::new(PageContext::new(&client, &notifier, &navigator));
        assert_eq!(page.state(), CreateState::Idle);

        let post = page.submit(&PostForm::new("Hello", "World")).unwrap();

        assert_eq!(post.title, "Hello");
        assert_eq!(client.posts.borrow().len(), 1);
        assert_eq!(page.state(), CreateState::Done);
        assert_eq!(notifier.kinds(), vec!["loading", "success"]);
        assert_eq!(*navigator.events.borrow(), vec!["push /", "refresh"]);
    }

    #[test]
    fn test_failed_submit_stays_on_page() {
        let client = FakeClient::default();
        client.offline.set(true);
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let mut page = CreatePage::new(PageContext::new(&client, &notifier, &navigator));

        let err = page.submit(&PostForm::new("Hello", "World")).unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 500, .. }));
        assert_eq!(page.state(), CreateState::Idle);
        assert_eq!(notifier.kinds(), vec!["loading", "error"]);
        assert!(navigator.events.borrow().is_empty());
    }

    #[test]
    fn test_retry_after_failure() {
        let client = FakeClient::default();
        client.offline.set(true);
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let mut page = CreatePage::new(PageContext::new(&client, &notifier, &navigator));
        let form = PostForm::new("Hello", "World");

        assert!(page.submit(&form).is_err());
        client.offline.set(false);
        assert!(page.submit(&form).is_ok());
        assert_eq!(page.state(), CreateState::Done);
    }
}
