use super::{BlogClient, ClientError, Navigator, Notifier, PageContext, PostForm};
use crate::api::schema::{Post, PostId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Loading,
    Loaded,
    Submitting,
    Deleting,
    Done,
}

pub struct EditPage<'a, C, N, R> {
    ctx: PageContext<'a, C, N, R>,
    id: PostId,
    form: PostForm,
    state: EditState,
}

impl<'a, C, N, R> EditPage<'a, C, N, R>
where
    C: BlogClient,
    N: Notifier,
    R: Navigator,
{
    /// Loads the post behind `id` into the form. A failed load is reported
    /// and leaves the form empty.
    pub fn open(ctx: PageContext<'a, C, N, R>, id: PostId) -> Self {
        let mut page = Self {
            ctx,
            id,
            form: PostForm::default(),
            state: EditState::Loading,
        };

        match ctx.client.get_post(id.get()) {
            Ok(post) => page.form = post.into(),
            Err(err) => {
                tracing::warn!(id = id.get(), error = %err, "failed to load post");
                ctx.notifier.error("Something went wrong while loading the post.");
            }
        }
        page.state = EditState::Loaded;
        page
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn submit(&mut self, form: PostForm) -> Result<Post, ClientError> {
        self.form = form;
        self.state = EditState::Submitting;
        self.ctx.notifier.loading("Editing...");

        let result = self.ctx.client.update_post(self.id.get(), &self.form);
        self.finish(result, "Edit complete!", "Could not save")
    }

    pub fn delete(&mut self) -> Result<Post, ClientError> {
        self.state = EditState::Deleting;
        self.ctx.notifier.loading("Deleting...");

        let result = self.ctx.client.delete_post(self.id.get());
        self.finish(result, "Post deleted!", "Could not delete")
    }

    fn finish(
        &mut self,
        result: Result<Post, ClientError>,
        done: &str,
        failed: &str,
    ) -> Result<Post, ClientError> {
        match result {
            Ok(post) => {
                self.ctx.notifier.success(done);
                self.state = EditState::Done;
                self.ctx.go_home();
                Ok(post)
            }
            Err(err) => {
                tracing::warn!(id = self.id.get(), error = %err, "edit page request failed");
                self.ctx.notifier.error(&format!("{failed}: {err}"));
                self.state = EditState::Loaded;
                Err(err)
            }
        }
    }
}
