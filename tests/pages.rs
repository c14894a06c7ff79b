//! Pages driven against a live server over HTTP.

use std::cell::RefCell;
use std::net::SocketAddr;
use std::sync::Arc;

use poem::listener::{Acceptor, Listener, TcpListener};
use poem_blog::api::schema::PostId;
use poem_blog::api::{self, AppState};
use poem_blog::pages::{
    BlogClient, CreatePage, EditPage, HttpBlogClient, Navigator, Notifier, PageContext, PostForm,
};
use poem_blog::store::{Store, StoreConfig};
use tempfile::TempDir;

#[derive(Default)]
struct Log(RefCell<Vec<String>>);

impl Notifier for Log {
    fn loading(&self, message: &str) {
        self.0.borrow_mut().push(format!("loading {message}"));
    }
    fn success(&self, message: &str) {
        self.0.borrow_mut().push(format!("success {message}"));
    }
    fn error(&self, message: &str) {
        self.0.borrow_mut().push(format!("error {message}"));
    }
}

impl Navigator for Log {
    fn push(&self, path: &str) {
        self.0.borrow_mut().push(format!("push {path}"));
    }
    fn refresh(&self) {
        self.0.borrow_mut().push("refresh".to_string());
    }
}

async fn serve() -> (TempDir, SocketAddr) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("blog.db").display());
    let store = Store::new(StoreConfig::new(url));
    store.migrate().await.unwrap();

    let acceptor = TcpListener::bind("127.0.0.1:0").into_acceptor().await.unwrap();
    let addr = *acceptor.local_addr()[0].0.as_socket_addr().unwrap();
    let app = api::app(Arc::new(AppState { store }));
    tokio::spawn(async move {
        let _ = poem::Server::new_with_acceptor(acceptor).run(app).await;
    });
    (dir, addr)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_then_edit_then_delete_through_pages() {
    let (_dir, addr) = serve().await;

    tokio::task::spawn_blocking(move || {
        let client = HttpBlogClient::new(format!("http://{addr}"));
        let notifier = Log::default();
        let navigator = Log::default();
        let ctx = PageContext::new(&client, &notifier, &navigator);

        let created = CreatePage::new(ctx)
            .submit(&PostForm::new("Hello", "World"))
            .unwrap();
        assert_eq!(*navigator.0.borrow(), vec!["push /", "refresh"]);

        let id: PostId = created.id.to_string().parse().unwrap();
        let mut page = EditPage::open(ctx, id);
        assert_eq!(page.form(), &PostForm::new("Hello", "World"));

        let updated = page.submit(PostForm::new("Hi", "World")).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(client.get_post(created.id).unwrap().title, "Hi");

        let mut page = EditPage::open(ctx, id);
        page.delete().unwrap();
        assert!(client.get_post(created.id).is_err());
        assert!(client.list_posts().unwrap().is_empty());

        let missing = EditPage::open(ctx, id);
        assert_eq!(missing.form(), &PostForm::default());
        assert!(notifier.0.borrow().last().unwrap().starts_with("error"));
    })
    .await
    .unwrap();
}
