//! Terminal renditions of the toast area and the router.

use std::cell::RefCell;

use colored::Colorize;

use super::{BlogClient, HOME, Navigator, Notifier};
use crate::api::schema::Post;

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn loading(&self, message: &str) {
        eprintln!("{} {}", "…".bright_cyan(), message);
    }

    fn success(&self, message: &str) {
        eprintln!("{} {}", "✔".bright_green(), message.green());
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✘".bright_red(), message.red());
    }
}

/// Tracks the current route. Refreshing the home route prints every post.
pub struct ConsoleNavigator<'a, C> {
    client: &'a C,
    current: RefCell<String>,
}

impl<'a, C: BlogClient> ConsoleNavigator<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            current: RefCell::new(String::new()),
        }
    }

    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }
}

impl<C: BlogClient> Navigator for ConsoleNavigator<'_, C> {
    fn push(&self, path: &str) {
        *self.current.borrow_mut() = path.to_string();
    }

    fn refresh(&self) {
        if self.current.borrow().as_str() != HOME {
            return;
        }
        match self.client.list_posts() {
            Ok(posts) => print_posts(&posts),
            Err(err) => eprintln!("{} {}", "✘".bright_red(), format!("Could not load posts: {err}").red()),
        }
    }
}

pub fn print_posts(posts: &[Post]) {
    println!(
        "{} {}",
        "Posts:".bright_cyan().bold(),
        posts.len().to_string().bright_yellow()
    );
    for post in posts {
        println!(
            "  {} {}",
            format!("#{}", post.id).bright_magenta(),
            post.title.bright_white().bold()
        );
        if !post.description.is_empty() {
            println!("     {}", post.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::FakeClient;

    #[test]
    fn test_refresh_reloads_only_the_home_route() {
        let client = FakeClient::with_post(1, "Hello", "World");
        let navigator = ConsoleNavigator::new(&client);

        navigator.push("/blog/edit/1");
        navigator.refresh();
        assert_eq!(client.list_calls.get(), 0);

        navigator.push(HOME);
        assert_eq!(navigator.current(), "/");
        navigator.refresh();
        assert_eq!(client.list_calls.get(), 1);
    }
}
