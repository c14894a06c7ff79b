//! `blog`: the create and edit pages in a terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use poem_blog::api::schema::PostId;
use poem_blog::pages::console::{ConsoleNavigator, ConsoleNotifier};
use poem_blog::pages::{CreatePage, EditPage, HOME, HttpBlogClient, Navigator, PageContext, PostForm};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "blog", author, version, about)]
struct Cli {
    /// Base URL of the blog API.
    #[arg(long, env = "BLOG_API_URL", default_value = "http://localhost:3000")]
    api_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the home page (every post).
    List,
    /// Write a new post.
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit or delete a post.
    Edit { id: PostId },
}

fn prompt(label: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let client = HttpBlogClient::new(cli.api_url);
    let notifier = ConsoleNotifier;
    let navigator = ConsoleNavigator::new(&client);
    let ctx = PageContext::new(&client, &notifier, &navigator);

    match cli.command {
        Commands::List => {
            navigator.push(HOME);
            navigator.refresh();
        }
        Commands::Add { title, description } => {
            let title = match title {
                Some(title) => title,
                None => prompt("Title", "")?,
            };
            let description = match description {
                Some(description) => description,
                None => prompt("Description", "")?,
            };
            CreatePage::new(ctx).submit(&PostForm::new(title, description))?;
        }
        Commands::Edit { id } => {
            let mut page = EditPage::open(ctx, id);
            let form = PostForm::new(
                prompt("Title", &page.form().title)?,
                prompt("Description", &page.form().description)?,
            );
            let action = Select::new()
                .with_prompt("Action")
                .items(&["Update", "Delete"])
                .default(0)
                .interact()?;
            if action == 0 {
                page.submit(form)?;
            } else {
                page.delete()?;
            }
        }
    }
    Ok(())
}
