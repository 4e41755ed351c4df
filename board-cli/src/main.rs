use anyhow::{Context, Result};
use board_client::{models::Post, BoardClient, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the board API
    #[arg(short, long, env = "BOARD_API_URL", default_value = DEFAULT_BASE_URL)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is up
    Health,

    /// Show one page of posts, newest first
    List {
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
        page: i64,

        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..))]
        page_size: i64,
    },

    Get {
        #[arg(short, long)]
        id: i64,
    },

    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,

        #[arg(short, long)]
        author: String,
    },

    /// Change title and/or content; omitted fields stay as they are
    Update {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    Delete {
        #[arg(short, long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    println!("🔌 Connecting to: {}", cli.server);
    let client = BoardClient::new(cli.server).context("Failed to create HTTP client")?;

    match &cli.command {
        Commands::Health => {
            let health = client.health().await.context("Health check failed")?;
            println!("✅ API status: {}", health.status);
        }

        Commands::List { page, page_size } => {
            println!("📋 Listing posts (page={}, page_size={})", page, page_size);

            let response = client
                .list_posts(*page, *page_size)
                .await
                .context("Failed to list posts")?;

            println!(
                "✅ Page {} of {} ({} posts total)",
                response.page,
                response.total_pages().max(1),
                response.total
            );
            println!();

            if response.posts.is_empty() {
                println!("   No posts found");
            } else {
                for post in &response.posts {
                    println!("   [{}] {} by {}", display_id(post), post.title, post.author);
                    println!("      Created: {}", post.created_at);
                    println!("      Content: {}", truncate(&post.content, 50));
                    println!();
                }
            }

            if response.has_next_page() {
                println!("   Next page: list --page {}", response.page + 1);
            }
        }

        Commands::Get { id } => {
            println!("🔍 Getting post #{}", id);

            match client.get_post(*id).await {
                Ok(post) => print_post("✅ Post retrieved:", &post),
                Err(e) if e.is_not_found() => {
                    println!("❌ Post #{} not found", id);
                    println!("   Tip: Use 'list' command to see available posts");
                    std::process::exit(1);
                }
                Err(e) => return Err(e).context("Failed to get post"),
            }
        }

        Commands::Create {
            title,
            content,
            author,
        } => {
            println!("📝 Creating new post...");

            let post = client
                .create_post(title, content, author)
                .await
                .context("Failed to create post")?;
            print_post("✅ Post created successfully!", &post);
        }

        Commands::Update { id, title, content } => {
            println!("✏️ Updating post #{}", id);

            match client
                .update_post(*id, title.clone(), content.clone())
                .await
            {
                Ok(post) => print_post("✅ Post updated successfully!", &post),
                Err(e) if e.is_not_found() => {
                    println!("❌ Post #{} not found", id);
                    std::process::exit(1);
                }
                Err(e) => return Err(e).context("Failed to update post"),
            }
        }

        Commands::Delete { id } => {
            println!("🗑️ Deleting post #{}", id);

            match client.delete_post(*id).await {
                Ok(()) => println!("✅ Post deleted successfully!"),
                Err(e) if e.is_not_found() => {
                    println!("❌ Post #{} not found", id);
                    std::process::exit(1);
                }
                Err(e) => return Err(e).context("Failed to delete post"),
            }
        }
    }

    Ok(())
}

fn print_post(header: &str, post: &Post) {
    println!("{}", header);
    println!("   ID: {}", display_id(post));
    println!("   Title: {}", post.title);
    println!("   Content: {}", post.content);
    println!("   Author: {}", post.author);
    println!("   Created: {}", post.created_at);
    println!("   Updated: {}", post.updated_at);
}

fn display_id(post: &Post) -> String {
    post.id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
