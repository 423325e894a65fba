//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::new::NewPost;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A static portfolio and blog renderer", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Post id (derived from the title by default)
        #[arg(long)]
        id: Option<String>,

        /// Category label, may be repeated
        #[arg(short = 'C', long = "category")]
        categories: Vec<String>,

        /// Short summary shown on cards
        #[arg(short, long)]
        excerpt: Option<String>,
    },

    /// List posts or categories
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts in this category key
        #[arg(long)]
        category: Option<String>,

        /// Only posts matching this search term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Render one post page by query string, e.g. "?id=a1"
    Render {
        query: String,
    },

    /// Search the post index interactively
    Browse,

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio_rs=debug,folio=debug,info"
    } else {
        "folio_rs=info,folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            id,
            categories,
            excerpt,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            let id = folio_rs::commands::new::create_post(
                &folio,
                &NewPost {
                    title: &title,
                    id: id.as_deref(),
                    categories,
                    excerpt: excerpt.as_deref(),
                },
            )?;
            println!("Added post {:?} to {}", id, folio.config.index_path);
        }

        Commands::List {
            r#type,
            category,
            search,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type, category.as_deref(), search.as_deref())
                .await?;
        }

        Commands::Render { query } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::render::run(&folio, &query).await?;
        }

        Commands::Browse => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::browse::run(&folio).await?;
        }

        Commands::Generate { watch } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            folio.generate().await?;
            println!("Generated successfully!");

            if watch {
                folio_rs::commands::generate::watch(&folio).await?;
            }
        }

        Commands::Server { port, ip, r#static } => {
            let folio = folio_rs::Folio::new(&base_dir)?;

            tracing::info!("Generating static files...");
            folio.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
