use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use noticias::article::ArticleDraft;
use noticias::newsroom::{InvalidDraft, Newsroom, NotFound};
use noticias::output;
use noticias::scoring::RelevanceEngine;
use noticias::store::{query, ArticleStore, JsonFileStore, Stats};
use noticias::trends::TrendCache;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NOT_FOUND: i32 = 1;
const EXIT_VALIDATION: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_STORAGE: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List articles, newest first (default if no subcommand)
    List {
        /// Only articles whose title, summary or body contains this text
        #[arg(short, long)]
        query: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Include unpublished drafts
        #[arg(long)]
        all: bool,

        /// Sort by relevance score instead of date
        #[arg(long)]
        ranked: bool,

        /// Tab-separated output for scripting (not paginated)
        #[arg(long)]
        tsv: bool,
    },
    /// Show one article with its score breakdown and related articles
    Show { id: u64 },
    /// Front page: featured headlines and the latest articles
    Home,
    /// Publish a new article
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        summary: String,

        #[arg(long, required_unless_present = "body_file", conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Change an article's content and rescore it
    Edit {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        summary: Option<String>,

        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Delete an article
    Delete { id: u64 },
    /// Publish or unpublish an article
    Toggle { id: u64 },
    /// Recompute one article's relevance
    Rescore { id: u64 },
    /// Recompute relevance for every published article
    Refresh,
    /// Article counts
    Stats,
    /// Show the current trending terms
    Trends,
}

#[derive(Parser, Debug)]
#[command(name = "noticias")]
#[command(about = "News article relevance scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/noticias/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the article store (overrides the config file)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    noticias::logging::init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List {
        query: None,
        page: 1,
        all: false,
        ranked: false,
        tsv: false,
    });

    // Load config
    let config = match noticias::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = noticias::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let engine = match config
        .trends
        .clone()
        .unwrap_or_default()
        .build_source()
        .and_then(|source| RelevanceEngine::new(&effective_scoring, TrendCache::new(source)))
    {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let store_path = cli
        .store
        .or(config.store)
        .unwrap_or_else(noticias::store::get_store_path);
    tracing::debug!(path = %store_path.display(), "Opening article store");
    let store = match JsonFileStore::open(&store_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Storage error: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    };

    let mut newsroom = Newsroom::new(store, engine);
    if let Err(e) = run(&mut newsroom, command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }

    std::process::exit(EXIT_SUCCESS);
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<NotFound>().is_some() {
        EXIT_NOT_FOUND
    } else if error.downcast_ref::<InvalidDraft>().is_some() {
        EXIT_VALIDATION
    } else {
        EXIT_STORAGE
    }
}

fn run(newsroom: &mut Newsroom<JsonFileStore>, command: Commands) -> Result<()> {
    let now = Utc::now();
    let use_colors = output::should_use_colors();

    match command {
        Commands::List {
            query: search,
            page,
            all,
            ranked,
            tsv,
        } => {
            let mut articles = newsroom.store().all()?;
            if !all {
                articles = query::published_only(articles);
            }
            if let Some(ref search) = search {
                articles = query::search(articles, search);
            }
            if ranked {
                query::sort_ranked(&mut articles);
            } else {
                query::sort_newest_first(&mut articles);
            }

            if tsv {
                if !articles.is_empty() {
                    println!("{}", output::format_tsv(&articles));
                }
                return Ok(());
            }

            let pages = query::page_count(articles.len(), query::PAGE_SIZE);
            let shown = query::paginate(&articles, page, query::PAGE_SIZE);
            println!("{}", output::format_article_table(shown, now, use_colors));
            if pages > 1 {
                eprintln!("Page {} of {}", page, pages);
            }
        }
        Commands::Show { id } => {
            let article = newsroom.get(id)?;
            let result = newsroom.engine().compute_relevance_at(&article, now);
            println!("{}", output::format_article_detail(&article, now, use_colors));
            println!();
            println!(
                "{}",
                output::format_recomputed_breakdown(article.relevance_score, &result, use_colors)
            );

            let related = query::related(newsroom.store().all()?, id, query::RELATED_COUNT);
            if !related.is_empty() {
                println!();
                println!("Related:");
                println!("{}", output::format_article_table(&related, now, use_colors));
            }
        }
        Commands::Home => {
            let articles = newsroom.store().all()?;
            let headlines = query::featured_headlines(articles.clone(), query::HEADLINE_COUNT);
            let latest = query::recent(articles, query::RECENT_COUNT);

            println!("Featured:");
            println!("{}", output::format_article_table(&headlines, now, use_colors));
            println!();
            println!("Latest:");
            println!("{}", output::format_article_table(&latest, now, use_colors));
        }
        Commands::Add {
            title,
            summary,
            body,
            body_file,
        } => {
            let body = read_body(body, body_file)?.unwrap_or_default();
            let (article, result) = newsroom.create(
                ArticleDraft {
                    title,
                    summary,
                    body,
                },
                now,
            )?;
            println!("Created article #{}", article.id);
            println!("{}", output::format_breakdown(&result, use_colors));
        }
        Commands::Edit {
            id,
            title,
            summary,
            body,
            body_file,
        } => {
            let mut draft = newsroom.get(id)?.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(summary) = summary {
                draft.summary = summary;
            }
            if let Some(body) = read_body(body, body_file)? {
                draft.body = body;
            }
            let (article, result) = newsroom.update(id, draft, now)?;
            println!("Updated article #{}", article.id);
            println!("{}", output::format_breakdown(&result, use_colors));
        }
        Commands::Delete { id } => {
            let article = newsroom.delete(id)?;
            println!("Deleted article #{}: {}", article.id, article.title);
        }
        Commands::Toggle { id } => {
            let article = newsroom.toggle_published(id)?;
            let state = if article.published { "published" } else { "unpublished" };
            println!("Article #{} is now {}", article.id, state);
        }
        Commands::Rescore { id } => {
            let (article, result) = newsroom.rescore(id, now)?;
            println!("Rescored article #{}", article.id);
            println!("{}", output::format_breakdown(&result, use_colors));
        }
        Commands::Refresh => {
            let count = newsroom.refresh_all(now)?;
            println!("Refreshed {} published article(s)", count);
        }
        Commands::Stats => {
            let articles = newsroom.store().all()?;
            println!("{}", output::format_stats(&Stats::from_articles(&articles)));
        }
        Commands::Trends => {
            let trends = newsroom.engine().trends();
            let terms = trends
                .terms_at(now)
                .with_context(|| format!("Trend source '{}' unavailable", trends.source_name()))?;
            for term in terms {
                println!("{}", term);
            }
        }
    }

    Ok(())
}

/// Resolve `--body` / `--body-file`. Unreadable files are reported as
/// invalid article content.
fn read_body(body: Option<String>, body_file: Option<PathBuf>) -> Result<Option<String>> {
    match (body, body_file) {
        (Some(body), _) => Ok(Some(body)),
        (None, Some(path)) => match std::fs::read_to_string(&path) {
            Ok(body) => Ok(Some(body)),
            Err(e) => Err(InvalidDraft(vec![format!(
                "body-file: cannot read {}: {}",
                path.display(),
                e
            )])
            .into()),
        },
        (None, None) => Ok(None),
    }
}
