use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use nsbbites_api::{AppState, RestApi, SiteConfig};
use nsbbites_core::{
    results_count_label, DiningGuide, FeatureVocabulary, FilterCriteria, FilterEvent, GridState,
    Surface, DEFAULT_FEATURED_COUNT,
};
use nsbbites_storage::{DataSource, Loader};

/// The New Smyrna Beach dining guide
#[derive(Parser, Debug)]
#[command(name = "nsbbites")]
#[command(about = "Restaurant cards, search and filters from a static JSON list", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dining guide over HTTP
    Serve {
        /// Restaurant document: a file path or an http(s) URL
        #[arg(short, long, default_value = "data/restaurants.json")]
        data: DataSource,

        /// HTTP port
        #[arg(long, default_value_t = 8080)]
        http_port: u16,

        /// Directory served under /images
        #[arg(long)]
        images_dir: Option<PathBuf>,

        /// Restaurants on the featured grid
        #[arg(long, default_value_t = DEFAULT_FEATURED_COUNT)]
        featured_count: usize,
    },

    /// Render the dining-guide page (or the featured grid) once
    Render {
        /// Restaurant document: a file path or an http(s) URL
        #[arg(short, long, default_value = "data/restaurants.json")]
        data: DataSource,

        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, default_value = "all")]
        cuisine: String,

        #[arg(long, default_value = "all")]
        price: String,

        #[arg(long, default_value = "all")]
        feature: String,

        /// Render the featured grid instead of the dining guide
        #[arg(long)]
        featured: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search and filter interactively from the terminal
    Browse {
        /// Restaurant document: a file path or an http(s) URL
        #[arg(short, long, default_value = "data/restaurants.json")]
        data: DataSource,

        /// Quiet window before search input takes effect
        #[arg(long, default_value_t = 300)]
        debounce_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Serve { data, http_port, images_dir, featured_count } => {
            serve(data, http_port, images_dir, featured_count).await
        }
        Command::Render { data, search, cuisine, price, feature, featured, output } => {
            let criteria = FilterCriteria::new()
                .with_search(search)
                .with_cuisine(cuisine)
                .with_price(price)
                .with_feature(feature);
            render(data, criteria, featured, output).await
        }
        Command::Browse { data, debounce_ms } => {
            browse(data, Duration::from_millis(debounce_ms)).await
        }
    }
}

async fn serve(
    data: DataSource,
    http_port: u16,
    images_dir: Option<PathBuf>,
    featured_count: usize,
) -> anyhow::Result<()> {
    info!("Starting NSB Bites v{}", env!("CARGO_PKG_VERSION"));
    info!("Restaurant data: {}", data);
    info!("HTTP API port: {}", http_port);

    let config = SiteConfig {
        featured_count,
        images_dir,
        ..SiteConfig::default()
    };
    let loader = Loader::from_source(data);
    let state = Arc::new(AppState::load(&loader, config).await);

    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("NSB Bites started successfully");
    info!("Dining guide: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

async fn render(
    data: DataSource,
    criteria: FilterCriteria,
    featured: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let loader = Loader::from_source(data);
    let state = AppState::load(&loader, SiteConfig::default()).await;

    let page = if featured {
        state.featured_page()
    } else {
        state.guide_page(criteria)
    };

    match output {
        Some(path) => {
            tokio::fs::write(&path, page).await?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", page),
    }
    Ok(())
}

/// Prints the result count and card names after each recomputation
struct TerminalSurface;

impl Surface for TerminalSurface {
    fn show_grid(&mut self, state: &GridState) {
        match state {
            GridState::Cards(cards) => {
                for card in cards {
                    println!("  {} ({}, {})", card.name, card.cuisine, card.price);
                }
            }
            other => {
                if let Some((heading, hint)) = other.message() {
                    println!("  {} - {}", heading, hint);
                }
            }
        }
    }

    fn show_count(&mut self, label: &str) {
        println!("{}", label);
    }
}

fn parse_command(line: &str) -> Option<FilterEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return Some(FilterEvent::SearchInput(line.to_string()));
    };

    let (name, value) = command.split_once(' ').unwrap_or((command, ""));
    let value = value.trim().to_string();
    match name {
        "cuisine" => Some(FilterEvent::CuisineSelected(value)),
        "price" => Some(FilterEvent::PriceSelected(value)),
        "feature" => Some(FilterEvent::FeatureSelected(value)),
        "clear" => Some(FilterEvent::Clear),
        _ => None,
    }
}

async fn browse(data: DataSource, debounce: Duration) -> anyhow::Result<()> {
    let loader = Loader::from_source(data);
    let mut guide = DiningGuide::new(Some(TerminalSurface), FeatureVocabulary::builtin(), debounce);
    if guide.needs_load() {
        guide.populate(loader.load().await);
    }

    println!("Type to search; :cuisine X, :price X, :feature X, :clear, :quit");

    let start = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let wake = guide
            .next_deadline()
            .map(|d| start + d)
            .unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim() == ":quit" {
                    break;
                }
                match parse_command(&line) {
                    Some(event) => guide.apply_event(event, start.elapsed()),
                    None => println!("Unknown command: {}", line),
                }
            }
            _ = tokio::time::sleep_until(wake), if guide.next_deadline().is_some() => {
                guide.tick(start.elapsed());
            }
        }
    }

    if let Some(deadline) = guide.next_deadline() {
        guide.tick(deadline);
    }
    info!("{}", results_count_label(guide.filtered().len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("grill"), Some(FilterEvent::SearchInput("grill".into())));
        assert_eq!(parse_command(""), Some(FilterEvent::SearchInput(String::new())));
        assert_eq!(parse_command(":cuisine Italian"), Some(FilterEvent::CuisineSelected("Italian".into())));
        assert_eq!(parse_command(":price $$"), Some(FilterEvent::PriceSelected("$$".into())));
        assert_eq!(parse_command(":feature"), Some(FilterEvent::FeatureSelected(String::new())));
        assert_eq!(parse_command(":clear"), Some(FilterEvent::Clear));
        assert_eq!(parse_command(":nope"), None);
    }
}
