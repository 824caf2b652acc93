mod cli;

use anyhow::{Context, Result, bail};
use care_console::api::{Resource, RestClient};
use care_console::config::ConsoleConfig;
use care_console::demo::{self, DemoState};
use care_console::entities::{
    Application, BlogPost, Booking, CareSeeker, Caregiver, Faq, LocationService, ResourceCard,
    Testimonial,
};
use care_console::session::{PageTitle, RouteDecision, RouteGuard, SessionTokens, demo_token};
use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cli::app::App;
use cli::print::{PageRequest, fetch_page};
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "care-console",
    about = "Admin console for the care marketplace API: list, browse and a seeded demo server."
)]
struct Cli {
    /// API base URL including `/api/v1` (overrides CARE_CONSOLE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Bearer access token (overrides CARE_CONSOLE_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Refresh token (overrides CARE_CONSOLE_REFRESH_TOKEN)
    #[arg(long, global = true)]
    refresh_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one page of a resource
    List(ListArgs),
    /// Interactive terminal browser for a resource
    Browse(BrowseArgs),
    /// Run the seeded demo API
    Demo(DemoArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    resource: ResourceArg,

    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Filter as NAME=VALUE, repeatable
    #[arg(long = "filter", value_name = "NAME=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    #[arg(long)]
    sort: Option<String>,

    #[arg(long, default_value_t = false)]
    desc: bool,
}

#[derive(Debug, Args)]
struct BrowseArgs {
    resource: ResourceArg,
}

#[derive(Debug, Args)]
struct DemoArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceArg {
    CareSeekers,
    Caregivers,
    Bookings,
    Applications,
    Blogs,
    Testimonials,
    Faqs,
    LocationServices,
    ResourceCards,
}

impl ResourceArg {
    fn resource(self) -> Resource {
        match self {
            Self::CareSeekers => Resource::CareSeekers,
            Self::Caregivers => Resource::Caregivers,
            Self::Bookings => Resource::Bookings,
            Self::Applications => Resource::Applications,
            Self::Blogs => Resource::Blogs,
            Self::Testimonials => Resource::Testimonials,
            Self::Faqs => Resource::Faqs,
            Self::LocationServices => Resource::LocationServices,
            Self::ResourceCards => Resource::ResourceCards,
        }
    }
}

/// Run `$body` with `$entity` bound to the entity type of `$resource`.
macro_rules! with_entity {
    ($resource:expr, $entity:ident => $body:expr) => {
        match $resource {
            ResourceArg::CareSeekers => {
                type $entity = CareSeeker;
                $body
            }
            ResourceArg::Caregivers => {
                type $entity = Caregiver;
                $body
            }
            ResourceArg::Bookings => {
                type $entity = Booking;
                $body
            }
            ResourceArg::Applications => {
                type $entity = Application;
                $body
            }
            ResourceArg::Blogs => {
                type $entity = BlogPost;
                $body
            }
            ResourceArg::Testimonials => {
                type $entity = Testimonial;
                $body
            }
            ResourceArg::Faqs => {
                type $entity = Faq;
                $body
            }
            ResourceArg::LocationServices => {
                type $entity = LocationService;
                $body
            }
            ResourceArg::ResourceCards => {
                type $entity = ResourceCard;
                $body
            }
        }
    };
}

fn parse_filter(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal browser owns the screen; keep logs quiet unless asked.
    let default_filter = match cli.command {
        Command::Browse(_) => "off",
        _ => "care_console=info,tower_http=info",
    };
    init_tracing(default_filter);

    match cli.command {
        Command::Demo(ref args) => run_demo(args).await,
        Command::List(ref args) => {
            let client = connect(&cli, args.resource)?;
            let request = PageRequest {
                search: args.search.clone(),
                page: args.page,
                filters: args.filters.clone(),
                sort: args.sort.clone(),
                descending: args.desc,
            };
            let output = with_entity!(args.resource, T => fetch_page::<T>(client, &request).await)?;
            print!("{output}");
            Ok(())
        }
        Command::Browse(ref args) => {
            let client = connect(&cli, args.resource)?;
            let title = PageTitle::default();
            with_entity!(args.resource, T => App::<T>::new(client, title).run().await)
                .context("terminal browser failed")?;
            Ok(())
        }
    }
}

/// Build the API client and run the route-entry session check.
fn connect(cli: &Cli, resource: ResourceArg) -> Result<RestClient> {
    let mut config = ConsoleConfig::from_env().context("failed to load console configuration")?;
    if let Some(url) = &cli.base_url {
        config = ConsoleConfig {
            api_base_url: url.trim_end_matches('/').to_string(),
            ..config
        };
    }
    if let Some(token) = &cli.token {
        config = config.access_token(token);
    }
    if let Some(token) = &cli.refresh_token {
        config = config.refresh_token(token);
    }

    let route = format!("/{}", resource.resource().path());
    let tokens = SessionTokens::from_config(&config);
    if let RouteDecision::Redirect(target) = RouteGuard::new().check(&route, &tokens, Utc::now()) {
        bail!("session is missing or expired; sign in again ({target})");
    }

    RestClient::new(config).context("failed to build API client")
}

async fn run_demo(args: &DemoArgs) -> Result<()> {
    let state = DemoState::seeded().context("failed to seed demo data")?;
    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    let local = listener.local_addr()?;
    info!(address = %local, "demo api started");
    println!("CARE_CONSOLE_API_URL={}", demo::base_url(local));
    let refresh =
        demo_token(Utc::now() + Duration::days(1)).context("failed to mint demo token")?;
    println!("CARE_CONSOLE_REFRESH_TOKEN={refresh}");

    axum::serve(listener, demo::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
