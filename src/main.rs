use clap::Parser;
use tracing_subscriber::EnvFilter;

use portal_auth::config::AuthConfig;
use portal_auth::routes;
use portal_auth::state::AppState;

#[derive(Parser)]
#[command(name = "portal-auth")]
#[command(about = "Credential sign-in and registration endpoints backed by ERPNext")]
#[command(version)]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 3000, help = "Port to listen on")]
    port: u16,

    #[arg(long, env = "AUTH_BIND", default_value = "0.0.0.0", help = "Address to bind")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ERPNEXT_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Resolved once; handlers only see it through the router state
    let config = AuthConfig::from_env()?;
    tracing::info!("Starting portal-auth in {:?} mode", config.environment);
    if config.uses_default_secret() {
        tracing::warn!("SESSION_SECRET is not set; sessions are signed with the default secret");
    }

    let state = AppState::from_config(config)?;
    let app = routes::app(state);

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("portal-auth listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
