use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Origin of the BPOOL REST API, e.g. "http://localhost:5000/api".
    pub api_base_url: String,
    /// HS256 secret used to sign and verify admin session tokens.
    pub session_secret: String,
    /// Session lifetime in hours. Sessions are never refreshed; an expired
    /// token reads back as "no session".
    pub session_ttl_hours: i64,
    /// Browser origin of the admin dashboard, allowed through CORS with
    /// credentials. Set via DASHBOARD_ORIGIN. Default: http://localhost:3000.
    pub dashboard_origin: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let session_secret = std::env::var("BPOOL_SESSION_SECRET")
        .unwrap_or_else(|_| "CHANGE_ME_SESSION_SECRET".into());

    if session_secret == "CHANGE_ME_SESSION_SECRET" {
        let env_mode = std::env::var("BPOOL_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "BPOOL_SESSION_SECRET is still the insecure placeholder. \
                 Set a proper random secret before running in production."
            );
        }
        eprintln!("⚠️  BPOOL_SESSION_SECRET is not set — using insecure placeholder. Set a random secret for production.");
    }

    Ok(Config {
        port: std::env::var("BPOOL_PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .unwrap_or(4000),
        api_base_url: std::env::var("BPOOL_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".into()),
        session_secret,
        session_ttl_hours: std::env::var("BPOOL_SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24),
        dashboard_origin: std::env::var("DASHBOARD_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".into()),
    })
}
