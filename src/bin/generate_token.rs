//! Issues a signed admin bearer token for manual testing of write routes.
//!
//! Usage: `generate_token [subject] [days]` (defaults: `portfolio-admin`, 7).

use chrono::Duration;
use portfolio_api::{auth::jwt::JwtService, settings::AppConfig};

const DEFAULT_SUBJECT: &str = "portfolio-admin";
const DEFAULT_VALIDITY_DAYS: i64 = 7;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::new()?;

    let mut args = std::env::args().skip(1);
    let subject = args.next().unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
    let days = match args.next() {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("invalid validity in days {:?}: {}", raw, e))?,
        None => DEFAULT_VALIDITY_DAYS,
    };

    let token = JwtService::new(&config)
        .issue_token_with_ttl(&subject, true, Duration::days(days))
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Generated admin token (valid {} days):", days);
    println!("{}", token);
    Ok(())
}
