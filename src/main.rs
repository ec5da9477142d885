use std::sync::Arc;

use anyhow::{Result, bail};
use slugline::{
    config::AppConfig,
    domain::slug::{ConflictResolver, Normalizer, Resolution, SlugQuery},
    infrastructure::{
        database, random::ThreadRngSuffix, repositories::SqliteSlugRepository,
        transliteration::DeunicodeTransliterator,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let title = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if title.trim().is_empty() {
        bail!("usage: slugline <title>...");
    }

    let options = config.slug_options();
    let candidate = Normalizer::new(options, &DeunicodeTransliterator).normalize(&title);

    let Some(database_url) = config.database_url() else {
        println!("{candidate}");
        return Ok(());
    };
    if !options.require_uniqueness() || candidate.is_empty() {
        println!("{candidate}");
        return Ok(());
    }
    if !options.uniqueness_scope().is_empty() {
        tracing::warn!("scope values are unknown on the command line, checking the whole table");
    }

    let pool = Arc::new(database::init_pool(database_url, 4).await?);
    let repo = SqliteSlugRepository::new(pool, config.table(), config.id_column())?;
    let resolver = ConflictResolver::new(options, &repo, &ThreadRngSuffix);

    let resolution = resolver
        .resolve(&SlugQuery::new(options.slug_field(), candidate))
        .await?;
    println!("{}", printable_slug(resolution, config.table())?);

    Ok(())
}

/// The command line has no record, so only a free slug can be reported.
fn printable_slug(resolution: Resolution, table: &str) -> Result<String> {
    match resolution {
        Resolution::Accepted(slug) => Ok(slug),
        Resolution::Deferred(slug) => bail!(
            "slug {slug} is taken in {table} and append_id needs a record id, which the command line does not have"
        ),
        Resolution::Rejected(slug) => bail!("slug {slug} is already taken in {table}"),
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
