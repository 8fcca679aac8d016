use std::env;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classboard::{Announcement, ApiClient, CollectionStore, Config, Quiz, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "classboard=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(api_url = %config.api_url, "starting classboard");

    let client = ApiClient::new(&config)?;
    let session = SessionStore::new(client.clone());
    session.login().await.context("login failed")?;

    let announcements = CollectionStore::<Announcement>::new(client.clone());
    let quizzes = CollectionStore::<Quiz>::new(client);
    announcements
        .fetch()
        .await
        .context("failed to fetch announcements")?;
    quizzes.fetch().await.context("failed to fetch quizzes")?;

    for item in announcements.items().await {
        tracing::info!(id = %item.id, course = %item.course, title = %item.title, "announcement");
    }
    for quiz in quizzes.items().await {
        tracing::info!(id = %quiz.id, due = %quiz.due_date, title = %quiz.title, "quiz");
    }

    session.logout().await.context("logout failed")?;
    Ok(())
}
