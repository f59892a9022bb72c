#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Integration tests need a throwaway Postgres database. They skip
/// themselves when TEST_DATABASE_URL is not set so a plain `cargo test`
/// still passes on machines without one.
pub fn test_db_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

/// Pool against the test database with migrations applied; None when no
/// test database is configured.
pub async fn test_pool() -> Option<PgPool> {
    let url = test_db_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to TEST_DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations on test database");
    Some(pool)
}

/// Unique suffix so repeated runs against the same database never collide
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.org", prefix, Uuid::new_v4().simple())
}

// ----- spawned-server harness for HTTP-level tests -----

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/scouthub-api");
        cmd.env("PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/healthz", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready on any health response, degraded included
                if resp.status() == reqwest::StatusCode::OK
                    || resp.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Shared server instance for HTTP tests; None without a test database
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let Some(url) = test_db_url() else {
        return Ok(None);
    };
    let server =
        SERVER.get_or_init(|| TestServer::spawn(&url).expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}
