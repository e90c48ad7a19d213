//! PostgreSQL-backed session store.
//!
//! A single-table implementation of the `tower-sessions` store trait
//! over `tokio-postgres`. Rows carry the serialized session record and
//! an expiry timestamp; expired rows are treated as absent and reaped
//! when read.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio_postgres::NoTls;
use tower_sessions::session::{Id, Record};
use tower_sessions::{session_store, SessionStore};

#[derive(Clone)]
pub struct PostgresSessionStore {
    client: Arc<tokio_postgres::Client>,
}

impl std::fmt::Debug for PostgresSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSessionStore").finish()
    }
}

impl PostgresSessionStore {
    /// Connect to the session database.
    ///
    /// The connection task is spawned here and lives as long as the
    /// store; a dropped connection surfaces as backend errors on the
    /// next session operation.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("session database connection failed: {}", e);
            }
        });

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create the sessions table if it does not exist.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id TEXT PRIMARY KEY,
                    data BYTEA NOT NULL,
                    expiry_date BIGINT NOT NULL
                )",
                &[],
            )
            .await?;
        Ok(())
    }
}

fn backend_err(e: tokio_postgres::Error) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let id = record.id.to_string();
        let data = serde_json::to_vec(record)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;
        let expiry = record.expiry_date.unix_timestamp();

        self.client
            .execute(
                "INSERT INTO sessions (id, data, expiry_date) VALUES ($1, $2, $3)
                 ON CONFLICT (id) DO UPDATE
                 SET data = EXCLUDED.data, expiry_date = EXCLUDED.expiry_date",
                &[&id, &data, &expiry],
            )
            .await
            .map_err(backend_err)?;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let id = session_id.to_string();
        let row = self
            .client
            .query_opt(
                "SELECT data, expiry_date FROM sessions WHERE id = $1",
                &[&id],
            )
            .await
            .map_err(backend_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expiry: i64 = row.get(1);
        if expiry <= OffsetDateTime::now_utc().unix_timestamp() {
            self.delete(session_id).await?;
            return Ok(None);
        }

        let data: Vec<u8> = row.get(0);
        let record = serde_json::from_slice(&data)
            .map_err(|e| session_store::Error::Decode(e.to_string()))?;
        Ok(Some(record))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let id = session_id.to_string();
        self.client
            .execute("DELETE FROM sessions WHERE id = $1", &[&id])
            .await
            .map_err(backend_err)?;
        Ok(())
    }
}
