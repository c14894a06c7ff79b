//! Store client for posts.
//!
//! A [`Store`] only remembers how to connect. Every unit of work opens its own
//! [`StoreSession`] and closes it again, see [`Store::with_session`].

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::MigratorTrait;

use crate::entities::post::{self, Entity as PostEntity};
use crate::migration::Migrator;

pub type Post = post::Model;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Connection(#[source] DbErr),
    #[error("post {0} not found")]
    NotFound(i32),
    #[error("query failed: {0}")]
    Query(#[from] DbErr),
    #[error("migration failed: {0}")]
    Migration(#[source] DbErr),
}

/// Field values as received. `None` leaves the column unset in the active model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub connect_timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            connect_timeout: Duration::from_secs(8),
        }
    }
}

pub type SessionFuture<'s, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 's>>;

#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub async fn connect(&self) -> Result<StoreSession, StoreError> {
        let mut opt = ConnectOptions::new(self.config.database_url.clone());
        opt.max_connections(1)
            .min_connections(1)
            .connect_timeout(self.config.connect_timeout)
            .acquire_timeout(self.config.connect_timeout)
            .sqlx_logging(false);

        let db = Database::connect(opt).await.map_err(StoreError::Connection)?;
        tracing::debug!("store session opened");
        Ok(StoreSession { db })
    }

    /// Runs one operation inside a fresh session. The session is disconnected
    /// before this returns, whether `op` succeeded or not.
    pub async fn with_session<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: for<'s> FnOnce(&'s StoreSession) -> SessionFuture<'s, T>,
    {
        let session = self.connect().await?;
        let result = op(&session).await;
        session.disconnect().await;
        result
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        self.with_session(|session| {
            Box::pin(async move {
                Migrator::up(&session.db, None).await.map_err(StoreError::Migration)
            })
        })
        .await
    }
}

/// One open connection. Dropping it without [`StoreSession::disconnect`] still
/// releases the connection, only without waiting for the close to finish.
#[derive(Debug)]
pub struct StoreSession {
    db: DatabaseConnection,
}

impl StoreSession {
    pub async fn disconnect(self) {
        match self.db.close().await {
            Ok(()) => tracing::debug!("store session closed"),
            Err(err) => tracing::warn!(error = %err, "failed to close store session"),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(PostEntity::find().all(&self.db).await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Post>, StoreError> {
        Ok(PostEntity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let am = post::ActiveModel {
            id: NotSet,
            title: draft.title.map_or(NotSet, Set),
            description: draft.description.map_or(NotSet, Set),
        };
        let created = am.insert(&self.db).await?;
        tracing::info!(id = created.id, "post created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, StoreError> {
        let found = self.find_by_id(id).await?.ok_or(StoreError::NotFound(id))?;
        if draft.is_empty() {
            return Ok(found);
        }

        let am = post::ActiveModel {
            id: Unchanged(found.id),
            title: draft.title.map_or(NotSet, Set),
            description: draft.description.map_or(NotSet, Set),
        };
        let updated = am.update(&self.db).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => StoreError::NotFound(id),
            other => StoreError::Query(other),
        })?;
        tracing::info!(id, "post updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<Post, StoreError> {
        let found = self.find_by_id(id).await?.ok_or(StoreError::NotFound(id))?;
        let res = PostEntity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(id, "post deleted");
        Ok(found)
    }
}
