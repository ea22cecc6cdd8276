use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult, models::domain::Record};

/// Handle to the application database. Cheap to clone; the driver pools connections.
#[derive(Clone)]
pub struct Database {
    inner: mongodb::Database,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some("learnhub-server".to_string());
        options.max_pool_size = Some(10);
        options.min_pool_size = Some(2);
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let database = Self {
            inner: Client::with_options(options)?.database(&config.mongo_db_name),
        };
        database.health_check().await?;

        log::info!("Connected to MongoDB database '{}'", database.name());
        Ok(database)
    }

    /// Collection backing the entity type `T`.
    pub fn records<T: Record>(&self) -> Collection<T> {
        self.inner.collection(T::COLLECTION)
    }

    /// Untyped-name access for collections that are not entity tables (counters, join edges).
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.inner.collection(name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.inner.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }
}
