use std::sync::Arc;

use crate::{
    config::Config,
    infrastructure::{
        database::Database,
        identity::{HeaderIdentityProvider, IdentityProvider},
        middleware::HasIdentityProvider,
    },
    services::{
        CoinLedger, EventCatalog, EventCategoryRegistry, JobCategoryRegistry, MembershipLedger,
        SearchFacade,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Arc<Database>,
    pub identity: Arc<dyn IdentityProvider>,
    pub job_categories: JobCategoryRegistry,
    pub event_categories: EventCategoryRegistry,
    pub events: EventCatalog,
    pub memberships: MembershipLedger,
    pub coins: CoinLedger,
    pub search: SearchFacade,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Initialize database
        let database = Database::connect(&config.database).await?;
        database.init().await?;

        Ok(Self::with_database(config, Arc::new(database)))
    }

    /// State over a fresh in-memory database
    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::new(Config::in_memory()).await
    }

    pub fn with_database(config: Config, db: Arc<Database>) -> Self {
        Self::with_identity(config, db, Arc::new(HeaderIdentityProvider))
    }

    pub fn with_identity(config: Config, db: Arc<Database>, identity: Arc<dyn IdentityProvider>) -> Self {
        let delete_policy = config.events.delete_policy;
        Self {
            job_categories: JobCategoryRegistry::new(db.clone()),
            event_categories: EventCategoryRegistry::new(db.clone()),
            events: EventCatalog::new(db.clone(), delete_policy),
            memberships: MembershipLedger::new(db.clone()),
            coins: CoinLedger::new(db.clone()),
            search: SearchFacade::new(db.clone()),
            identity,
            config,
            db,
        }
    }
}

impl HasIdentityProvider for AppState {
    fn identity_provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }
}
