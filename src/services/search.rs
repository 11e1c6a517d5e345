// Search - case-insensitive substring lookup over names

use std::sync::Arc;
use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::database::Database;
use crate::models::{Event, EventCategory};
use crate::store::{event_categories, events};

#[derive(Clone)]
pub struct SearchFacade {
    db: Arc<Database>,
}

impl SearchFacade {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Events whose name contains `query`. A missing or blank query lists every event.
    pub async fn search_events(&self, query: Option<&str>) -> AppResult<Vec<Event>> {
        let mut conn = self.db.acquire().await?;
        match needle(query) {
            Some(needle) => {
                let found = events::search(&mut conn, needle).await?;
                debug!(query = needle, hits = found.len(), "Searched events");
                Ok(found)
            }
            None => events::list(&mut conn, None).await,
        }
    }

    pub async fn search_event_categories(&self, query: Option<&str>) -> AppResult<Vec<EventCategory>> {
        let mut conn = self.db.acquire().await?;
        match needle(query) {
            Some(needle) => {
                let found = event_categories::search(&mut conn, needle).await?;
                debug!(query = needle, hits = found.len(), "Searched event categories");
                Ok(found)
            }
            None => event_categories::list(&mut conn).await,
        }
    }
}

fn needle(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}
