// JobCategory Registry - get-or-create by name plus plain CRUD

use sqlx::SqliteConnection;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::forms::JobCategoryForm;
use crate::infrastructure::database::{commit, Database};
use crate::models::JobCategory;
use crate::store::job_categories;

#[derive(Clone)]
pub struct JobCategoryRegistry {
    db: Arc<Database>,
}

/// Resolve a free-text job category inside the caller's unit of work.
///
/// Blank input resolves to `None`; anything else is trimmed and matched
/// exactly (case-sensitive), creating the category when it is missing.
pub async fn resolve_in(
    conn: &mut SqliteConnection,
    raw_name: Option<&str>,
) -> AppResult<Option<JobCategory>> {
    let name = match raw_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => return Ok(None),
    };
    let category = job_categories::upsert_by_name(conn, name).await?;
    debug!(job_category_id = category.id, name, "Resolved job category");
    Ok(Some(category))
}

impl JobCategoryRegistry {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn resolve_or_create(&self, raw_name: &str) -> AppResult<Option<JobCategory>> {
        let mut tx = self.db.begin().await?;
        let category = resolve_in(&mut tx, Some(raw_name)).await?;
        commit(tx).await?;
        Ok(category)
    }

    pub async fn list(&self) -> AppResult<Vec<JobCategory>> {
        let mut conn = self.db.acquire().await?;
        job_categories::list(&mut conn).await
    }

    pub async fn get(&self, id: i64) -> AppResult<JobCategory> {
        let mut conn = self.db.acquire().await?;
        job_categories::get(&mut conn, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Explicit create; an existing name is a conflict rather than a lookup.
    pub async fn create(&self, form: &JobCategoryForm, acting_user: UserId) -> AppResult<JobCategory> {
        let name = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        let category = job_categories::insert(&mut conn, &name)
            .await
            .map_err(|e| duplicate_name(e, &name))?;
        info!(job_category_id = category.id, name = %category.name, user = %acting_user, "Created job category");
        Ok(category)
    }

    pub async fn rename(
        &self,
        id: i64,
        form: &JobCategoryForm,
        acting_user: UserId,
    ) -> AppResult<JobCategory> {
        let name = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        let category = job_categories::rename(&mut conn, id, &name)
            .await
            .map_err(|e| duplicate_name(e, &name))?
            .ok_or_else(|| not_found(id))?;
        info!(job_category_id = id, name = %category.name, user = %acting_user, "Renamed job category");
        Ok(category)
    }

    /// Events keep existing and lose their job category.
    pub async fn delete(&self, id: i64, acting_user: UserId) -> AppResult<()> {
        let mut conn = self.db.acquire().await?;
        if !job_categories::delete(&mut conn, id).await? {
            return Err(not_found(id));
        }
        info!(job_category_id = id, user = %acting_user, "Deleted job category");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Job category with id {} not found", id))
}

fn duplicate_name(err: AppError, name: &str) -> AppError {
    match err {
        AppError::Conflict(_) => {
            AppError::Conflict(format!("Job category with name '{}' already exists", name))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{acting_user, database, file_database};

    fn form(name: &str) -> JobCategoryForm {
        JobCategoryForm {
            name: Some(name.to_string()),
        }
    }

    #[tokio::test]
    async fn test_resolve_or_create_is_idempotent() {
        let registry = JobCategoryRegistry::new(database().await);

        let first = registry.resolve_or_create("Engineer").await.unwrap().unwrap();
        let second = registry.resolve_or_create("  Engineer  ").await.unwrap().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Engineer");
        assert_eq!(registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_names_resolve_to_none() {
        let registry = JobCategoryRegistry::new(database().await);

        assert!(registry.resolve_or_create("").await.unwrap().is_none());
        assert!(registry.resolve_or_create("   ").await.unwrap().is_none());
        assert!(registry.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let registry = JobCategoryRegistry::new(database().await);

        let lower = registry.resolve_or_create("engineer").await.unwrap().unwrap();
        let upper = registry.resolve_or_create("Engineer").await.unwrap().unwrap();

        assert_ne!(lower.id, upper.id);
    }

    #[tokio::test]
    async fn test_concurrent_resolution_converges() {
        let (_dir, db) = file_database().await;
        let registry = JobCategoryRegistry::new(db);

        let (a, b) = tokio::join!(
            registry.resolve_or_create("Designer"),
            registry.resolve_or_create("Designer")
        );

        assert_eq!(a.unwrap().unwrap().id, b.unwrap().unwrap().id);
        assert_eq!(registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_explicit_create_of_existing_name_conflicts() {
        let registry = JobCategoryRegistry::new(database().await);
        registry.create(&form("Engineer"), acting_user()).await.unwrap();

        let err = registry.create(&form("Engineer"), acting_user()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_rename_and_delete() {
        let registry = JobCategoryRegistry::new(database().await);
        let created = registry.create(&form("Enginer"), acting_user()).await.unwrap();
        registry.create(&form("Designer"), acting_user()).await.unwrap();

        let renamed = registry.rename(created.id, &form("Engineer"), acting_user()).await.unwrap();
        assert_eq!(renamed.name, "Engineer");

        let clash = registry.rename(created.id, &form("Designer"), acting_user()).await;
        assert!(matches!(clash, Err(AppError::Conflict(_))));

        registry.delete(created.id, acting_user()).await.unwrap();
        assert!(matches!(registry.get(created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            registry.delete(created.id, acting_user()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let registry = JobCategoryRegistry::new(database().await);
        let err = registry.create(&form("  "), acting_user()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.contains("name")));
    }
}
