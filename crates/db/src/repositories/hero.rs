//! Hero content repository for database operations.
//!
//! Exclusive writes run in one transaction: every other active row is
//! switched off, then the target row is written. The partial unique index on
//! `is_active` rejects a concurrent second activation, which is reported as
//! `HeroError::Conflict`.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::warn;

use crate::entities::hero_contents;
use folio_core::hero::{HeroContent, HeroError, HeroRepository, NewHeroContent};

/// Hero content repository implementation.
#[derive(Debug)]
pub struct HeroContentRepository {
    db: Arc<DatabaseConnection>,
}

impl HeroContentRepository {
    /// Create a new hero content repository over a shared pool.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Switch off every active row except `keep`.
    async fn deactivate_others<C: ConnectionTrait>(
        conn: &C,
        keep: Option<i32>,
    ) -> Result<u64, DbErr> {
        let mut query = hero_contents::Entity::update_many()
            .col_expr(hero_contents::Column::IsActive, Expr::value(false))
            .filter(hero_contents::Column::IsActive.eq(true));
        if let Some(id) = keep {
            query = query.filter(hero_contents::Column::Id.ne(id));
        }

        Ok(query.exec(conn).await?.rows_affected)
    }
}

impl HeroRepository for HeroContentRepository {
    async fn find_active(&self) -> Result<Option<HeroContent>, HeroError> {
        let model = hero_contents::Entity::find()
            .filter(hero_contents::Column::IsActive.eq(true))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(model.map(to_domain))
    }

    async fn list_all(&self) -> Result<Vec<HeroContent>, HeroError> {
        let models = hero_contents::Entity::find()
            .order_by_desc(hero_contents::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<HeroContent>, HeroError> {
        let model = hero_contents::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(model.map(to_domain))
    }

    async fn insert(&self, hero: NewHeroContent, exclusive: bool) -> Result<HeroContent, HeroError> {
        let c = hero.content;
        let active_model = hero_contents::ActiveModel {
            title: Set(c.title),
            title_highlight: Set(c.title_highlight),
            description: Set(c.description),
            cta_primary_text: Set(c.cta_primary_text),
            cta_primary_link: Set(c.cta_primary_link),
            cta_secondary_text: Set(c.cta_secondary_text),
            cta_secondary_link: Set(c.cta_secondary_link),
            is_active: Set(c.is_active),
            created_at: Set(hero.created_at.into()),
            updated_at: Set(hero.updated_at.into()),
            ..Default::default()
        };

        let txn = self.db.begin().await.map_err(map_db_err)?;
        if exclusive {
            Self::deactivate_others(&txn, None)
                .await
                .map_err(map_db_err)?;
        }
        let model = active_model.insert(&txn).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(to_domain(model))
    }

    async fn update(&self, hero: HeroContent, exclusive: bool) -> Result<HeroContent, HeroError> {
        let id = hero.id;
        let active_model = hero_contents::ActiveModel {
            id: Set(id),
            title: Set(hero.title),
            title_highlight: Set(hero.title_highlight),
            description: Set(hero.description),
            cta_primary_text: Set(hero.cta_primary_text),
            cta_primary_link: Set(hero.cta_primary_link),
            cta_secondary_text: Set(hero.cta_secondary_text),
            cta_secondary_link: Set(hero.cta_secondary_link),
            is_active: Set(hero.is_active),
            updated_at: Set(hero.updated_at.unwrap_or_else(Utc::now).into()),
            ..Default::default()
        };

        let txn = self.db.begin().await.map_err(map_db_err)?;
        if exclusive {
            Self::deactivate_others(&txn, Some(id))
                .await
                .map_err(map_db_err)?;
        }
        let model = match active_model.update(&txn).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Err(HeroError::not_found(id)),
            Err(e) => return Err(map_db_err(e)),
        };
        txn.commit().await.map_err(map_db_err)?;

        Ok(to_domain(model))
    }

    async fn delete(&self, id: i32) -> Result<bool, HeroError> {
        let result = hero_contents::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}

/// Map a database error, singling out the single-active index violation.
fn map_db_err(err: DbErr) -> HeroError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        warn!(detail = %detail, "Concurrent hero activation rejected");
        return HeroError::conflict("another hero content was activated concurrently");
    }
    HeroError::repository(err.to_string())
}

/// Convert a database row to the domain type.
fn to_domain(model: hero_contents::Model) -> HeroContent {
    HeroContent {
        id: model.id,
        title: model.title,
        title_highlight: model.title_highlight,
        description: model.description,
        cta_primary_text: model.cta_primary_text,
        cta_primary_link: model.cta_primary_link,
        cta_secondary_text: model.cta_secondary_text,
        cta_secondary_link: model.cta_secondary_link,
        is_active: model.is_active,
        created_at: Some(model.created_at.with_timezone(&Utc)),
        updated_at: Some(model.updated_at.with_timezone(&Utc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn model(id: i32, is_active: bool) -> hero_contents::Model {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let created = offset.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        hero_contents::Model {
            id,
            title: "Innovating".to_string(),
            title_highlight: "Optics".to_string(),
            description: "d".to_string(),
            cta_primary_text: "p".to_string(),
            cta_primary_link: "/p".to_string(),
            cta_secondary_text: "s".to_string(),
            cta_secondary_link: "/s".to_string(),
            is_active,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_to_domain_normalises_timezone() {
        let hero = to_domain(model(3, true));

        assert_eq!(hero.id, 3);
        assert!(hero.is_active);
        assert_eq!(
            hero.created_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_repositories_share_one_pool() {
        use sea_orm::{DatabaseBackend, MockDatabase};

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    vec![model(1, true)],
                    Vec::<hero_contents::Model>::new(),
                ])
                .into_connection(),
        );
        let first = HeroContentRepository::new(db.clone());
        let second = HeroContentRepository::new(db.clone());

        let active = first.find_active().await.unwrap();
        let missing = second.find_by_id(9).await.unwrap();

        assert_eq!(active.map(|h| h.id), Some(1));
        assert!(missing.is_none());
        assert_eq!(Arc::strong_count(&db), 3);
    }

    #[test]
    fn test_map_db_err_record_not_found() {
        let err = map_db_err(DbErr::RecordNotFound("hero".to_string()));
        assert!(matches!(err, HeroError::Repository(_)));
    }
}
