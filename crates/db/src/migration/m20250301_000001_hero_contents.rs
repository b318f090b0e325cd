//! Hero content table.
//!
//! The partial unique index allows at most one row with `is_active = true`,
//! so two concurrent activations cannot both commit.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(HERO_CONTENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS hero_contents CASCADE;")
            .await?;
        Ok(())
    }
}

const HERO_CONTENTS_SQL: &str = r"
CREATE TABLE hero_contents (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    title_highlight VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    cta_primary_text VARCHAR(255) NOT NULL,
    cta_primary_link VARCHAR(512) NOT NULL,
    cta_secondary_text VARCHAR(255) NOT NULL,
    cta_secondary_link VARCHAR(512) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_hero_updated_after_created CHECK (updated_at >= created_at)
);

-- At most one active hero
CREATE UNIQUE INDEX uq_hero_contents_single_active ON hero_contents (is_active) WHERE is_active;
";
