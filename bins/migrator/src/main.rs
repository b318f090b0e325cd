//! Database migration runner for Folio.
//!
//! Reads `DATABASE_URL` (from the environment or `.env`) and applies the
//! `hero_contents` schema, including the single-active partial index.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status

use folio_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
