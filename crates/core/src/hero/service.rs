//! Hero content service implementation.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::error::HeroError;
use super::types::{HeroContent, HeroContentInput, HeroContentPatch, NewHeroContent};

/// Repository trait for hero content persistence.
///
/// Implemented by the db crate. An `exclusive` write must deactivate every
/// other record and persist the target in one transaction.
pub trait HeroRepository: Send + Sync {
    /// Find the active record, if any.
    fn find_active(&self) -> impl Future<Output = Result<Option<HeroContent>, HeroError>> + Send;

    /// List every record, newest id first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<HeroContent>, HeroError>> + Send;

    /// Find a record by id.
    fn find_by_id(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<HeroContent>, HeroError>> + Send;

    /// Insert a new record and return it with its assigned id.
    fn insert(
        &self,
        hero: NewHeroContent,
        exclusive: bool,
    ) -> impl Future<Output = Result<HeroContent, HeroError>> + Send;

    /// Persist every mutable field of `hero`. `created_at` is left untouched.
    fn update(
        &self,
        hero: HeroContent,
        exclusive: bool,
    ) -> impl Future<Output = Result<HeroContent, HeroError>> + Send;

    /// Delete a record. Returns false if it did not exist.
    fn delete(&self, id: i32) -> impl Future<Output = Result<bool, HeroError>> + Send;
}

/// Hero content operations.
pub struct HeroService<R: HeroRepository> {
    repo: Arc<R>,
}

impl<R: HeroRepository> HeroService<R> {
    /// Create a new hero service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the active record, or the fallback content when none is active.
    ///
    /// The fallback is never written to the repository.
    pub async fn get_active(&self) -> Result<HeroContent, HeroError> {
        Ok(self
            .repo
            .find_active()
            .await?
            .unwrap_or_else(HeroContent::fallback))
    }

    /// Returns all records ordered by descending id.
    pub async fn list_all(&self) -> Result<Vec<HeroContent>, HeroError> {
        self.repo.list_all().await
    }

    /// Creates a record. An active record displaces every other one.
    pub async fn create(&self, input: HeroContentInput) -> Result<HeroContent, HeroError> {
        let exclusive = input.is_active;
        let hero = self
            .repo
            .insert(NewHeroContent::stamped(input, Utc::now()), exclusive)
            .await?;

        info!(hero_id = hero.id, is_active = hero.is_active, "Hero content created");
        Ok(hero)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `HeroError::NotFound` if no record has this id.
    pub async fn update(&self, id: i32, patch: HeroContentPatch) -> Result<HeroContent, HeroError> {
        let mut hero = self.find(id).await?;

        let exclusive = patch.activates(&hero);
        patch.apply_to(&mut hero);
        hero.updated_at = Some(Utc::now());

        let hero = self.repo.update(hero, exclusive).await?;
        info!(hero_id = id, exclusive, "Hero content updated");
        Ok(hero)
    }

    /// Deletes a record. No other record is activated in its place.
    ///
    /// # Errors
    ///
    /// Returns `HeroError::NotFound` if no record has this id.
    pub async fn delete(&self, id: i32) -> Result<(), HeroError> {
        if !self.repo.delete(id).await? {
            return Err(HeroError::not_found(id));
        }

        info!(hero_id = id, "Hero content deleted");
        Ok(())
    }

    /// Makes `id` the only active record.
    ///
    /// # Errors
    ///
    /// Returns `HeroError::NotFound` if no record has this id.
    pub async fn activate(&self, id: i32) -> Result<HeroContent, HeroError> {
        let mut hero = self.find(id).await?;

        hero.is_active = true;
        hero.updated_at = Some(Utc::now());

        let hero = self.repo.update(hero, true).await?;
        info!(hero_id = id, "Hero content activated");
        Ok(hero)
    }

    async fn find(&self, id: i32) -> Result<HeroContent, HeroError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| HeroError::not_found(id))
    }
}



#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    use super::mock::MockHeroRepository;

    #[derive(Debug, Clone)]
    enum Op {
        Create(bool),
        Update(i32, Option<bool>),
        Activate(i32),
        Delete(i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Create),
            (1..8i32, proptest::option::of(any::<bool>())).prop_map(|(id, a)| Op::Update(id, a)),
            (1..8i32).prop_map(Op::Activate),
            (1..8i32).prop_map(Op::Delete),
        ]
    }

    fn input(is_active: bool) -> HeroContentInput {
        HeroContentInput {
            title: "t".to_string(),
            title_highlight: "h".to_string(),
            description: "d".to_string(),
            cta_primary_text: "p".to_string(),
            cta_primary_link: "/p".to_string(),
            cta_secondary_text: "s".to_string(),
            cta_secondary_link: "/s".to_string(),
            is_active,
        }
    }

    // For any sequence of writes, at most one record is active after each call.
    proptest! {
        #[test]
        fn prop_at_most_one_active(ops in proptest::collection::vec(op(), 1..40)) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            let repo = Arc::new(MockHeroRepository::default());
            let service = HeroService::new(repo.clone());

            for op in ops {
                let result = rt.block_on(async {
                    match op {
                        Op::Create(active) => service.create(input(active)).await.map(|_| ()),
                        Op::Update(id, is_active) => service
                            .update(id, HeroContentPatch { is_active, ..Default::default() })
                            .await
                            .map(|_| ()),
                        Op::Activate(id) => service.activate(id).await.map(|_| ()),
                        Op::Delete(id) => service.delete(id).await,
                    }
                });
                prop_assert!(matches!(result, Ok(()) | Err(HeroError::NotFound(_))));
                prop_assert!(repo.active_count() <= 1);
            }
        }
    }
}
