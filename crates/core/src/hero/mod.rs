//! Homepage hero banner content.
//!
//! At most one hero record is active at a time. Writes that activate a record
//! are issued to the repository as *exclusive* writes, which deactivate every
//! other record inside the same database transaction.

mod error;
mod service;
mod types;

pub use error::HeroError;
pub use service::{HeroRepository, HeroService};
pub use types::{HeroContent, HeroContentInput, HeroContentPatch, NewHeroContent};
