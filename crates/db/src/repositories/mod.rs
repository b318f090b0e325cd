//! Repository implementations for data access.
//!
//! Repositories implement the persistence traits declared in `folio-core`,
//! hiding the `SeaORM` details from the rest of the application.

pub mod hero;

pub use hero::HeroContentRepository;
