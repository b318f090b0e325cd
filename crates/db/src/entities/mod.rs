//! `SeaORM` entity definitions.

pub mod hero_contents;
