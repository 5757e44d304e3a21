pub mod catalog_repo;
pub mod db;
pub mod seed;
pub mod store;

pub use db::Database;
pub use store::{Creatable, Entity, EntityStore, Patchable};
