pub mod location_repo;
pub mod product_repo;
pub mod relocation_repo;

pub use location_repo::LocationRepo;
pub use product_repo::ProductRepo;
pub use relocation_repo::RelocationRepo;
