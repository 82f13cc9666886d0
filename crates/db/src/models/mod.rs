pub mod location;
pub mod product;
pub mod relocation;
