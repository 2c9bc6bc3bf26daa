pub mod brand;
pub mod customer;
pub mod product;
pub mod size;
