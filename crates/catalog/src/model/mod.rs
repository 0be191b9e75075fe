pub mod page;
pub mod product;

pub use self::page::{PageRequest, SortDirection, SortField};
pub use self::product::{Product, ProductDraft};
