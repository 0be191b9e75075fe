/// Column list shared by every statement that returns whole products.
macro_rules! product_columns {
    () => {
        "id, name, description, price, stock_quantity, category, brand, sku, is_active, created_at, updated_at"
    };
}

mod command;
mod in_memory;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::in_memory::InMemoryProductStore;
pub use self::query::ProductQueryRepository;

use crate::abstract_trait::product::repository::{
    DynProductCommandRepository, DynProductQueryRepository,
};
use shared::config::ConnectionPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductRepository {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
}

impl ProductRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query =
            Arc::new(ProductQueryRepository::new(pool.clone())) as DynProductQueryRepository;

        let command =
            Arc::new(ProductCommandRepository::new(pool.clone())) as DynProductCommandRepository;

        Self { query, command }
    }

    pub fn in_memory(store: Arc<InMemoryProductStore>) -> Self {
        let query = store.clone() as DynProductQueryRepository;
        let command = store as DynProductCommandRepository;

        Self { query, command }
    }
}

/// `%keyword%` for ILIKE, with the pattern metacharacters escaped so they
/// match literally.
pub(crate) fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("drill"), "%drill%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
        assert_eq!(contains_pattern(""), "%%");
    }
}
