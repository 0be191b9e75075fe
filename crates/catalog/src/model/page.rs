use crate::model::product::Product;
use std::{cmp::Ordering, fmt, str::FromStr};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Description,
    Price,
    StockQuantity,
    Category,
    Brand,
    Sku,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Price => "price",
            SortField::StockQuantity => "stock_quantity",
            SortField::Category => "category",
            SortField::Brand => "brand",
            SortField::Sku => "sku",
            SortField::IsActive => "is_active",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Ascending order on this field with NULLs last, matching Postgres.
    ///
    /// Text compares case-insensitively first, then byte-wise. This tracks
    /// the usual linguistic collations for ASCII data but is not a full
    /// collation.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => text(&a.name, &b.name),
            SortField::Description => nulls_last(&a.description, &b.description, |a, b| text(a, b)),
            SortField::Price => a.price.cmp(&b.price),
            SortField::StockQuantity => {
                nulls_last(&a.stock_quantity, &b.stock_quantity, |a, b| a.cmp(b))
            }
            SortField::Category => text(&a.category, &b.category),
            SortField::Brand => nulls_last(&a.brand, &b.brand, |a, b| text(a, b)),
            SortField::Sku => nulls_last(&a.sku, &b.sku, |a, b| text(a, b)),
            SortField::IsActive => a.is_active.cmp(&b.is_active),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

fn text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn nulls_last<T>(a: &Option<T>, b: &Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "description" => SortField::Description,
            "price" => SortField::Price,
            "stock_quantity" | "stockQuantity" => SortField::StockQuantity,
            "category" => SortField::Category,
            "brand" => SortField::Brand,
            "sku" => SortField::Sku,
            "is_active" | "isActive" => SortField::IsActive,
            "created_at" | "createdAt" => SortField::CreatedAt,
            "updated_at" | "updatedAt" => SortField::UpdatedAt,
            other => return Err(format!("Unknown sort field '{other}'")),
        };

        Ok(field)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` in any case is descending, everything else ascending.
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: i64,
    pub size: i64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    pub fn total_pages(&self, total_items: i64) -> i64 {
        if total_items <= 0 {
            0
        } else {
            (total_items + self.size - 1) / self.size
        }
    }

    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = self.sort.compare(a, b);
        let ordering = match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_fields_accept_snake_and_camel_case() {
        assert_eq!("stock_quantity".parse::<SortField>(), Ok(SortField::StockQuantity));
        assert_eq!("stockQuantity".parse::<SortField>(), Ok(SortField::StockQuantity));
        assert_eq!("isActive".parse::<SortField>(), Ok(SortField::IsActive));
        assert!("price; DROP TABLE products".parse::<SortField>().is_err());
    }

    #[test]
    fn direction_is_desc_only_for_desc() {
        assert_eq!(SortDirection::parse_lenient("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient("Desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient("sideways"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient(""), SortDirection::Asc);
    }

    fn named(id: i64, name: &str, brand: Option<&str>) -> Product {
        let now = chrono::NaiveDateTime::default();
        Product {
            id,
            name: name.to_string(),
            description: None,
            price: rust_decimal::Decimal::ONE,
            stock_quantity: None,
            category: "fruit".to_string(),
            brand: brand.map(str::to_string),
            sku: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn text_ignores_case_before_bytes() {
        let apple = named(1, "apple", None);
        let banana = named(2, "Banana", None);
        assert_eq!(SortField::Name.compare(&apple, &banana), Ordering::Less);

        let upper = named(3, "Apple", None);
        assert_eq!(SortField::Name.compare(&upper, &apple), Ordering::Less);
    }

    #[test]
    fn missing_values_sort_last_ascending_and_first_descending() {
        let branded = named(1, "a", Some("acme"));
        let unbranded = named(2, "b", None);

        let asc = PageRequest {
            sort: SortField::Brand,
            ..PageRequest::default()
        };
        assert_eq!(asc.compare(&branded, &unbranded), Ordering::Less);

        let desc = PageRequest {
            direction: SortDirection::Desc,
            ..asc
        };
        assert_eq!(desc.compare(&branded, &unbranded), Ordering::Greater);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PageRequest {
            size: 2,
            ..PageRequest::default()
        };
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(4), 2);
        assert_eq!(page.total_pages(5), 3);
    }

    #[test]
    fn offset_is_page_times_size() {
        let page = PageRequest {
            page: 3,
            size: 25,
            ..PageRequest::default()
        };
        assert_eq!(page.offset(), 75);
    }
}
