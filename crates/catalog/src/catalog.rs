use std::collections::HashMap;

use rust_decimal::Decimal;

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};
use stockroom_products::{Product, ProductKind};

/// Stock level at or below which a product counts as "low stock" by default.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

/// Field to order a listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    Quantity,
}

/// In-memory product catalog.
///
/// Ids are unique; the catalog exclusively owns the products it holds.
/// Storage is a map, but insertion order is kept alongside so listings are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Insert a product.
    ///
    /// Fails with [`DomainError::DuplicateProduct`] when the id is already
    /// present; the existing entry is retained.
    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        let id = *product.id();
        if self.products.contains_key(&id) {
            return Err(DomainError::DuplicateProduct(id));
        }
        self.order.push(id);
        self.products.insert(id, product);
        Ok(())
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> DomainResult<&Product> {
        self.products
            .get(&id)
            .ok_or(DomainError::ProductNotFound(id))
    }

    /// Look up a product by id for mutation (setters, stock operations).
    pub fn get_mut(&mut self, id: ProductId) -> DomainResult<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or(DomainError::ProductNotFound(id))
    }

    /// Evict a product permanently, returning it.
    pub fn remove(&mut self, id: ProductId) -> DomainResult<Product> {
        let product = self
            .products
            .remove(&id)
            .ok_or(DomainError::ProductNotFound(id))?;
        self.order.retain(|entry| *entry != id);
        Ok(product)
    }

    /// All products, in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.products.get(id))
    }

    /// Case-insensitive substring search over name, category, and id.
    ///
    /// An empty (or whitespace-only) query returns every product.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.products().collect();
        }
        self.products()
            .filter(|product| {
                product.name().to_lowercase().contains(&query)
                    || product.category().to_lowercase().contains(&query)
                    || product.id().to_string().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Products matching the given kind and/or category. Pure projection.
    pub fn filter(&self, kind: Option<ProductKind>, category: Option<&str>) -> Vec<&Product> {
        self.products()
            .filter(|product| kind.is_none_or(|k| product.kind() == k))
            .filter(|product| {
                category.is_none_or(|c| product.category().eq_ignore_ascii_case(c))
            })
            .collect()
    }

    /// Products ordered by `field`. Pure projection.
    pub fn sort_by(&self, field: SortField, ascending: bool) -> Vec<&Product> {
        let mut listing: Vec<&Product> = self.products().collect();
        match field {
            SortField::Name => listing.sort_by(|a, b| a.name().cmp(b.name())),
            SortField::Price => listing.sort_by(|a, b| a.price().cmp(&b.price())),
            SortField::Quantity => listing.sort_by(|a, b| a.quantity().cmp(&b.quantity())),
        }
        if !ascending {
            listing.reverse();
        }
        listing
    }

    /// Products with `quantity ≤ threshold`, for proactive restock alerts.
    pub fn low_stock(&self, threshold: u64) -> Vec<&Product> {
        self.products()
            .filter(|product| product.quantity() <= threshold)
            .collect()
    }

    /// Sum of `price × quantity` over the whole catalog.
    pub fn total_value(&self) -> Decimal {
        self.products().map(Product::total_value).sum()
    }

    /// Adjust stock by a signed delta: positive adds, negative removes.
    ///
    /// Zero deltas are rejected; removals respect availability.
    pub fn bulk_adjust(&mut self, id: ProductId, delta: i64) -> DomainResult<()> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }
        let product = self.get_mut(id)?;
        if delta > 0 {
            product.add_stock(delta.unsigned_abs());
            Ok(())
        } else {
            product.remove_stock(delta.unsigned_abs())
        }
    }

    /// Number of products per kind (dashboard stat).
    pub fn count_by_kind(&self) -> HashMap<ProductKind, usize> {
        let mut counts = HashMap::new();
        for product in self.products() {
            *counts.entry(product.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct categories, sorted, for filter pickers.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.products().map(|p| p.category().to_string()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Drop every product.
    pub fn clear(&mut self) {
        self.products.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stockroom_products::Dimensions;

    fn laptop() -> Product {
        Product::physical(
            "Laptop",
            Decimal::new(120_000, 2),
            5,
            "Electronics",
            2.1,
            Dimensions::new(30.0, 20.0, 2.0),
        )
        .unwrap()
    }

    fn ebook() -> Product {
        Product::digital(
            "E-book",
            Decimal::new(999, 2),
            100,
            "Books",
            1.5,
            "https://example.com/ebook",
        )
        .unwrap()
    }

    fn consultation() -> Product {
        Product::service(
            "Consultation",
            Decimal::new(7_500, 2),
            10,
            "Services",
            90,
            "Remote",
        )
        .unwrap()
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(laptop()).unwrap();
        catalog.add(ebook()).unwrap();
        catalog.add(consultation()).unwrap();
        catalog
    }

    #[test]
    fn add_rejects_duplicate_id_and_keeps_first() {
        let mut catalog = Catalog::new();
        let original = laptop();
        let id = *original.id();
        catalog.add(original).unwrap();

        let mut record = ebook().to_record();
        record.id = id;
        let imposter = Product::from_record(record).unwrap();

        let err = catalog.add(imposter).unwrap_err();
        assert_eq!(err, DomainError::DuplicateProduct(id));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(id).unwrap().name(), "Laptop");
    }

    #[test]
    fn get_and_remove_fail_for_unknown_id() {
        let mut catalog = sample_catalog();
        let unknown = ProductId::new();
        assert_eq!(
            catalog.get(unknown).unwrap_err(),
            DomainError::ProductNotFound(unknown)
        );
        assert_eq!(
            catalog.remove(unknown).unwrap_err(),
            DomainError::ProductNotFound(unknown)
        );
    }

    #[test]
    fn remove_evicts_permanently_and_preserves_listing_order() {
        let mut catalog = sample_catalog();
        let ebook_id = *catalog.search("e-book")[0].id();
        let removed = catalog.remove(ebook_id).unwrap();
        assert_eq!(removed.name(), "E-book");
        assert!(catalog.get(ebook_id).is_err());

        let names: Vec<&str> = catalog.products().map(Product::name).collect();
        assert_eq!(names, ["Laptop", "Consultation"]);
    }

    #[test]
    fn search_matches_name_category_and_id_case_insensitively() {
        let catalog = sample_catalog();

        assert_eq!(catalog.search("laptop").len(), 1);
        assert_eq!(catalog.search("BOOKS").len(), 1);
        assert_eq!(catalog.search("zzz").len(), 0);

        let id = catalog.products().next().unwrap().id().to_string();
        let matches = catalog.search(&id.to_uppercase());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name(), "Laptop");

        // Empty and whitespace-only queries list everything.
        assert_eq!(catalog.search("").len(), 3);
        assert_eq!(catalog.search("   ").len(), 3);
    }

    #[test]
    fn filter_projects_by_kind_and_category() {
        let catalog = sample_catalog();

        let physical = catalog.filter(Some(ProductKind::Physical), None);
        assert_eq!(physical.len(), 1);
        assert_eq!(physical[0].name(), "Laptop");

        let services = catalog.filter(None, Some("services"));
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name(), "Consultation");

        assert_eq!(catalog.filter(Some(ProductKind::Digital), Some("Books")).len(), 1);
        assert_eq!(catalog.filter(Some(ProductKind::Digital), Some("Services")).len(), 0);
        assert_eq!(catalog.filter(None, None).len(), 3);
    }

    #[test]
    fn sort_by_orders_listings_both_ways() {
        let catalog = sample_catalog();

        let by_name: Vec<&str> = catalog
            .sort_by(SortField::Name, true)
            .into_iter()
            .map(Product::name)
            .collect();
        assert_eq!(by_name, ["Consultation", "E-book", "Laptop"]);

        let by_price_desc: Vec<&str> = catalog
            .sort_by(SortField::Price, false)
            .into_iter()
            .map(Product::name)
            .collect();
        assert_eq!(by_price_desc, ["Laptop", "Consultation", "E-book"]);

        let by_quantity: Vec<u64> = catalog
            .sort_by(SortField::Quantity, true)
            .into_iter()
            .map(Product::quantity)
            .collect();
        assert_eq!(by_quantity, [5, 10, 100]);
    }

    #[test]
    fn low_stock_uses_inclusive_threshold() {
        let catalog = sample_catalog();
        let low = catalog.low_stock(DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name(), "Laptop");

        assert_eq!(catalog.low_stock(10).len(), 2);
        assert_eq!(catalog.low_stock(0).len(), 0);
    }

    #[test]
    fn total_value_sums_every_product() {
        let catalog = sample_catalog();
        // 1200.00×5 + 9.99×100 + 75.00×10
        assert_eq!(catalog.total_value(), Decimal::new(774_900, 2));
    }

    #[test]
    fn bulk_adjust_dispatches_on_sign() {
        let mut catalog = sample_catalog();
        let id = *catalog.search("laptop")[0].id();

        catalog.bulk_adjust(id, 3).unwrap();
        assert_eq!(catalog.get(id).unwrap().quantity(), 8);

        catalog.bulk_adjust(id, -8).unwrap();
        assert_eq!(catalog.get(id).unwrap().quantity(), 0);

        let err = catalog.bulk_adjust(id, -1).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                available: 0,
                requested: 1
            }
        );

        assert!(matches!(
            catalog.bulk_adjust(id, 0).unwrap_err(),
            DomainError::Validation(_)
        ));

        let unknown = ProductId::new();
        assert_eq!(
            catalog.bulk_adjust(unknown, 1).unwrap_err(),
            DomainError::ProductNotFound(unknown)
        );
    }

    #[test]
    fn count_by_kind_and_categories_summarize_the_catalog() {
        let mut catalog = sample_catalog();
        catalog.add(ebook()).unwrap();

        let counts = catalog.count_by_kind();
        assert_eq!(counts[&ProductKind::Physical], 1);
        assert_eq!(counts[&ProductKind::Digital], 2);
        assert_eq!(counts[&ProductKind::Service], 1);

        assert_eq!(catalog.categories(), ["Books", "Electronics", "Services"]);
    }

    #[test]
    fn clear_empties_the_catalog() {
        let mut catalog = sample_catalog();
        catalog.clear();
        assert!(catalog.is_empty());
        assert_eq!(catalog.products().count(), 0);
    }

    #[test]
    fn mutation_goes_through_get_mut() {
        let mut catalog = sample_catalog();
        let id = *catalog.search("laptop")[0].id();
        catalog.get_mut(id).unwrap().set_price(Decimal::new(99_900, 2)).unwrap();
        assert_eq!(catalog.get(id).unwrap().price(), Decimal::new(99_900, 2));
    }
}
