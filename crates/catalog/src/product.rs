use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maison_core::{
    Aggregate, AggregateRoot, CategoryId, DomainError, Event, ProductId, parse_price,
};

use crate::option::{MAX_OPTIONS, ProductOption};
use crate::variant::{Variant, generate};

/// Product status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
    Archived,
}

/// Aggregate root: Product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    slug: String,
    description: String,
    category_id: Option<CategoryId>,
    base_price_cents: Option<u64>,
    options: Vec<ProductOption>,
    variants: Vec<Variant>,
    status: ProductStatus,
    version: u64,
    created: bool,
}

impl Product {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            category_id: None,
            base_price_cents: None,
            options: Vec::new(),
            variants: Vec::new(),
            status: ProductStatus::Draft,
            version: 0,
            created: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    pub fn base_price_cents(&self) -> Option<u64> {
        self.base_price_cents
    }

    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    /// Only active products are shown on the storefront.
    pub fn is_listed(&self) -> bool {
        self.status == ProductStatus::Active
    }

    pub fn total_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock.max(0)).sum()
    }

    /// Cheapest and most expensive variant price, falling back to the base
    /// price for variants whose price is still blank.
    pub fn price_range_cents(&self) -> Option<(u64, u64)> {
        let prices: Vec<u64> = if self.variants.is_empty() {
            self.base_price_cents.into_iter().collect()
        } else {
            self.variants
                .iter()
                .filter_map(|v| {
                    if v.price.trim().is_empty() {
                        self.base_price_cents
                    } else {
                        parse_price(&v.price).ok()
                    }
                })
                .collect()
        };
        let min = prices.iter().copied().min()?;
        let max = prices.iter().copied().max()?;
        Some((min, max))
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub category_id: Option<CategoryId>,
    pub base_price_cents: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateProductDetails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductDetails {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub base_price_cents: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SaveVariants (the operator pressed save on the variant table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveVariants {
    pub product_id: ProductId,
    pub options: Vec<ProductOption>,
    pub variants: Vec<Variant>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: PublishProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ArchiveProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    CreateProduct(CreateProduct),
    UpdateProductDetails(UpdateProductDetails),
    SaveVariants(SaveVariants),
    PublishProduct(PublishProduct),
    ArchiveProduct(ArchiveProduct),
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub category_id: Option<CategoryId>,
    pub base_price_cents: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDetailsUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetailsUpdated {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub base_price_cents: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: VariantsSaved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantsSaved {
    pub product_id: ProductId,
    pub options: Vec<ProductOption>,
    pub variants: Vec<Variant>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductPublished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPublished {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductArchived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductArchived {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    ProductDetailsUpdated(ProductDetailsUpdated),
    VariantsSaved(VariantsSaved),
    ProductPublished(ProductPublished),
    ProductArchived(ProductArchived),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "catalog.product.created",
            ProductEvent::ProductDetailsUpdated(_) => "catalog.product.details_updated",
            ProductEvent::VariantsSaved(_) => "catalog.product.variants_saved",
            ProductEvent::ProductPublished(_) => "catalog.product.published",
            ProductEvent::ProductArchived(_) => "catalog.product.archived",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::ProductDetailsUpdated(e) => e.occurred_at,
            ProductEvent::VariantsSaved(e) => e.occurred_at,
            ProductEvent::ProductPublished(e) => e.occurred_at,
            ProductEvent::ProductArchived(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductCreated(e) => {
                self.id = e.product_id;
                self.name = e.name.clone();
                self.slug = e.slug.clone();
                self.category_id = e.category_id;
                self.base_price_cents = e.base_price_cents;
                self.status = ProductStatus::Draft;
                self.created = true;
            }
            ProductEvent::ProductDetailsUpdated(e) => {
                self.name = e.name.clone();
                self.description = e.description.clone();
                self.category_id = e.category_id;
                self.base_price_cents = e.base_price_cents;
            }
            ProductEvent::VariantsSaved(e) => {
                self.options = e.options.clone();
                self.variants = e.variants.clone();
            }
            ProductEvent::ProductPublished(_) => {
                self.status = ProductStatus::Active;
            }
            ProductEvent::ProductArchived(_) => {
                self.status = ProductStatus::Archived;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::CreateProduct(cmd) => self.handle_create(cmd),
            ProductCommand::UpdateProductDetails(cmd) => self.handle_update_details(cmd),
            ProductCommand::SaveVariants(cmd) => self.handle_save_variants(cmd),
            ProductCommand::PublishProduct(cmd) => self.handle_publish(cmd),
            ProductCommand::ArchiveProduct(cmd) => self.handle_archive(cmd),
        }
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

impl Product {
    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn ensure_editable(&self, product_id: ProductId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(product_id)?;
        if self.status == ProductStatus::Archived {
            return Err(DomainError::invariant("archived products cannot be edited"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already exists"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !is_valid_slug(&cmd.slug) {
            return Err(DomainError::validation(format!(
                "slug must be lowercase letters, digits and inner dashes: {:?}",
                cmd.slug
            )));
        }
        // Slug uniqueness across the catalog is checked by the repository
        // before the command reaches the aggregate.

        Ok(vec![ProductEvent::ProductCreated(ProductCreated {
            product_id: cmd.product_id,
            name: cmd.name.trim().to_string(),
            slug: cmd.slug.clone(),
            category_id: cmd.category_id,
            base_price_cents: cmd.base_price_cents,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_details(
        &self,
        cmd: &UpdateProductDetails,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_editable(cmd.product_id)?;
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(vec![ProductEvent::ProductDetailsUpdated(ProductDetailsUpdated {
            product_id: cmd.product_id,
            name: cmd.name.trim().to_string(),
            description: cmd.description.clone(),
            category_id: cmd.category_id,
            base_price_cents: cmd.base_price_cents,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_save_variants(&self, cmd: &SaveVariants) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_editable(cmd.product_id)?;

        if cmd.options.len() > MAX_OPTIONS {
            return Err(DomainError::validation(format!(
                "a product supports at most {MAX_OPTIONS} options"
            )));
        }
        if let Some(incomplete) = cmd.options.iter().position(|o| !o.is_complete()) {
            return Err(DomainError::validation(format!(
                "option {} needs a name and at least one value",
                incomplete + 1
            )));
        }

        let expected = generate(&cmd.options);
        if expected.len() != cmd.variants.len() {
            return Err(DomainError::invariant(format!(
                "expected {} variants for the given options, got {}",
                expected.len(),
                cmd.variants.len()
            )));
        }
        if expected
            .iter()
            .zip(&cmd.variants)
            .any(|(want, got)| want.id != got.id || want.options != got.options)
        {
            return Err(DomainError::invariant(
                "variants do not match the option combinations",
            ));
        }

        let mut skus = HashSet::new();
        for v in &cmd.variants {
            if !v.price.trim().is_empty() {
                parse_price(&v.price)?;
            }
            if v.stock < 0 {
                return Err(DomainError::validation(format!(
                    "stock cannot be negative ({})",
                    v.title_in(&cmd.options)
                )));
            }
            let sku = v.sku.trim();
            if !sku.is_empty() && !skus.insert(sku) {
                return Err(DomainError::conflict(format!("duplicate SKU: {sku}")));
            }
        }

        Ok(vec![ProductEvent::VariantsSaved(VariantsSaved {
            product_id: cmd.product_id,
            options: cmd.options.clone(),
            variants: cmd.variants.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_publish(&self, cmd: &PublishProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(cmd.product_id)?;

        if self.status == ProductStatus::Active {
            return Err(DomainError::conflict("product is already active"));
        }
        if self.status == ProductStatus::Archived {
            return Err(DomainError::invariant("archived products cannot be published"));
        }
        if self.price_range_cents().is_none() {
            return Err(DomainError::validation(
                "product needs a base price or priced variants before publishing",
            ));
        }

        Ok(vec![ProductEvent::ProductPublished(ProductPublished {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_archive(&self, cmd: &ArchiveProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(cmd.product_id)?;

        if self.status == ProductStatus::Archived {
            return Err(DomainError::conflict("product is already archived"));
        }

        Ok(vec![ProductEvent::ProductArchived(ProductArchived {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{VariantField, update_variant_field};

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn created_product(base_price_cents: Option<u64>) -> Product {
        let product_id = ProductId::new();
        let mut product = Product::empty(product_id);
        product
            .execute(&ProductCommand::CreateProduct(CreateProduct {
                product_id,
                name: "Linen Shirt".to_string(),
                slug: "linen-shirt".to_string(),
                category_id: None,
                base_price_cents,
                occurred_at: test_time(),
            }))
            .unwrap();
        product
    }

    fn save_cmd(product: &Product, options: Vec<ProductOption>, variants: Vec<Variant>) -> ProductCommand {
        ProductCommand::SaveVariants(SaveVariants {
            product_id: *product.id(),
            options,
            variants,
            occurred_at: test_time(),
        })
    }

    fn size_options() -> Vec<ProductOption> {
        vec![ProductOption::from_csv("Size", "S, M, L")]
    }

    #[test]
    fn create_product_emits_product_created_event() {
        let product_id = ProductId::new();
        let product = Product::empty(product_id);
        let events = product
            .handle(&ProductCommand::CreateProduct(CreateProduct {
                product_id,
                name: "  Wrap Dress ".to_string(),
                slug: "wrap-dress".to_string(),
                category_id: None,
                base_price_cents: Some(12900),
                occurred_at: test_time(),
            }))
            .unwrap();

        assert_eq!(events.len(), 1);
        match &events[0] {
            ProductEvent::ProductCreated(e) => {
                assert_eq!(e.name, "Wrap Dress");
                assert_eq!(e.slug, "wrap-dress");
                assert_eq!(e.base_price_cents, Some(12900));
            }
            _ => panic!("Expected ProductCreated event"),
        }
        assert_eq!(events[0].event_type(), "catalog.product.created");
    }

    #[test]
    fn create_product_rejects_empty_name_and_bad_slug() {
        let product_id = ProductId::new();
        let product = Product::empty(product_id);
        let mut cmd = CreateProduct {
            product_id,
            name: "   ".to_string(),
            slug: "ok".to_string(),
            category_id: None,
            base_price_cents: None,
            occurred_at: test_time(),
        };
        let err = product.handle(&ProductCommand::CreateProduct(cmd.clone())).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        cmd.name = "Tee".to_string();
        for slug in ["", "Tee", "-tee", "tee-", "tee shirt"] {
            cmd.slug = slug.to_string();
            let err = product.handle(&ProductCommand::CreateProduct(cmd.clone())).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "slug {slug:?}");
        }
    }

    #[test]
    fn create_product_rejects_duplicate_creation() {
        let product = created_product(None);
        let err = product
            .handle(&ProductCommand::CreateProduct(CreateProduct {
                product_id: *product.id(),
                name: "Again".to_string(),
                slug: "again".to_string(),
                category_id: None,
                base_price_cents: None,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn update_details_changes_fields() {
        let mut product = created_product(None);
        let category = CategoryId::new();
        product
            .execute(&ProductCommand::UpdateProductDetails(UpdateProductDetails {
                product_id: *product.id(),
                name: "Linen Shirt II".to_string(),
                description: "Relaxed fit".to_string(),
                category_id: Some(category),
                base_price_cents: Some(5900),
                occurred_at: test_time(),
            }))
            .unwrap();

        assert_eq!(product.name(), "Linen Shirt II");
        assert_eq!(product.description(), "Relaxed fit");
        assert_eq!(product.category_id(), Some(category));
        assert_eq!(product.version(), 2);
    }

    #[test]
    fn save_variants_persists_generated_matrix() {
        let mut product = created_product(None);
        let options = size_options();
        let variants = generate(&options);
        let variants = update_variant_field(&variants, 0, VariantField::Price, "49.90").unwrap();
        let variants = update_variant_field(&variants, 0, VariantField::Stock, 4i64).unwrap();
        let variants = update_variant_field(&variants, 2, VariantField::Price, "59").unwrap();

        product.execute(&save_cmd(&product, options, variants)).unwrap();

        assert_eq!(product.variants().len(), 3);
        assert_eq!(product.options().len(), 1);
        assert_eq!(product.total_stock(), 4);
        assert_eq!(product.price_range_cents(), Some((4990, 5900)));
    }

    #[test]
    fn save_variants_rejects_mismatched_matrix() {
        let product = created_product(None);
        let options = size_options();

        let mut fewer = generate(&options);
        fewer.pop();
        let err = product.handle(&save_cmd(&product, options.clone(), fewer)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let stale = generate(&[ProductOption::from_csv("Size", "XS, S, M")]);
        let err = product.handle(&save_cmd(&product, options.clone(), stale)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let mut renumbered = generate(&options);
        for v in &mut renumbered {
            v.id = 5;
        }
        let err = product.handle(&save_cmd(&product, options, renumbered)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn save_variants_rejects_incomplete_or_too_many_options() {
        let product = created_product(None);

        let blank = vec![ProductOption::from_csv("", "S, M")];
        let err = product.handle(&save_cmd(&product, blank.clone(), generate(&blank))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let four: Vec<ProductOption> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| ProductOption::from_csv(*n, "x"))
            .collect();
        let err = product.handle(&save_cmd(&product, four.clone(), generate(&four))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn save_variants_checks_price_stock_and_sku() {
        let product = created_product(None);
        let options = size_options();
        let base = generate(&options);

        let bad_price = update_variant_field(&base, 1, VariantField::Price, "abc").unwrap();
        assert!(matches!(
            product.handle(&save_cmd(&product, options.clone(), bad_price)),
            Err(DomainError::Validation(_))
        ));

        let negative = update_variant_field(&base, 1, VariantField::Stock, -1i64).unwrap();
        assert!(matches!(
            product.handle(&save_cmd(&product, options.clone(), negative)),
            Err(DomainError::Validation(_))
        ));

        let dup = update_variant_field(&base, 0, VariantField::Sku, "TEE").unwrap();
        let dup = update_variant_field(&dup, 2, VariantField::Sku, " TEE ").unwrap();
        assert!(matches!(
            product.handle(&save_cmd(&product, options, dup)),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn publish_requires_a_price() {
        let mut product = created_product(None);
        let publish = ProductCommand::PublishProduct(PublishProduct {
            product_id: *product.id(),
            occurred_at: test_time(),
        });
        assert!(matches!(product.handle(&publish), Err(DomainError::Validation(_))));

        let mut priced = created_product(Some(3900));
        let publish = ProductCommand::PublishProduct(PublishProduct {
            product_id: *priced.id(),
            occurred_at: test_time(),
        });
        priced.execute(&publish).unwrap();
        assert!(priced.is_listed());
        assert!(matches!(priced.handle(&publish), Err(DomainError::Conflict(_))));

        // blank variant prices fall back to the base price
        let options = size_options();
        let cmd = save_cmd(&product, options.clone(), generate(&options));
        product.execute(&cmd).unwrap();
        assert_eq!(product.price_range_cents(), None);
    }

    #[test]
    fn archived_products_are_frozen() {
        let mut product = created_product(Some(1000));
        product
            .execute(&ProductCommand::ArchiveProduct(ArchiveProduct {
                product_id: *product.id(),
                occurred_at: test_time(),
            }))
            .unwrap();
        assert_eq!(product.status(), ProductStatus::Archived);

        let options = size_options();
        let err = product
            .handle(&save_cmd(&product, options.clone(), generate(&options)))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let err = product
            .handle(&ProductCommand::PublishProduct(PublishProduct {
                product_id: *product.id(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let err = product
            .handle(&ProductCommand::ArchiveProduct(ArchiveProduct {
                product_id: *product.id(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn commands_on_missing_product_are_not_found() {
        let product_id = ProductId::new();
        let product = Product::empty(product_id);
        let err = product
            .handle(&ProductCommand::ArchiveProduct(ArchiveProduct {
                product_id,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: handle never mutates state.
            #[test]
            fn handle_is_side_effect_free(
                sizes in prop::collection::vec("[A-Z]{1,3}", 1..5)
            ) {
                let product = created_product(Some(1000));
                let before = product.clone();
                let options = vec![ProductOption::new("Size", sizes)];
                let cmd = save_cmd(&product, options.clone(), generate(&options));

                let first = product.handle(&cmd);
                let second = product.handle(&cmd);
                prop_assert_eq!(&before, &product);
                prop_assert_eq!(first, second);
            }

            /// Property: replaying saved events rebuilds identical state.
            #[test]
            fn replay_rebuilds_state(
                sizes in prop::collection::vec("[A-Z]{1,3}", 1..5),
                colors in prop::collection::vec("[a-z]{1,6}", 1..4)
            ) {
                let product_id = ProductId::new();
                let mut live = Product::empty(product_id);
                let mut log = Vec::new();

                log.extend(live.execute(&ProductCommand::CreateProduct(CreateProduct {
                    product_id,
                    name: "Tee".to_string(),
                    slug: "tee".to_string(),
                    category_id: None,
                    base_price_cents: Some(2500),
                    occurred_at: Utc::now(),
                })).unwrap());

                let options = vec![
                    ProductOption::new("Size", sizes),
                    ProductOption::new("Color", colors),
                ];
                let save = save_cmd(&live, options.clone(), generate(&options));
                log.extend(live.execute(&save).unwrap());

                let mut replayed = Product::empty(product_id);
                for e in &log {
                    replayed.apply(e);
                }
                prop_assert_eq!(replayed, live);
            }
        }
    }
}
