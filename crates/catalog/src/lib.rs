//! Catalog domain module.
//!
//! Product options, the variant matrix derived from them, the category tree, and
//! the product aggregate that persists both when an operator saves. Everything
//! here is deterministic domain logic (no IO, no rendering, no storage).

pub mod category;
pub mod matrix;
pub mod option;
pub mod product;
pub mod variant;

pub use category::{Category, FlatCategory, descendants, flatten_tree};
pub use matrix::{VariantMatrix, clamp_stock};
pub use option::{MAX_OPTIONS, ProductOption};
pub use product::{
    ArchiveProduct, CreateProduct, Product, ProductArchived, ProductCommand, ProductCreated,
    ProductDetailsUpdated, ProductEvent, ProductPublished, ProductStatus, PublishProduct,
    SaveVariants, UpdateProductDetails, VariantsSaved,
};
pub use variant::{FieldValue, InventoryEntry, Variant, VariantField, generate, update_variant_field};
