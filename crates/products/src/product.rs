use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Kind discriminator for a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Physical,
    Digital,
    Service,
}

impl ProductKind {
    /// Human-readable kind label used in detail views.
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Physical => "Physical Product",
            ProductKind::Digital => "Digital Product",
            ProductKind::Service => "Service Product",
        }
    }
}

impl core::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProductKind::Physical => f.write_str("physical"),
            ProductKind::Digital => f.write_str("digital"),
            ProductKind::Service => f.write_str("service"),
        }
    }
}

/// Outer dimensions of a physical product, in centimetres.
///
/// All three axes are always present; absent axes in input default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if self.length < 0.0 || self.width < 0.0 || self.height < 0.0 {
            return Err(DomainError::validation("dimensions cannot be negative"));
        }
        Ok(())
    }
}

impl ValueObject for Dimensions {}

/// Attributes specific to physical products.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalAttributes {
    /// Weight in kilograms.
    pub weight: f64,
    pub dimensions: Dimensions,
}

/// Attributes specific to digital products.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalAttributes {
    pub file_size_mb: f64,
    /// May be empty when no link has been provisioned yet.
    pub download_link: String,
}

/// Attributes specific to service products.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAttributes {
    pub duration_minutes: u32,
    /// May be empty; rendered as "Standard" in detail views.
    pub service_type: String,
}

/// Closed union of kind-specific product attributes.
///
/// Serialized with an internal `kind` tag so a persisted record carries its
/// discriminator next to the shared fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KindAttributes {
    Physical(PhysicalAttributes),
    Digital(DigitalAttributes),
    Service(ServiceAttributes),
}

impl KindAttributes {
    pub fn kind(&self) -> ProductKind {
        match self {
            KindAttributes::Physical(_) => ProductKind::Physical,
            KindAttributes::Digital(_) => ProductKind::Digital,
            KindAttributes::Service(_) => ProductKind::Service,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        match self {
            KindAttributes::Physical(attrs) => {
                if attrs.weight < 0.0 {
                    return Err(DomainError::validation("weight cannot be negative"));
                }
                attrs.dimensions.validate()
            }
            KindAttributes::Digital(attrs) => {
                if attrs.file_size_mb < 0.0 {
                    return Err(DomainError::validation("file size cannot be negative"));
                }
                Ok(())
            }
            // Duration is unsigned; nothing left to check.
            KindAttributes::Service(_) => Ok(()),
        }
    }
}

/// A single catalog item.
///
/// # Invariants
/// - `price ≥ 0`; `quantity` is unsigned and so never negative.
/// - `name` and `category` are non-empty after trimming.
/// - `id` is immutable after construction.
/// - `updated_at ≥ created_at`; every mutation advances `updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    quantity: u64,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: KindAttributes,
}

impl Product {
    /// Create a product from validated parts.
    ///
    /// Generates a fresh id and stamps both timestamps with the current time.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        quantity: u64,
        category: impl Into<String>,
        attributes: KindAttributes,
    ) -> DomainResult<Self> {
        let name = name.into();
        let category = category.into();
        validate_name(&name)?;
        validate_category(&category)?;
        validate_price(price)?;
        attributes.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            name,
            price,
            quantity,
            category,
            created_at: now,
            updated_at: now,
            attributes,
        })
    }

    /// Create a physical product (weight in kg, dimensions in cm).
    pub fn physical(
        name: impl Into<String>,
        price: Decimal,
        quantity: u64,
        category: impl Into<String>,
        weight: f64,
        dimensions: Dimensions,
    ) -> DomainResult<Self> {
        Self::new(
            name,
            price,
            quantity,
            category,
            KindAttributes::Physical(PhysicalAttributes { weight, dimensions }),
        )
    }

    /// Create a digital product (file size in MB).
    pub fn digital(
        name: impl Into<String>,
        price: Decimal,
        quantity: u64,
        category: impl Into<String>,
        file_size_mb: f64,
        download_link: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(
            name,
            price,
            quantity,
            category,
            KindAttributes::Digital(DigitalAttributes {
                file_size_mb,
                download_link: download_link.into(),
            }),
        )
    }

    /// Create a service product (duration in minutes).
    pub fn service(
        name: impl Into<String>,
        price: Decimal,
        quantity: u64,
        category: impl Into<String>,
        duration_minutes: u32,
        service_type: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(
            name,
            price,
            quantity,
            category,
            KindAttributes::Service(ServiceAttributes {
                duration_minutes,
                service_type: service_type.into(),
            }),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn kind(&self) -> ProductKind {
        self.attributes.kind()
    }

    pub fn attributes(&self) -> &KindAttributes {
        &self.attributes
    }

    /// Total value of the units on hand: `price × quantity`.
    pub fn total_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Advance `updated_at`. Every mutating operation ends with this call.
    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> DomainResult<()> {
        let value = value.into();
        validate_name(&value)?;
        self.name = value;
        self.touch();
        Ok(())
    }

    pub fn set_price(&mut self, value: Decimal) -> DomainResult<()> {
        validate_price(value)?;
        self.price = value;
        self.touch();
        Ok(())
    }

    /// Overwrite the stock count.
    ///
    /// Removals that must respect availability go through [`remove_stock`]
    /// instead.
    ///
    /// [`remove_stock`]: Product::remove_stock
    pub fn set_quantity(&mut self, value: u64) {
        self.quantity = value;
        self.touch();
    }

    pub fn set_category(&mut self, value: impl Into<String>) -> DomainResult<()> {
        let value = value.into();
        validate_category(&value)?;
        self.category = value;
        self.touch();
        Ok(())
    }

    pub fn set_weight(&mut self, value: f64) -> DomainResult<()> {
        let KindAttributes::Physical(attrs) = &mut self.attributes else {
            return Err(DomainError::validation(
                "weight applies only to physical products",
            ));
        };
        if value < 0.0 {
            return Err(DomainError::validation("weight cannot be negative"));
        }
        attrs.weight = value;
        self.touch();
        Ok(())
    }

    pub fn set_dimensions(&mut self, value: Dimensions) -> DomainResult<()> {
        let KindAttributes::Physical(attrs) = &mut self.attributes else {
            return Err(DomainError::validation(
                "dimensions apply only to physical products",
            ));
        };
        value.validate()?;
        attrs.dimensions = value;
        self.touch();
        Ok(())
    }

    pub fn set_file_size_mb(&mut self, value: f64) -> DomainResult<()> {
        let KindAttributes::Digital(attrs) = &mut self.attributes else {
            return Err(DomainError::validation(
                "file size applies only to digital products",
            ));
        };
        if value < 0.0 {
            return Err(DomainError::validation("file size cannot be negative"));
        }
        attrs.file_size_mb = value;
        self.touch();
        Ok(())
    }

    pub fn set_download_link(&mut self, value: impl Into<String>) -> DomainResult<()> {
        let KindAttributes::Digital(attrs) = &mut self.attributes else {
            return Err(DomainError::validation(
                "download link applies only to digital products",
            ));
        };
        attrs.download_link = value.into();
        self.touch();
        Ok(())
    }

    pub fn set_duration_minutes(&mut self, value: u32) -> DomainResult<()> {
        let KindAttributes::Service(attrs) = &mut self.attributes else {
            return Err(DomainError::validation(
                "duration applies only to service products",
            ));
        };
        attrs.duration_minutes = value;
        self.touch();
        Ok(())
    }

    pub fn set_service_type(&mut self, value: impl Into<String>) -> DomainResult<()> {
        let KindAttributes::Service(attrs) = &mut self.attributes else {
            return Err(DomainError::validation(
                "service type applies only to service products",
            ));
        };
        attrs.service_type = value.into();
        self.touch();
        Ok(())
    }

    /// Add units to stock.
    pub fn add_stock(&mut self, amount: u64) {
        self.quantity += amount;
        self.touch();
    }

    /// Remove units from stock.
    ///
    /// Fails with [`DomainError::InsufficientStock`] when more units are
    /// requested than are on hand; the quantity is left unchanged.
    pub fn remove_stock(&mut self, amount: u64) -> DomainResult<()> {
        if amount > self.quantity {
            return Err(DomainError::insufficient_stock(self.quantity, amount));
        }
        self.quantity -= amount;
        self.touch();
        Ok(())
    }

    /// Kind-tagged detail view with formatted amounts. Pure; no mutation.
    pub fn display_details(&self) -> ProductDetails {
        let attributes = match &self.attributes {
            KindAttributes::Physical(attrs) => vec![
                DetailField {
                    label: "weight",
                    value: format!("{} kg", attrs.weight),
                },
                DetailField {
                    label: "dimensions",
                    value: format!(
                        "{}\u{d7}{}\u{d7}{} cm",
                        attrs.dimensions.length, attrs.dimensions.width, attrs.dimensions.height
                    ),
                },
            ],
            KindAttributes::Digital(attrs) => vec![
                DetailField {
                    label: "file size",
                    value: format!("{} MB", attrs.file_size_mb),
                },
                DetailField {
                    label: "download link",
                    value: if attrs.download_link.is_empty() {
                        "No link provided".to_string()
                    } else {
                        attrs.download_link.clone()
                    },
                },
            ],
            KindAttributes::Service(attrs) => vec![
                DetailField {
                    label: "duration",
                    value: format!("{} minutes", attrs.duration_minutes),
                },
                DetailField {
                    label: "service type",
                    value: if attrs.service_type.is_empty() {
                        "Standard".to_string()
                    } else {
                        attrs.service_type.clone()
                    },
                },
            ],
        };

        ProductDetails {
            id: self.id.to_string(),
            name: self.name.clone(),
            price: format_currency(self.price),
            quantity: self.quantity,
            category: self.category.clone(),
            total_value: format_currency(self.total_value()),
            kind: self.kind().label(),
            attributes,
        }
    }

    /// Snapshot this product into its persisted representation.
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            category: self.category.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            attributes: self.attributes.clone(),
        }
    }

    /// Rebuild a product from its persisted representation.
    ///
    /// Re-validates every invariant; ids and timestamps are preserved as
    /// stored.
    pub fn from_record(record: ProductRecord) -> DomainResult<Self> {
        validate_name(&record.name)?;
        validate_category(&record.category)?;
        validate_price(record.price)?;
        record.attributes.validate()?;
        if record.updated_at < record.created_at {
            return Err(DomainError::validation("updated_at precedes created_at"));
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            price: record.price,
            quantity: record.quantity,
            category: record.category,
            created_at: record.created_at,
            updated_at: record.updated_at,
            attributes: record.attributes,
        })
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} (ID: {}) - {} - Qty: {}",
            self.name,
            self.id,
            format_currency(self.price),
            self.quantity
        )
    }
}

/// One formatted attribute in a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// Kind-tagged, display-ready view of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetails {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: u64,
    pub category: String,
    pub total_value: String,
    pub kind: &'static str,
    pub attributes: Vec<DetailField>,
}

/// Persisted representation of a single product.
///
/// One element of the catalog snapshot: shared fields plus the flattened,
/// `kind`-tagged attributes. Timestamps round-trip through RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: KindAttributes,
}

/// Format a decimal amount as currency, e.g. `$1200.00`.
pub fn format_currency(amount: Decimal) -> String {
    let mut amount = amount;
    amount.rescale(2);
    format!("${amount}")
}

fn validate_name(value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation("product name cannot be empty"));
    }
    Ok(())
}

fn validate_category(value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation("category cannot be empty"));
    }
    Ok(())
}

fn validate_price(value: Decimal) -> DomainResult<()> {
    if value < Decimal::ZERO {
        return Err(DomainError::validation("price cannot be negative"));
    }
    Ok(())
}
