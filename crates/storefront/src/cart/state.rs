//! Pure cart state transitions.
//!
//! [`Cart`] holds the ordered lines and implements every mutation without
//! touching storage. The invariants hold after every call:
//!
//! - every line has a quantity of at least 1
//! - no two lines share a product id
//! - the total is derived from the lines on demand, never stored

use rabbit_cart_core::{CatalogProduct, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ItemError;

/// One product-quantity pairing in the cart.
///
/// `name`, `unit_price` and `image_url` are captured when the product is
/// first added and are not refreshed from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    product_id: ProductId,
    name: String,
    #[serde(rename = "price")]
    unit_price: Decimal,
    quantity: u32,
    #[serde(default)]
    image_url: Option<String>,
}

impl CartLine {
    /// Product this line refers to.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product name at add-time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price at add-time.
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Image location at add-time.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// `unit_price * quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// A validated item ready to be added to the cart.
///
/// Construction is the boundary where malformed input is rejected; the cart
/// itself trusts any `NewCartItem` it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    product_id: ProductId,
    name: String,
    unit_price: Decimal,
    image_url: Option<String>,
}

impl NewCartItem {
    /// Validate raw item fields.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::EmptyProductId` for a blank id and
    /// `ItemError::NegativePrice` for a price below zero.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        image_url: Option<String>,
    ) -> Result<Self, ItemError> {
        let product_id = product_id.into();
        if product_id.is_empty() {
            return Err(ItemError::EmptyProductId);
        }
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(ItemError::NegativePrice(unit_price));
        }

        Ok(Self {
            product_id,
            name: name.into(),
            unit_price,
            image_url,
        })
    }

    /// Snapshot a catalog product for the cart.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::OutOfStock` when the product has no stock, plus
    /// the field errors of [`NewCartItem::new`].
    pub fn from_product(product: &CatalogProduct) -> Result<Self, ItemError> {
        if !product.is_in_stock() {
            return Err(ItemError::OutOfStock(product.id.clone()));
        }
        Self::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product
                .image_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        )
    }

    /// Product the item refers to.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    fn into_line(self) -> CartLine {
        CartLine {
            product_id: self.product_id,
            name: self.name,
            unit_price: self.unit_price,
            quantity: 1,
            image_url: self.image_url,
        }
    }
}

/// Ordered cart lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from decoded lines, restoring the invariants.
    ///
    /// Lines with a zero quantity, a blank id or a negative price are
    /// dropped; for duplicate ids the first occurrence wins.
    pub(super) fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            let negative_price = line.unit_price.is_sign_negative() && !line.unit_price.is_zero();
            if line.quantity == 0
                || line.product_id.is_empty()
                || negative_price
                || cart.get(&line.product_id).is_some()
            {
                continue;
            }
            cart.lines.push(line);
        }
        cart
    }

    /// Add one unit of `item`, returning the line's new quantity.
    ///
    /// An existing line only has its quantity bumped; its captured name,
    /// price and image are left untouched.
    pub fn add_item(&mut self, item: NewCartItem) -> u32 {
        if let Some(line) = self.line_mut(&item.product_id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(item.into_line());
        1
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product_id != product_id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. An unknown id is left
    /// alone; this never creates a line. Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines, saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |total, line| {
            total.checked_add(line.line_total()).unwrap_or(Decimal::MAX)
        })
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for `product_id`.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }
}
