//! Display data for cart surfaces.
//!
//! Views are plain data with prices already formatted, ready for whatever
//! renders them. Every constructor that reads the cart goes through a
//! [`ReadySignal`] and returns `None` until hydration has finished, so a
//! surface can never show the transient empty cart.

use rabbit_cart_core::{CurrencyCode, Price};
use rust_decimal::Decimal;

use crate::cart::{Cart, CartLine, ReadySignal};

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<ImageView>,
}

/// Image display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Decimal::ZERO, currency),
            item_count: 0,
        }
    }

    /// Build the view for `cart`.
    #[must_use]
    pub fn from_cart(cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|line| CartItemView::from_line(line, currency))
                .collect(),
            subtotal: format_price(cart.total_amount(), currency),
            item_count: cart.item_count(),
        }
    }

    /// Build the view only once the cart has hydrated.
    #[must_use]
    pub fn gated(ready: &ReadySignal, cart: &Cart, currency: CurrencyCode) -> Option<Self> {
        ready.gate(|| Self::from_cart(cart, currency))
    }

    /// Whether there is nothing in the cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    fn from_line(line: &CartLine, currency: CurrencyCode) -> Self {
        Self {
            id: line.product_id().to_string(),
            name: line.name().to_owned(),
            quantity: line.quantity(),
            price: format_price(line.unit_price(), currency),
            line_price: format_price(line.line_total(), currency),
            image: line.image_url().map(|url| ImageView {
                url: url.to_owned(),
                alt: line.name().to_owned(),
            }),
        }
    }
}

/// Header badge count.
///
/// `None` while hydrating and when the cart is empty; both render nothing.
#[must_use]
pub fn badge_count(ready: &ReadySignal, cart: &Cart) -> Option<u64> {
    ready.gate(|| cart.item_count()).filter(|&count| count > 0)
}

/// Format an amount in `currency`.
#[must_use]
pub fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}
