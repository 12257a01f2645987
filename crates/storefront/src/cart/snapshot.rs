//! Persisted snapshot format.
//!
//! The snapshot is the JSON envelope the browser cart store has always
//! written under `cart-storage`, so carts saved by the web client hydrate
//! unchanged:
//!
//! ```json
//! {"state":{"items":[{"id":"p1","name":"Mug","price":"1200","quantity":2,"image_url":null}]},"version":0}
//! ```
//!
//! Prices are written as decimal strings; numeric prices are accepted on read.

use serde::{Deserialize, Serialize};

use super::error::SnapshotError;
use super::state::{Cart, CartLine};

/// Envelope version written by this build.
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateRef<'a> {
    items: &'a [CartLine],
}

#[derive(Deserialize)]
struct Envelope {
    state: State,
    #[serde(default)]
    version: u32,
}

#[derive(Deserialize)]
struct State {
    #[serde(default)]
    items: Vec<CartLine>,
}

/// Serialize a cart into snapshot bytes.
///
/// # Errors
///
/// Returns `SnapshotError::Json` if serialization fails.
pub fn encode(cart: &Cart) -> Result<Vec<u8>, SnapshotError> {
    let envelope = EnvelopeRef {
        state: StateRef {
            items: cart.items(),
        },
        version: SNAPSHOT_VERSION,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Deserialize snapshot bytes into a cart.
///
/// Decoded lines pass through the same invariant repair as any other cart
/// construction, so a hand-edited snapshot can never yield duplicate ids or
/// zero quantities.
///
/// # Errors
///
/// Returns `SnapshotError::Json` for malformed input and
/// `SnapshotError::UnsupportedVersion` for an envelope from another version.
pub fn decode(bytes: &[u8]) -> Result<Cart, SnapshotError> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(Cart::from_lines(envelope.state.items))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;
    use rabbit_cart_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::NewCartItem;

    #[test]
    fn test_empty_cart_round_trips() {
        let cart = Cart::new();
        assert_eq!(decode(&encode(&cart).unwrap()).unwrap(), cart);
    }

    #[test]
    fn test_encoded_shape() {
        let mut cart = Cart::new();
        cart.add_item(
            NewCartItem::new(
                "p1",
                "Mug",
                Decimal::new(1200, 0),
                Some("https://cdn.example/mug.png".to_owned()),
            )
            .unwrap(),
        );

        let value: serde_json::Value = serde_json::from_slice(&encode(&cart).unwrap()).unwrap();
        assert_eq!(value["version"], 0);
        let line = &value["state"]["items"][0];
        assert_eq!(line["id"], "p1");
        assert_eq!(line["name"], "Mug");
        assert_eq!(line["price"], "1200");
        assert_eq!(line["quantity"], 1);
        assert_eq!(line["image_url"], "https://cdn.example/mug.png");
    }

    #[test]
    fn test_decodes_numeric_prices() {
        let json = br#"{"state":{"items":[
            {"id":"p1","name":"Mug","price":1200,"quantity":2,"image_url":null},
            {"id":"p2","name":"Sticker","price":300,"quantity":1}
        ]},"version":0}"#;
        let cart = decode(json).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_amount(), Decimal::new(2700, 0));
    }

    #[test]
    fn test_rejects_other_version() {
        let json = br#"{"state":{"items":[]},"version":3}"#;
        assert!(matches!(
            decode(json),
            Err(SnapshotError::UnsupportedVersion { found: 3, expected: 0 })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode(b"not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(
            decode(br#"{"state":{"items":[{"id":"p1","quantity":-1}]},"version":0}"#),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_decode_repairs_duplicates_and_zero_quantities() {
        let json = br#"{"state":{"items":[
            {"id":"a","name":"A","price":"1","quantity":2},
            {"id":"a","name":"A2","price":"9","quantity":5},
            {"id":"b","name":"B","price":"1","quantity":0}
        ]},"version":0}"#;
        let cart = decode(json).unwrap();
        assert_eq!(cart.len(), 1);
        let line = cart.get(&ProductId::new("a")).unwrap();
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.name(), "A");
    }

    #[test]
    fn test_decode_overflowing_line_totals_saturate() {
        let json = br#"{"state":{"items":[
            {"id":"a","name":"A","price":"79228162514264337593543950335","quantity":2},
            {"id":"b","name":"B","price":"1","quantity":1}
        ]},"version":0}"#;
        let cart = decode(json).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_amount(), Decimal::MAX);
    }

    #[test]
    fn test_decode_drops_blank_ids_and_negative_prices() {
        let json = br#"{"state":{"items":[
            {"id":"","name":"Blank","price":"1","quantity":1},
            {"id":"neg","name":"Refund","price":"-300","quantity":1},
            {"id":"ok","name":"Mug","price":1200,"quantity":1}
        ]},"version":0}"#;
        let cart = decode(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.get(&ProductId::new("ok")).is_some());
        assert_eq!(cart.total_amount(), Decimal::new(1200, 0));
    }

    fn arb_cart() -> impl Strategy<Value = Cart> {
        let line = (0u8..8, 0i64..100_000, 0u32..4, 1u32..20, prop::option::of("[a-z]{1,8}"));
        prop::collection::vec(line, 0..10).prop_map(|lines| {
            let mut cart = Cart::new();
            for (id, cents, scale, quantity, image) in lines {
                let id = ProductId::new(format!("p{id}"));
                let item = NewCartItem::new(
                    id.clone(),
                    format!("Item {id}"),
                    Decimal::new(cents, scale),
                    image.map(|i| format!("https://cdn.example/{i}.png")),
                )
                .unwrap();
                cart.add_item(item);
                cart.update_quantity(&id, i64::from(quantity));
            }
            cart
        })
    }

    proptest! {
        /// Every valid cart survives encode then decode field-for-field.
        #[test]
        fn prop_snapshot_round_trip(cart in arb_cart()) {
            let decoded = decode(&encode(&cart).unwrap()).unwrap();
            prop_assert_eq!(decoded, cart);
        }
    }
}
