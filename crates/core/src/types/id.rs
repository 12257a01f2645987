//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Catalog identifiers
//! are opaque strings (UUIDs in the backing product table), so the wrappers
//! hold a `String`.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`, `is_empty()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use rabbit_cart_core::define_id;
/// define_id!(CategoryId);
/// define_id!(OrderId);
///
/// let category_id = CategoryId::new("mugs");
/// let order_id = OrderId::new("mugs");
///
/// // These are different types, so this won't compile:
/// // let _: CategoryId = order_id;
/// assert_eq!(category_id.as_str(), order_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the ID is blank (empty or whitespace only).
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
