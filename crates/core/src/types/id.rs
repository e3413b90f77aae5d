//! Newtype IDs for type-safe entity references.
//!
//! The backend assigns every record an opaque string id (`_id`). Use the
//! `define_id!` macro to create wrappers that prevent accidentally passing a
//! cart id where a product id is expected.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Default`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use shopdesk_core::define_id;
/// define_id!(OrderRef);
/// define_id!(InvoiceRef);
///
/// let order = OrderRef::new("64f0c2");
/// let invoice = InvoiceRef::new("64f0c2");
///
/// // These are different types, so this won't compile:
/// // let _: OrderRef = invoice;
/// assert_eq!(order.as_str(), invoice.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Default,
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

// Backend record IDs
define_id!(ProductId);
define_id!(CartId);
define_id!(CommentId);
define_id!(ReplyId);
define_id!(NotificationId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_transparent_on_the_wire() {
        let id = CartId::new("c1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c1\"");

        let parsed: ProductId = serde_json::from_str("\"64f0c2aa\"").unwrap();
        assert_eq!(parsed.as_str(), "64f0c2aa");
    }

    #[test]
    fn test_id_display() {
        let id = ReplyId::from("r-9");
        assert_eq!(id.to_string(), "r-9");
        assert_eq!(String::from(id), "r-9");
    }
}
