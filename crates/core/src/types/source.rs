//! Catalog source discriminant.

use serde::{Deserialize, Serialize};

/// Which of the three catalog collections a cart line's item came from.
///
/// The three collections share one identifier space, so an `ItemRef`
/// alone is ambiguous; every stored line carries its source alongside
/// the reference.
///
/// Wire names are the lowercase collection names (`"product"`,
/// `"topseller"`, `"dressstyle"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Product,
    TopSeller,
    DressStyle,
}

impl SourceKind {
    /// Catalog resolution order: Product first, then TopSeller, then
    /// DressStyle. First match wins; on an id collision Product wins
    /// silently. This ordering is a deliberate, deterministic
    /// tie-break and must not be reordered.
    pub const RESOLUTION_ORDER: [Self; 3] = [Self::Product, Self::TopSeller, Self::DressStyle];

    /// Lowercase collection name, as used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::TopSeller => "topseller",
            Self::DressStyle => "dressstyle",
        }
    }
}

impl core::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_lowercase_collection_names() {
        assert_eq!(
            serde_json::to_string(&SourceKind::TopSeller).expect("serialize"),
            "\"topseller\""
        );
        let kind: SourceKind = serde_json::from_str("\"dressstyle\"").expect("deserialize");
        assert_eq!(kind, SourceKind::DressStyle);
    }

    #[test]
    fn resolution_order_starts_with_product() {
        assert_eq!(SourceKind::RESOLUTION_ORDER[0], SourceKind::Product);
        assert_eq!(SourceKind::RESOLUTION_ORDER.len(), 3);
    }
}
