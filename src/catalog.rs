//! Catalog
//!
//! Product payloads as returned by the storefront catalog API.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::pricing::ProductPricing;

/// Errors decoding catalog payloads.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a payload file.
    #[error("failed to read catalog payload: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON payload.
    #[error("failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML payload.
    #[error("failed to parse YAML payload: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Envelope wrapping every catalog API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the API reported success.
    #[serde(default)]
    pub success: bool,

    /// Response payload. Missing when the call failed.
    pub data: Option<T>,
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Variant {
    /// Variant identifier, used as the cart key.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// A product as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Product identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// URL slug.
    #[serde(default)]
    pub slug: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Variants, in catalog order. `null` is treated as no variants.
    #[serde(default, deserialize_with = "deserialize_variants")]
    pub variants: Vec<Variant>,

    /// Raw pricing fields.
    #[serde(flatten)]
    pub pricing: ProductPricing,
}

impl CatalogProduct {
    /// Decode a product from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the text is not a product object.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode a product from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the text is not a product mapping.
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(text)?)
    }

    /// Load a product from a file. `.yml` and `.yaml` files are read as YAML,
    /// anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        if is_yaml {
            Self::from_yaml(&text)
        } else {
            Self::from_json(&text)
        }
    }

    /// The variant added to the cart from a product tile.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }
}

/// Identifiers arrive as strings or numbers depending on the backend.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

fn deserialize_variants<'de, D>(deserializer: D) -> Result<Vec<Variant>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Variant>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_product_with_flattened_pricing() -> TestResult {
        let product = CatalogProduct::from_json(
            &json!({
                "id": "prod_1",
                "slug": "linen-shirt",
                "name": "Linen Shirt",
                "basePrice": "49.90",
                "regularPrice": 69.9,
                "hasSale": true,
                "variants": [{"id": "var_1", "images": []}, {"id": 7}],
                "avgRating": 4.5,
            })
            .to_string(),
        )?;

        assert_eq!(product.id, "prod_1");
        assert_eq!(product.slug, "linen-shirt");
        assert_eq!(product.pricing.base_price, Some(Decimal::new(49_90, 2)));
        assert_eq!(product.pricing.regular_price, Some(Decimal::new(69_9, 1)));
        assert_eq!(product.pricing.has_sale, Some(true));
        assert_eq!(
            product.default_variant().map(|v| v.id.as_str()),
            Some("var_1")
        );
        assert_eq!(product.variants.get(1).map(|v| v.id.as_str()), Some("7"));

        Ok(())
    }

    #[test]
    fn null_variants_are_empty() -> TestResult {
        let product = CatalogProduct::from_json(r#"{"id": 12, "variants": null}"#)?;

        assert_eq!(product.id, "12");
        assert!(product.variants.is_empty(), "null variants should be empty");
        assert_eq!(product.default_variant(), None);

        Ok(())
    }

    #[test]
    fn decodes_yaml_products() -> TestResult {
        let product = CatalogProduct::from_yaml(
            "id: prod_2\nprice: 1000\nsalePrice: '750'\nhasSale: true\n",
        )?;

        assert_eq!(product.pricing.price, Some(Decimal::from(1000)));
        assert_eq!(product.pricing.sale_price, Some(Decimal::from(750)));

        Ok(())
    }

    #[test]
    fn rejects_payloads_without_an_id() {
        assert!(matches!(
            CatalogProduct::from_json(r#"{"price": 10}"#),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn unwraps_api_envelopes() -> TestResult {
        let response: ApiResponse<CatalogProduct> =
            serde_json::from_value(json!({"success": true, "data": {"id": "p"}}))?;

        assert!(response.success, "envelope reports success");
        assert_eq!(response.data.map(|p| p.id), Some("p".to_string()));

        Ok(())
    }

    #[test]
    fn envelopes_without_data_are_empty() -> TestResult {
        let response: ApiResponse<CatalogProduct> =
            serde_json::from_value(json!({"success": false}))?;

        assert!(!response.success, "envelope reports failure");
        assert!(response.data.is_none(), "missing data is none");

        Ok(())
    }
}
