// ABOUTME: JSON-LD Product parsing for structured product metadata.
// ABOUTME: Finds the first Product entity across ld+json blocks and reads name, brand, price, and images.

use serde::Serialize;
use serde_json::Value;

use crate::error::ImageError;

/// The machine-readable product description embedded in a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRecord {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Image URLs as written in the page, not yet resolved.
    pub images: Vec<String>,
}

/// Returns the first Product found across the given `application/ld+json`
/// script bodies. A block that fails to parse is logged and skipped.
///
/// If that Product lists no images, later blocks are searched and the images
/// of the first Product that has some are used instead.
pub fn parse_product_json_ld<'a, I>(scripts: I) -> Option<ProductRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Option<ProductRecord> = None;

    for script in scripts {
        let record = match product_from_script(script) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unparseable JSON-LD block");
                continue;
            }
        };

        match found.as_mut() {
            None => {
                let has_images = !record.images.is_empty();
                found = Some(record);
                if has_images {
                    break;
                }
            }
            Some(first) => {
                if !record.images.is_empty() {
                    first.images = record.images;
                    break;
                }
            }
        }
    }

    found
}

fn product_from_script(script: &str) -> Result<Option<ProductRecord>, ImageError> {
    let data: Value = serde_json::from_str(script.trim())?;
    Ok(find_product(&data).map(record_from_value))
}

/// Locates a Product entity: the top-level object, an entry of a top-level
/// array, or an entry of `@graph`.
fn find_product(data: &Value) -> Option<&Value> {
    if is_product(data) {
        return Some(data);
    }
    if let Some(items) = data.as_array() {
        return items.iter().find(|item| is_product(item));
    }
    data.get("@graph")
        .and_then(Value::as_array)
        .and_then(|items| items.iter().find(|item| is_product(item)))
}

fn is_product(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == "Product",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("Product")),
        _ => false,
    }
}

fn record_from_value(product: &Value) -> ProductRecord {
    ProductRecord {
        name: non_empty_str(product.get("name")),
        brand: brand_name(product.get("brand")),
        description: non_empty_str(product.get("description")),
        price: offer_price(product.get("offers")),
        images: image_urls(product.get("image")),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn brand_name(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(_) => non_empty_str(value),
        Value::Object(_) => non_empty_str(value?.get("name")),
        _ => None,
    }
}

/// `offers.price`, else `offers.lowPrice`. Offers may be a list; the first entry is used.
fn offer_price(value: Option<&Value>) -> Option<f64> {
    let offers = match value? {
        Value::Array(list) => list.first()?,
        other => other,
    };
    number_like(offers.get("price")).or_else(|| number_like(offers.get("lowPrice")))
}

fn number_like(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Image may be a string, an ImageObject, or a list of either.
fn image_urls(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(single_image_url).collect(),
        Some(single) => single_image_url(single).into_iter().collect(),
        None => Vec::new(),
    }
}

fn single_image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_empty_str(Some(value)),
        Value::Object(_) => {
            non_empty_str(value.get("url")).or_else(|| non_empty_str(value.get("contentUrl")))
        }
        _ => None,
    }
}
