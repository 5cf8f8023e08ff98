//! DTOs for product endpoints.

use serde::Serialize;

use crate::domain::entities::{Product, ProductDetail, ProductImage};

/// A product with its gallery, main image first.
///
/// Product attributes are flattened next to the `images` array.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(detail: ProductDetail) -> Self {
        Self {
            product: detail.product,
            images: detail.images,
        }
    }
}
