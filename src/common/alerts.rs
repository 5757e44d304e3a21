// src/common/alerts.rs

use crate::models::catalog::Product;

/// Estoque no mínimo ou abaixo dele (o limite conta como baixo).
pub fn is_low_stock(product: &Product) -> bool {
    product.stock_level <= product.min_stock_level
}

/// Recalculado a cada chamada, na ordem da coleção.
pub fn low_stock<'a, I>(products: I) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().filter(|p| is_low_stock(p)).collect()
}
