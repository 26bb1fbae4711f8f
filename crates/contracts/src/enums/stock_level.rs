use serde::{Deserialize, Serialize};

/// Уровень складского остатка товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockLevel {
    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::InStock => "In Stock",
            StockLevel::LowStock => "Low Stock",
            StockLevel::OutOfStock => "Out of Stock",
        }
    }

    /// Chart color of the bucket
    pub fn color(&self) -> &'static str {
        match self {
            StockLevel::InStock => "#3B82F6",
            StockLevel::LowStock => "#F59E0B",
            StockLevel::OutOfStock => "#EF4444",
        }
    }

    pub fn all() -> Vec<StockLevel> {
        vec![StockLevel::InStock, StockLevel::LowStock, StockLevel::OutOfStock]
    }
}
