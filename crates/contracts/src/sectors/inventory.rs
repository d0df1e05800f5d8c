use serde::{Deserialize, Serialize};

categorical! {
    pub enum StockCategory {
        Tools => ("tools", "Tools"),
        Fasteners => ("fasteners", "Fasteners"),
        Electrical => ("electrical", "Electrical"),
        Plumbing => ("plumbing", "Plumbing"),
        Paint => ("paint", "Paint"),
    }
}

categorical! {
    pub enum StockStatus {
        InStock => ("in_stock", "In stock"),
        LowStock => ("low_stock", "Low stock"),
        OutOfStock => ("out_of_stock", "Out of stock"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub supplier: String,
    pub category: StockCategory,
    pub stock: StockStatus,
    pub quantity: f64,
    pub unit_price: f64,
    pub restocked_on: String,
}

impl InventoryItem {
    pub fn stock_value(&self) -> f64 {
        self.quantity * self.unit_price
    }
}
