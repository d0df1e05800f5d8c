use contracts::enums::Sector;
use contracts::sectors::inventory::{InventoryItem, StockStatus};
use contracts::shared::indicators::{PageSummary, ValueFormat};
use contracts::shared::list_state::ListState;
use list_query::{AggregateSpec, Criteria, Record, Value};

use super::{build_summary, rows, PageContext, PageDef, PageStat, Row};

record_fields! {
    pub enum InventoryField {
        Sku => "sku",
        Name => "name",
        Supplier => "supplier",
        Category => "category",
        Stock => "stock",
        Quantity => "quantity",
        UnitPrice => "unit_price",
        /// quantity * unit_price
        StockValue => "stock_value",
        RestockedOn => "restocked_on",
    }
}

impl Record for Row<InventoryItem> {
    type Field = InventoryField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &InventoryField) -> Option<Value<'_>> {
        Some(match field {
            InventoryField::Sku => Value::Text(&self.sku),
            InventoryField::Name => Value::Text(&self.name),
            InventoryField::Supplier => Value::Text(&self.supplier),
            InventoryField::Category => Value::Text(self.category.code()),
            InventoryField::Stock => Value::Text(self.stock.code()),
            InventoryField::Quantity => Value::Number(self.quantity),
            InventoryField::UnitPrice => Value::Number(self.unit_price),
            InventoryField::StockValue => Value::Number(self.stock_value()),
            InventoryField::RestockedOn => Value::Text(&self.restocked_on),
        })
    }

    fn field_by_name(name: &str) -> Option<InventoryField> {
        InventoryField::from_name(name)
    }

    fn is_date_field(field: &InventoryField) -> bool {
        matches!(field, InventoryField::RestockedOn)
    }
}

fn with_stock(stock: StockStatus) -> Criteria<InventoryField> {
    Criteria::new().equals(InventoryField::Stock, stock.code())
}

pub fn page(ctx: &PageContext) -> PageDef<Row<InventoryItem>> {
    PageDef {
        sector: Sector::Inventory,
        text_fields: vec![
            InventoryField::Sku,
            InventoryField::Name,
            InventoryField::Supplier,
        ],
        date_field: Some(InventoryField::RestockedOn),
        stats: vec![
            PageStat::new(
                AggregateSpec::count("items", Criteria::new()),
                "Items",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::count("low_stock", with_stock(StockStatus::LowStock)),
                "Low stock",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::count("out_of_stock", with_stock(StockStatus::OutOfStock)),
                "Out of stock",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::sum("stock_value", InventoryField::StockValue),
                "Stock value",
                ctx.compact_money(),
            ),
            PageStat::new(
                AggregateSpec::average("avg_unit_price", InventoryField::UnitPrice),
                "Avg. unit price",
                ctx.money(),
            )
            .filtered(),
        ],
    }
}

pub fn summarize(
    items: Vec<InventoryItem>,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<PageSummary<InventoryItem>> {
    let rows = rows(items)?;
    Ok(build_summary(&page(ctx), &rows, state, ctx).map_rows(Row::into_inner))
}
