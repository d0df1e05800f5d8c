use contracts::enums::Sector;
use contracts::sectors::billing::{Invoice, InvoiceStatus};
use contracts::shared::indicators::{PageSummary, ValueFormat};
use contracts::shared::list_state::ListState;
use list_query::{AggregateSpec, Criteria, Denominator, Record, Value};

use super::{build_summary, rows, PageContext, PageDef, PageStat, Row};

record_fields! {
    pub enum InvoiceField {
        Number => "number",
        Client => "client",
        Status => "status",
        Amount => "amount",
        IssuedOn => "issued_on",
        DueOn => "due_on",
    }
}

impl Record for Row<Invoice> {
    type Field = InvoiceField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &InvoiceField) -> Option<Value<'_>> {
        Some(match field {
            InvoiceField::Number => Value::Text(&self.number),
            InvoiceField::Client => Value::Text(&self.client),
            InvoiceField::Status => Value::Text(self.status.code()),
            InvoiceField::Amount => Value::Number(self.amount),
            InvoiceField::IssuedOn => Value::Text(&self.issued_on),
            InvoiceField::DueOn => Value::Text(&self.due_on),
        })
    }

    fn field_by_name(name: &str) -> Option<InvoiceField> {
        InvoiceField::from_name(name)
    }

    fn is_date_field(field: &InvoiceField) -> bool {
        matches!(field, InvoiceField::IssuedOn | InvoiceField::DueOn)
    }
}

fn with_status(status: InvoiceStatus) -> Criteria<InvoiceField> {
    Criteria::new().equals(InvoiceField::Status, status.code())
}

pub fn page(ctx: &PageContext) -> PageDef<Row<Invoice>> {
    PageDef {
        sector: Sector::Billing,
        text_fields: vec![InvoiceField::Number, InvoiceField::Client],
        date_field: Some(InvoiceField::DueOn),
        stats: vec![
            PageStat::new(
                AggregateSpec::sum("billed", InvoiceField::Amount),
                "Total billed",
                ctx.compact_money(),
            ),
            PageStat::new(
                AggregateSpec::sum_where(
                    "collected",
                    InvoiceField::Amount,
                    with_status(InvoiceStatus::Paid),
                ),
                "Collected",
                ctx.money(),
            ),
            PageStat::new(
                AggregateSpec::sum_where(
                    "overdue_amount",
                    InvoiceField::Amount,
                    with_status(InvoiceStatus::Overdue),
                ),
                "Overdue",
                ctx.money(),
            ),
            PageStat::new(
                AggregateSpec::ratio(
                    "paid_rate",
                    with_status(InvoiceStatus::Paid),
                    Denominator::Records,
                ),
                "Paid invoices",
                ctx.percent(),
            ),
            PageStat::new(
                AggregateSpec::count("shown", Criteria::new()),
                "Shown",
                ValueFormat::Integer,
            )
            .filtered(),
        ],
    }
}

pub fn summarize(
    invoices: Vec<Invoice>,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<PageSummary<Invoice>> {
    let rows = rows(invoices)?;
    Ok(build_summary(&page(ctx), &rows, state, ctx).map_rows(Row::into_inner))
}
