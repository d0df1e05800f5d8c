use contracts::enums::Sector;
use contracts::sectors::tax::{PaymentStatus, TaxRecord, TaxType};
use contracts::shared::indicators::{PageSummary, ValueFormat};
use contracts::shared::list_state::ListState;
use list_query::{AggregateSpec, Criteria, Denominator, Record, Value};

use super::{build_summary, rows, PageContext, PageDef, PageStat, Row};

record_fields! {
    pub enum TaxField {
        Reference => "reference",
        Entity => "entity",
        TaxType => "tax_type",
        Status => "status",
        Amount => "amount",
        DueOn => "due_on",
    }
}

impl Record for Row<TaxRecord> {
    type Field = TaxField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &TaxField) -> Option<Value<'_>> {
        Some(match field {
            TaxField::Reference => Value::Text(&self.reference),
            TaxField::Entity => Value::Text(&self.entity),
            TaxField::TaxType => Value::Text(self.tax_type.code()),
            TaxField::Status => Value::Text(self.status.code()),
            TaxField::Amount => Value::Number(self.amount),
            TaxField::DueOn => Value::Text(&self.due_on),
        })
    }

    fn field_by_name(name: &str) -> Option<TaxField> {
        TaxField::from_name(name)
    }

    fn is_date_field(field: &TaxField) -> bool {
        matches!(field, TaxField::DueOn)
    }
}

fn with_status(status: PaymentStatus) -> Criteria<TaxField> {
    Criteria::new().equals(TaxField::Status, status.code())
}

fn of_type(tax_type: TaxType) -> Criteria<TaxField> {
    Criteria::new().equals(TaxField::TaxType, tax_type.code())
}

/// Share of paid records within one tax type
fn paid_within(tax_type: TaxType, ctx: &PageContext) -> PageStat<TaxField> {
    PageStat::new(
        AggregateSpec::ratio(
            format!("paid_rate_{}", tax_type.code()),
            of_type(tax_type).and(with_status(PaymentStatus::Paid)),
            Denominator::Matching {
                filter: of_type(tax_type),
            },
        ),
        format!("{}: paid", tax_type.display_name()),
        ctx.percent(),
    )
}

pub fn page(ctx: &PageContext) -> PageDef<Row<TaxRecord>> {
    let mut stats = vec![
        PageStat::new(
            AggregateSpec::sum("total_due", TaxField::Amount),
            "Total liability",
            ctx.compact_money(),
        ),
        PageStat::new(
            AggregateSpec::sum_where(
                "paid_amount",
                TaxField::Amount,
                with_status(PaymentStatus::Paid),
            ),
            "Paid",
            ctx.money(),
        ),
        PageStat::new(
            AggregateSpec::count("overdue", with_status(PaymentStatus::Overdue)),
            "Overdue filings",
            ValueFormat::Integer,
        ),
        PageStat::new(
            AggregateSpec::ratio(
                "paid_rate",
                with_status(PaymentStatus::Paid),
                Denominator::Records,
            ),
            "Paid rate",
            ctx.percent(),
        ),
    ];
    stats.extend(TaxType::all().iter().map(|tax_type| paid_within(*tax_type, ctx)));
    stats.push(
        PageStat::new(
            AggregateSpec::sum("shown_amount", TaxField::Amount),
            "Shown",
            ctx.money(),
        )
        .filtered(),
    );

    PageDef {
        sector: Sector::Tax,
        text_fields: vec![TaxField::Reference, TaxField::Entity],
        date_field: Some(TaxField::DueOn),
        stats,
    }
}

pub fn summarize(
    records: Vec<TaxRecord>,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<PageSummary<TaxRecord>> {
    let rows = rows(records)?;
    Ok(build_summary(&page(ctx), &rows, state, ctx).map_rows(Row::into_inner))
}
