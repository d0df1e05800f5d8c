use contracts::enums::Sector;
use contracts::sectors::staffing::{ContractType, Placement, PlacementStatus};
use contracts::shared::indicators::{PageSummary, ValueFormat};
use contracts::shared::list_state::ListState;
use list_query::{AggregateSpec, Criteria, Denominator, Record, Value};

use super::{build_summary, rows, PageContext, PageDef, PageStat, Row};

record_fields! {
    pub enum PlacementField {
        Candidate => "candidate",
        Client => "client",
        Role => "role",
        Status => "status",
        Contract => "contract",
        HourlyRate => "hourly_rate",
        HoursPerWeek => "hours_per_week",
        /// hourly_rate * hours_per_week
        WeeklyBilling => "weekly_billing",
        StartOn => "start_on",
    }
}

impl Record for Row<Placement> {
    type Field = PlacementField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &PlacementField) -> Option<Value<'_>> {
        Some(match field {
            PlacementField::Candidate => Value::Text(&self.candidate),
            PlacementField::Client => Value::Text(&self.client),
            PlacementField::Role => Value::Text(&self.role),
            PlacementField::Status => Value::Text(self.status.code()),
            PlacementField::Contract => Value::Text(self.contract.code()),
            PlacementField::HourlyRate => Value::Number(self.hourly_rate),
            PlacementField::HoursPerWeek => Value::Number(self.hours_per_week),
            PlacementField::WeeklyBilling => Value::Number(self.weekly_billing()),
            PlacementField::StartOn => Value::Text(&self.start_on),
        })
    }

    fn field_by_name(name: &str) -> Option<PlacementField> {
        PlacementField::from_name(name)
    }

    fn is_date_field(field: &PlacementField) -> bool {
        matches!(field, PlacementField::StartOn)
    }
}

fn active() -> Criteria<PlacementField> {
    Criteria::new().equals(PlacementField::Status, PlacementStatus::Active.code())
}

pub fn page(ctx: &PageContext) -> PageDef<Row<Placement>> {
    PageDef {
        sector: Sector::Staffing,
        text_fields: vec![
            PlacementField::Candidate,
            PlacementField::Client,
            PlacementField::Role,
        ],
        date_field: Some(PlacementField::StartOn),
        stats: vec![
            PageStat::new(
                AggregateSpec::count("active", active()),
                "Active placements",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::sum_where("weekly_billing", PlacementField::WeeklyBilling, active()),
                "Weekly billing",
                ctx.money(),
            ),
            PageStat::new(
                AggregateSpec::average_where("avg_rate", PlacementField::HourlyRate, active()),
                "Avg. hourly rate",
                ctx.money(),
            ),
            PageStat::new(
                AggregateSpec::ratio(
                    "permanent_share",
                    Criteria::new()
                        .equals(PlacementField::Contract, ContractType::Permanent.code()),
                    Denominator::Records,
                ),
                "Permanent",
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
    placements: Vec<Placement>,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<PageSummary<Placement>> {
    let rows = rows(placements)?;
    Ok(build_summary(&page(ctx), &rows, state, ctx).map_rows(Row::into_inner))
}
