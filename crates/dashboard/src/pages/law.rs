use contracts::enums::Sector;
use contracts::sectors::law::{Hearing, HearingStatus, Priority};
use contracts::shared::indicators::{PageSummary, ValueFormat};
use contracts::shared::list_state::{DateBucket, ListState};
use list_query::{AggregateSpec, Criteria, Denominator, Record, Value};

use super::{build_summary, rows, PageContext, PageDef, PageStat, Row};

record_fields! {
    pub enum HearingField {
        CaseNumber => "case_number",
        Title => "title",
        Court => "court",
        Status => "status",
        Priority => "priority",
        ScheduledOn => "scheduled_on",
        EstimatedHours => "estimated_hours",
    }
}

impl Record for Row<Hearing> {
    type Field = HearingField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &HearingField) -> Option<Value<'_>> {
        Some(match field {
            HearingField::CaseNumber => Value::Text(&self.case_number),
            HearingField::Title => Value::Text(&self.title),
            HearingField::Court => Value::Text(&self.court),
            HearingField::Status => Value::Text(self.status.code()),
            HearingField::Priority => Value::Text(self.priority.code()),
            HearingField::ScheduledOn => Value::Text(&self.scheduled_on),
            HearingField::EstimatedHours => Value::Number(self.estimated_hours),
        })
    }

    fn field_by_name(name: &str) -> Option<HearingField> {
        HearingField::from_name(name)
    }

    fn is_date_field(field: &HearingField) -> bool {
        matches!(field, HearingField::ScheduledOn)
    }
}

pub fn page(ctx: &PageContext) -> PageDef<Row<Hearing>> {
    let scheduled = || Criteria::new().equals(HearingField::Status, HearingStatus::Scheduled.code());
    PageDef {
        sector: Sector::Law,
        text_fields: vec![
            HearingField::CaseNumber,
            HearingField::Title,
            HearingField::Court,
        ],
        date_field: Some(HearingField::ScheduledOn),
        stats: vec![
            PageStat::new(
                AggregateSpec::count(
                    "today",
                    scheduled().on_day(HearingField::ScheduledOn, DateBucket::Today, ctx.reference),
                ),
                "Hearings today",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::count(
                    "tomorrow",
                    scheduled().on_day(
                        HearingField::ScheduledOn,
                        DateBucket::Tomorrow,
                        ctx.reference,
                    ),
                ),
                "Hearings tomorrow",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::count(
                    "critical",
                    Criteria::new().equals(HearingField::Priority, Priority::Critical.code()),
                ),
                "Critical",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::ratio(
                    "concluded_rate",
                    Criteria::new().equals(HearingField::Status, HearingStatus::Concluded.code()),
                    Denominator::Records,
                ),
                "Concluded",
                ctx.percent(),
            ),
            PageStat::new(
                AggregateSpec::sum("hours", HearingField::EstimatedHours),
                "Estimated hours",
                ValueFormat::Number { decimals: 1 },
            )
            .filtered(),
        ],
    }
}

pub fn summarize(
    hearings: Vec<Hearing>,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<PageSummary<Hearing>> {
    let rows = rows(hearings)?;
    Ok(build_summary(&page(ctx), &rows, state, ctx).map_rows(Row::into_inner))
}
