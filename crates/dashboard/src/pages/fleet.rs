use contracts::enums::Sector;
use contracts::sectors::fleet::{Vehicle, VehicleStatus};
use contracts::shared::indicators::{PageSummary, ValueFormat};
use contracts::shared::list_state::ListState;
use list_query::{AggregateSpec, Criteria, Denominator, Record, Value};

use super::{build_summary, rows, PageContext, PageDef, PageStat, Row};

record_fields! {
    pub enum VehicleField {
        Plate => "plate",
        Model => "model",
        Driver => "driver",
        Status => "status",
        Fuel => "fuel",
        MileageKm => "mileage_km",
        FuelLevel => "fuel_level",
        NextServiceOn => "next_service_on",
    }
}

impl Record for Row<Vehicle> {
    type Field = VehicleField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &VehicleField) -> Option<Value<'_>> {
        Some(match field {
            VehicleField::Plate => Value::Text(&self.plate),
            VehicleField::Model => Value::Text(&self.model),
            // unassigned vehicles have no driver
            VehicleField::Driver => return self.driver.as_deref().map(Value::Text),
            VehicleField::Status => Value::Text(self.status.code()),
            VehicleField::Fuel => Value::Text(self.fuel.code()),
            VehicleField::MileageKm => Value::Number(self.mileage_km),
            VehicleField::FuelLevel => Value::Number(self.fuel_level),
            VehicleField::NextServiceOn => Value::Text(&self.next_service_on),
        })
    }

    fn field_by_name(name: &str) -> Option<VehicleField> {
        VehicleField::from_name(name)
    }

    fn is_date_field(field: &VehicleField) -> bool {
        matches!(field, VehicleField::NextServiceOn)
    }
}

fn with_status(status: VehicleStatus) -> Criteria<VehicleField> {
    Criteria::new().equals(VehicleField::Status, status.code())
}

pub fn page(ctx: &PageContext) -> PageDef<Row<Vehicle>> {
    PageDef {
        sector: Sector::Fleet,
        text_fields: vec![VehicleField::Plate, VehicleField::Model, VehicleField::Driver],
        date_field: Some(VehicleField::NextServiceOn),
        stats: vec![
            PageStat::new(
                AggregateSpec::ratio(
                    "utilization",
                    with_status(VehicleStatus::Active),
                    Denominator::Records,
                ),
                "Utilization",
                ctx.percent(),
            ),
            PageStat::new(
                AggregateSpec::count("in_maintenance", with_status(VehicleStatus::Maintenance)),
                "In maintenance",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::average("avg_fuel_level", VehicleField::FuelLevel),
                "Avg. fuel level",
                ctx.percent(),
            ),
            PageStat::new(
                AggregateSpec::count(
                    "low_fuel",
                    Criteria::new().range(VehicleField::FuelLevel, None, Some(25.0)),
                ),
                "Low fuel",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::sum("mileage", VehicleField::MileageKm),
                "Shown mileage, km",
                ValueFormat::Number { decimals: 0 },
            )
            .filtered(),
        ],
    }
}

pub fn summarize(
    vehicles: Vec<Vehicle>,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<PageSummary<Vehicle>> {
    let rows = rows(vehicles)?;
    Ok(build_summary(&page(ctx), &rows, state, ctx).map_rows(Row::into_inner))
}
