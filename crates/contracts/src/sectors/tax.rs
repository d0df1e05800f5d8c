use serde::{Deserialize, Serialize};

categorical! {
    pub enum TaxType {
        Income => ("income", "Income tax"),
        Sales => ("sales", "Sales tax"),
        Property => ("property", "Property tax"),
        Payroll => ("payroll", "Payroll tax"),
    }
}

categorical! {
    pub enum PaymentStatus {
        Paid => ("paid", "Paid"),
        Pending => ("pending", "Pending"),
        Overdue => ("overdue", "Overdue"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRecord {
    pub id: String,
    pub reference: String,
    pub entity: String,
    pub tax_type: TaxType,
    pub status: PaymentStatus,
    pub amount: f64,
    pub due_on: String,
}
