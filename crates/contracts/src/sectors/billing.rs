use serde::{Deserialize, Serialize};

categorical! {
    pub enum InvoiceStatus {
        Paid => ("paid", "Paid"),
        Pending => ("pending", "Pending"),
        Overdue => ("overdue", "Overdue"),
        Draft => ("draft", "Draft"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub client: String,
    pub status: InvoiceStatus,
    pub amount: f64,
    /// YYYY-MM-DD
    pub issued_on: String,
    /// YYYY-MM-DD
    pub due_on: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_from_fixture_json() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"id":"inv-1","number":"INV-2024-001","client":"Acme","status":"overdue",
                "amount":1250.5,"issued_on":"2024-01-02","due_on":"2024-02-01"}"#,
        )
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Overdue);
        assert_eq!(invoice.amount, 1250.5);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<Invoice, _> = serde_json::from_str(
            r#"{"id":"inv-1","number":"N","client":"C","status":"void",
                "amount":1,"issued_on":"2024-01-02","due_on":"2024-02-01"}"#,
        );
        assert!(result.is_err());
    }
}
