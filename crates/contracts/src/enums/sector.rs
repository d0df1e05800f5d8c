categorical! {
    /// Industry sectors served by the dashboard, one page set each
    pub enum Sector {
        Billing => ("billing", "Billing"),
        Healthcare => ("healthcare", "Healthcare"),
        Fleet => ("fleet", "Fleet"),
        Inventory => ("inventory", "Hardware inventory"),
        Tax => ("tax", "Tax"),
        Law => ("law", "Law"),
        Staffing => ("staffing", "Staffing"),
    }
}
