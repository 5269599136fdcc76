use serde::{Deserialize, Serialize};

/// Read-only snapshot of one catalog row. Fields mirror the loosely typed
/// store: every value is optional text, including `price`, which may hold
/// non-numeric markers such as `N/A`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarListing {
    pub brand: Option<String>,
    pub name: Option<String>,
    pub body_style: Option<String>,
    pub color: Option<String>,
    pub interior_color: Option<String>,
    pub transmission: Option<String>,
    pub engine: Option<String>,
    pub fuel: Option<String>,
    pub mileage: Option<String>,
    pub price: Option<String>,
    pub vin: Option<String>,
}
