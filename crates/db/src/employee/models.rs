use serde::{Deserialize, Serialize};

/// Reference to an employee in the attendance store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EmployeeRef {
    pub id: String,
    pub display_name: Option<String>,
}

impl EmployeeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }
}
