//! Postal address value object

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_required;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(custom(function = "validate_required"))]
    pub street: String,

    #[validate(custom(function = "validate_required"))]
    pub city: String,

    #[validate(custom(function = "validate_required"))]
    pub state: String,

    #[validate(custom(function = "validate_required"))]
    pub postal_code: String,

    #[validate(custom(function = "validate_required"))]
    pub country: String,
}

impl Address {
    pub(crate) fn trimmed(self) -> Self {
        Self {
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }
}
