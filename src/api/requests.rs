use garde::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Absent fields deserialize to zero values so they are reported as field
// constraint failures rather than as an undecodable body.

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(email, length(max = 255))]
    pub email: String,
    #[garde(range(min = 1))]
    pub age: i32,
    #[garde(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(email, length(max = 255))]
    pub email: String,
    #[garde(range(min = 1))]
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateOrderRequest {
    #[garde(length(min = 1, max = 255))]
    pub product: String,
    #[garde(range(min = 1))]
    pub quantity: i32,
    #[garde(custom(positive_price))]
    pub price: Decimal,
}

/// Prices are stored as NUMERIC(10, 2)
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: u32 = 100_000_000;

fn positive_price(value: &Decimal, _ctx: &()) -> garde::Result {
    if !value.is_sign_positive() || value.is_zero() {
        return Err(garde::Error::new("must be greater than 0"));
    }
    if value.normalize().scale() > PRICE_SCALE {
        return Err(garde::Error::new("must have at most 2 decimal places"));
    }
    if *value >= Decimal::from(PRICE_LIMIT) {
        return Err(garde::Error::new("must be less than 100000000"));
    }
    Ok(())
}

/// One failed field constraint, as reported in a 422 body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub constraint: String,
}

impl FieldError {
    pub fn from_report(report: &garde::Report) -> Vec<FieldError> {
        report
            .iter()
            .map(|(path, error)| FieldError {
                field: path.to_string(),
                constraint: error.message().to_string(),
            })
            .collect()
    }
}
