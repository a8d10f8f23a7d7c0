use crate::model::Amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An outstanding debt.
///
/// Field names follow the columns of the hosted `debts` table: the principal is stored as
/// `amount`, the annual rate as `interest_rate` and the opening date as `date`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(default)]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) user_id: String,
    #[serde(rename = "amount")]
    pub(crate) principal: Amount,
    /// Annual interest rate as a percentage, e.g. `19.99`.
    #[serde(rename = "interest_rate", default)]
    pub(crate) annual_rate_percent: Amount,
    #[serde(default)]
    pub(crate) minimum_payment: Amount,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(rename = "date")]
    pub(crate) opened_on: NaiveDate,
}

impl Debt {
    pub fn new(
        principal: impl Into<Amount>,
        minimum_payment: impl Into<Amount>,
        opened_on: NaiveDate,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: String::new(),
            principal: principal.into(),
            annual_rate_percent: Amount::default(),
            minimum_payment: minimum_payment.into(),
            description: String::new(),
            opened_on,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_rate(mut self, annual_rate_percent: impl Into<Amount>) -> Self {
        self.annual_rate_percent = annual_rate_percent.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn principal(&self) -> Decimal {
        self.principal.value()
    }

    pub fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent.value()
    }

    pub fn minimum_payment(&self) -> Decimal {
        self.minimum_payment.value()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn opened_on(&self) -> NaiveDate {
        self.opened_on
    }
}
