//! Raw text inputs of the budget estimator and their conversion into a
//! [`FinancialProfile`]. The estimator is never called with unparsed input.

use thiserror::Error;

use super::affordability::{AffordabilityError, FinancialProfile};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be a number, got '{value}'")]
    Invalid { field: &'static str, value: String },
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BudgetError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Estimate(#[from] AffordabilityError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BudgetForm {
    pub annual_income: String,
    pub monthly_debts: String,
    pub down_payment: String,
    pub credit_score: String,
}

impl BudgetForm {
    pub fn parse(&self) -> Result<FinancialProfile, InputError> {
        let annual_income = required("Annual Gross Income", &self.annual_income)?;
        let monthly_debts = required("Monthly Debts", &self.monthly_debts)?;
        let down_payment = required("Down Payment", &self.down_payment)?;
        let credit_score = optional("Credit Score", &self.credit_score)?;

        Ok(FinancialProfile::from_sentinel(
            annual_income,
            monthly_debts,
            down_payment,
            credit_score.unwrap_or(0.0),
        ))
    }
}

fn required(field: &'static str, raw: &str) -> Result<f64, InputError> {
    optional(field, raw)?.ok_or(InputError::Missing { field })
}

fn optional(field: &'static str, raw: &str) -> Result<Option<f64>, InputError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '$' | '_'))
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let value: f64 = cleaned.parse().map_err(|_| InputError::Invalid {
        field,
        value: raw.trim().to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::Invalid {
            field,
            value: raw.trim().to_string(),
        });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(income: &str, debts: &str, down: &str, score: &str) -> BudgetForm {
        BudgetForm {
            annual_income: income.to_string(),
            monthly_debts: debts.to_string(),
            down_payment: down.to_string(),
            credit_score: score.to_string(),
        }
    }

    #[test]
    fn parses_complete_form() {
        let profile = form("120,000", "500", "$50000", "720").parse().unwrap();
        assert_eq!(profile.annual_income, 120_000.0);
        assert_eq!(profile.monthly_debts, 500.0);
        assert_eq!(profile.down_payment, 50_000.0);
        assert_eq!(profile.credit_score(), Some(720.0));
    }

    #[test]
    fn empty_or_zero_score_means_not_provided() {
        assert_eq!(form("1", "0", "0", "").parse().unwrap().credit_score(), None);
        assert_eq!(form("1", "0", "0", "0").parse().unwrap().credit_score(), None);
    }

    #[test]
    fn missing_required_field_is_reported() {
        assert_eq!(
            form("", "0", "0", "").parse(),
            Err(InputError::Missing {
                field: "Annual Gross Income"
            })
        );
        assert_eq!(
            form("1000", "0", "   ", "").parse(),
            Err(InputError::Missing {
                field: "Down Payment"
            })
        );
    }

    #[test]
    fn non_numeric_and_negative_values_are_rejected() {
        assert_eq!(
            form("lots", "0", "0", "").parse(),
            Err(InputError::Invalid {
                field: "Annual Gross Income",
                value: "lots".to_string()
            })
        );
        assert!(matches!(
            form("1000", "NaN", "0", "").parse(),
            Err(InputError::Invalid { field: "Monthly Debts", .. })
        ));
        assert_eq!(
            form("1000", "-5", "0", "").parse(),
            Err(InputError::Negative {
                field: "Monthly Debts"
            })
        );
    }
}
