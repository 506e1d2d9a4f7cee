//! Budget affordability estimate for a single financial profile.
//!
//! The payment ceiling uses the front-end (28%) and back-end (36%)
//! debt-to-income ratios, the rate is derived from the credit score and the
//! maximum loan is the present value of that payment over a fixed 30-year
//! term. Only the final home price is clamped at zero; the payment ceiling
//! may go negative for high-debt profiles.

use thiserror::Error;

/// Share of gross monthly income allowed for the housing payment.
pub const FRONT_END_RATIO: f64 = 0.28;
/// Share of gross monthly income allowed for all debt including housing.
pub const BACK_END_RATIO: f64 = 0.36;
/// Rate applied when no credit score is provided.
pub const DEFAULT_INTEREST_RATE: f64 = 0.055;
pub const BASE_INTEREST_RATE: f64 = 0.08;
pub const MIN_INTEREST_RATE: f64 = 0.03;
pub const CREDIT_SCORE_BASELINE: f64 = 500.0;
pub const DEFAULT_LOAN_YEARS: u32 = 30;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AffordabilityError {
    #[error("monthly interest rate must be positive, got {0}")]
    InvalidRate(f64),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinancialProfile {
    pub annual_income: f64,
    pub monthly_debts: f64,
    pub down_payment: f64,
    credit_score: Option<f64>,
}

impl FinancialProfile {
    pub fn new(
        annual_income: f64,
        monthly_debts: f64,
        down_payment: f64,
        credit_score: Option<f64>,
    ) -> Self {
        Self {
            annual_income,
            monthly_debts,
            down_payment,
            credit_score: credit_score.filter(|score| *score != 0.0),
        }
    }

    /// Builds a profile from the sentinel form where a score of `0` means
    /// "not provided".
    pub fn from_sentinel(
        annual_income: f64,
        monthly_debts: f64,
        down_payment: f64,
        credit_score: f64,
    ) -> Self {
        Self::new(annual_income, monthly_debts, down_payment, Some(credit_score))
    }

    pub fn credit_score(&self) -> Option<f64> {
        self.credit_score
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoanTerms {
    pub years: u32,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            years: DEFAULT_LOAN_YEARS,
        }
    }
}

impl LoanTerms {
    pub fn n_payments(&self) -> i32 {
        self.years as i32 * 12
    }

    pub fn monthly_rate(&self, interest_rate: f64) -> f64 {
        interest_rate / 12.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BudgetEstimate {
    pub monthly_income: f64,
    pub max_monthly_payment: f64,
    pub interest_rate: f64,
    pub loan_amount: f64,
    pub max_home_price: f64,
}

impl BudgetEstimate {
    pub fn message(&self) -> String {
        budget_message(self.max_home_price)
    }
}

pub fn budget_message(max_home_price: f64) -> String {
    format!("Based on your financial inputs, we recommend a budget of ${max_home_price:.2}")
}

/// Annual rate for a credit score. Scores under the baseline push the rate
/// above the base rate; only the 3% floor is enforced.
pub fn interest_rate(credit_score: Option<f64>) -> f64 {
    match credit_score {
        None => DEFAULT_INTEREST_RATE,
        Some(score) if score == 0.0 => DEFAULT_INTEREST_RATE,
        Some(score) => {
            MIN_INTEREST_RATE.max(BASE_INTEREST_RATE - (score - CREDIT_SCORE_BASELINE) / 100.0 / 100.0)
        }
    }
}

pub fn max_monthly_payment(monthly_income: f64, monthly_debts: f64) -> f64 {
    (FRONT_END_RATIO * monthly_income).min(BACK_END_RATIO * monthly_income - monthly_debts)
}

/// Present value of a fixed monthly payment.
pub fn loan_amount(
    monthly_payment: f64,
    monthly_rate: f64,
    n_payments: i32,
) -> Result<f64, AffordabilityError> {
    if !monthly_rate.is_finite() || monthly_rate <= 0.0 {
        return Err(AffordabilityError::InvalidRate(monthly_rate));
    }
    let growth = (1.0 + monthly_rate).powi(n_payments);
    Ok(monthly_payment * (growth - 1.0) / (monthly_rate * growth))
}

pub fn estimate(profile: &FinancialProfile) -> Result<BudgetEstimate, AffordabilityError> {
    estimate_with_terms(profile, LoanTerms::default())
}

pub fn estimate_with_terms(
    profile: &FinancialProfile,
    terms: LoanTerms,
) -> Result<BudgetEstimate, AffordabilityError> {
    let monthly_income = profile.annual_income / 12.0;
    let max_monthly_payment = max_monthly_payment(monthly_income, profile.monthly_debts);
    let interest_rate = interest_rate(profile.credit_score());
    let loan_amount = loan_amount(
        max_monthly_payment,
        terms.monthly_rate(interest_rate),
        terms.n_payments(),
    )?;

    let mut max_home_price = loan_amount + profile.down_payment;
    if max_home_price < 0.0 {
        max_home_price = 0.0;
    }

    Ok(BudgetEstimate {
        monthly_income,
        max_monthly_payment,
        interest_rate,
        loan_amount,
        max_home_price,
    })
}
