use std::time::{Duration, SystemTime};

use super::{
    affordability::{estimate, BudgetEstimate},
    budget_form::{BudgetError, BudgetForm},
    listings::{filter_listings, HomePreferences, Listing},
    price_series::PriceTable,
    regions::DEFAULT_STATE,
};

/// Everything the dashboard mutates. The domain functions only ever see
/// snapshots taken from here.
#[derive(Clone, Debug)]
pub struct AppState {
    pub selected_state: String,
    pub preferences: HomePreferences,
    pub budget: Option<BudgetEstimate>,
    pub listings: Vec<Listing>,
    pub price_data: PriceDataState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_state: DEFAULT_STATE.to_string(),
            preferences: HomePreferences::default(),
            budget: None,
            listings: Vec::new(),
            price_data: PriceDataState::default(),
        }
    }
}

impl AppState {
    pub fn budget_limit(&self) -> Option<f64> {
        self.budget.as_ref().map(|estimate| estimate.max_home_price)
    }

    /// Replaces the budget with one estimated from the form. Any failure
    /// leaves no budget, so listings stop being filtered by an old figure.
    pub fn apply_budget_form(&mut self, form: &BudgetForm) -> Result<&BudgetEstimate, BudgetError> {
        self.budget = None;
        let profile = form.parse()?;
        let budget = estimate(&profile)?;
        Ok(self.budget.insert(budget))
    }

    pub fn visible_listings(&self) -> Vec<Listing> {
        filter_listings(&self.listings, self.budget_limit(), &self.preferences)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn price_table(&self) -> Option<&PriceTable> {
        self.price_data.table.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct PriceDataState {
    pub table: Option<PriceTable>,
    pub fetched_at: Option<SystemTime>,
    pub status: Option<CacheStatus>,
    pub last_error: Option<String>,
}

impl PriceDataState {
    pub fn record_load(&mut self, table: PriceTable, fetched_at: SystemTime, status: CacheStatus) {
        self.table = Some(table);
        self.fetched_at = Some(fetched_at);
        self.status = Some(status);
        self.last_error = None;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.fetched_at
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{affordability::FinancialProfile, budget_form::InputError};

    fn listing(price: f64, bedrooms: u8) -> Listing {
        Listing {
            id: format!("l-{price}"),
            state: "AL".to_string(),
            address: "1 Main St".to_string(),
            zip_code: "35004".to_string(),
            price,
            bedrooms,
            bathrooms: 2,
            latitude: 32.8,
            longitude: -86.8,
            image_url: String::new(),
        }
    }

    #[test]
    fn defaults_match_dashboard_start() {
        let state = AppState::default();
        assert_eq!(state.selected_state, "AL");
        assert_eq!(state.preferences, HomePreferences::default());
        assert!(state.budget_limit().is_none());
        assert!(state.price_table().is_none());
    }

    #[test]
    fn visible_listings_follow_generated_budget() {
        let mut state = AppState {
            listings: vec![listing(200_000.0, 2), listing(700_000.0, 4)],
            ..AppState::default()
        };
        assert_eq!(state.visible_listings().len(), 2);

        let profile = FinancialProfile::from_sentinel(60_000.0, 0.0, 0.0, 0.0);
        state.budget = Some(estimate(&profile).unwrap());
        let visible = state.visible_listings();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].price, 200_000.0);
    }

    #[test]
    fn invalid_budget_input_clears_previous_budget() {
        let mut state = AppState {
            listings: vec![listing(200_000.0, 2), listing(700_000.0, 4)],
            ..AppState::default()
        };
        let mut form = BudgetForm {
            annual_income: "60000".to_string(),
            monthly_debts: "0".to_string(),
            down_payment: "0".to_string(),
            credit_score: String::new(),
        };
        let price = state.apply_budget_form(&form).unwrap().max_home_price;
        assert!((price - 246_570.47).abs() < 0.01);
        assert_eq!(state.visible_listings().len(), 1);

        form.annual_income = "sixty grand".to_string();
        let err = state.apply_budget_form(&form).unwrap_err();
        assert!(matches!(err, BudgetError::Input(InputError::Invalid { .. })));
        assert!(state.budget.is_none());
        assert_eq!(state.visible_listings().len(), 2);
    }

    #[test]
    fn price_data_tracks_errors_and_staleness() {
        let mut data = PriceDataState::default();
        assert!(data.is_stale(Duration::from_secs(60)));

        data.record_error("boom");
        assert_eq!(data.last_error.as_deref(), Some("boom"));

        data.record_load(PriceTable::default(), SystemTime::now(), CacheStatus::Fresh);
        assert!(data.last_error.is_none());
        assert!(!data.is_stale(Duration::from_secs(60)));
    }
}
