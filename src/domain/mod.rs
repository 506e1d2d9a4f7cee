//! Budget estimation, price trend preparation and listing logic live here.

pub mod affordability;
pub mod app_state;
pub mod budget_form;
pub mod listings;
pub mod price_series;
pub mod regions;

pub use app_state::{AppState, CacheStatus};
pub use budget_form::BudgetForm;
pub use listings::{generate_listings, map_center, Listing};
pub use price_series::{resolve_trend, TrendChart, TrendView};
pub use regions::{find_state, STATES};
