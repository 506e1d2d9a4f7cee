pub mod budget_panel;
pub mod kpi_card;
pub mod line_chart;
pub mod listing_card;
pub mod listing_map;
pub mod preferences_panel;
pub mod toast;

pub use budget_panel::BudgetPanel;
pub use kpi_card::KpiCard;
pub use line_chart::LineChart;
pub use listing_card::{ListingCard, ListingPopup};
pub use listing_map::ListingMap;
pub use preferences_panel::PreferencesPanel;
