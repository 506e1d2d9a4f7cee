pub mod listings;
pub mod settings;
pub mod trends;

pub use listings::ListingsPage;
pub use settings::SettingsPage;
pub use trends::TrendsPage;
