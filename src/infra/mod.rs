//! Data-loading collaborators that sit outside the pure domain.

pub mod price_data;
