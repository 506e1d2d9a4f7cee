//! Mock property listings shown on the map, plus the budget/preference filter.

use uuid::Uuid;

use super::regions::StateInfo;

const STREET_NAMES: [&str; 12] = [
    "Maple", "Oak", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill", "Park", "Sunset",
    "Ridge", "Willow",
];
const STREET_SUFFIXES: [&str; 5] = ["St", "Ave", "Rd", "Ln", "Dr"];

/// Degrees of latitude/longitude a listing may sit away from the state centre.
const SCATTER_DEGREES: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub id: String,
    pub state: String,
    pub address: String,
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
}

impl Listing {
    pub fn price_label(&self) -> String {
        format!("${:.0}", self.price)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HomePreferences {
    pub bedrooms: u8,
    pub bathrooms: u8,
}

impl Default for HomePreferences {
    fn default() -> Self {
        Self {
            bedrooms: 0,
            bathrooms: 1,
        }
    }
}

/// Generates `count` listings around the state's centre. A seed makes the
/// output reproducible.
pub fn generate_listings(state: &StateInfo, count: usize, seed: Option<u64>) -> Vec<Listing> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let (center_lat, center_lon) = state.center;

    (0..count)
        .map(|_| {
            let mut bytes = [0u8; 16];
            rng.fill(&mut bytes);
            let id = uuid::Builder::from_random_bytes(bytes).into_uuid();

            let house_number = rng.u32(100..10_000);
            let street = STREET_NAMES[rng.usize(..STREET_NAMES.len())];
            let suffix = STREET_SUFFIXES[rng.usize(..STREET_SUFFIXES.len())];

            Listing {
                id: id.to_string(),
                state: state.code.to_string(),
                address: format!("{house_number} {street} {suffix}"),
                zip_code: format!("{:05}", rng.u32(1_000..100_000)),
                price: f64::from(rng.u32(100..1_500)) * 1_000.0,
                bedrooms: rng.u8(1..=6),
                bathrooms: rng.u8(1..=4),
                latitude: center_lat + (rng.f64() * 2.0 - 1.0) * SCATTER_DEGREES,
                longitude: center_lon + (rng.f64() * 2.0 - 1.0) * SCATTER_DEGREES,
                image_url: image_url_for(&id),
            }
        })
        .collect()
}

fn image_url_for(id: &Uuid) -> String {
    format!("https://picsum.photos/seed/{}/400/300", id.simple())
}

/// Mean position of the listings, or `None` when there is nothing to centre on.
pub fn map_center(listings: &[Listing]) -> Option<(f64, f64)> {
    if listings.is_empty() {
        return None;
    }
    let count = listings.len() as f64;
    let lat = listings.iter().map(|l| l.latitude).sum::<f64>() / count;
    let lon = listings.iter().map(|l| l.longitude).sum::<f64>() / count;
    Some((lat, lon))
}

pub fn filter_listings<'a>(
    listings: &'a [Listing],
    budget: Option<f64>,
    preferences: &HomePreferences,
) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| budget.map_or(true, |max| listing.price <= max))
        .filter(|listing| listing.bedrooms >= preferences.bedrooms)
        .filter(|listing| listing.bathrooms >= preferences.bathrooms)
        .collect()
}
