use dioxus::prelude::*;

use crate::{
    domain::{map_center, Listing},
    ui::theme,
};

const MAP_WIDTH: f64 = 800.0;
const MAP_HEIGHT: f64 = 480.0;
const MIN_SPAN_DEGREES: f64 = 0.5;
const EDGE_MARGIN: f64 = 1.15;

/// Equirectangular window centred on the mean listing position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapViewport {
    pub center: (f64, f64),
    /// Half-width of the window in degrees, identical on both axes.
    pub span: f64,
}

impl MapViewport {
    pub fn fit(listings: &[Listing]) -> Option<Self> {
        let center = map_center(listings)?;
        let furthest = listings
            .iter()
            .map(|l| {
                (l.latitude - center.0)
                    .abs()
                    .max((l.longitude - center.1).abs())
            })
            .fold(0.0, f64::max);
        Some(Self {
            center,
            span: (furthest * EDGE_MARGIN).max(MIN_SPAN_DEGREES),
        })
    }

    /// Screen position of a coordinate; north is up.
    pub fn project(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let half_w = MAP_WIDTH / 2.0;
        let half_h = MAP_HEIGHT / 2.0;
        let scale = half_h.min(half_w) / self.span;
        let x = half_w + (longitude - self.center.1) * scale;
        let y = half_h - (latitude - self.center.0) * scale;
        (x, y)
    }
}

#[derive(Clone, PartialEq)]
struct Marker {
    id: String,
    x: f64,
    y: f64,
    class: &'static str,
    tooltip: String,
}

#[component]
pub fn ListingMap(
    listings: Vec<Listing>,
    visible_ids: Vec<String>,
    selected_id: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    let Some(viewport) = MapViewport::fit(&listings) else {
        return rsx! {
            p { class: "muted", "No properties to show on the map." }
        };
    };

    let markers: Vec<Marker> = listings
        .iter()
        .map(|listing| {
            let (x, y) = viewport.project(listing.latitude, listing.longitude);
            let selected = selected_id.as_deref() == Some(listing.id.as_str());
            let matches = visible_ids.contains(&listing.id);
            Marker {
                id: listing.id.clone(),
                x,
                y,
                class: theme::map_marker(selected, matches),
                tooltip: format!("{} · {}", listing.price_label(), listing.address),
            }
        })
        .collect();
    let (center_lat, center_lon) = viewport.center;

    rsx! {
        svg {
            class: "map",
            view_box: "0 0 {MAP_WIDTH} {MAP_HEIGHT}",
            for marker in markers {
                circle {
                    class: "{marker.class}",
                    cx: "{marker.x:.1}",
                    cy: "{marker.y:.1}",
                    r: "9",
                    onclick: {
                        let id = marker.id.clone();
                        move |_| on_select.call(id.clone())
                    },
                    title { "{marker.tooltip}" }
                }
            }
        }
        p { class: "muted", "Centre {center_lat:.3}, {center_lon:.3}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(latitude: f64, longitude: f64) -> Listing {
        Listing {
            id: format!("{latitude},{longitude}"),
            state: "CO".to_string(),
            address: String::new(),
            zip_code: String::new(),
            price: 1.0,
            bedrooms: 1,
            bathrooms: 1,
            latitude,
            longitude,
            image_url: String::new(),
        }
    }

    #[test]
    fn centre_projects_to_middle() {
        let viewport = MapViewport::fit(&[at(39.0, -105.0), at(41.0, -103.0)]).unwrap();
        assert_eq!(viewport.center, (40.0, -104.0));
        assert_eq!(viewport.project(40.0, -104.0), (MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0));
    }

    #[test]
    fn every_listing_lands_inside_the_frame() {
        let listings = [at(39.0, -105.5), at(41.2, -103.0), at(40.1, -104.4)];
        let viewport = MapViewport::fit(&listings).unwrap();
        for listing in &listings {
            let (x, y) = viewport.project(listing.latitude, listing.longitude);
            assert!((0.0..=MAP_WIDTH).contains(&x));
            assert!((0.0..=MAP_HEIGHT).contains(&y));
        }
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let viewport = MapViewport {
            center: (0.0, 0.0),
            span: 1.0,
        };
        let (_, north_y) = viewport.project(0.5, 0.0);
        let (east_x, _) = viewport.project(0.0, 0.5);
        assert!(north_y < MAP_HEIGHT / 2.0);
        assert!(east_x > MAP_WIDTH / 2.0);
    }

    #[test]
    fn single_listing_uses_minimum_span() {
        let viewport = MapViewport::fit(&[at(10.0, 10.0)]).unwrap();
        assert_eq!(viewport.span, MIN_SPAN_DEGREES);
        assert!(MapViewport::fit(&[]).is_none());
    }
}
