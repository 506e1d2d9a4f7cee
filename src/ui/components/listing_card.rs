use dioxus::prelude::*;

use crate::domain::Listing;

#[component]
pub fn ListingCard(listing: Listing, selected: bool, on_select: EventHandler<String>) -> Element {
    let class = if selected {
        "listing-card listing-card-selected"
    } else {
        "listing-card"
    };
    let id = listing.id.clone();

    rsx! {
        article {
            class: "{class}",
            onclick: move |_| on_select.call(id.clone()),
            img { src: "{listing.image_url}", alt: "Photo of {listing.address}", loading: "lazy" }
            div { class: "stack",
                p { class: "kpi-value", "{listing.price_label()}" }
                p { "{listing.address}, {listing.state} {listing.zip_code}" }
                p { class: "muted", "{listing.bedrooms} bd · {listing.bathrooms} ba" }
            }
        }
    }
}

/// Popup shown for the marker picked on the map.
#[component]
pub fn ListingPopup(listing: Listing, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "panel listing-popup",
            img { src: "{listing.image_url}", alt: "Photo of {listing.address}" }
            div { class: "stack",
                p { class: "kpi-value", "Price: {listing.price_label()}" }
                p { "Zip: {listing.zip_code}" }
                p { "Address: {listing.address}" }
                p { "Bedrooms: {listing.bedrooms}" }
                p { "Bathrooms: {listing.bathrooms}" }
            }
            button { class: "btn", onclick: move |_| on_close.call(()), "Close" }
        }
    }
}
