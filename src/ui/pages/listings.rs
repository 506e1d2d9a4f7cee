//! Map of mock listings for the selected state, filtered by budget and preferences.

use dioxus::prelude::*;

use crate::{
    domain::{find_state, AppState},
    ui::components::{KpiCard, ListingCard, ListingMap, ListingPopup},
};

#[component]
pub fn ListingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let mut selected = use_signal(|| None::<String>);

    let (listings, visible, state_name, budget) = state.with(|st| {
        let name = find_state(&st.selected_state)
            .map(|info| info.name.to_string())
            .unwrap_or_else(|| st.selected_state.clone());
        (
            st.listings.clone(),
            st.visible_listings(),
            name,
            st.budget.as_ref().map(|budget| budget.message()),
        )
    });
    let visible_ids: Vec<String> = visible.iter().map(|listing| listing.id.clone()).collect();
    let selected_id = selected();
    let popup = selected_id
        .as_ref()
        .and_then(|id| listings.iter().find(|listing| &listing.id == id))
        .cloned();
    let total = listings.len();
    let matching = visible.len();

    rsx! {
        div { class: "stack",
            h2 { class: "page-title", "Interactive US Map with Property Details" }
            div { class: "grid-3",
                KpiCard {
                    title: "Location".to_string(),
                    value: state_name,
                    description: Some(format!("{total} properties listed")),
                }
                KpiCard {
                    title: "Matching".to_string(),
                    value: matching.to_string(),
                    description: Some("Within budget and preferences".to_string()),
                }
                KpiCard {
                    title: "Budget".to_string(),
                    value: budget.unwrap_or_else(|| "Not set".to_string()),
                    description: None,
                }
            }
            ListingMap {
                listings,
                visible_ids,
                selected_id: selected_id.clone(),
                on_select: move |id| selected.set(Some(id)),
            }
            if let Some(listing) = popup {
                ListingPopup { listing, on_close: move |_| selected.set(None) }
            }
            if visible.is_empty() {
                p { class: "muted", "No properties match your budget and preferences." }
            } else {
                div { class: "listing-grid",
                    for listing in visible {
                        ListingCard {
                            selected: selected_id.as_deref() == Some(listing.id.as_str()),
                            listing,
                            on_select: move |id| selected.set(Some(id)),
                        }
                    }
                }
            }
        }
    }
}
