use dioxus::prelude::*;

use crate::{
    domain::{price_series::TREND_PROMPT, resolve_trend, AppState, TrendView},
    ui::{components::LineChart, theme},
};

#[component]
pub fn TrendsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let mut query = use_signal(String::new);

    let input = query();
    let view = state.with(|st| st.price_table().map(|table| resolve_trend(table, &input)));
    let available = state.with(|st| {
        st.price_table()
            .map(|table| table.region_names().collect::<Vec<_>>().join(", "))
    });
    let load_error = state.with(|st| st.price_data.last_error.clone());

    rsx! {
        div { class: "stack",
            h2 { class: "page-title", "Housing Price Trend" }
            div { class: "field",
                label { "Enter the state name (as it appears in the dataset):" }
                input {
                    class: "{theme::INPUT}",
                    value: "{query}",
                    placeholder: "e.g. CA",
                    oninput: move |evt| query.set(evt.value()),
                }
                if let Some(available) = available {
                    span { class: "hint", "Available: {available}" }
                }
            }
            match view {
                None => rsx! {
                    if let Some(err) = load_error {
                        p { class: "{theme::notice(true)}", "Price data unavailable: {err}" }
                    } else {
                        p { class: "{theme::notice(false)}", "Loading price data..." }
                    }
                },
                Some(TrendView::Prompt) => rsx! {
                    p { class: "{theme::notice(false)}", "{TREND_PROMPT}" }
                },
                Some(TrendView::NotFound(message)) => rsx! {
                    p { class: "{theme::notice(true)}", "{message}" }
                },
                Some(TrendView::Chart(chart)) => rsx! {
                    div { class: "{theme::PANEL}",
                        LineChart { chart }
                    }
                },
            }
        }
    }
}
