use std::time::SystemTime;

use dioxus::prelude::*;

use crate::{
    config,
    domain::{AppState, CacheStatus},
    infra::price_data::PriceDataSource,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::{age_label, version::version_label},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut reload = use_context::<Signal<u32>>();

    let config = config::current();
    let source = PriceDataSource::parse(&config.price_data)
        .map(|source| source.describe())
        .unwrap_or_else(|_| format!("{} (invalid)", config.price_data));
    let (status, age, regions, rows, last_error) = state.with(|st| {
        let data = &st.price_data;
        let age = data
            .fetched_at
            .and_then(|time| SystemTime::now().duration_since(time).ok())
            .map(|elapsed| format!("{} ago", age_label(elapsed.as_secs())));
        let (regions, rows) = st
            .price_table()
            .map(|table| (table.region_count(), table.row_count()))
            .unwrap_or_default();
        let status = if data.table.is_some() && data.is_stale(config.cache_ttl()) {
            "expired"
        } else {
            status_label(data.status.as_ref())
        };
        (
            status,
            age.unwrap_or_else(|| "never".to_string()),
            regions,
            rows,
            data.last_error.clone(),
        )
    });

    let on_refresh = move |_| {
        reload += 1;
        push_toast(toasts, ToastKind::Info, "Refreshing price data...");
    };

    rsx! {
        div { class: "stack",
            h2 { class: "page-title", "Settings" }
            section { class: "{theme::PANEL}",
                h3 { class: "section-label", "Price Data" }
                dl { class: "stack",
                    SettingRow { label: "Source", value: source }
                    SettingRow { label: "Cache status", value: status.to_string() }
                    SettingRow { label: "Last loaded", value: age }
                    SettingRow { label: "Cache TTL", value: format!("{} min", config.cache_ttl_minutes) }
                    SettingRow { label: "Regions", value: regions.to_string() }
                    SettingRow { label: "Rows", value: rows.to_string() }
                }
                if let Some(err) = last_error {
                    p { class: "{theme::notice(true)}", "Last refresh failed: {err}" }
                }
                button { class: "{theme::BUTTON_PRIMARY}", onclick: on_refresh, "Refresh Price Data" }
            }
            section { class: "{theme::PANEL}",
                h3 { class: "section-label", "Listings" }
                dl { class: "stack",
                    SettingRow { label: "Listings per state", value: config.listing_count.to_string() }
                    SettingRow {
                        label: "Seed",
                        value: config
                            .listing_seed
                            .map(|seed| seed.to_string())
                            .unwrap_or_else(|| "random".to_string()),
                    }
                }
            }
            p { class: "muted", "{version_label()}" }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "row",
            dt { class: "muted", "{label}" }
            dd { "{value}" }
        }
    }
}

fn status_label(status: Option<&CacheStatus>) -> &'static str {
    match status {
        None => "not loaded",
        Some(CacheStatus::Fresh) => "fresh",
        Some(CacheStatus::Cached) => "cached",
        Some(CacheStatus::Stale) => "stale",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels() {
        assert_eq!(status_label(None), "not loaded");
        assert_eq!(status_label(Some(&CacheStatus::Stale)), "stale");
    }
}
