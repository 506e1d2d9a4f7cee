use dioxus::{prelude::*, signals::Signal};
use tracing::{error, info, warn};

use crate::{
    config,
    domain::{find_state, generate_listings, AppState, CacheStatus},
    infra::price_data::{PriceDataClient, PriceDataError},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{ListingsPage, SettingsPage, TrendsPage},
        shell::Shell,
    },
    util::assets,
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Listings {},
    #[route("/trends")]
    Trends {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(|| {
        let config = config::current();
        let mut initial = AppState::default();
        if let Some(info) = find_state(&initial.selected_state) {
            initial.listings = generate_listings(info, config.listing_count, config.listing_seed);
        }
        initial
    });
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    // Bumped by the settings page to force a reload past the cache.
    let reload = use_signal(|| 0u32);
    use_context_provider(|| reload);

    let client = use_hook(|| match build_client() {
        Ok(client) => Some(client),
        Err(err) => {
            error!(error = %err, "failed to initialise price data client");
            None
        }
    });

    let _prices = use_resource(move || {
        let generation = reload();
        let client = client.clone();
        async move {
            match client {
                Some(client) => load_prices(client, state, toasts, generation > 0).await,
                None => {
                    let mut state = state;
                    state.with_mut(|st| {
                        st.price_data
                            .record_error("price data source is not configured correctly")
                    });
                    push_toast(toasts, ToastKind::Error, "Price data source is invalid.");
                }
            }
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

fn build_client() -> Result<PriceDataClient, PriceDataError> {
    let config = config::current();
    Ok(PriceDataClient::new(&config.price_data)?.with_ttl(config.cache_ttl()))
}

async fn load_prices(
    client: PriceDataClient,
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    force: bool,
) {
    let result = if force {
        client.refresh().await
    } else {
        client.load_table().await
    };

    match result {
        Ok(payload) => {
            info!(status = ?payload.status, rows = payload.data.row_count(), "price table ready");
            let status = payload.status.clone();
            state.with_mut(|st| {
                st.price_data
                    .record_load(payload.data, payload.fetched_at, payload.status)
            });
            match status {
                CacheStatus::Stale => push_toast(
                    toasts,
                    ToastKind::Warning,
                    "Refresh failed; showing previously loaded prices.",
                ),
                CacheStatus::Fresh if force => {
                    push_toast(toasts, ToastKind::Success, "Price data refreshed.")
                }
                _ => {}
            }
        }
        Err(err) => {
            warn!(error = %err, source = %client.source().describe(), "price table unavailable");
            state.with_mut(|st| st.price_data.record_error(err.to_string()));
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to load price data: {err}"),
            );
        }
    }
}

#[component]
pub fn Listings() -> Element {
    rsx! { Shell { ListingsPage {} } }
}

#[component]
pub fn Trends() -> Element {
    rsx! { Shell { TrendsPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
