use dioxus::prelude::*;
use tracing::info;

use crate::{
    app::Route,
    config,
    domain::{find_state, generate_listings, AppState, STATES},
    ui::{
        components::{BudgetPanel, PreferencesPanel},
        theme,
    },
    util::version::{APP_NAME, APP_TAGLINE},
};

#[component]
pub fn Shell(children: Element) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let selected = state.with(|st| st.selected_state.clone());

    let on_location = move |evt: FormEvent| {
        let code = evt.value();
        let Some(info) = find_state(&code) else {
            return;
        };
        let config = config::current();
        let listings = generate_listings(info, config.listing_count, config.listing_seed);
        info!(state = info.code, listings = listings.len(), "selected location");
        state.with_mut(|st| {
            st.selected_state = info.code.to_string();
            st.listings = listings;
        });
    };

    rsx! {
        div { class: "shell",
            header { class: "shell-header",
                div {
                    h1 { class: "shell-title", "{APP_NAME}" }
                    p { class: "shell-subtitle", "{APP_TAGLINE}" }
                }
                nav { class: "shell-nav",
                    NavButton {
                        active: matches!(current_route, Route::Listings {}),
                        onclick: move |_| { nav.push(Route::Listings {}); },
                        label: "Map",
                    }
                    NavButton {
                        active: matches!(current_route, Route::Trends {}),
                        onclick: move |_| { nav.push(Route::Trends {}); },
                        label: "Price Trends",
                    }
                    NavButton {
                        active: matches!(current_route, Route::Settings {}),
                        onclick: move |_| { nav.push(Route::Settings {}); },
                        label: "Settings",
                    }
                }
            }
            div { class: "shell-body",
                main { {children} }
                aside { class: "sidebar",
                    section { class: "{theme::PANEL}",
                        h2 { class: "section-label", "Location" }
                        select {
                            class: "{theme::SELECT}",
                            value: "{selected}",
                            onchange: on_location,
                            for info in STATES.iter() {
                                option {
                                    value: "{info.code}",
                                    selected: info.code == selected,
                                    "{info.code} · {info.name}"
                                }
                            }
                        }
                    }
                    BudgetPanel {}
                    PreferencesPanel {}
                }
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: "{theme::nav_button(active)}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
