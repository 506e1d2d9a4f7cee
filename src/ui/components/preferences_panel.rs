use dioxus::prelude::*;

use crate::{domain::AppState, ui::theme};

const MAX_ROOMS: u8 = 10;

#[component]
pub fn PreferencesPanel() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let preferences = state.with(|st| st.preferences);

    rsx! {
        section { class: "{theme::PANEL}",
            h2 { class: "section-label", "Home Preferences" }
            div { class: "field",
                label { "Bedrooms: {preferences.bedrooms}+" }
                input {
                    class: "{theme::SLIDER}",
                    r#type: "range",
                    min: "0",
                    max: "{MAX_ROOMS}",
                    value: "{preferences.bedrooms}",
                    oninput: move |evt| {
                        if let Some(value) = parse_rooms(&evt.value()) {
                            state.with_mut(|st| st.preferences.bedrooms = value);
                        }
                    },
                }
            }
            div { class: "field",
                label { "Bathrooms: {preferences.bathrooms}+" }
                input {
                    class: "{theme::SLIDER}",
                    r#type: "range",
                    min: "0",
                    max: "{MAX_ROOMS}",
                    value: "{preferences.bathrooms}",
                    oninput: move |evt| {
                        if let Some(value) = parse_rooms(&evt.value()) {
                            state.with_mut(|st| st.preferences.bathrooms = value);
                        }
                    },
                }
            }
        }
    }
}

fn parse_rooms(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|value| *value <= MAX_ROOMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_values_stay_in_range() {
        assert_eq!(parse_rooms("3"), Some(3));
        assert_eq!(parse_rooms("0"), Some(0));
        assert_eq!(parse_rooms("11"), None);
        assert_eq!(parse_rooms("two"), None);
    }
}
