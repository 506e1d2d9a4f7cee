use dioxus::prelude::*;
use tracing::{info, warn};

use crate::{
    domain::{budget_form::BudgetError, AppState, BudgetForm},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

#[component]
pub fn BudgetPanel() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut form = use_signal(BudgetForm::default);
    let mut error = use_signal(|| None::<String>);

    let message = state.with(|st| st.budget.as_ref().map(|budget| budget.message()));

    let on_generate = move |_| {
        let result = form.with(|f| {
            state.with_mut(|st| st.apply_budget_form(f).map(|budget| budget.clone()))
        });
        match result {
            Ok(budget) => {
                info!(
                    max_home_price = budget.max_home_price,
                    interest_rate = budget.interest_rate,
                    "generated budget"
                );
                error.set(None);
            }
            Err(BudgetError::Input(err)) => {
                warn!(error = %err, "rejected budget input");
                error.set(Some(err.to_string()));
            }
            Err(BudgetError::Estimate(err)) => {
                warn!(error = %err, "budget estimate failed");
                error.set(None);
                push_toast(toasts, ToastKind::Error, format!("Could not estimate budget: {err}"));
            }
        }
    };

    rsx! {
        section { class: "{theme::PANEL}",
            h2 { class: "section-label", "Budget Estimator" }
            BudgetField {
                label: "Annual Gross Income",
                value: form.with(|f| f.annual_income.clone()),
                on_input: move |value| form.with_mut(|f| f.annual_income = value),
            }
            BudgetField {
                label: "Monthly Debts",
                value: form.with(|f| f.monthly_debts.clone()),
                on_input: move |value| form.with_mut(|f| f.monthly_debts = value),
            }
            BudgetField {
                label: "Down Payment",
                value: form.with(|f| f.down_payment.clone()),
                on_input: move |value| form.with_mut(|f| f.down_payment = value),
            }
            BudgetField {
                label: "Credit Score",
                hint: "Optional",
                value: form.with(|f| f.credit_score.clone()),
                on_input: move |value| form.with_mut(|f| f.credit_score = value),
            }
            button { class: "{theme::BUTTON_PRIMARY}", onclick: on_generate, "Generate Budget" }
            if let Some(err) = error() {
                p { class: "{theme::notice(true)}", "{err}" }
            }
            if let Some(message) = message {
                div { class: "budget-result",
                    span { class: "muted", "Maximum home price" }
                    p { class: "kpi-value", "{message}" }
                }
            }
        }
    }
}

#[component]
fn BudgetField(
    label: &'static str,
    #[props(default)] hint: Option<&'static str>,
    value: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            input {
                class: "{theme::INPUT}",
                inputmode: "decimal",
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
            if let Some(hint) = hint {
                span { class: "hint", "{hint}" }
            }
        }
    }
}
