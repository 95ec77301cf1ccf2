use chrono::NaiveDate;
use dioxus::prelude::*;
use tempomap_shared::dates;

/// Date picker plus previous/next day stepping.
///
/// Range enforcement sits on the native input (`min`/`max`); the step
/// buttons go through the clamping helpers so programmatic navigation
/// cannot escape the collection period either.
#[component]
pub fn DateNav(selected_date: Signal<NaiveDate>) -> Element {
    // Mutable binding for the handlers (Signal is Copy)
    let mut selected_date = selected_date;

    let value = dates::resource_key(*selected_date.read());
    let min = dates::resource_key(dates::min_date());
    let max = dates::resource_key(dates::max_date());

    rsx! {
        div { class: "date-nav",
            button {
                class: "date-step",
                "aria-label": "Vorheriger Tag",
                onclick: move |_| {
                    let current = *selected_date.read();
                    selected_date.set(dates::prev_day(current));
                },
                "\u{2039}"
            }
            input {
                r#type: "date",
                "aria-label": "Datum",
                value: "{value}",
                min: "{min}",
                max: "{max}",
                onchange: move |evt: Event<FormData>| {
                    if let Some(date) = dates::parse_key(&evt.value()) {
                        selected_date.set(dates::clamp_to_range(date));
                    }
                },
            }
            button {
                class: "date-step",
                "aria-label": "N\u{00e4}chster Tag",
                onclick: move |_| {
                    let current = *selected_date.read();
                    selected_date.set(dates::next_day(current));
                },
                "\u{203a}"
            }
        }
    }
}
