use chrono::NaiveDate;
use dioxus::prelude::*;
use tempomap_shared::controller::{FetchOutcome, FetchPlan, LayerController};
use tempomap_shared::dates;

use crate::api;
use crate::components::date_nav::DateNav;
use crate::components::info_banner::InfoBanner;
use crate::components::map_view::MapView;

/// Today, clamped into the collection period so the app still opens on a
/// valid date years after the collection ended.
fn initial_date() -> NaiveDate {
    dates::clamp_to_range(chrono::Local::now().date_naive())
}

#[component]
pub fn Viewer() -> Element {
    let mut controller = use_signal(LayerController::new);
    let selected_date = use_signal(initial_date);

    // Runs once on mount and again on every date change, covering both the
    // initial load and user navigation with the same path. The generation
    // tag returned by select_date keeps late responses for abandoned dates
    // from touching the map.
    use_effect(move || {
        let date = *selected_date.read();
        let plan = controller.write().select_date(date);
        if let FetchPlan::Request { key, generation } = plan {
            spawn(async move {
                let outcome = match api::fetch_segments(&key).await {
                    Ok(collection) => FetchOutcome::Loaded(collection),
                    Err(_) => FetchOutcome::NoData,
                };
                controller.write().complete_fetch(generation, date, outcome);
            });
        }
    });

    let display_date = dates::format_display(*selected_date.read());

    rsx! {
        div { class: "app",
            header { class: "header",
                h1 { "Geschwindigkeitskontrollen in Essen" }
                span { class: "header-date", "{display_date}" }
                DateNav { selected_date }
            }
            InfoBanner { controller }
            MapView { controller }
        }
    }
}
