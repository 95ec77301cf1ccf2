use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tempomap_shared::controller::LayerController;

/// Length of the collapse transition; the node unmounts after it finishes.
const COLLAPSE_MS: u32 = 500;

/// Warning banner for dates without data (weekends and missing files).
///
/// Expands when the controller turns it on and collapses before
/// unmounting when it turns off. Showing an already-open banner or hiding
/// an already-hidden one changes nothing.
#[component]
pub fn InfoBanner(controller: Signal<LayerController>) -> Element {
    // Keeps the node in the DOM while the collapse transition plays.
    let mut mounted = use_signal(|| false);

    use_effect(move || {
        if controller.read().banner_visible() {
            mounted.set(true);
        } else if *mounted.peek() {
            spawn(async move {
                TimeoutFuture::new(COLLAPSE_MS).await;
                if !controller.peek().banner_visible() {
                    mounted.set(false);
                }
            });
        }
    });

    let visible = controller.read().banner_visible();
    if !visible && !*mounted.read() {
        return rsx! {};
    }

    let class = if visible {
        "info-banner is-open"
    } else {
        "info-banner"
    };

    rsx! {
        div { class: "{class}", role: "status",
            p {
                strong { "Keine Daten f\u{00fc}r diesen Tag." }
                " An Wochenenden finden keine Geschwindigkeitskontrollen statt, "
                "und f\u{00fc}r einzelne Werktage wurde keine Liste ver\u{00f6}ffentlicht."
            }
        }
    }
}
