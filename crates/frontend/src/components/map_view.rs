use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use tempomap_shared::controller::LayerController;

use crate::coords;

const MAP_CONTAINER_ID: &str = "tempomap-container";

/// Drag threshold in pixels — movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Fallback viewport size used before the container is measurable.
const FALLBACK_WIDTH: f64 = 960.0;
const FALLBACK_HEIGHT: f64 = 640.0;

// --- Street stroke styling ---

const BASE_COLOR: &str = "#ff335b";
const HIGHLIGHT_COLOR: &str = "#ff0000";
const STROKE_WEIGHT: f64 = 3.0;

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Get the bounding client rect of the map container element.
fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

fn viewport_size() -> (f64, f64) {
    match container_rect() {
        Some(rect) if rect.width() > 0.0 => (rect.width(), rect.height()),
        _ => (FALLBACK_WIDTH, FALLBACK_HEIGHT),
    }
}

// ---------------------------------------------------------------------------
// Pure helpers (unit tested, no web_sys)
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// One integer zoom step per wheel event, clamped to the tile-source range.
fn step_zoom(zoom: u8, delta_y: f64) -> u8 {
    if delta_y < 0.0 {
        (zoom + 1).min(coords::MAX_ZOOM)
    } else {
        zoom.saturating_sub(1).max(coords::MIN_ZOOM)
    }
}

/// SVG `points` attribute for one polyline, projected into screen space.
fn polyline_points(path: &[(f64, f64)], origin: (f64, f64), zoom: u8) -> String {
    let mut points = String::with_capacity(path.len() * 16);
    for (lon, lat) in path {
        let (wx, wy) = coords::geo_to_world(*lat, *lon, zoom);
        if !points.is_empty() {
            points.push(' ');
        }
        points.push_str(&format!("{:.1},{:.1}", wx - origin.0, wy - origin.1));
    }
    points
}

struct RenderLine {
    segment: usize,
    points: String,
    highlighted: bool,
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(controller: Signal<LayerController>) -> Element {
    // Mutable binding for the hover handlers (Signal is Copy)
    let mut controller = controller;

    let mut center = use_signal(|| (coords::CENTER_LAT, coords::CENTER_LON));
    let mut zoom = use_signal(|| coords::INITIAL_ZOOM);
    let mut hovered = use_signal(|| None::<usize>);

    // Drag state
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start_x = use_signal(|| 0.0_f64);
    let mut drag_start_y = use_signal(|| 0.0_f64);
    let mut drag_start_center = use_signal(|| (coords::CENTER_LAT, coords::CENTER_LON));

    let (clat, clon) = *center.read();
    let cur_zoom = *zoom.read();
    let (width, height) = viewport_size();
    let origin = coords::viewport_origin(clat, clon, cur_zoom, width, height);

    let tiles = coords::visible_tiles(clat, clon, cur_zoom, width, height);

    // Project the overlay into screen space before rsx so no controller
    // borrow is held while event closures are created.
    let mut lines: Vec<RenderLine> = Vec::new();
    if let Some(overlay) = controller.read().overlay() {
        for (i, segment) in overlay.segments().iter().enumerate() {
            let highlighted = overlay.is_highlighted(i);
            for path in &segment.paths {
                lines.push(RenderLine {
                    segment: i,
                    points: polyline_points(path, origin, cur_zoom),
                    highlighted,
                });
            }
        }
    }

    let hovered_idx = *hovered.read();
    let readout = {
        let state = controller.read();
        hovered_idx
            .and_then(|i| state.overlay().and_then(|overlay| overlay.segments().get(i)))
            .and_then(|segment| segment.popup_label())
    };

    let container_class = if *is_dragging.read() {
        "map-container dragging"
    } else {
        "map-container"
    };

    let line_nodes = lines.into_iter().map(|line| {
        let RenderLine {
            segment,
            points,
            highlighted,
        } = line;
        rsx! {
            polyline {
                class: "street-line",
                points: "{points}",
                fill: "none",
                stroke: if highlighted { HIGHLIGHT_COLOR } else { BASE_COLOR },
                stroke_width: "{STROKE_WEIGHT}",
                stroke_linecap: "round",
                // Highlight the whole name group; there is deliberately no
                // mouseleave counterpart (the group stays lit until the
                // next hover).
                onmouseenter: move |_| {
                    if let Some(overlay) = controller.write().overlay_mut() {
                        overlay.hover(segment);
                    }
                    hovered.set(Some(segment));
                },
            }
        }
    });

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();

                let old_zoom = *zoom.read();
                let new_zoom = step_zoom(old_zoom, wheel_delta_y(evt.data().delta()));
                if new_zoom == old_zoom {
                    return;
                }

                let Some(rect) = container_rect() else { return };
                let client = evt.data().client_coordinates();
                let (lat, lon) = *center.read();
                let new_center = coords::zoom_at_cursor(
                    lat, lon, old_zoom, new_zoom,
                    client.x - rect.left(), client.y - rect.top(),
                    rect.width(), rect.height(),
                );
                center.set(new_center);
                zoom.set(new_zoom);
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start_x.set(client.x);
                drag_start_y.set(client.y);
                drag_start_center.set(*center.read());
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let dx = client.x - *drag_start_x.read();
                let dy = client.y - *drag_start_y.read();

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let (start_lat, start_lon) = *drag_start_center.read();
                    center.set(coords::pan(start_lat, start_lon, *zoom.read(), dx, dy));
                }
            },

            onmouseup: move |_| {
                is_dragging.set(false);
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                let old_zoom = *zoom.read();
                let new_zoom = (old_zoom + 1).min(coords::MAX_ZOOM);
                if new_zoom == old_zoom {
                    return;
                }
                let Some(rect) = container_rect() else { return };
                let client = evt.client_coordinates();
                let (lat, lon) = *center.read();
                center.set(coords::zoom_at_cursor(
                    lat, lon, old_zoom, new_zoom,
                    client.x - rect.left(), client.y - rect.top(),
                    rect.width(), rect.height(),
                ));
                zoom.set(new_zoom);
            },

            div { class: "tile-layer",
                for tile in tiles {
                    img {
                        class: "tile",
                        src: coords::tile_url(tile.x, tile.y, tile.z),
                        style: "left:{tile.left}px;top:{tile.top}px;",
                        draggable: "false",
                        alt: "",
                    }
                }
            }

            svg {
                class: "street-layer",
                width: "{width}",
                height: "{height}",
                view_box: "0 0 {width} {height}",
                {line_nodes}
            }

            // Street readout (fixed, outside the tile layer)
            if let Some(label) = readout {
                div { class: "street-readout", "{label}" }
            }

            div { class: "zoom-control",
                button {
                    "aria-label": "Zoom in",
                    onclick: move |_| {
                        let z = *zoom.read();
                        zoom.set((z + 1).min(coords::MAX_ZOOM));
                    },
                    "+"
                }
                button {
                    "aria-label": "Zoom out",
                    onclick: move |_| {
                        let z = *zoom.read();
                        zoom.set(z.saturating_sub(1).max(coords::MIN_ZOOM));
                    },
                    "\u{2212}"
                }
            }

            div { class: "attribution",
                "Daten zu Geschwindigkeitskontrollen: "
                a {
                    href: "https://www.essen.de",
                    target: "_blank",
                    "Ordnungsamt der Stadt Essen"
                }
                ". Kartendaten \u{00a9} "
                a {
                    href: "https://www.openstreetmap.org/copyright",
                    target: "_blank",
                    "OpenStreetMap contributors"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- step_zoom tests ---

    #[test]
    fn test_step_zoom_in_and_out() {
        assert_eq!(step_zoom(13, -10.0), 14);
        assert_eq!(step_zoom(13, 10.0), 12);
    }

    #[test]
    fn test_step_zoom_clamps_at_bounds() {
        assert_eq!(step_zoom(coords::MAX_ZOOM, -10.0), coords::MAX_ZOOM);
        assert_eq!(step_zoom(coords::MIN_ZOOM, 10.0), coords::MIN_ZOOM);
    }

    // --- polyline_points tests ---

    #[test]
    fn test_polyline_points_projection() {
        let path = vec![(coords::CENTER_LON, coords::CENTER_LAT)];
        let origin =
            coords::viewport_origin(coords::CENTER_LAT, coords::CENTER_LON, 12, 960.0, 640.0);
        // The viewport center must land at (480, 320).
        assert_eq!(polyline_points(&path, origin, 12), "480.0,320.0");
    }

    #[test]
    fn test_polyline_points_joins_with_spaces() {
        let path = vec![(7.0, 51.4), (7.01, 51.41), (7.02, 51.42)];
        let origin = coords::viewport_origin(51.41, 7.01, 14, 800.0, 600.0);
        let points = polyline_points(&path, origin, 14);
        assert_eq!(points.split(' ').count(), 3);
        assert!(points.split(' ').all(|pair| pair.contains(',')));
    }

    #[test]
    fn test_polyline_points_empty_path() {
        assert_eq!(polyline_points(&[], (0.0, 0.0), 12), "");
    }
}
