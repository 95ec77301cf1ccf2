//! Web Mercator math for the slippy-map view.
//!
//! All conversions work in "world pixels": the full map at zoom `z` is a
//! square of `256 * 2^z` pixels. Everything here is pure so it can be unit
//! tested without a DOM.

pub const TILE_SIZE: f64 = 256.0;

pub const MIN_ZOOM: u8 = 12;
pub const MAX_ZOOM: u8 = 18;
pub const INITIAL_ZOOM: u8 = 12;

/// Initial view over the Essen city center.
pub const CENTER_LAT: f64 = 51.457087;
pub const CENTER_LON: f64 = 7.011429;

// Max bounds for panning: the city area covered by the data set.
pub const BOUND_SOUTH: f64 = 51.291124;
pub const BOUND_WEST: f64 = 6.405716;
pub const BOUND_NORTH: f64 = 51.60693;
pub const BOUND_EAST: f64 = 7.630692;

const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Side length of the world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom)
}

/// Project `(lat, lon)` to world pixels at `zoom`.
pub fn geo_to_world(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let x = (lon + 180.0) / 360.0 * size;
    let lat_rad = lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse projection: world pixels at `zoom` back to `(lat, lon)`.
pub fn world_to_geo(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    (lat, lon)
}

/// Keep the view center inside the covered city area.
pub fn clamp_center(lat: f64, lon: f64) -> (f64, f64) {
    (
        lat.clamp(BOUND_SOUTH, BOUND_NORTH),
        lon.clamp(BOUND_WEST, BOUND_EAST),
    )
}

/// World-pixel position of the viewport's top-left corner.
pub fn viewport_origin(lat: f64, lon: f64, zoom: u8, width: f64, height: f64) -> (f64, f64) {
    let (cx, cy) = geo_to_world(lat, lon, zoom);
    (cx - width / 2.0, cy - height / 2.0)
}

/// New center after dragging the map by `(dx, dy)` screen pixels.
pub fn pan(lat: f64, lon: f64, zoom: u8, dx: f64, dy: f64) -> (f64, f64) {
    let (cx, cy) = geo_to_world(lat, lon, zoom);
    let (new_lat, new_lon) = world_to_geo(cx - dx, cy - dy, zoom);
    clamp_center(new_lat, new_lon)
}

/// New center after changing zoom so the point under the cursor stays put.
#[allow(clippy::too_many_arguments)]
pub fn zoom_at_cursor(
    lat: f64,
    lon: f64,
    old_zoom: u8,
    new_zoom: u8,
    cursor_x: f64,
    cursor_y: f64,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let (ox, oy) = viewport_origin(lat, lon, old_zoom, width, height);
    let scale = world_size(new_zoom) / world_size(old_zoom);
    let cursor_world_x = (ox + cursor_x) * scale;
    let cursor_world_y = (oy + cursor_y) * scale;
    let new_cx = cursor_world_x - cursor_x + width / 2.0;
    let new_cy = cursor_world_y - cursor_y + height / 2.0;
    let (new_lat, new_lon) = world_to_geo(new_cx, new_cy, new_zoom);
    clamp_center(new_lat, new_lon)
}

/// One raster tile with its on-screen placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    pub left: f64,
    pub top: f64,
}

/// Tiles covering a `width`×`height` viewport centered on `(lat, lon)`.
pub fn visible_tiles(lat: f64, lon: f64, zoom: u8, width: f64, height: f64) -> Vec<TilePlacement> {
    let (ox, oy) = viewport_origin(lat, lon, zoom, width, height);
    let max_index = (1u32 << zoom) - 1;

    let first_col = (ox / TILE_SIZE).floor().max(0.0) as u32;
    let last_col = (((ox + width) / TILE_SIZE).floor().max(0.0) as u32).min(max_index);
    let first_row = (oy / TILE_SIZE).floor().max(0.0) as u32;
    let last_row = (((oy + height) / TILE_SIZE).floor().max(0.0) as u32).min(max_index);

    let mut tiles = Vec::new();
    for x in first_col..=last_col {
        for y in first_row..=last_row {
            tiles.push(TilePlacement {
                x,
                y,
                z: zoom,
                left: f64::from(x) * TILE_SIZE - ox,
                top: f64::from(y) * TILE_SIZE - oy,
            });
        }
    }
    tiles
}

/// OSM raster tile URL, rotating through the mirror subdomains.
pub fn tile_url(x: u32, y: u32, z: u8) -> String {
    let sub = TILE_SUBDOMAINS[((x + y) % TILE_SUBDOMAINS.len() as u32) as usize];
    format!("https://{}.tile.openstreetmap.org/{}/{}/{}.png", sub, z, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size() {
        assert!((world_size(0) - 256.0).abs() < 1e-9);
        assert!((world_size(12) - 256.0 * 4096.0).abs() < 1e-9);
    }

    #[test]
    fn test_null_island_is_world_center() {
        let (x, y) = geo_to_world(0.0, 0.0, 0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_geo_world_roundtrip() {
        let (x, y) = geo_to_world(CENTER_LAT, CENTER_LON, 12);
        let (lat, lon) = world_to_geo(x, y, 12);
        assert!((lat - CENTER_LAT).abs() < 1e-9);
        assert!((lon - CENTER_LON).abs() < 1e-9);
    }

    #[test]
    fn test_essen_quadrant() {
        // Northern hemisphere, east of Greenwich.
        let (x, y) = geo_to_world(CENTER_LAT, CENTER_LON, 12);
        assert!(x > world_size(12) / 2.0);
        assert!(y < world_size(12) / 2.0);
    }

    #[test]
    fn test_clamp_center_inside_bounds_is_identity() {
        let (lat, lon) = clamp_center(CENTER_LAT, CENTER_LON);
        assert!((lat - CENTER_LAT).abs() < 1e-9);
        assert!((lon - CENTER_LON).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_center_outside_bounds() {
        let (lat, lon) = clamp_center(52.5, 13.4); // Berlin
        assert!((lat - BOUND_NORTH).abs() < 1e-9);
        assert!((lon - BOUND_EAST).abs() < 1e-9);
    }

    #[test]
    fn test_pan_roundtrip() {
        let (lat, lon) = pan(CENTER_LAT, CENTER_LON, 14, 120.0, -80.0);
        let (lat, lon) = pan(lat, lon, 14, -120.0, 80.0);
        assert!((lat - CENTER_LAT).abs() < 1e-9);
        assert!((lon - CENTER_LON).abs() < 1e-9);
    }

    #[test]
    fn test_pan_direction() {
        // Dragging the map to the right moves the center west.
        let (_, lon) = pan(CENTER_LAT, CENTER_LON, 14, 100.0, 0.0);
        assert!(lon < CENTER_LON);
    }

    #[test]
    fn test_zoom_at_screen_center_keeps_center() {
        let (lat, lon) =
            zoom_at_cursor(CENTER_LAT, CENTER_LON, 12, 13, 480.0, 320.0, 960.0, 640.0);
        assert!((lat - CENTER_LAT).abs() < 1e-6);
        assert!((lon - CENTER_LON).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_at_cursor_keeps_cursor_point() {
        let (w, h) = (960.0, 640.0);
        let (cursor_x, cursor_y) = (200.0, 500.0);

        // Geographic point under the cursor before zooming
        let (ox, oy) = viewport_origin(CENTER_LAT, CENTER_LON, 12, w, h);
        let before = world_to_geo(ox + cursor_x, oy + cursor_y, 12);

        let (lat, lon) =
            zoom_at_cursor(CENTER_LAT, CENTER_LON, 12, 13, cursor_x, cursor_y, w, h);
        let (ox, oy) = viewport_origin(lat, lon, 13, w, h);
        let after = world_to_geo(ox + cursor_x, oy + cursor_y, 13);

        assert!((before.0 - after.0).abs() < 1e-6);
        assert!((before.1 - after.1).abs() < 1e-6);
    }

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let tiles = visible_tiles(CENTER_LAT, CENTER_LON, 12, 512.0, 512.0);
        // A 512x512 viewport needs 2-3 tiles per axis.
        assert!(tiles.len() >= 4 && tiles.len() <= 9);

        // Placements must actually cover the viewport corners.
        assert!(tiles.iter().any(|t| t.left <= 0.0 && t.top <= 0.0));
        assert!(tiles
            .iter()
            .any(|t| t.left + TILE_SIZE >= 512.0 && t.top + TILE_SIZE >= 512.0));
    }

    #[test]
    fn test_visible_tiles_align_to_grid() {
        let tiles = visible_tiles(CENTER_LAT, CENTER_LON, 13, 800.0, 600.0);
        let first = tiles[0];
        for tile in &tiles {
            let dx = (f64::from(tile.x) - f64::from(first.x)) * TILE_SIZE;
            assert!((tile.left - first.left - dx).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tile_url_format() {
        let url = tile_url(2105, 1346, 12);
        assert!(url.starts_with("https://"));
        assert!(url.contains(".tile.openstreetmap.org"));
        assert!(url.ends_with("/12/2105/1346.png"));
    }

    #[test]
    fn test_tile_url_subdomain_rotation() {
        assert!(tile_url(0, 0, 12).starts_with("https://a."));
        assert!(tile_url(1, 0, 12).starts_with("https://b."));
        assert!(tile_url(1, 1, 12).starts_with("https://c."));
        assert!(tile_url(3, 0, 12).starts_with("https://a."));
    }
}
