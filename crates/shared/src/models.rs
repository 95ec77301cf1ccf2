use geojson::{GeoJson, Value as Geometry};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One checked street from a daily GeoJSON file.
///
/// A street can appear as several features and a single feature can carry a
/// MultiLineString, so the renderable shape is always a list of polylines.
/// Positions are `(lon, lat)` as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetSegment {
    pub name: Option<String>,
    pub maxspeed: Option<String>,
    pub paths: Vec<Vec<(f64, f64)>>,
}

impl StreetSegment {
    /// Popup content: the street name, with the speed limit appended when
    /// the source data carries one. Unnamed segments have no popup.
    pub fn popup_label(&self) -> Option<String> {
        let name = self.name.as_ref()?;
        Some(match &self.maxspeed {
            Some(limit) => format!("{} ({} km/h)", name, limit),
            None => name.clone(),
        })
    }
}

/// The decoded contents of one per-date file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentCollection {
    pub segments: Vec<StreetSegment>,
}

impl SegmentCollection {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Decode a GeoJSON FeatureCollection.
    ///
    /// Street metadata sits OSM-style under `properties.tags`. Geometry
    /// types other than LineString/MultiLineString are skipped rather than
    /// rejected — the exports occasionally contain stray points.
    pub fn from_geojson(input: &str) -> Result<Self, String> {
        let geojson: GeoJson = input
            .parse()
            .map_err(|e| format!("Invalid GeoJSON: {}", e))?;

        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            other => {
                return Err(format!(
                    "Expected a FeatureCollection, got {}",
                    geojson_kind(&other)
                ))
            }
        };

        let mut segments = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            let tags = feature
                .properties
                .as_ref()
                .and_then(|props| props.get("tags"));
            let name = tags
                .and_then(|t| t.get("name"))
                .and_then(JsonValue::as_str)
                .map(str::to_string);
            let maxspeed = tags.and_then(|t| t.get("maxspeed")).and_then(tag_text);

            let paths = match feature.geometry {
                Some(geometry) => match geometry.value {
                    Geometry::LineString(line) => vec![positions(&line)],
                    Geometry::MultiLineString(lines) => {
                        lines.iter().map(|line| positions(line)).collect()
                    }
                    _ => continue,
                },
                None => continue,
            };

            segments.push(StreetSegment {
                name,
                maxspeed,
                paths,
            });
        }

        Ok(SegmentCollection { segments })
    }
}

/// OSM tag values are usually strings but numbers slip into some exports.
fn tag_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn positions(line: &[Vec<f64>]) -> Vec<(f64, f64)> {
    line.iter()
        .filter(|p| p.len() >= 2)
        .map(|p| (p[0], p[1]))
        .collect()
}

fn geojson_kind(geojson: &GeoJson) -> &'static str {
    match geojson {
        GeoJson::Geometry(_) => "a bare geometry",
        GeoJson::Feature(_) => "a single feature",
        GeoJson::FeatureCollection(_) => "a FeatureCollection",
    }
}
