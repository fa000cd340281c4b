//! GeoJSON loaders for the basemap and airport layers

use std::fs;
use std::path::Path;

use geojson::GeoJson;
use thiserror::Error;
use tracing::{debug, warn};

use super::{GeoPoint, PolyShape};

/// Errors surfaced to the host before the renderer is constructed
#[derive(Debug, Error)]
pub enum GeoDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: Box<geojson::Error>,
    },

    #[error("no polygon or line features in {0}")]
    NoOutlines(String),

    #[error("no point features in {0}")]
    NoPoints(String),
}

fn read_geojson(path: &Path) -> Result<GeoJson, GeoDataError> {
    let text = fs::read_to_string(path).map_err(|source| GeoDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    text.parse::<GeoJson>().map_err(|source| GeoDataError::Parse {
        path: path.display().to_string(),
        source: Box::new(source),
    })
}

/// Flatten a GeoJson document into geo-types geometries, skipping features
/// that carry no geometry.
fn geometries(geojson: GeoJson) -> Vec<geo_types::Geometry<f64>> {
    let mut out = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Some(geom) = feature.geometry {
                    if let Ok(g) = geo_types::Geometry::<f64>::try_from(&geom) {
                        out.push(g);
                    }
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geom) = feature.geometry {
                if let Ok(g) = geo_types::Geometry::<f64>::try_from(&geom) {
                    out.push(g);
                }
            }
        }
        GeoJson::Geometry(geom) => {
            if let Ok(g) = geo_types::Geometry::<f64>::try_from(&geom) {
                out.push(g);
            }
        }
    }
    out
}

fn collect_outlines(geom: geo_types::Geometry<f64>, out: &mut Vec<PolyShape>) {
    use geo_types::Geometry::*;
    match geom {
        Polygon(p) => {
            let vertices: Vec<(f64, f64)> = p.exterior().coords().map(|c| (c.x, c.y)).collect();
            if vertices.len() >= 2 {
                out.push(PolyShape::new(vertices));
            }
        }
        MultiPolygon(mp) => {
            for p in mp {
                collect_outlines(Polygon(p), out);
            }
        }
        LineString(ls) => {
            let vertices: Vec<(f64, f64)> = ls.coords().map(|c| (c.x, c.y)).collect();
            if vertices.len() >= 2 {
                out.push(PolyShape::new(vertices));
            }
        }
        MultiLineString(mls) => {
            for ls in mls {
                collect_outlines(LineString(ls), out);
            }
        }
        GeometryCollection(gc) => {
            for g in gc {
                collect_outlines(g, out);
            }
        }
        _ => {}
    }
}

fn collect_points(geom: geo_types::Geometry<f64>, out: &mut Vec<GeoPoint>) {
    use geo_types::Geometry::*;
    match geom {
        Point(p) => out.push(GeoPoint { x: p.x(), y: p.y() }),
        MultiPoint(mp) => {
            for p in mp {
                out.push(GeoPoint { x: p.x(), y: p.y() });
            }
        }
        GeometryCollection(gc) => {
            for g in gc {
                collect_points(g, out);
            }
        }
        _ => {}
    }
}

/// Load boundary/coastline outlines from a GeoJSON file.
pub fn load_basemap(path: &Path) -> Result<Vec<PolyShape>, GeoDataError> {
    let geojson = read_geojson(path)?;

    let mut polygons = Vec::new();
    for geom in geometries(geojson) {
        collect_outlines(geom, &mut polygons);
    }

    if polygons.is_empty() {
        return Err(GeoDataError::NoOutlines(path.display().to_string()));
    }

    debug!("Loaded {} outlines from {}", polygons.len(), path.display());
    Ok(polygons)
}

/// Load airport point features from a GeoJSON file.
pub fn load_airports(path: &Path) -> Result<Vec<GeoPoint>, GeoDataError> {
    let geojson = read_geojson(path)?;

    let mut points = Vec::new();
    for geom in geometries(geojson) {
        collect_points(geom, &mut points);
    }

    if points.is_empty() {
        warn!("No point features in {}", path.display());
        return Err(GeoDataError::NoPoints(path.display().to_string()));
    }

    debug!("Loaded {} airports from {}", points.len(), path.display());
    Ok(points)
}
