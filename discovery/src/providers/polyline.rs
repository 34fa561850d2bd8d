use common::types::geo_point::GeoPoint;
use std::fmt;

const PRECISION: f64 = 1e5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolylineError {
    pub position: usize,
}

impl fmt::Display for PolylineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid encoded polyline at byte {}", self.position)
    }
}

impl std::error::Error for PolylineError {}

/// Decodes an encoded polyline (five decimal places of precision) into the
/// ordered points it describes.
///
/// Fails on truncated input, on accumulated values that overflow and on
/// points outside ±90 latitude or ±180 longitude.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        let start = index;
        let invalid = PolylineError { position: start };
        lat = lat
            .checked_add(next_delta(bytes, &mut index)?)
            .ok_or(invalid.clone())?;
        lng = lng
            .checked_add(next_delta(bytes, &mut index)?)
            .ok_or(invalid.clone())?;
        let point = GeoPoint::new(lat as f64 / PRECISION, lng as f64 / PRECISION);
        if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
            return Err(invalid);
        }
        points.push(point);
    }
    Ok(points)
}

fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError { position: *index })?;
        if !(63..127).contains(&byte) || shift > 60 {
            return Err(PolylineError { position: *index });
        }
        let chunk = (byte - 63) as i64;
        *index += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}
