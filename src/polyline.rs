//! Encoded polyline codec at 1e-5 precision.
//!
//! Each point is written latitude first as the signed delta from the previous
//! point, in 5-bit chunks offset by 63.

use geo_types::{Coord, LineString};

use crate::error::{malformed_polyline_error, Error};

const FACTOR: f64 = 1e5;

pub fn encode<I>(coordinates: I) -> String
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let mut encoded = String::new();
    let (mut previous_lat, mut previous_lng) = (0_i64, 0_i64);

    for coord in coordinates {
        let lat = scale(coord.y);
        let lng = scale(coord.x);

        encode_value(lat - previous_lat, &mut encoded);
        encode_value(lng - previous_lng, &mut encoded);

        previous_lat = lat;
        previous_lng = lng;
    }

    encoded
}

pub fn decode(encoded: &str) -> Result<LineString<f64>, Error> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let (mut lat, mut lng) = (0_i64, 0_i64);
    let mut coordinates = Vec::new();

    while index < bytes.len() {
        lat = lat
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or_else(|| malformed_polyline_error(index))?;
        lng = lng
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or_else(|| malformed_polyline_error(index))?;

        coordinates.push(Coord {
            x: lng as f64 / FACTOR,
            y: lat as f64 / FACTOR,
        });
    }

    Ok(LineString::from(coordinates))
}

fn scale(value: f64) -> i64 {
    (value * FACTOR).round() as i64
}

fn encode_value(value: i64, out: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };

    while value >= 0x20 {
        out.push(char::from((((value & 0x1f) | 0x20) + 63) as u8));
        value >>= 5;
    }

    out.push(char::from((value + 63) as u8));
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, Error> {
    let mut result = 0_i64;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| malformed_polyline_error(*index))?;

        // a 13th chunk would not fit in an i64
        if !(63..=126).contains(&byte) || shift > 55 {
            return Err(malformed_polyline_error(*index));
        }

        let chunk = i64::from(byte - 63);
        *index += 1;

        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
