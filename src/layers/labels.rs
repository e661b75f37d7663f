use serde::Serialize;

use crate::domain::normalize_longitude;

/// Values closer to zero than this (about a millimetre) get the
/// north/east hemisphere letter.
const ZERO_TOLERANCE: f64 = 1e-8;

/// Precision of a grid label, chosen from the line spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    /// `N 52°`
    Degrees,
    /// `N 51°30'`
    DegreesMinutes,
    /// `N 51°30'15"`
    DegreesMinutesSeconds,
}

impl LabelFormat {
    pub fn for_spacing(spacing: f64) -> Self {
        if spacing < 1.0 / 60.0 {
            LabelFormat::DegreesMinutesSeconds
        } else if spacing < 1.0 {
            LabelFormat::DegreesMinutes
        } else {
            LabelFormat::Degrees
        }
    }

    /// Format an angle with the hemisphere letters for positive and
    /// negative values.
    ///
    /// The magnitude is rounded to whole arc-seconds first and then split
    /// into degrees, minutes and seconds, so the degree part is truncated
    /// from that rounded value.
    pub fn format(&self, value: f64, positive: char, negative: char) -> String {
        let (hemisphere, magnitude) = if value < -ZERO_TOLERANCE {
            (negative, -value)
        } else {
            (positive, value.abs())
        };

        let seconds = (magnitude * 3600.0).round() as i64;
        let (deg, min, sec) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);

        match self {
            LabelFormat::Degrees => format!("{hemisphere} {deg}°"),
            LabelFormat::DegreesMinutes => format!("{hemisphere} {deg}°{min:02}'"),
            LabelFormat::DegreesMinutesSeconds => {
                format!("{hemisphere} {deg}°{min:02}'{sec:02}\"")
            }
        }
    }
}

pub fn latitude_label(latitude: f64, format: LabelFormat) -> String {
    format.format(latitude, 'N', 'S')
}

/// Longitude label; the value is normalized into (-180, 180] first.
pub fn longitude_label(longitude: f64, format: LabelFormat) -> String {
    format.format(normalize_longitude(longitude), 'E', 'W')
}
