//! Static classification tables: a continuous value in, a display label
//! (plus UI color token) out. Pure and total, no I/O.

/// A classification label with the color token the UI renders it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub label: &'static str,
    pub color: &'static str,
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass label for a wind bearing in degrees.
///
/// Sectors are 22.5° wide and centered on each label starting at north,
/// so 360 (and any bearing outside [0, 360)) wraps back around.
pub fn wind_direction_label(degrees: f64) -> &'static str {
    let sector = (degrees / 22.5).round().rem_euclid(16.0) as usize;
    COMPASS_POINTS[sector % 16]
}

/// UV index banding. Upper band edges are inclusive.
pub fn uv_level(uv: f64) -> Level {
    if uv <= 2.0 {
        Level { label: "Low", color: "#00e400" }
    } else if uv <= 5.0 {
        Level { label: "Moderate", color: "#ffff00" }
    } else if uv <= 7.0 {
        Level { label: "High", color: "#ff7e00" }
    } else if uv <= 10.0 {
        Level { label: "Very High", color: "#ff0000" }
    } else {
        Level { label: "Extreme", color: "#8b00ff" }
    }
}

/// Air quality banding over the provider's 1–5 categorical index
/// (1 = best). This is not the 0–500 numeric AQI scale.
pub fn air_quality_level(aqi: u8) -> Level {
    match aqi {
        1 => Level { label: "Good", color: "#00e400" },
        2 => Level { label: "Fair", color: "#ffff00" },
        3 => Level { label: "Moderate", color: "#ff7e00" },
        4 => Level { label: "Poor", color: "#ff0000" },
        _ => Level { label: "Very Poor", color: "#8b00ff" },
    }
}
