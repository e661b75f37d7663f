/// Candidate grid spacings, read as degrees, arc-minutes or arc-seconds
/// depending on the zoom level.
pub const LINE_DISTANCES: [f64; 7] = [1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0];

/// Pick a round grid spacing in degrees
///
/// # Arguments
/// * `min_line_distance` - Minimum distance between grid lines in pixels
/// * `zoom_level` - Current (continuous) zoom level
/// * `tile_size` - Pixel size of a map tile
///
/// # Returns
/// The smallest candidate spacing whose on-screen distance is at least
/// `min_line_distance`, falling back to 60 of the current unit. Below one
/// degree the candidates are taken as arc-minutes, below one arc-minute as
/// arc-seconds.
pub fn line_distance(min_line_distance: f64, zoom_level: f64, tile_size: f64) -> f64 {
    let mut min_distance = min_line_distance * 360.0 / (2f64.powf(zoom_level) * tile_size);
    let mut scale = 1.0;

    if min_distance < 1.0 {
        scale = if min_distance < 1.0 / 60.0 { 3600.0 } else { 60.0 };
        min_distance *= scale;
    }

    let candidate = LINE_DISTANCES
        .iter()
        .copied()
        .find(|&d| d >= min_distance)
        .unwrap_or(LINE_DISTANCES[LINE_DISTANCES.len() - 1]);

    candidate / scale
}
