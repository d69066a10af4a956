/// `"850m"` below one kilometre, `"1.2km"` from there on
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

/// Whole minutes, switching to hours past the hour: `"25분"`, `"1시간 5분"`
pub fn format_time(seconds: f64) -> String {
    let minutes = (seconds.max(0.0) / 60.0).floor() as u64;
    if minutes < 60 {
        return format!("{}분", minutes);
    }
    format!("{}시간 {}분", minutes / 60, minutes % 60)
}
