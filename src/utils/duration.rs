//! Duration input encoding and formatting

/// Upper bound of the rotary dial input path, in seconds (30 minutes)
pub const MAX_DIAL_SECONDS: i64 = 1800;

/// Dial values snap to multiples of this interval (5 minutes)
pub const SNAP_INTERVAL: i64 = 300;

/// Dial values within this many seconds of a snap boundary are snapped
pub const SNAP_THRESHOLD: i64 = 30;

/// Compose independent minutes/seconds fields into total seconds.
///
/// Minutes are unbounded; seconds are conventionally 0-59 but not enforced.
/// The total saturates rather than overflowing, since both fields arrive
/// unvalidated from the request body. The result may be non-positive,
/// which `configure` rejects.
pub fn compose(minutes: i64, seconds: i64) -> i64 {
    minutes.saturating_mul(60).saturating_add(seconds)
}

/// Encode a raw rotary dial value: clamp to `[0, MAX_DIAL_SECONDS]` and
/// snap to the nearest 5-minute boundary when within the snap threshold.
///
/// Snapping applies only to this input path, never to direct field entry.
pub fn snap_dial(raw: i64) -> i64 {
    let value = raw.clamp(0, MAX_DIAL_SECONDS);
    let remainder = value % SNAP_INTERVAL;

    if remainder < SNAP_THRESHOLD {
        value - remainder
    } else if remainder > SNAP_INTERVAL - SNAP_THRESHOLD {
        value + (SNAP_INTERVAL - remainder)
    } else {
        value
    }
}

/// Format remaining seconds as a `m:ss` clock display
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Describe a duration the way the set-timer confirmation phrases it
pub fn describe(seconds: u64) -> String {
    format!("{} minutes {} seconds", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_builds_total_seconds() {
        assert_eq!(compose(2, 30), 150);
        assert_eq!(compose(0, 0), 0);
        assert_eq!(compose(0, 90), 90);
        assert_eq!(compose(35, 0), 2100);
    }

    #[test]
    fn compose_saturates_instead_of_overflowing() {
        assert_eq!(compose(i64::MAX, 0), i64::MAX);
        assert_eq!(compose(i64::MAX, i64::MAX), i64::MAX);
        // Saturated negatives still fail the configure guard downstream
        assert_eq!(compose(i64::MIN, -1), i64::MIN);
    }

    #[test]
    fn dial_snaps_near_boundary() {
        // Within 30s below the 300s boundary
        assert_eq!(snap_dial(290), 300);
        assert_eq!(snap_dial(271), 300);
        // Within 30s above the boundary
        assert_eq!(snap_dial(310), 300);
        assert_eq!(snap_dial(629), 600);
        // Exactly on a boundary stays put
        assert_eq!(snap_dial(600), 600);
    }

    #[test]
    fn dial_does_not_snap_outside_threshold() {
        // 150 is equidistant from 0 and 300, outside both thresholds
        assert_eq!(snap_dial(150), 150);
        assert_eq!(snap_dial(30), 30);
        assert_eq!(snap_dial(270), 270);
    }

    #[test]
    fn dial_clamps_to_range() {
        assert_eq!(snap_dial(-10), 0);
        assert_eq!(snap_dial(5000), MAX_DIAL_SECONDS);
        // Clamped maximum is already a snap boundary
        assert_eq!(snap_dial(1799), 1800);
    }

    #[test]
    fn clock_formatting_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn describe_splits_minutes_and_seconds() {
        assert_eq!(describe(150), "2 minutes 30 seconds");
        assert_eq!(describe(45), "0 minutes 45 seconds");
    }
}
