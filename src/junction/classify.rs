use super::{Direction, Vec2};

/// Angles beyond this (in degrees, either side) count as a sharp turn.
pub const SHARP_TURN_THRESHOLD_DEG: f32 = 180.0 - 50.1;
/// Slightly above the base game's 30 degrees.
pub const TURN_THRESHOLD_DEG: f32 = 30.1;

/// Buckets a signed turn angle in degrees. Negative angles turn left.
pub fn classify_angle(angle_deg: f32) -> Direction {
    if angle_deg < -SHARP_TURN_THRESHOLD_DEG {
        Direction::SharpLeft
    } else if angle_deg <= -TURN_THRESHOLD_DEG {
        Direction::Left
    } else if angle_deg > SHARP_TURN_THRESHOLD_DEG {
        Direction::SharpRight
    } else if angle_deg >= TURN_THRESHOLD_DEG {
        Direction::Right
    } else {
        Direction::Forward
    }
}

/// Signed angle in degrees from `reference` to `outgoing`, in (-180, 180].
pub fn signed_angle_deg(outgoing: &Vec2, reference: &Vec2) -> f32 {
    let dot = outgoing.dot(reference);
    let det = outgoing.x * reference.y - outgoing.y * reference.x;
    det.atan2(dot).to_degrees()
}

pub fn classify_vectors(outgoing: &Vec2, reference: &Vec2) -> Direction {
    classify_angle(signed_angle_deg(outgoing, reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_edges() {
        assert_eq!(classify_angle(0.0), Direction::Forward);
        assert_eq!(classify_angle(30.0), Direction::Forward);
        assert_eq!(classify_angle(30.1), Direction::Right);
        assert_eq!(classify_angle(-30.1), Direction::Left);
        assert_eq!(classify_angle(129.9), Direction::Right);
        assert_eq!(classify_angle(130.0), Direction::SharpRight);
        assert_eq!(classify_angle(-129.9), Direction::Left);
        assert_eq!(classify_angle(-130.0), Direction::SharpLeft);
    }

    #[test]
    fn test_vector_angles() {
        let north = Vec2::new(0.0, 1.0);
        assert_eq!(classify_vectors(&north, &north), Direction::Forward);
        assert_eq!(classify_vectors(&Vec2::new(1.0, 0.0), &north), Direction::Right);
        assert_eq!(classify_vectors(&Vec2::new(-1.0, 0.0), &north), Direction::Left);
        assert_eq!(classify_vectors(&Vec2::new(0.0, -1.0), &north), Direction::SharpRight);
        assert_eq!(classify_vectors(&Vec2::new(-1.0, -4.0), &north), Direction::SharpLeft);
    }
}
