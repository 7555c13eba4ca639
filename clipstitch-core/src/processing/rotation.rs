//! Rotation metadata inspection.
//!
//! Phones record portrait clips as landscape frames plus a display-matrix
//! rotation in the stream side data. This module asks ffprobe for that side
//! data and maps it onto one of the four right-angle rotations. Inspection
//! never fails a run: anything unexpected is treated as "no rotation".

use crate::external::FfprobeExecutor;

use std::fmt;
use std::path::Path;

/// Rotation recorded for a clip, in multiples of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Rotate180,
    CounterClockwise90,
}

impl Rotation {
    /// Maps a degree value onto a rotation. Only exactly 0, 90, 180 and 270
    /// are recognised; negative or out-of-range values give `None`.
    #[must_use]
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Rotate180),
            270 => Some(Rotation::CounterClockwise90),
            _ => None,
        }
    }

    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::CounterClockwise90 => 270,
        }
    }

    /// `transpose` directions applied, in order, before scaling.
    ///
    /// 180 is two transposes of the counter-clockwise kind; together they
    /// give the net half turn the clip needs.
    #[must_use]
    pub fn transposes(self) -> &'static [u8] {
        match self {
            Rotation::None => &[],
            Rotation::Clockwise90 => &[1],
            Rotation::Rotate180 => &[2, 2],
            Rotation::CounterClockwise90 => &[2],
        }
    }

    /// The transposes rendered as a filter-graph prefix, e.g. `"transpose=1,"`.
    #[must_use]
    pub fn filter_prefix(self) -> String {
        self.transposes()
            .iter()
            .map(|direction| format!("transpose={direction},"))
            .collect()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Extracts the rotation from ffprobe's `key=value` side-data output.
///
/// Only the first `rotation` key is considered. Returns `None` when there is
/// no such key or its value is not a right angle.
#[must_use]
pub fn parse_rotation(side_data: &str) -> Option<Rotation> {
    let value = side_data
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "rotation")
        .map(|(_, value)| value.trim())?;

    let degrees = match value.parse::<i64>() {
        Ok(degrees) => degrees,
        Err(_) => {
            let float = value.parse::<f64>().ok()?;
            if !float.is_finite() || float.fract() != 0.0 {
                return None;
            }
            float as i64
        }
    };

    Rotation::from_degrees(degrees)
}

/// Queries ffprobe for the rotation of `input_path`.
///
/// Failures are logged and reported as [`Rotation::None`].
pub fn detect_rotation<P: FfprobeExecutor>(ffprobe: &P, input_path: &Path) -> Rotation {
    match ffprobe.stream_side_data(input_path) {
        Ok(side_data) => match parse_rotation(&side_data) {
            Some(rotation) => {
                log::debug!("Rotation for {}: {}", input_path.display(), rotation);
                rotation
            }
            None => {
                if side_data.contains("rotation") {
                    log::warn!(
                        "Unusable rotation metadata for {}, assuming 0°",
                        input_path.display()
                    );
                }
                Rotation::None
            }
        },
        Err(e) => {
            log::warn!(
                "Rotation inspection failed for {}, assuming 0°: {}",
                input_path.display(),
                e
            );
            Rotation::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockFfprobeExecutor;

    #[test]
    fn test_from_degrees_exact_right_angles_only() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::None));
        assert_eq!(Rotation::from_degrees(90), Some(Rotation::Clockwise90));
        assert_eq!(Rotation::from_degrees(180), Some(Rotation::Rotate180));
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::CounterClockwise90));

        assert_eq!(Rotation::from_degrees(-90), None);
        assert_eq!(Rotation::from_degrees(-180), None);
        assert_eq!(Rotation::from_degrees(360), None);
        assert_eq!(Rotation::from_degrees(450), None);
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn test_filter_prefix() {
        assert_eq!(Rotation::None.filter_prefix(), "");
        assert_eq!(Rotation::Clockwise90.filter_prefix(), "transpose=1,");
        assert_eq!(Rotation::Rotate180.filter_prefix(), "transpose=2,transpose=2,");
        assert_eq!(Rotation::CounterClockwise90.filter_prefix(), "transpose=2,");
    }

    #[test]
    fn test_parse_rotation_from_side_data() {
        let output = "side_data_type=Display Matrix\ndisplaymatrix=\n00000000:            0       65536           0\nrotation=90\n";
        assert_eq!(parse_rotation(output), Some(Rotation::Clockwise90));
    }

    #[test]
    fn test_parse_rotation_takes_first_match() {
        let output = "rotation=270\nrotation=90\n";
        assert_eq!(parse_rotation(output), Some(Rotation::CounterClockwise90));
    }

    #[test]
    fn test_parse_rotation_absent_or_garbage() {
        assert_eq!(parse_rotation(""), None);
        assert_eq!(parse_rotation("side_data_type=Display Matrix\n"), None);
        assert_eq!(parse_rotation("rotation=sideways\n"), None);
        assert_eq!(parse_rotation("rotation=12.5\n"), None);
    }

    #[test]
    fn test_parse_rotation_accepts_integral_float() {
        assert_eq!(parse_rotation("rotation=270.000000"), Some(Rotation::CounterClockwise90));
        assert_eq!(parse_rotation("rotation=-90.000000"), None);
    }

    #[test]
    fn test_parse_rotation_negative_value_is_not_a_rotation() {
        assert_eq!(parse_rotation("rotation=-90\n"), None);
        assert_eq!(parse_rotation("rotation=-270\n"), None);
    }

    #[test]
    fn test_detect_rotation_falls_back_to_none_on_failure() {
        let ffprobe = MockFfprobeExecutor::new();
        let path = Path::new("/clips/broken.mov");
        ffprobe.expect_failure(path, "Invalid data found when processing input");

        assert_eq!(detect_rotation(&ffprobe, path), Rotation::None);
        assert_eq!(detect_rotation(&ffprobe, Path::new("/clips/unknown.mov")), Rotation::None);
    }

    #[test]
    fn test_detect_rotation_reads_metadata() {
        let ffprobe = MockFfprobeExecutor::new();
        let path = Path::new("/clips/portrait.mov");
        ffprobe.expect_side_data(path, "side_data_type=Display Matrix\nrotation=180\n");

        assert_eq!(detect_rotation(&ffprobe, path), Rotation::Rotate180);
        assert_eq!(ffprobe.get_received_paths(), vec![path.to_path_buf()]);
    }

    #[test]
    fn test_detect_rotation_negative_side_data_applies_no_transpose() {
        let ffprobe = MockFfprobeExecutor::new();
        let path = Path::new("/clips/phone_portrait.mov");
        ffprobe.expect_side_data(path, "side_data_type=Display Matrix\nrotation=-90\n");

        let rotation = detect_rotation(&ffprobe, path);
        assert_eq!(rotation, Rotation::None);
        assert_eq!(rotation.filter_prefix(), "");
    }
}
