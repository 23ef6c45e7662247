use core::fmt;

use thiserror::Error;

use crate::types::{Device, Field, FieldSet, Frequency, Orientation, Resolution};

/// The mode of one display output at a point in time
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DisplayMode {
    pub resolution: Resolution,
    pub frequency: Frequency,
    pub orientation: Orientation,
    /// Which attributes an apply of this mode may touch
    pub fields: FieldSet,
}

impl DisplayMode {
    /// Computes the mode that results from applying `request` to this mode.
    ///
    /// Pure and deterministic. Attributes the request does not name are
    /// never touched, and re-applying the same request yields an even
    /// rotation delta, so no further dimension swap happens.
    ///
    /// The dirty-field set is rebuilt from scratch: only attributes the
    /// request names end up marked, so an apply leaves everything else to
    /// the driver.
    pub fn transformed(&self, request: &ChangeRequest) -> DisplayMode {
        let mut mode = *self;
        mode.fields = FieldSet::empty();

        if let Some(resolution) = request.resolution() {
            mode.resolution = resolution;
        }

        if let Some(orientation) = request.orientation() {
            // An odd net rotation changes which axis the driver calls
            // "width", so the pair swaps as a unit.
            let delta = self.orientation.rotation_code() + orientation.rotation_code();
            if delta % 2 == 1 {
                mode.resolution = mode.resolution.swapped();
            }
            mode.orientation = orientation;
        }

        if let Some(frequency) = request.frequency() {
            mode.frequency = frequency;
        }

        if request.resolution().is_some() || request.orientation().is_some() {
            mode.fields.insert(Field::Resolution);
        }
        if request.orientation().is_some() {
            mode.fields.insert(Field::Orientation);
        }
        if request.frequency().is_some() {
            mode.fields.insert(Field::RefreshRate);
        }

        mode
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}Hz, {}",
            self.resolution, self.frequency, self.orientation
        )
    }
}

/// Pairs a device with a mode, either as a requested state or as the
/// original snapshot held in the transaction ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSetting {
    pub device: Device,
    pub mode: DisplayMode,
}

impl fmt::Display for MonitorSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.device, self.mode)
    }
}

/// Errors raised while validating a change request
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("At least one of refresh rate, resolution or orientation must be provided")]
    NoChangesRequested,
}

/// The validated intent of one settings change.
///
/// Holds only what the caller explicitly asked for; everything absent keeps
/// its current value on every target. Construction enforces that at least
/// one of the three overrides is present and de-duplicates monitor
/// selectors (order-preserving). Selectors are 1-indexed; the index floor
/// and range are checked when they are resolved against the attached
/// devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
    frequency: Option<Frequency>,
    resolution: Option<Resolution>,
    orientation: Option<Orientation>,
    monitors: Option<Vec<usize>>,
}

impl ChangeRequest {
    pub fn new(
        frequency: Option<Frequency>,
        resolution: Option<Resolution>,
        orientation: Option<Orientation>,
        monitors: Option<Vec<usize>>,
    ) -> std::result::Result<Self, ValidationError> {
        if frequency.is_none() && resolution.is_none() && orientation.is_none() {
            return Err(ValidationError::NoChangesRequested);
        }

        let monitors = monitors
            .map(|indices| {
                let mut deduped = Vec::with_capacity(indices.len());
                for index in indices {
                    if !deduped.contains(&index) {
                        deduped.push(index);
                    }
                }
                deduped
            })
            .filter(|indices| !indices.is_empty());

        Ok(Self {
            frequency,
            resolution,
            orientation,
            monitors,
        })
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// The requested 1-indexed monitor selectors; `None` targets the
    /// primary display only
    pub fn monitors(&self) -> Option<&[usize]> {
        self.monitors.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_mode() -> DisplayMode {
        DisplayMode {
            resolution: Resolution::new(1920, 1080),
            frequency: Frequency::new(60),
            orientation: Orientation::Landscape,
            fields: FieldSet::all(),
        }
    }

    fn request(
        frequency: Option<u32>,
        resolution: Option<&str>,
        orientation: Option<Orientation>,
    ) -> ChangeRequest {
        ChangeRequest::new(
            frequency.map(Frequency::new),
            resolution.map(|s| s.parse().unwrap()),
            orientation,
            None,
        )
        .unwrap()
    }

    #[test]
    fn refresh_only_change_touches_nothing_else() {
        let original = base_mode();
        let new_mode = original.transformed(&request(Some(144), None, None));

        assert_eq!(new_mode.frequency, Frequency::new(144));
        assert_eq!(new_mode.resolution, original.resolution);
        assert_eq!(new_mode.orientation, original.orientation);

        assert!(new_mode.fields.contains(Field::RefreshRate));
        assert!(!new_mode.fields.contains(Field::Resolution));
        assert!(!new_mode.fields.contains(Field::Orientation));
    }

    #[test]
    fn odd_rotation_delta_swaps_dimensions() {
        let original = base_mode();

        // landscape (0) -> portrait (3): odd delta
        let new_mode = original.transformed(&request(None, None, Some(Orientation::Portrait)));
        assert_eq!(new_mode.resolution, Resolution::new(1080, 1920));
        assert_eq!(new_mode.orientation, Orientation::Portrait);

        // landscape (0) -> reverse_portrait (1): odd delta
        let new_mode =
            original.transformed(&request(None, None, Some(Orientation::ReversePortrait)));
        assert_eq!(new_mode.resolution, Resolution::new(1080, 1920));
    }

    #[test]
    fn even_rotation_delta_keeps_dimensions() {
        let original = base_mode();

        // landscape (0) -> reverse_landscape (2): even delta
        let new_mode =
            original.transformed(&request(None, None, Some(Orientation::ReverseLandscape)));
        assert_eq!(new_mode.resolution, Resolution::new(1920, 1080));
        assert_eq!(new_mode.orientation, Orientation::ReverseLandscape);
    }

    #[test]
    fn repeated_orientation_request_is_a_fixed_point() {
        let original = base_mode();
        let request = request(None, None, Some(Orientation::Portrait));

        let once = original.transformed(&request);
        let twice = once.transformed(&request);

        // Portrait -> portrait is an even delta; no further swap happens.
        assert_eq!(once, twice);
    }

    #[test]
    fn reapplying_never_touches_unrequested_fields() {
        let original = base_mode();
        let request = request(Some(75), Some("1280x720"), Some(Orientation::Portrait));

        let once = original.transformed(&request);
        let twice = once.transformed(&request);

        // The first pass swaps the requested resolution (odd delta); the
        // second sets it again without a swap (even delta). Everything the
        // request does not name, and the dirty mask, must not drift.
        assert_eq!(once.resolution, Resolution::new(720, 1280));
        assert_eq!(twice.resolution, Resolution::new(1280, 720));
        assert_eq!(twice.frequency, once.frequency);
        assert_eq!(twice.orientation, once.orientation);
        assert_eq!(twice.fields, once.fields);
    }

    #[test]
    fn resolution_and_orientation_swap_composes() {
        let original = base_mode();
        let new_mode =
            original.transformed(&request(None, Some("1280x720"), Some(Orientation::Portrait)));

        // The requested resolution is set first, then swapped by the odd
        // rotation delta.
        assert_eq!(new_mode.resolution, Resolution::new(720, 1280));
        assert!(new_mode.fields.contains(Field::Resolution));
        assert!(new_mode.fields.contains(Field::Orientation));
        assert!(!new_mode.fields.contains(Field::RefreshRate));
    }

    #[test]
    fn dirty_mask_is_rebuilt_from_scratch() {
        // The snapshot carries a fully-marked field set; a refresh-only
        // request must not inherit it.
        let original = base_mode();
        assert_eq!(original.fields, FieldSet::all());

        let new_mode = original.transformed(&request(Some(120), None, None));
        assert_eq!(new_mode.fields, FieldSet::from_iter([Field::RefreshRate]));
    }

    #[test]
    fn empty_request_is_rejected() {
        let result = ChangeRequest::new(None, None, None, Some(vec![1, 2]));
        assert!(matches!(result, Err(ValidationError::NoChangesRequested)));
    }

    #[test]
    fn monitor_selectors_are_deduplicated() {
        let request =
            ChangeRequest::new(Some(Frequency::new(60)), None, None, Some(vec![2, 1, 2, 1]))
                .unwrap();
        assert_eq!(request.monitors(), Some(&[2, 1][..]));
    }

    #[test]
    fn empty_monitor_list_means_primary() {
        let request =
            ChangeRequest::new(Some(Frequency::new(60)), None, None, Some(Vec::new())).unwrap();
        assert_eq!(request.monitors(), None);
    }
}
