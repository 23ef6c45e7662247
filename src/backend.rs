use crate::error::{Result, SettingsError};
use crate::settings::DisplayMode;
use crate::types::{Device, DispChange};

/// The seam between the settings transaction and the operating system.
///
/// The windows platform module provides the real implementation on top of
/// the display enumeration and settings-change calls; tests drive the
/// transaction with a scripted implementation instead.
pub trait DisplayBackend {
    /// Resolves the device attached at `position` (0-based enumeration
    /// order). `Ok(None)` marks the end of the enumeration.
    fn device_at(&self, position: usize) -> Result<Option<Device>>;

    /// Queries the active mode of a device.
    ///
    /// The returned mode carries a fully-marked field set, mirroring how the
    /// OS reports every attribute of the current mode; re-applying it
    /// restores all of them.
    fn current_mode(&self, device: &Device) -> Result<DisplayMode>;

    /// Submits a mode to the OS, persisting it in the registry. Only the
    /// attributes in the mode's field set may be touched.
    ///
    /// Implementations interpret the native result via [`interpret_apply`]
    /// so a `Restart` outcome counts as success.
    fn apply_mode(&self, device: &Device, mode: &DisplayMode) -> Result;

    /// Resolves the run's target devices from optional 1-indexed selectors.
    /// Without selectors only the primary display is targeted.
    fn resolve_targets(&self, indices: Option<&[usize]>) -> Result<Vec<Device>> {
        let Some(indices) = indices else {
            return Ok(vec![Device::Primary]);
        };

        let mut targets = Vec::with_capacity(indices.len());
        for &index in indices {
            if index < 1 {
                return Err(SettingsError::InvalidMonitorIndex(index));
            }
            let device = self
                .device_at(index - 1)?
                .ok_or(SettingsError::InvalidMonitorIndex(index))?;
            targets.push(device);
        }
        Ok(targets)
    }

    /// Every currently attached device, re-enumerated from the OS on each
    /// call. The enumeration stops after the first error it yields.
    fn attached_devices(&self) -> Box<dyn Iterator<Item = Result<Device>> + '_>
    where
        Self: Sized,
    {
        let mut position = 0;
        let mut done = false;
        Box::new(std::iter::from_fn(move || {
            if done {
                return None;
            }
            match self.device_at(position) {
                Ok(Some(device)) => {
                    position += 1;
                    Some(Ok(device))
                }
                Ok(None) => {
                    done = true;
                    None
                }
                Err(err) => {
                    done = true;
                    Some(Err(err))
                }
            }
        }))
    }
}

/// Interprets a native settings-change result against the fixed taxonomy.
///
/// `Restart` means the change was applied but needs a session restart; it is
/// surfaced as an informational message, not a failure.
pub fn interpret_apply(device: &Device, code: DispChange) -> Result {
    match code {
        DispChange::Successful => Ok(()),
        DispChange::Restart => {
            log::info!("{}: settings applied, but a session restart is required", device);
            Ok(())
        }
        code => Err(SettingsError::ApplyFailed {
            device: device.clone(),
            code,
        }),
    }
}
