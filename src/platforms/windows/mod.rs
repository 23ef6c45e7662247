//! The Windows implementation of the display backend, on top of the
//! classic display-settings API (`EnumDisplayDevices`, `EnumDisplaySettings`
//! and `ChangeDisplaySettingsEx`).

use winsafe::{GmidxEnum, co};

use crate::backend::{DisplayBackend, interpret_apply};
use crate::error::{Result, SettingsError};
use crate::settings::DisplayMode;
use crate::types::{Device, DispChange, Field, FieldSet, Frequency, Orientation, Resolution};

/// Talks to the live display configuration of the current session
#[derive(Debug, Default)]
pub struct WindowsBackend;

impl WindowsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayBackend for WindowsBackend {
    fn device_at(&self, position: usize) -> Result<Option<Device>> {
        let mut device = winsafe::DISPLAY_DEVICE::default();
        match winsafe::EnumDisplayDevices(None, position as u32, &mut device, co::EDD::NoValue) {
            Ok(true) => Ok(Some(Device::Named(device.DeviceName()))),
            // An "actual false" marks the end of the enumeration.
            Ok(false) => Ok(None),
            Err(err) => Err(SettingsError::EnumerationFailed(err.to_string())),
        }
    }

    fn current_mode(&self, device: &Device) -> Result<DisplayMode> {
        let mut devmode = winsafe::DEVMODE::default();
        let reported = winsafe::EnumDisplaySettings(
            device.name(),
            GmidxEnum::Enum(co::ENUM_SETTINGS::CURRENT),
            &mut devmode,
        )
        .map_err(|err| SettingsError::ModeQueryFailed {
            device: device.clone(),
            reason: err.to_string(),
        })?;
        if !reported {
            // An "actual false" leaves the DEVMODE zeroed; a 0x0 mode must
            // never reach the ledger.
            return Err(SettingsError::ModeQueryFailed {
                device: device.clone(),
                reason: "the driver reported no current mode".to_string(),
            });
        }

        Ok(DisplayMode {
            resolution: Resolution::new(devmode.dmPelsWidth, devmode.dmPelsHeight),
            frequency: Frequency::new(devmode.dmDisplayFrequency),
            orientation: orientation_from_winsafe(devmode.dmDisplayOrientation()),
            // The OS reports every attribute of the active mode.
            fields: FieldSet::all(),
        })
    }

    fn apply_mode(&self, device: &Device, mode: &DisplayMode) -> Result {
        let mut devmode = winsafe::DEVMODE::default();

        if mode.fields.contains(Field::Resolution) {
            devmode.dmPelsWidth = mode.resolution.width;
            devmode.dmPelsHeight = mode.resolution.height;
            devmode.dmFields |= co::DM::PELSWIDTH | co::DM::PELSHEIGHT;
        }
        if mode.fields.contains(Field::Orientation) {
            devmode.set_dmDisplayOrientation(orientation_to_winsafe(mode.orientation));
            devmode.dmFields |= co::DM::DISPLAYORIENTATION;
        }
        if mode.fields.contains(Field::RefreshRate) {
            devmode.dmDisplayFrequency = mode.frequency.0;
            devmode.dmFields |= co::DM::DISPLAYFREQUENCY;
        }

        let code = match winsafe::ChangeDisplaySettingsEx(
            device.name(),
            Some(&mut devmode),
            co::CDS::UPDATEREGISTRY,
        ) {
            Ok(change) => disp_change_from_winsafe(change),
            Err(change) => disp_change_from_winsafe(change),
        };

        interpret_apply(device, code)
    }
}

fn orientation_from_winsafe(dmdo: co::DMDO) -> Orientation {
    match dmdo {
        co::DMDO::DEFAULT => Orientation::Landscape,
        co::DMDO::D90 => Orientation::ReversePortrait,
        co::DMDO::D180 => Orientation::ReverseLandscape,
        co::DMDO::D270 => Orientation::Portrait,
        _ => Orientation::Landscape,
    }
}

fn orientation_to_winsafe(orientation: Orientation) -> co::DMDO {
    match orientation {
        Orientation::Landscape => co::DMDO::DEFAULT,
        Orientation::ReversePortrait => co::DMDO::D90,
        Orientation::ReverseLandscape => co::DMDO::D180,
        Orientation::Portrait => co::DMDO::D270,
    }
}

fn disp_change_from_winsafe(change: co::DISP_CHANGE) -> DispChange {
    match change {
        co::DISP_CHANGE::SUCCESSFUL => DispChange::Successful,
        co::DISP_CHANGE::RESTART => DispChange::Restart,
        co::DISP_CHANGE::FAILED => DispChange::Failed,
        co::DISP_CHANGE::BADMODE => DispChange::BadMode,
        co::DISP_CHANGE::NOTUPDATED => DispChange::NotUpdated,
        co::DISP_CHANGE::BADFLAGS => DispChange::BadFlags,
        co::DISP_CHANGE::BADPARAM => DispChange::BadParam,
        co::DISP_CHANGE::BADDUALVIEW => DispChange::BadDualView,
        _ => DispChange::Failed,
    }
}
