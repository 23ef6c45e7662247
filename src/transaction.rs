use crate::backend::DisplayBackend;
use crate::error::{Result, SettingsError};
use crate::settings::{ChangeRequest, MonitorSetting};

/// One all-monitors-or-rollback settings change.
///
/// A run walks enumerate -> snapshot -> apply: every target's current mode
/// is captured into the ledger before anything is mutated, and on the first
/// apply failure every ledger entry's original mode is re-submitted in
/// ledger order (best-effort). The ledger lives for the duration of the run
/// and is never mutated after the snapshot phase.
pub struct Transaction<'a, B: DisplayBackend> {
    backend: &'a B,
    ledger: Vec<MonitorSetting>,
}

impl<'a, B: DisplayBackend> Transaction<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            ledger: Vec::new(),
        }
    }

    /// The original modes captured by the last `run`, in apply order.
    pub fn ledger(&self) -> &[MonitorSetting] {
        &self.ledger
    }

    /// Applies `request` to every target it names.
    ///
    /// Either every target ends up in its new mode, or every target that was
    /// already mutated has had its original mode re-submitted. Rollback is
    /// best-effort: a device that also fails to restore is logged and left
    /// as-is, and the error reported is still the apply failure.
    pub fn run(&mut self, request: &ChangeRequest) -> Result {
        let targets = self.backend.resolve_targets(request.monitors())?;
        if targets.is_empty() {
            return Err(SettingsError::NoMonitorsFound);
        }

        // Snapshot phase: any failure here aborts before a single device
        // has been touched, so there is nothing to roll back yet.
        self.ledger.clear();
        for device in targets {
            let mode = self.backend.current_mode(&device)?;
            log::debug!("{}: captured {}", device, mode);
            self.ledger.push(MonitorSetting { device, mode });
        }

        for setting in &self.ledger {
            let new_mode = setting.mode.transformed(request);
            log::debug!("{}: applying {}", setting.device, new_mode);
            if let Err(err) = self.backend.apply_mode(&setting.device, &new_mode) {
                log::error!("{}", err);
                self.rollback();
                return Err(err);
            }
        }

        log::debug!("All {} target(s) committed", self.ledger.len());
        Ok(())
    }

    /// Re-submits every ledger entry's original mode, in ledger order.
    fn rollback(&self) {
        for setting in &self.ledger {
            log::debug!("{}: rolling back to {}", setting.device, setting.mode);
            if let Err(err) = self.backend.apply_mode(&setting.device, &setting.mode) {
                log::error!("Rollback failed for {}: {}", setting.device, err);
            }
        }
    }

    /// See [`revert_all`].
    pub fn revert_all(&self) {
        revert_all(self.backend);
    }
}

/// Re-asserts the currently reported mode of every attached display.
///
/// This is a stateless, ledger-independent fallback: it does not restore a
/// prior configuration, it forces the OS to re-apply whatever each device
/// currently reports. That only acts as a "revert" when it runs right after
/// a committed change and before any other mutation. Per-device failures
/// are logged and swallowed; this never fails the overall run.
pub fn revert_all<B: DisplayBackend>(backend: &B) {
    for device in backend.attached_devices() {
        let device = match device {
            Ok(device) => device,
            Err(err) => {
                log::error!("Error during revert: {}", err);
                return;
            }
        };

        match backend.current_mode(&device) {
            Ok(mode) => {
                if let Err(err) = backend.apply_mode(&device, &mode) {
                    log::error!("Error during revert of {}: {}", device, err);
                }
            }
            Err(err) => log::error!("Error during revert of {}: {}", device, err),
        }
    }
}
