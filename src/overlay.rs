
use std::process::Command;

/// FPS overlay lifecycle. Not a sysfs tunable: `fps_info` switches a
/// service on and off instead of writing a node.
pub trait OverlayControl {
    fn start(&self);
    fn stop(&self);
}

const OVERLAY_SERVICE: &str = "fpsinfod";

/// Drives the overlay through the init system's `start`/`stop` commands.
pub struct FpsOverlayService;

impl OverlayControl for FpsOverlayService {
    fn start(&self) {
        run_ctl("start");
    }

    fn stop(&self) {
        run_ctl("stop");
    }
}

fn run_ctl(verb: &str) {
    match Command::new(verb).arg(OVERLAY_SERVICE).output() {
        Ok(out) if out.status.success() => {
            log::info!("OVERLAY: {} {}", verb, OVERLAY_SERVICE)
        }
        Ok(out) => log::warn!("OVERLAY: {} {} failed: {}", verb, OVERLAY_SERVICE, out.status),
        Err(e) => log::warn!("OVERLAY: {} {} error: {}", verb, OVERLAY_SERVICE, e),
    }
}

#[cfg(test)]
pub mod testing {
    use super::OverlayControl;
    use std::sync::Mutex;

    /// Records start/stop calls instead of touching the init system.
    #[derive(Default)]
    pub struct RecordingOverlay {
        pub events: Mutex<Vec<&'static str>>,
    }

    impl OverlayControl for RecordingOverlay {
        fn start(&self) {
            self.events.lock().unwrap().push("start");
        }

        fn stop(&self) {
            self.events.lock().unwrap().push("stop");
        }
    }
}
