
use log::{info, warn};

use crate::{
    config::{self, Nodes},
    endpoint,
    error::TunedError,
    overlay::OverlayControl,
    settings::SettingsStore,
    tunables,
};

/// Outcome of one boot restore pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub written: usize,
    pub skipped: usize,
    pub failures: Vec<(&'static str, TunedError)>,
}

impl SyncReport {
    pub fn fully_applied(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Restores every tunable from the persisted store, in registry order.
///
/// Best-effort: a broken node is logged and reported, never aborts the
/// pass. Gated tunables whose gate flag is unset are skipped outright so
/// the kernel keeps whatever state it booted with.
pub fn synchronize_all(
    nodes: &Nodes,
    store: &dyn SettingsStore,
    overlay: &dyn OverlayControl,
) -> SyncReport {
    let registry = tunables::registry(nodes);
    let mut report = SyncReport::default();

    for t in &registry {
        if let Some(gate) = t.gated_by {
            if !store.get_bool(gate, false) {
                report.skipped += 1;
                continue;
            }
        }

        let wire = t.encode(store);
        let mut failed = false;
        for node in &t.endpoints {
            if let Err(e) = endpoint::write_value(node, &wire) {
                warn!("SYNC: {}: {}", t.name, e);
                report.failures.push((t.name, e));
                failed = true;
            }
        }
        if !failed {
            report.written += 1;
        }
    }

    // Same pass, different collaborator: the overlay service comes back
    // up if the user had it enabled.
    if store.get_bool(config::KEY_FPS_INFO, false) {
        info!("SYNC: fps overlay enabled, starting service");
        overlay.start();
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{overlay::testing::RecordingOverlay, settings::JsonSettings};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn fake_sysfs() -> (TempDir, Nodes) {
        let dir = tempdir().unwrap();
        let nodes = Nodes::under(dir.path());
        for (_, p) in nodes.probe_list() {
            fs::write(p, "0\n").unwrap();
        }
        (dir, nodes)
    }

    fn read(p: &std::path::Path) -> String {
        fs::read_to_string(p).unwrap()
    }

    #[test]
    fn restores_calibration_when_enabled() {
        let (_dir, nodes) = fake_sysfs();
        let mut s = JsonSettings::default();
        s.set_int(config::KEY_KCAL_ENABLED, 1);
        s.set_int(config::KEY_RED, 10);
        s.set_int(config::KEY_GREEN, 20);
        s.set_int(config::KEY_BLUE, 30);

        let report = synchronize_all(&nodes, &s, &RecordingOverlay::default());

        assert!(report.fully_applied());
        assert_eq!(report.skipped, 0);
        assert_eq!(read(&nodes.kcal_enable), "1\n");
        assert_eq!(read(&nodes.kcal_rgb), "10 20 30\n");
        assert_eq!(read(&nodes.kcal_min), "35\n");
        assert_eq!(read(&nodes.kcal_sat), "255\n");
        assert_eq!(read(&nodes.kcal_val), "255\n");
        assert_eq!(read(&nodes.kcal_cont), "255\n");
        assert_eq!(read(&nodes.kcal_hue), "0\n");
    }

    #[test]
    fn disabled_calibration_leaves_nodes_untouched() {
        let (_dir, nodes) = fake_sysfs();
        // Sentinels prove no write happened, not even a default.
        for p in [
            &nodes.kcal_enable,
            &nodes.kcal_rgb,
            &nodes.kcal_min,
            &nodes.kcal_sat,
            &nodes.kcal_val,
            &nodes.kcal_cont,
            &nodes.kcal_hue,
        ] {
            fs::write(p, "sentinel\n").unwrap();
        }

        let s = JsonSettings::default(); // kcal_enabled absent -> 0
        let report = synchronize_all(&nodes, &s, &RecordingOverlay::default());

        assert_eq!(report.skipped, 7);
        for p in [&nodes.kcal_enable, &nodes.kcal_rgb, &nodes.kcal_sat] {
            assert_eq!(read(p), "sentinel\n");
        }
        // Ungated tunables still restored.
        assert_eq!(read(&nodes.headphone_gain), "0 0\n");
        assert_eq!(read(&nodes.mic_gain), "0\n");
        assert_eq!(read(&nodes.led_max_brightness), "255\n");
    }

    #[test]
    fn one_broken_node_does_not_block_the_rest() {
        let (_dir, nodes) = fake_sysfs();
        fs::remove_file(&nodes.headphone_gain).unwrap();

        let mut s = JsonSettings::default();
        s.set_int(config::KEY_MIC_GAIN, 5);
        s.set_int(config::KEY_NOTIF_LED, 0);

        let report = synchronize_all(&nodes, &s, &RecordingOverlay::default());

        assert!(!report.fully_applied());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "headphone_gain");
        assert_eq!(read(&nodes.mic_gain), "5\n");
        assert_eq!(read(&nodes.led_max_brightness), "2\n");
    }

    #[test]
    fn fps_flag_starts_overlay_service() {
        let (_dir, nodes) = fake_sysfs();
        let overlay = RecordingOverlay::default();

        let mut s = JsonSettings::default();
        s.set_int(config::KEY_FPS_INFO, 1);
        synchronize_all(&nodes, &s, &overlay);
        assert_eq!(*overlay.events.lock().unwrap(), vec!["start"]);

        let overlay = RecordingOverlay::default();
        synchronize_all(&nodes, &JsonSettings::default(), &overlay);
        assert!(overlay.events.lock().unwrap().is_empty());
    }
}
