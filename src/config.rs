
use std::path::{Path, PathBuf};

pub const SETTINGS_PATH: &str = "/data/adb/modules/xyztuned/config/settings.json";
pub const BIND_ADDR: &str = "127.0.0.1:1021";

// Sysfs nodes (xyzzone kernel)
pub const KCAL_DIR: &str = "/sys/devices/platform/kcal_ctrl.0";
pub const SOUND_DIR: &str = "/sys/kernel/sound_control";
pub const LED_MAX_BRIGHTNESS: &str = "/sys/class/leds/white/max_brightness";
pub const THERMAL_SCONFIG: &str = "/sys/class/thermal/thermal_message/sconfig";

// Persisted setting keys
pub const KEY_KCAL_ENABLED: &str = "kcal_enabled";
pub const KEY_RED: &str = "red";
pub const KEY_GREEN: &str = "green";
pub const KEY_BLUE: &str = "blue";
pub const KEY_MINIMUM: &str = "minimum";
pub const KEY_SATURATION: &str = "saturation";
pub const KEY_VALUE: &str = "value";
pub const KEY_CONTRAST: &str = "contrast";
pub const KEY_HUE: &str = "hue";
pub const KEY_GRAYSCALE: &str = "grayscale";
pub const KEY_HEADPHONE_GAIN: &str = "headphone_gain";
pub const KEY_MIC_GAIN: &str = "mic_gain";
pub const KEY_NOTIF_LED: &str = "notification_led_brightness";
pub const KEY_FPS_INFO: &str = "fps_info";

// Seekbar-to-wire offsets. The sat/val/cont seekbars run 0..=60 and the
// kernel default sits at 255, so the wire value is seekbar + 225.
pub const SATURATION_OFFSET: i64 = 225;
pub const VALUE_OFFSET: i64 = 225;
pub const CONTRAST_OFFSET: i64 = 225;

// kcal_sat value the kernel treats as full grayscale.
pub const GRAYSCALE_SAT: i64 = 128;

// Defaults when a key was never persisted
pub const RGB_DEFAULT: i64 = 256;
pub const MINIMUM_DEFAULT: i64 = 35;
pub const SATURATION_DEFAULT: i64 = 30;
pub const VALUE_DEFAULT: i64 = 30;
pub const CONTRAST_DEFAULT: i64 = 30;
pub const HUE_DEFAULT: i64 = 0;
pub const GAIN_DEFAULT: i64 = 0;
pub const NOTIF_LED_DEFAULT: i64 = 100;

// White LED brightness curve: wire = 1 + BASE^level, level 0..=100.
// The base is what the stock panel shipped and the ramp the kernel node
// expects (2..=255), so it must not change.
pub const LED_CURVE_BASE: f64 = 1.05694;

/// Every sysfs node the daemon touches, resolved once at startup.
#[derive(Clone, Debug)]
pub struct Nodes {
    pub kcal_enable: PathBuf,
    pub kcal_rgb: PathBuf,
    pub kcal_min: PathBuf,
    pub kcal_sat: PathBuf,
    pub kcal_val: PathBuf,
    pub kcal_cont: PathBuf,
    pub kcal_hue: PathBuf,
    pub headphone_gain: PathBuf,
    pub mic_gain: PathBuf,
    pub led_max_brightness: PathBuf,
    pub thermal_sconfig: PathBuf,
}

impl Nodes {
    pub fn system() -> Self {
        let kcal = Path::new(KCAL_DIR);
        let sound = Path::new(SOUND_DIR);
        Self {
            kcal_enable: kcal.join("kcal_enable"),
            kcal_rgb: kcal.join("kcal"),
            kcal_min: kcal.join("kcal_min"),
            kcal_sat: kcal.join("kcal_sat"),
            kcal_val: kcal.join("kcal_val"),
            kcal_cont: kcal.join("kcal_cont"),
            kcal_hue: kcal.join("kcal_hue"),
            headphone_gain: sound.join("headphone_gain"),
            mic_gain: sound.join("mic_gain"),
            led_max_brightness: PathBuf::from(LED_MAX_BRIGHTNESS),
            thermal_sconfig: PathBuf::from(THERMAL_SCONFIG),
        }
    }

    /// Names and paths for startup probing and the control API feature map.
    pub fn probe_list(&self) -> Vec<(&'static str, &Path)> {
        vec![
            ("kcal_enable", self.kcal_enable.as_path()),
            ("kcal", self.kcal_rgb.as_path()),
            ("kcal_min", self.kcal_min.as_path()),
            ("kcal_sat", self.kcal_sat.as_path()),
            ("kcal_val", self.kcal_val.as_path()),
            ("kcal_cont", self.kcal_cont.as_path()),
            ("kcal_hue", self.kcal_hue.as_path()),
            ("headphone_gain", self.headphone_gain.as_path()),
            ("mic_gain", self.mic_gain.as_path()),
            ("notification_led", self.led_max_brightness.as_path()),
            ("thermal_sconfig", self.thermal_sconfig.as_path()),
        ]
    }

    /// All nodes rooted flat under an arbitrary directory.
    #[cfg(test)]
    pub fn under(root: &Path) -> Self {
        Self {
            kcal_enable: root.join("kcal_enable"),
            kcal_rgb: root.join("kcal"),
            kcal_min: root.join("kcal_min"),
            kcal_sat: root.join("kcal_sat"),
            kcal_val: root.join("kcal_val"),
            kcal_cont: root.join("kcal_cont"),
            kcal_hue: root.join("kcal_hue"),
            headphone_gain: root.join("headphone_gain"),
            mic_gain: root.join("mic_gain"),
            led_max_brightness: root.join("max_brightness"),
            thermal_sconfig: root.join("sconfig"),
        }
    }
}
