
use std::path::PathBuf;

use crate::{
    config::{self, Nodes},
    settings::SettingsStore,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueDomain {
    Bool,
    Int { min: i64, max: i64 },
}

/// How a persisted value becomes the text the kernel node expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireRule {
    /// Wire value is the persisted integer itself.
    Identity,
    /// `"{v} {v}"`: the same gain duplicated onto left/right channels.
    PairedChannel,
    /// `"{r} {g} {b}"` from the three persisted channel keys.
    CompositeRgb,
    /// Persisted value plus a fixed additive constant.
    Offset(i64),
    /// Offset rule, but forced to `GRAYSCALE_SAT` while the grayscale
    /// flag is set.
    SaturationOverride { offset: i64 },
    /// `1 + LED_CURVE_BASE^level`, rounded. Maps the linear 0..=100 slider
    /// onto a perceptually linear brightness ramp.
    LedCurve,
}

/// One user-adjustable kernel parameter.
pub struct Tunable {
    pub name: &'static str,
    /// Persisted keys this tunable answers to (three for the RGB composite).
    pub keys: &'static [&'static str],
    /// Nodes receiving the encoded value; one for everything we ship, the
    /// registry supports two for split-channel hardware.
    pub endpoints: Vec<PathBuf>,
    pub default: i64,
    pub domain: ValueDomain,
    pub rule: WireRule,
    /// Boolean key that must be set for this tunable to be written at all.
    pub gated_by: Option<&'static str>,
}

impl Tunable {
    fn clamp(&self, v: i64) -> i64 {
        match self.domain {
            ValueDomain::Bool => (v != 0) as i64,
            ValueDomain::Int { min, max } => v.clamp(min, max),
        }
    }

    fn persisted(&self, store: &dyn SettingsStore, key: &str) -> i64 {
        self.clamp(store.get_int(key, self.default))
    }

    /// Total over the declared domain: values are clamped before any rule
    /// runs, so no persisted garbage can produce an unencodable value.
    pub fn encode(&self, store: &dyn SettingsStore) -> String {
        match self.rule {
            WireRule::Identity => self.persisted(store, self.keys[0]).to_string(),
            WireRule::PairedChannel => {
                let v = self.persisted(store, self.keys[0]);
                format!("{} {}", v, v)
            }
            WireRule::CompositeRgb => {
                let r = self.persisted(store, config::KEY_RED);
                let g = self.persisted(store, config::KEY_GREEN);
                let b = self.persisted(store, config::KEY_BLUE);
                format!("{} {} {}", r, g, b)
            }
            WireRule::Offset(k) => (self.persisted(store, self.keys[0]) + k).to_string(),
            WireRule::SaturationOverride { offset } => {
                if store.get_bool(config::KEY_GRAYSCALE, false) {
                    config::GRAYSCALE_SAT.to_string()
                } else {
                    (self.persisted(store, self.keys[0]) + offset).to_string()
                }
            }
            WireRule::LedCurve => {
                encode_led(self.persisted(store, self.keys[0])).to_string()
            }
        }
    }
}

pub fn encode_led(level: i64) -> u32 {
    let x = level.clamp(0, 100) as i32;
    (1.0 + config::LED_CURVE_BASE.powi(x)).round() as u32
}

/// The catalog, in the order the boot synchronizer walks it.
pub fn registry(nodes: &Nodes) -> Vec<Tunable> {
    vec![
        Tunable {
            name: "kcal_enable",
            keys: &[config::KEY_KCAL_ENABLED],
            endpoints: vec![nodes.kcal_enable.clone()],
            default: 0,
            domain: ValueDomain::Bool,
            rule: WireRule::Identity,
            gated_by: Some(config::KEY_KCAL_ENABLED),
        },
        Tunable {
            name: "rgb",
            keys: &[config::KEY_RED, config::KEY_GREEN, config::KEY_BLUE],
            endpoints: vec![nodes.kcal_rgb.clone()],
            default: config::RGB_DEFAULT,
            domain: ValueDomain::Int { min: 0, max: 256 },
            rule: WireRule::CompositeRgb,
            gated_by: Some(config::KEY_KCAL_ENABLED),
        },
        Tunable {
            name: "minimum",
            keys: &[config::KEY_MINIMUM],
            endpoints: vec![nodes.kcal_min.clone()],
            default: config::MINIMUM_DEFAULT,
            domain: ValueDomain::Int { min: 0, max: 256 },
            rule: WireRule::Identity,
            gated_by: Some(config::KEY_KCAL_ENABLED),
        },
        Tunable {
            name: "saturation",
            // Answers to the grayscale flag too: flipping it re-encodes
            // this node.
            keys: &[config::KEY_SATURATION, config::KEY_GRAYSCALE],
            endpoints: vec![nodes.kcal_sat.clone()],
            default: config::SATURATION_DEFAULT,
            domain: ValueDomain::Int { min: 0, max: 60 },
            rule: WireRule::SaturationOverride {
                offset: config::SATURATION_OFFSET,
            },
            gated_by: Some(config::KEY_KCAL_ENABLED),
        },
        Tunable {
            name: "value",
            keys: &[config::KEY_VALUE],
            endpoints: vec![nodes.kcal_val.clone()],
            default: config::VALUE_DEFAULT,
            domain: ValueDomain::Int { min: 0, max: 60 },
            rule: WireRule::Offset(config::VALUE_OFFSET),
            gated_by: Some(config::KEY_KCAL_ENABLED),
        },
        Tunable {
            name: "contrast",
            keys: &[config::KEY_CONTRAST],
            endpoints: vec![nodes.kcal_cont.clone()],
            default: config::CONTRAST_DEFAULT,
            domain: ValueDomain::Int { min: 0, max: 60 },
            rule: WireRule::Offset(config::CONTRAST_OFFSET),
            gated_by: Some(config::KEY_KCAL_ENABLED),
        },
        Tunable {
            name: "hue",
            keys: &[config::KEY_HUE],
            endpoints: vec![nodes.kcal_hue.clone()],
            default: config::HUE_DEFAULT,
            domain: ValueDomain::Int { min: 0, max: 1536 },
            rule: WireRule::Identity,
            gated_by: Some(config::KEY_KCAL_ENABLED),
        },
        Tunable {
            name: "headphone_gain",
            keys: &[config::KEY_HEADPHONE_GAIN],
            endpoints: vec![nodes.headphone_gain.clone()],
            default: config::GAIN_DEFAULT,
            domain: ValueDomain::Int { min: -10, max: 20 },
            rule: WireRule::PairedChannel,
            gated_by: None,
        },
        Tunable {
            name: "mic_gain",
            keys: &[config::KEY_MIC_GAIN],
            endpoints: vec![nodes.mic_gain.clone()],
            default: config::GAIN_DEFAULT,
            domain: ValueDomain::Int { min: -10, max: 20 },
            rule: WireRule::Identity,
            gated_by: None,
        },
        Tunable {
            name: "notification_led",
            keys: &[config::KEY_NOTIF_LED],
            endpoints: vec![nodes.led_max_brightness.clone()],
            default: config::NOTIF_LED_DEFAULT,
            domain: ValueDomain::Int { min: 0, max: 100 },
            rule: WireRule::LedCurve,
            gated_by: None,
        },
    ]
}

pub fn find<'a>(registry: &'a [Tunable], key: &str) -> Option<&'a Tunable> {
    registry.iter().find(|t| t.keys.contains(&key))
}
