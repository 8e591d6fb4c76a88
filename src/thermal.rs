
use std::path::PathBuf;

use crate::{config::Nodes, endpoint, error::TunedError};

/// Tile labels, indexed by sconfig state. Order is fixed by the kernel.
pub const PROFILE_LABELS: [&str; 5] =
    ["Default", "Performance", "Battery saver", "Gaming", "Browser"];

pub const PROFILE_COUNT: u8 = PROFILE_LABELS.len() as u8;

/// Single-direction cycle over the thermal profile node. The tile can
/// only step forward (0→1→2→3→4→0); it never sets an arbitrary state.
pub struct ThermalToggle {
    node: PathBuf,
}

impl ThermalToggle {
    pub fn new(nodes: &Nodes) -> Self {
        Self {
            node: nodes.thermal_sconfig.clone(),
        }
    }

    /// Fresh read every time; sconfig is owned by the kernel and other
    /// writers, so nothing is cached.
    pub fn current_state(&self) -> Result<u8, TunedError> {
        let raw = endpoint::read_value(&self.node)?;
        let state: i64 = raw
            .parse()
            .map_err(|_| TunedError::InvalidState(raw.clone()))?;
        if !(0..PROFILE_COUNT as i64).contains(&state) {
            return Err(TunedError::InvalidState(raw));
        }
        Ok(state as u8)
    }

    pub fn current_label(&self) -> Result<&'static str, TunedError> {
        Ok(PROFILE_LABELS[self.current_state()? as usize])
    }

    /// Advances to the next profile and reports its label.
    pub fn advance(&self) -> Result<&'static str, TunedError> {
        let next = (self.current_state()? + 1) % PROFILE_COUNT;
        endpoint::write_value(&self.node, &next.to_string())?;
        Ok(PROFILE_LABELS[next as usize])
    }
}
