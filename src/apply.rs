
use log::info;

use crate::{
    config::{self, Nodes},
    endpoint,
    error::TunedError,
    overlay::OverlayControl,
    settings::SettingsStore,
    tunables,
};

/// Applies one changed setting to its node immediately.
///
/// The caller persists `value` itself; this only encodes and writes, so
/// applying the same value twice is a no-op on the node content. The new
/// value is patched over the persisted view because composite rules read
/// sibling channels from the store.
pub fn apply_change(
    nodes: &Nodes,
    store: &dyn SettingsStore,
    overlay: &dyn OverlayControl,
    key: &str,
    value: i64,
) -> Result<(), TunedError> {
    // Service-lifecycle switch, not a node write.
    if key == config::KEY_FPS_INFO {
        if value != 0 {
            overlay.start();
        } else {
            overlay.stop();
        }
        return Ok(());
    }

    let registry = tunables::registry(nodes);
    let t = tunables::find(&registry, key)
        .ok_or_else(|| TunedError::UnknownTunable(key.to_string()))?;

    let patched = Patched { inner: store, key, value };
    let wire = t.encode(&patched);
    for node in &t.endpoints {
        endpoint::write_value(node, &wire)?;
    }
    info!("APPLY: {} = {} (wire {})", key, value, wire);
    Ok(())
}

/// Persisted view with one key overridden by the not-yet-persisted value.
struct Patched<'a> {
    inner: &'a dyn SettingsStore,
    key: &'a str,
    value: i64,
}

impl SettingsStore for Patched<'_> {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        if key == self.key {
            self.value
        } else {
            self.inner.get_int(key, default)
        }
    }
}
