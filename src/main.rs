
mod apply;
mod config;
mod endpoint;
mod error;
mod overlay;
mod settings;
mod sync;
mod thermal;
mod tunables;
mod web;

use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use env_logger::Env;
use log::{info, warn};

use crate::{config::Nodes, overlay::FpsOverlayService};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("xyztuned starting");

    let nodes = Nodes::system();
    for (name, path) in nodes.probe_list() {
        info!(
            "NODE: {} {}",
            name,
            if endpoint::is_writable(path) { "ok" } else { "missing" }
        );
    }

    let settings_path = Path::new(config::SETTINGS_PATH);
    let store = settings::load_or_init(settings_path);

    // Boot trigger: restore every persisted tunable before serving anything.
    let report = sync::synchronize_all(&nodes, &store, &FpsOverlayService);
    if report.fully_applied() {
        info!(
            "SYNC: {} written, {} skipped",
            report.written, report.skipped
        );
    } else {
        warn!(
            "SYNC: {} written, {} skipped, {} failed",
            report.written,
            report.skipped,
            report.failures.len()
        );
    }

    let shared = Arc::new(RwLock::new(store));
    let handle = web::spawn(nodes, shared, PathBuf::from(config::SETTINGS_PATH));
    let _ = handle.join();
}
