
use serde::Deserialize;
use serde_json::{json, Value};
use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
    thread,
};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::{
    apply,
    config::{self, Nodes},
    endpoint,
    overlay::FpsOverlayService,
    settings::{self, JsonSettings, SettingsStore},
    sync,
    thermal::ThermalToggle,
    tunables,
};

#[derive(Deserialize)]
struct ApplyPayload {
    key: String,
    value: i64,
}

fn ok_json(v: Value) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(v.to_string())
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap())
}

fn bad(code: u16, msg: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(json!({ "error": msg }).to_string()).with_status_code(StatusCode(code))
}

fn read_body(req: &mut tiny_http::Request) -> Vec<u8> {
    let mut buf = Vec::new();
    let _ = req.as_reader().read_to_end(&mut buf);
    buf
}

/// Which control groups the UI should expose, same probe the stock panel
/// ran before building its preference screen.
fn feature_map(nodes: &Nodes) -> Value {
    json!({
        "notification_led": endpoint::is_writable(&nodes.led_max_brightness),
        "audio_gain": endpoint::is_writable(&nodes.headphone_gain)
            && endpoint::is_writable(&nodes.mic_gain),
        "kcal": endpoint::is_writable(&nodes.kcal_enable),
        "thermal": endpoint::is_writable(&nodes.thermal_sconfig),
    })
}

fn state_json(nodes: &Nodes, s: &JsonSettings) -> Value {
    let mut values = serde_json::Map::new();
    for t in tunables::registry(nodes) {
        for key in t.keys.iter().copied() {
            if key == config::KEY_GRAYSCALE {
                continue;
            }
            values.insert(key.to_string(), json!(s.get_int(key, t.default)));
        }
    }
    values.insert(
        config::KEY_GRAYSCALE.to_string(),
        json!(s.get_bool(config::KEY_GRAYSCALE, false)),
    );
    values.insert(
        config::KEY_FPS_INFO.to_string(),
        json!(s.get_bool(config::KEY_FPS_INFO, false)),
    );

    let thermal = ThermalToggle::new(nodes);
    json!({
        "settings": Value::Object(values),
        "thermal": thermal.current_label().ok(),
        "features": feature_map(nodes),
    })
}

fn handle_apply(
    nodes: &Nodes,
    shared: &Arc<RwLock<JsonSettings>>,
    settings_path: &Path,
    body: &[u8],
) -> Result<(), String> {
    let payload: ApplyPayload = serde_json::from_slice(body).map_err(|e| e.to_string())?;

    let registry = tunables::registry(nodes);
    if payload.key != config::KEY_FPS_INFO && tunables::find(&registry, &payload.key).is_none() {
        return Err(format!("unknown tunable key: {}", payload.key));
    }

    // Persist first (that is this caller's job), then apply live.
    let snapshot = {
        let mut s = shared.write().unwrap();
        s.set_int(&payload.key, payload.value);
        let _ = settings::save_atomic(settings_path, &s);
        s.clone()
    };

    apply::apply_change(
        nodes,
        &snapshot,
        &FpsOverlayService,
        &payload.key,
        payload.value,
    )
    .map_err(|e| e.to_string())
}

pub fn spawn(
    nodes: Nodes,
    shared: Arc<RwLock<JsonSettings>>,
    settings_path: PathBuf,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let server = match Server::http(config::BIND_ADDR) {
            Ok(s) => s,
            Err(e) => {
                log::error!("WEB: failed to bind {}: {}", config::BIND_ADDR, e);
                return;
            }
        };
        log::info!("WEB: http://{}", config::BIND_ADDR);

        for mut req in server.incoming_requests() {
            let url = req.url().to_string();
            let method = req.method().clone();

            let body = if matches!(method, Method::Post) {
                read_body(&mut req)
            } else {
                Vec::new()
            };

            let resp = match (method, url.as_str()) {
                (Method::Get, "/api/state") => {
                    let s = shared.read().unwrap().clone();
                    ok_json(state_json(&nodes, &s))
                }
                (Method::Post, "/api/apply") => {
                    match handle_apply(&nodes, &shared, &settings_path, &body) {
                        Ok(()) => ok_json(json!({ "ok": true })),
                        Err(e) => bad(400, &e),
                    }
                }
                (Method::Post, "/api/sync") => {
                    let s = shared.read().unwrap().clone();
                    let report = sync::synchronize_all(&nodes, &s, &FpsOverlayService);
                    ok_json(json!({
                        "written": report.written,
                        "skipped": report.skipped,
                        "failures": report
                            .failures
                            .iter()
                            .map(|(name, e)| json!({ "tunable": name, "error": e.to_string() }))
                            .collect::<Vec<_>>(),
                    }))
                }
                (Method::Post, "/api/thermal/next") => {
                    match ThermalToggle::new(&nodes).advance() {
                        Ok(label) => ok_json(json!({ "label": label })),
                        Err(e) => bad(500, &e.to_string()),
                    }
                }
                _ => bad(404, "not found"),
            };

            let _ = req.respond(resp);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn state_reports_defaults_features_and_thermal() {
        let dir = tempdir().unwrap();
        let nodes = Nodes::under(dir.path());
        fs::write(&nodes.led_max_brightness, "0\n").unwrap();
        fs::write(&nodes.thermal_sconfig, "2\n").unwrap();

        let state = state_json(&nodes, &JsonSettings::default());

        assert_eq!(state["settings"]["red"], 256);
        assert_eq!(state["settings"]["saturation"], 30);
        assert_eq!(state["settings"]["grayscale"], false);
        assert_eq!(state["thermal"], "Battery saver");
        assert_eq!(state["features"]["notification_led"], true);
        assert_eq!(state["features"]["audio_gain"], false);
        assert_eq!(state["features"]["kcal"], false);
    }
}
