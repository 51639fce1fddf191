//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The OpenLayers map glue and the Plotly chart renderer live in `assets/js/*.js`.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! Map commands are queued on `window` until the map exists, so commands
//! emitted before mount are not lost.

use futures::channel::mpsc::UnboundedSender;
use oba_core::geo::Coordinate;
use oba_state::MapCommand;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

static MAP_JS: &str = include_str!("../assets/js/map.js");
static TIME_SERIES_CHART_JS: &str = include_str!("../assets/js/time-series-chart.js");

const OPENLAYERS_JS: &str = "https://cdn.jsdelivr.net/npm/ol@v7.5.2/dist/ol.js";
const OPENLAYERS_CSS: &str = "https://cdn.jsdelivr.net/npm/ol@v7.5.2/ol.css";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// A click on the map, as reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    pub coordinate: Coordinate,
    pub resolution: f64,
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('OBA JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Append the OpenLayers and Plotly bundles to the document head. Call once.
pub fn load_vendor_scripts() {
    call_js(&format!(
        r#"
        (function() {{
            if (window.__obaVendorLoaded) return;
            window.__obaVendorLoaded = true;
            var css = document.createElement('link');
            css.rel = 'stylesheet';
            css.href = {css};
            document.head.appendChild(css);
            [{ol}, {plotly}].forEach(function(src) {{
                var s = document.createElement('script');
                s.src = src;
                document.head.appendChild(s);
            }});
        }})();
        "#,
        css = js_string(OPENLAYERS_CSS),
        ol = js_string(OPENLAYERS_JS),
        plotly = js_string(PLOTLY_JS),
    ));
}

/// Initialize the map and chart scripts with a wait-for-vendor polling loop.
///
/// The asset files define `obaInitMap`, `obaApplyMapCommands`,
/// `renderTimeSeriesChart` and `destroyTimeSeriesChart` via `function`
/// declarations; they are evaluated at global scope once OpenLayers and Plotly
/// are loaded, then promoted to `window.*`.
pub fn init_map(target_id: &str) {
    let all_js = [MAP_JS, TIME_SERIES_CHART_JS].join("\n");
    let store_js = format!("window.__obaScripts = {};", js_string(&all_js));
    let _ = js_sys::eval(&store_js);

    call_js(&format!(
        r#"
        (function() {{
            window.__obaCommandQueue = window.__obaCommandQueue || [];
            var waitForVendor = setInterval(function() {{
                if (typeof ol !== 'undefined' && typeof Plotly !== 'undefined' &&
                    document.getElementById({target})) {{
                    clearInterval(waitForVendor);
                    (0, eval)(window.__obaScripts);
                    delete window.__obaScripts;
                    if (typeof obaInitMap !== 'undefined') window.obaInitMap = obaInitMap;
                    if (typeof obaApplyMapCommands !== 'undefined') window.obaApplyMapCommands = obaApplyMapCommands;
                    if (typeof renderTimeSeriesChart !== 'undefined') window.renderTimeSeriesChart = renderTimeSeriesChart;
                    if (typeof destroyTimeSeriesChart !== 'undefined') window.destroyTimeSeriesChart = destroyTimeSeriesChart;
                    window.obaInitMap({target});
                    window.__obaMapReady = true;
                    var queued = window.__obaCommandQueue;
                    window.__obaCommandQueue = [];
                    queued.forEach(function(batch) {{ window.obaApplyMapCommands(batch); }});
                    console.log('OBA map initialized');
                }}
            }}, 100);
        }})();
        "#,
        target = js_string(target_id),
    ));
}

/// Hand a batch of map commands to the renderer, or queue it until the map exists.
pub fn apply_map_commands(commands: &[MapCommand]) {
    if commands.is_empty() {
        return;
    }
    let json = match serde_json::to_string(commands) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize map commands: {}", e);
            return;
        }
    };
    call_js(&format!(
        r#"
        (function() {{
            var batch = {json};
            if (window.__obaMapReady) {{
                window.obaApplyMapCommands(batch);
            }} else {{
                (window.__obaCommandQueue = window.__obaCommandQueue || []).push(batch);
            }}
        }})();
        "#,
        json = js_string(&json),
    ));
}

/// Route renderer clicks into `sender`. The renderer calls
/// `window.__obaOnMapClick(x, y, resolution)` on every single click.
pub fn register_click_handler(sender: UnboundedSender<MapClick>) {
    let closure = Closure::<dyn Fn(f64, f64, f64)>::new(move |x: f64, y: f64, resolution: f64| {
        let click = MapClick {
            coordinate: Coordinate::new(x, y),
            resolution,
        };
        if sender.unbounded_send(click).is_err() {
            log::warn!("Map click dropped: receiver gone");
        }
    });
    match web_sys::window() {
        Some(window) => {
            let _ = js_sys::Reflect::set(
                &window,
                &JsValue::from_str("__obaOnMapClick"),
                closure.as_ref(),
            );
        }
        None => log::error!("No window to register the map click handler on"),
    }
    // Lives as long as the page.
    closure.forget();
}

/// Render the time-series chart.
///
/// Uses a polling loop to wait for the scripts to initialize and the
/// container DOM element to exist before rendering.
pub fn render_time_series_chart(container_id: &str, spec_json: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof window.renderTimeSeriesChart !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.renderTimeSeriesChart({id}, {spec});
                    }} catch(e) {{ console.error('[OBA] renderTimeSeriesChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        id = js_string(container_id),
        spec = js_string(spec_json),
    ));
}

/// Destroy/clean up the chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        r#"
        if (typeof window.destroyTimeSeriesChart !== 'undefined') {{
            window.destroyTimeSeriesChart({id});
        }} else {{
            var el = document.getElementById({id}); if (el) el.innerHTML = '';
        }}
        "#,
        id = js_string(container_id),
    ));
}
