use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use foundation::math::Vec2;
use formats::{ViewerConfig, features_from_geojson_str};
use render::{CompositorConfig, SceneCompositor};
use runtime::{
    EventBus, EventKind, Frame, InteractionController, ProjectionState, ViewState, ZoomBounds,
};
use scene::{LoadError, LoadState, World};

mod canvas;
use canvas::{context_for_canvas, execute};

const CANVAS_ID: &str = "globe-canvas";

#[derive(Debug)]
pub struct ViewerState {
    pub config: ViewerConfig,
    pub load: LoadState,
    pub view: ViewState,
    pub controller: InteractionController,
    pub frame: Frame,
    pub events: EventBus,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub dpr: f64,
    /// Bumped per load; in-flight fetches from older loads are discarded.
    pub load_generation: u64,
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new({
        let config = ViewerConfig::default();
        let view = view_for(&config, 960.0, 720.0);
        ViewerState {
            config,
            load: LoadState::Loading,
            view,
            controller: InteractionController::new(),
            frame: Frame::default(),
            events: EventBus::new(),
            canvas_width: 960.0,
            canvas_height: 720.0,
            dpr: 1.0,
            load_generation: 0,
        }
    });
}

/// The globe sits right of center with a margin at the bottom, leaving
/// room for the host page's overlay panel.
fn canvas_translate(width: f64, height: f64) -> Vec2 {
    Vec2::new(width / 1.5, height - 100.0)
}

fn view_for(config: &ViewerConfig, width: f64, height: f64) -> ViewState {
    ViewState::new(
        ProjectionState::centered_on(
            config.center_lon_deg,
            config.center_lat_deg,
            config.projection_scale,
            canvas_translate(width, height),
        ),
        ZoomBounds {
            min: config.zoom_min,
            max: config.zoom_max,
        },
    )
}

fn compositor_for(state: &ViewerState) -> SceneCompositor {
    SceneCompositor::new(CompositorConfig {
        region_collection: state.config.region_collection.clone(),
        city_collection: state.config.city_collection.clone(),
        weight_key: state.config.weight_key.clone(),
        arc_weight_threshold: state.config.arc_weight_threshold,
        sky_scale_factor: state.config.sky_scale_factor,
        arc_seed: state.load_generation,
        marker_radius_range: (0.0, 10.0),
    })
}

fn render_scene() -> Result<(), JsValue> {
    STATE.with(|state_ref| {
        let mut s = state_ref.borrow_mut();
        let commands = compositor_for(&s).compose(&s.load, &s.view);

        let ctx = context_for_canvas(CANVAS_ID)?;
        execute(&ctx, &commands, s.canvas_width, s.canvas_height, s.dpr)?;

        s.frame = s.frame.next();
        let frame = s.frame;
        s.events
            .emit(frame, EventKind::Draw, format!("{} commands", commands.len()));
        for event in s.events.drain() {
            web_sys::console::debug_1(&JsValue::from_str(&format!(
                "[frame {}] {}: {}",
                event.frame_index, event.kind, event.message
            )));
        }
        Ok(())
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Apply a JSON config; resets rotation and zoom to the configured view.
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    let config = ViewerConfig::from_json_str(config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.view = view_for(&config, s.canvas_width, s.canvas_height);
        s.config = config;
    });
    render_scene()
}

/// CSS pixel size of the canvas plus the device pixel ratio. Keeps the
/// current rotation and zoom; only the globe anchor moves.
#[wasm_bindgen]
pub fn set_canvas_size(width: f64, height: f64, dpr: f64) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.canvas_width = width;
        s.canvas_height = height;
        s.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        s.view.projection.translate = canvas_translate(width, height);
    });
    render_scene()
}

/// Fetch the region and city datasets, decode them and draw.
///
/// Both payloads are fetched before anything is decoded or drawn; a
/// failure in either leaves the viewer in a terminal failure state that
/// draws nothing until the next `load_datasets` call.
#[wasm_bindgen]
pub fn load_datasets(map_url: String, data_url: String) {
    let (generation, region_collection, city_collection) = STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.load_generation += 1;
        s.load = LoadState::Loading;
        let frame = s.frame;
        s.events
            .emit(frame, EventKind::Load, format!("start: {map_url} + {data_url}"));
        (
            s.load_generation,
            s.config.region_collection.clone(),
            s.config.city_collection.clone(),
        )
    });

    spawn_local(async move {
        let result = fetch_world(&map_url, &data_url, &region_collection, &city_collection).await;

        let stale = STATE.with(|state| {
            let mut s = state.borrow_mut();
            if s.load_generation != generation {
                return true;
            }
            let frame = s.frame;
            match result {
                Ok(world) => {
                    s.events.emit(
                        frame,
                        EventKind::Load,
                        format!("success: {} collections", world.collection_names().count()),
                    );
                    s.load = LoadState::Success(world);
                }
                Err(err) => {
                    web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
                    s.events
                        .emit(frame, EventKind::Load, format!("failure: {err}"));
                    s.load = LoadState::Failure(err);
                }
            }
            false
        });

        if !stale {
            let _ = render_scene();
        }
    });
}

#[wasm_bindgen]
pub fn pointer_down(x: f64, y: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let view = s.view;
        s.controller.pointer_down(Vec2::new(x, y), &view);
    });
}

#[wasm_bindgen]
pub fn pointer_move(x: f64, y: f64) -> Result<(), JsValue> {
    let moved = STATE.with(|state| {
        let mut s = state.borrow_mut();
        match s.controller.pointer_move(Vec2::new(x, y)) {
            Some(command) => {
                s.view.apply(command);
                true
            }
            None => false,
        }
    });
    if moved {
        render_scene()?;
    }
    Ok(())
}

#[wasm_bindgen]
pub fn pointer_up() {
    STATE.with(|state| {
        state.borrow_mut().controller.pointer_up();
    });
}

/// Wheel zoom anchored at the pointer. Negative `delta_y` zooms in.
#[wasm_bindgen]
pub fn wheel_zoom(delta_y: f64, x: f64, y: f64) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let command = s.controller.wheel(delta_y, Vec2::new(x, y), &s.view);
        s.view.apply(command);
    });
    render_scene()
}

#[wasm_bindgen]
pub fn reset_view() -> Result<(), JsValue> {
    STATE.with(|state| {
        state.borrow_mut().view.apply(runtime::ViewCommand::Reset);
    });
    render_scene()
}

async fn fetch_world(
    map_url: &str,
    data_url: &str,
    region_collection: &str,
    city_collection: &str,
) -> Result<World, LoadError> {
    let map_text = fetch_text(map_url).await?;
    let data_text = fetch_text(data_url).await?;

    let regions = features_from_geojson_str(&map_text).map_err(|e| LoadError::Decode {
        url: map_url.to_string(),
        message: e.to_string(),
    })?;
    let cities = features_from_geojson_str(&data_text).map_err(|e| LoadError::Decode {
        url: data_url.to_string(),
        message: e.to_string(),
    })?;

    let mut world = World::new();
    world.insert_collection(region_collection, regions);
    world.insert_collection(city_collection, cities);
    Ok(world)
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let response = Request::get(url).send().await.map_err(|e| LoadError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    if !response.ok() {
        return Err(LoadError::Fetch {
            url: url.to_string(),
            message: format!("HTTP {}", response.status()),
        });
    }
    response.text().await.map_err(|e| LoadError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}
