//! WASM bindings for md2-exporter.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.
//! Textures are never copied here; skin paths are written as given.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Export configuration options.
#[wasm_bindgen]
pub struct Md2Options {
    scale: f32,
    export_animation: bool,
    shared_bounding_box: bool,
    export_only_basename_skins: bool,
}

impl Default for Md2Options {
    fn default() -> Self {
        let config = crate::ExportConfig::default();
        Md2Options {
            scale: config.scale,
            export_animation: config.export_animation,
            shared_bounding_box: config.shared_bounding_box,
            export_only_basename_skins: config.export_only_basename_skins,
        }
    }
}

#[wasm_bindgen]
impl Md2Options {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Md2Options {
        Md2Options::default()
    }

    #[wasm_bindgen(setter)]
    pub fn set_scale(&mut self, value: f32) {
        self.scale = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_export_animation(&mut self, value: bool) {
        self.export_animation = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_shared_bounding_box(&mut self, value: bool) {
        self.shared_bounding_box = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_export_only_basename_skins(&mut self, value: bool) {
        self.export_only_basename_skins = value;
    }
}

impl Md2Options {
    fn to_config(&self) -> crate::ExportConfig {
        crate::ExportConfig::default()
            .with_scale(self.scale)
            .with_animation(self.export_animation)
            .with_shared_bounding_box(self.shared_bounding_box)
            .with_basename_skins(self.export_only_basename_skins)
            .with_texture_copy(false, false)
    }
}

/// Export result containing MD2 data.
#[wasm_bindgen]
pub struct Md2Result {
    md2_data: Vec<u8>,
    vertex_count: usize,
    triangle_count: usize,
    frame_count: usize,
}

#[wasm_bindgen]
impl Md2Result {
    /// Get the MD2 binary data.
    #[wasm_bindgen(getter)]
    pub fn md2_data(&self) -> Vec<u8> {
        self.md2_data.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

/// Export a JSON scene description to MD2 bytes.
#[wasm_bindgen]
pub fn export_scene_json(scene_json: &[u8], options: Option<Md2Options>) -> Result<Md2Result, JsError> {
    let options = options.unwrap_or_default();
    let scene = crate::JsonScene::from_slice(scene_json).map_err(|e| JsError::new(&e.to_string()))?;

    let writer = crate::Md2Writer::new(options.to_config());
    let mut md2_data = Vec::new();
    let header = writer
        .write(&scene, &mut md2_data)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(Md2Result {
        md2_data,
        vertex_count: header.num_xyz as usize,
        triangle_count: header.num_tris as usize,
        frame_count: header.num_frames as usize,
    })
}

/// Check a JSON scene against the MD2 limits without exporting it.
/// Returns an error message, or `undefined` when the scene fits.
#[wasm_bindgen]
pub fn check_scene_json(scene_json: &[u8]) -> Result<Option<String>, JsError> {
    let scene = crate::JsonScene::from_slice(scene_json).map_err(|e| JsError::new(&e.to_string()))?;
    let summary = crate::SceneSummary::from_provider(&scene);
    Ok(summary.check_limits().err().map(|e| e.to_string()))
}
