//! Bindings to the `THREE` global that `index.html` may load, plus the hero
//! scene built from them. Nothing here is touched unless
//! [`ThreeCapability::detect`] found the global first.

use crate::scene::{self, CanvasSize, CubePose};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{window, HtmlCanvasElement};

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type Object3D;

    #[wasm_bindgen(method, getter)]
    fn position(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, getter)]
    fn rotation(this: &Object3D) -> Euler;
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type Vector3;

    #[wasm_bindgen(method)]
    fn set(this: &Vector3, x: f64, y: f64, z: f64);

    #[wasm_bindgen(method, setter)]
    fn set_y(this: &Vector3, value: f64);
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type Euler;

    #[wasm_bindgen(method, setter)]
    fn set_x(this: &Euler, value: f64);

    #[wasm_bindgen(method, setter)]
    fn set_y(this: &Euler, value: f64);
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type Color;

    #[wasm_bindgen(constructor)]
    fn new(hex: u32) -> Color;
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    type Scene;

    #[wasm_bindgen(constructor)]
    fn new() -> Scene;

    #[wasm_bindgen(method, setter)]
    fn set_background(this: &Scene, value: &Color);

    #[wasm_bindgen(method)]
    fn add(this: &Scene, object: &Object3D);
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    type PerspectiveCamera;

    #[wasm_bindgen(constructor)]
    fn new(fov: f64, aspect: f64, near: f64, far: f64) -> PerspectiveCamera;

    #[wasm_bindgen(method, setter)]
    fn set_aspect(this: &PerspectiveCamera, value: f64);

    #[wasm_bindgen(method, js_name = updateProjectionMatrix)]
    fn update_projection_matrix(this: &PerspectiveCamera);
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type WebGLRenderer;

    #[wasm_bindgen(constructor, catch)]
    fn new(parameters: &Object) -> Result<WebGLRenderer, JsValue>;

    #[wasm_bindgen(method, js_name = setPixelRatio)]
    fn set_pixel_ratio(this: &WebGLRenderer, ratio: f64);

    #[wasm_bindgen(method, js_name = setSize)]
    fn set_size(this: &WebGLRenderer, width: f64, height: f64, update_style: bool);

    #[wasm_bindgen(method, setter = outputEncoding)]
    fn set_output_encoding(this: &WebGLRenderer, value: &JsValue);

    #[wasm_bindgen(method)]
    fn render(this: &WebGLRenderer, scene: &Scene, camera: &PerspectiveCamera);
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type BoxGeometry;

    #[wasm_bindgen(constructor)]
    fn new(width: f64, height: f64, depth: f64) -> BoxGeometry;
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type MeshStandardMaterial;

    #[wasm_bindgen(constructor)]
    fn new(parameters: &Object) -> MeshStandardMaterial;
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    type Mesh;

    #[wasm_bindgen(constructor)]
    fn new(geometry: &BoxGeometry, material: &MeshStandardMaterial) -> Mesh;
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    type AmbientLight;

    #[wasm_bindgen(constructor)]
    fn new(color: u32, intensity: f64) -> AmbientLight;
}

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    type DirectionalLight;

    #[wasm_bindgen(constructor)]
    fn new(color: u32, intensity: f64) -> DirectionalLight;
}

/// Proof that the `THREE` global is present on the page.
pub struct ThreeCapability {
    srgb_encoding: Option<JsValue>,
}

impl ThreeCapability {
    pub fn detect() -> Option<Self> {
        let namespace = Reflect::get(&js_sys::global(), &JsValue::from_str("THREE")).ok()?;
        if !namespace.is_object() {
            return None;
        }

        let srgb_encoding = Reflect::get(&namespace, &JsValue::from_str("sRGBEncoding"))
            .ok()
            .filter(|value| !value.is_undefined());

        Some(Self { srgb_encoding })
    }

    /// Builds the cube scene on `canvas`. `None` when the renderer could not
    /// get a WebGL context.
    pub fn build_scene(&self, canvas: HtmlCanvasElement) -> Option<HeroScene> {
        let scene = Scene::new();
        scene.set_background(&Color::new(scene::BACKGROUND_COLOR));

        let camera = PerspectiveCamera::new(
            scene::CAMERA_FOV,
            1.0,
            scene::CAMERA_NEAR,
            scene::CAMERA_FAR,
        );
        let [x, y, z] = scene::CAMERA_POSITION;
        camera.position().set(x, y, z);

        let renderer = match WebGLRenderer::new(&renderer_parameters(&canvas)) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::warn!("hero scene disabled: renderer unavailable ({err:?})");
                return None;
            }
        };
        let device_pixel_ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        renderer.set_pixel_ratio(scene::pixel_ratio(device_pixel_ratio));
        if let Some(encoding) = self.srgb_encoding.as_ref() {
            renderer.set_output_encoding(encoding);
        }

        let cube = Mesh::new(
            &BoxGeometry::new(scene::CUBE_SIZE, scene::CUBE_SIZE, scene::CUBE_SIZE),
            &MeshStandardMaterial::new(&material_parameters()),
        );
        scene.add(&cube);
        scene.add(&AmbientLight::new(scene::LIGHT_COLOR, scene::AMBIENT_INTENSITY));

        let directional = DirectionalLight::new(scene::LIGHT_COLOR, scene::DIRECTIONAL_INTENSITY);
        let [x, y, z] = scene::DIRECTIONAL_POSITION;
        directional.position().set(x, y, z);
        scene.add(&directional);

        let hero = HeroScene {
            canvas,
            scene,
            camera,
            renderer,
            cube,
        };
        hero.resize();
        Some(hero)
    }
}

pub struct HeroScene {
    canvas: HtmlCanvasElement,
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: WebGLRenderer,
    cube: Mesh,
}

impl HeroScene {
    pub fn resize(&self) {
        let rect = self.canvas.get_bounding_client_rect();
        let size = CanvasSize::from_layout(rect.width(), rect.height());
        self.renderer.set_size(size.width, size.height, false);
        self.camera.set_aspect(size.aspect());
        self.camera.update_projection_matrix();
    }

    pub fn render(&self, pose: CubePose) {
        let rotation = self.cube.rotation();
        rotation.set_x(pose.rotation_x);
        rotation.set_y(pose.rotation_y);
        self.cube.position().set_y(pose.position_y);
        self.renderer.render(&self.scene, &self.camera);
    }
}

fn renderer_parameters(canvas: &HtmlCanvasElement) -> Object {
    let parameters = Object::new();
    let _ = Reflect::set(&parameters, &JsValue::from_str("canvas"), canvas);
    let _ = Reflect::set(&parameters, &JsValue::from_str("antialias"), &JsValue::TRUE);
    let _ = Reflect::set(&parameters, &JsValue::from_str("alpha"), &JsValue::TRUE);
    parameters
}

fn material_parameters() -> Object {
    let parameters = Object::new();
    let _ = Reflect::set(
        &parameters,
        &JsValue::from_str("color"),
        &JsValue::from(scene::CUBE_COLOR),
    );
    let _ = Reflect::set(
        &parameters,
        &JsValue::from_str("metalness"),
        &JsValue::from(scene::CUBE_METALNESS),
    );
    let _ = Reflect::set(
        &parameters,
        &JsValue::from_str("roughness"),
        &JsValue::from(scene::CUBE_ROUGHNESS),
    );
    parameters
}
