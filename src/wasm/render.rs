use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, HtmlElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject, WebglLoseContext,
};

use crate::config::Preset;
use crate::error::{BackdropError, Result};
use crate::host::Surface;
use crate::shaders::{self, MODEL_VIEW_MATRIX, POSITION_ATTRIBUTE, PROJECTION_MATRIX, VERTEX_SHADER};
use crate::uniforms::{self, UniformSet};
use crate::viewport::{plane_vertices, Camera};

const POSITION_LOCATION: u32 = 0;

struct Locations {
    projection: Option<WebGlUniformLocation>,
    model_view: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
    lightning_intensity: Option<WebGlUniformLocation>,
    mouse_position: Option<WebGlUniformLocation>,
    mouse_lightning: Option<WebGlUniformLocation>,
}

impl Locations {
    fn lookup(gl: &GL, program: &WebGlProgram) -> Self {
        // Uniforms a preset never reads are optimised away and come back as None.
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            projection: at(PROJECTION_MATRIX),
            model_view: at(MODEL_VIEW_MATRIX),
            time: at(uniforms::TIME),
            resolution: at(uniforms::RESOLUTION),
            light_color: at(uniforms::LIGHT_COLOR),
            lightning_intensity: at(uniforms::LIGHTNING_INTENSITY),
            mouse_position: at(uniforms::MOUSE_POSITION),
            mouse_lightning: at(uniforms::MOUSE_LIGHTNING),
        }
    }
}

/// WebGL2 canvas with the preset's program and the backdrop plane.
pub struct GlSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: Option<WebGlProgram>,
    vao: Option<WebGlVertexArrayObject>,
    plane: Option<WebGlBuffer>,
    locations: Locations,
}

impl GlSurface {
    /// Create the canvas, compile the program, then append the canvas to
    /// `container`. Nothing is attached if any step fails.
    pub fn create(container: &HtmlElement, preset: Preset) -> Result<Self> {
        let document = container
            .owner_document()
            .ok_or_else(|| BackdropError::DetachedContainer(container.id()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| BackdropError::Host("created element is not a canvas".into()))?;

        let style = canvas.style();
        for (property, value) in [("display", "block"), ("width", "100%"), ("height", "100%")] {
            style.set_property(property, value).map_err(js_error)?;
        }

        let gl = context(&canvas)?;
        let program = link_program(&gl, &shaders::fragment_source(preset))?;
        let locations = Locations::lookup(&gl, &program);
        let vao = gl
            .create_vertex_array()
            .ok_or(BackdropError::GpuResource("vertex array"))?;

        container.append_child(&canvas).map_err(js_error)?;
        log::debug!("webgl2 surface ready for preset {}", preset.id());

        Ok(Self {
            canvas,
            gl,
            program: Some(program),
            vao: Some(vao),
            plane: None,
            locations,
        })
    }
}

impl Surface for GlSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn rebuild_plane(&mut self, width: f32, height: f32) -> Result<()> {
        if let Some(old) = self.plane.take() {
            self.gl.delete_buffer(Some(&old));
        }
        let buffer = self
            .gl
            .create_buffer()
            .ok_or(BackdropError::GpuResource("plane buffer"))?;
        let vertices = plane_vertices(width, height);

        self.gl.bind_vertex_array(self.vao.as_ref());
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let data = js_sys::Float32Array::from(&vertices[..]);
        self.gl
            .buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
        self.gl.enable_vertex_attrib_array(POSITION_LOCATION);
        self.gl
            .vertex_attrib_pointer_with_i32(POSITION_LOCATION, 2, GL::FLOAT, false, 0, 0);
        self.gl.bind_vertex_array(None);

        self.plane = Some(buffer);
        Ok(())
    }

    fn draw(&mut self, uniforms: &UniformSet, camera: &Camera) {
        let (Some(program), Some(_)) = (&self.program, &self.plane) else {
            return;
        };
        let gl = &self.gl;
        let at = &self.locations;
        gl.use_program(Some(program));

        gl.uniform_matrix4fv_with_f32_array(at.projection.as_ref(), false, camera.projection());
        gl.uniform_matrix4fv_with_f32_array(at.model_view.as_ref(), false, camera.model_view());
        gl.uniform1f(at.time.as_ref(), uniforms.time() as f32);
        let [w, h] = uniforms.resolution();
        gl.uniform2f(at.resolution.as_ref(), w, h);
        let [r, g, b] = uniforms.light_color().to_array();
        gl.uniform3f(at.light_color.as_ref(), r, g, b);
        gl.uniform1f(at.lightning_intensity.as_ref(), uniforms.lightning_intensity());
        let [mx, my] = uniforms.mouse_position();
        gl.uniform2f(at.mouse_position.as_ref(), mx, my);
        gl.uniform1f(at.mouse_lightning.as_ref(), uniforms.mouse_lightning());

        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.bind_vertex_array(self.vao.as_ref());
        gl.draw_arrays(GL::TRIANGLES, 0, 6);
        gl.bind_vertex_array(None);
    }

    fn release(&mut self) {
        let gl = &self.gl;
        if let Some(buffer) = self.plane.take() {
            gl.delete_buffer(Some(&buffer));
        }
        if let Some(vao) = self.vao.take() {
            gl.delete_vertex_array(Some(&vao));
        }
        if let Some(program) = self.program.take() {
            gl.delete_program(Some(&program));
        }
        if let Ok(Some(ext)) = gl.get_extension("WEBGL_lose_context") {
            ext.unchecked_into::<WebglLoseContext>().lose_context();
        }
        self.canvas.remove();
    }
}

fn context(canvas: &HtmlCanvasElement) -> Result<GL> {
    let options = js_sys::Object::new();
    for (key, value) in [
        ("antialias", JsValue::TRUE),
        ("alpha", JsValue::TRUE),
        ("powerPreference", JsValue::from_str("high-performance")),
    ] {
        js_sys::Reflect::set(&options, &JsValue::from_str(key), &value).map_err(js_error)?;
    }
    canvas
        .get_context_with_context_options("webgl2", &options)
        .map_err(|e| BackdropError::SurfaceUnavailable(describe(&e)))?
        .ok_or_else(|| BackdropError::SurfaceUnavailable("getContext returned null".into()))?
        .dyn_into::<GL>()
        .map_err(|_| BackdropError::SurfaceUnavailable("context is not WebGL2".into()))
}

fn compile_shader(gl: &GL, kind: u32, stage: &'static str, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or(BackdropError::GpuResource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(BackdropError::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, fragment_source: &str) -> Result<WebGlProgram> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, "vertex", VERTEX_SHADER)?;
    let fragment = match compile_shader(gl, GL::FRAGMENT_SHADER, "fragment", fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(Some(&vertex));
            return Err(err);
        }
    };

    let program = gl
        .create_program()
        .ok_or(BackdropError::GpuResource("program"))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.bind_attrib_location(&program, POSITION_LOCATION, POSITION_ATTRIBUTE);
    gl.link_program(&program);

    // Shaders are no longer needed once linked (or once linking failed).
    for shader in [&vertex, &fragment] {
        gl.detach_shader(&program, shader);
        gl.delete_shader(Some(shader));
    }

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(BackdropError::ProgramLink(log))
    }
}

pub(super) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub(super) fn js_error(value: JsValue) -> BackdropError {
    BackdropError::Host(describe(&value))
}
