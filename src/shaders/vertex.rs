/// Shared vertex shader: places the backdrop plane in front of the camera.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 position;

uniform mat4 projectionMatrix;
uniform mat4 modelViewMatrix;

void main() {
    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 0.0, 1.0);
}
"#;

/// Attribute name bound to location 0.
pub const POSITION_ATTRIBUTE: &str = "position";
pub const PROJECTION_MATRIX: &str = "projectionMatrix";
pub const MODEL_VIEW_MATRIX: &str = "modelViewMatrix";
