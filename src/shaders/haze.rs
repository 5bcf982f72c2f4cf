/// Smoke and glow only; the light tint comes from `lightColor`.
pub const HAZE_BODY: &str = r#"
void main() {
    vec2 uv = gl_FragCoord.xy / resolution.xy;
    vec3 color = litSmoke(uv, vec2(0.95, 0.5), time, lightColor);
    fragColor = vec4(toneMap(color), 1.0);
}
"#;
