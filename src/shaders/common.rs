/// Fragment prelude: version, precision, every backdrop uniform and the output.
///
/// Presets that ignore a uniform let the compiler drop it; the host skips
/// uniforms without a location.
pub const FRAGMENT_PRELUDE: &str = r#"#version 300 es
precision highp float;

uniform float time;
uniform vec2 resolution;
uniform vec3 lightColor;
uniform float lightningIntensity;
uniform vec2 mousePosition;
uniform float mouseLightning;

out vec4 fragColor;
"#;

/// 2D simplex noise by Ian McEwan, Ashima Arts (public domain).
pub const SIMPLEX_NOISE: &str = r#"
vec3 mod289(vec3 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec2 mod289(vec2 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec3 permute(vec3 x) { return mod289(((x * 34.0) + 1.0) * x); }

float snoise(vec2 v) {
    const vec4 C = vec4(0.211324865405187,
                        0.366025403784439,
                       -0.577350269189626,
                        0.024390243902439);
    vec2 i  = floor(v + dot(v, C.yy));
    vec2 x0 = v - i + dot(i, C.xx);
    vec2 i1 = (x0.x > x0.y) ? vec2(1.0, 0.0) : vec2(0.0, 1.0);
    vec4 x12 = x0.xyxy + C.xxzz;
    x12.xy -= i1;
    i = mod289(i);
    vec3 p = permute(permute(i.y + vec3(0.0, i1.y, 1.0)) + i.x + vec3(0.0, i1.x, 1.0));
    vec3 m = max(0.5 - vec3(dot(x0, x0), dot(x12.xy, x12.xy), dot(x12.zw, x12.zw)), 0.0);
    m = m * m;
    m = m * m;
    vec3 x = 2.0 * fract(p * C.www) - 1.0;
    vec3 h = abs(x) - 0.5;
    vec3 ox = floor(x + 0.5);
    vec3 a0 = x - ox;
    m *= 1.79284291400159 - 0.85373472095314 * (a0 * a0 + h * h);
    vec3 g;
    g.x  = a0.x * x0.x + h.x * x0.y;
    g.yz = a0.yz * x12.xz + h.yz * x12.yw;
    return 130.0 * dot(m, g);
}
"#;

/// Drifting smoke with swirl and turbulence, shared by the tempest and haze presets.
pub const SMOKE_FIELD: &str = r#"
float dynamicLight(vec2 uv, vec2 center, float t) {
    float dist = distance(uv, center);
    float pulse = 0.8 + sin(t * 1.5) * 0.2 + sin(t * 3.7) * 0.1;
    float baseLight = pulse / (dist * dist * 8.0 + 0.2);
    float flicker = 1.0 + sin(t * 25.0) * 0.05 + sin(t * 47.0) * 0.03;
    return baseLight * flicker;
}

float generateSmoke(vec2 uv, float t) {
    vec2 flow = vec2(-0.08, 0.01);
    vec2 coord = (uv + flow * t) * 3.0;
    float smoke = 0.0;
    float amplitude = 1.0;

    for (int i = 0; i < 5; i++) {
        float swirl = sin(coord.x * 2.0 + t * 0.25) * 0.1;
        smoke += snoise(coord + vec2(0.0, swirl) + vec2(t * 0.15, t * 0.05)) * amplitude;
        coord *= 2.0;
        amplitude *= 0.5;
    }

    vec2 turbulence = vec2(
        snoise(uv * 8.0 + vec2(t * 0.1, 0.0)) * 0.05,
        snoise(uv * 6.0 + vec2(0.0, t * 0.08)) * 0.03
    );
    smoke += snoise((uv + turbulence) * 4.0 + vec2(t * 0.05, t * 0.04)) * 0.3;

    return clamp(smoke, -1.0, 1.0);
}

vec3 litSmoke(vec2 uv, vec2 center, float t, vec3 glowColor) {
    float smoke = generateSmoke(uv, t);
    float distToLight = distance(uv, center);
    float smokeDensity = smoothstep(0.8, 0.0, distToLight) * (0.5 + smoke * 0.5);

    float mainLight = dynamicLight(uv, center, t);
    float scatteredLight = mainLight * smokeDensity * 2.0;
    scatteredLight += mainLight * abs(smoke) * 0.3;

    float halo = 1.0 / (distToLight * distToLight * 15.0 + 1.0) * 0.8;
    float outerGlow = 1.0 / (distToLight * distToLight * 3.0 + 1.0) * 0.3;

    vec3 smokeColor = mix(vec3(0.1, 0.15, 0.3), vec3(0.4, 0.6, 1.0), clamp(scatteredLight * 3.0, 0.0, 1.0));
    smokeColor = mix(smokeColor, vec3(0.8, 0.9, 1.0), clamp(scatteredLight * 8.0, 0.0, 1.0));

    vec3 color = smokeColor * smokeDensity;
    color += glowColor * mainLight * 0.4;
    color += vec3(0.15, 0.3, 0.6) * halo * 0.4;
    color += vec3(0.03, 0.15, 0.4) * outerGlow * 0.3;
    return color;
}

vec3 toneMap(vec3 color) {
    color = clamp(color, 0.0, 1.0);
    color = color / (color + vec3(1.0));
    return pow(color, vec3(0.9));
}
"#;
