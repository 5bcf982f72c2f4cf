/// Smoke lit from the right edge, radial lightning from three sources near
/// the light, and a smoke puff trailing the pointer.
pub const TEMPEST_BODY: &str = r#"
float generateLightning(vec2 uv, float t) {
    float lightning = 0.0;
    for (int i = 0; i < 3; i++) {
        vec2 lightPos = (i == 0) ? vec2(0.95, 0.6) : (i == 1) ? vec2(0.98, 0.4) : vec2(0.92, 0.5);
        vec2 toLight = uv - lightPos;
        float dist = length(toLight);
        float angle = atan(toLight.y, toLight.x);

        float noiseOffset = snoise(vec2(angle * 8.0 + t * 20.0, dist * 15.0)) * 0.15;
        float zigzag = sin(dist * 50.0 + t * 100.0 + noiseOffset * 10.0) * 0.02;
        float branchNoise = snoise(vec2(dist * 25.0, angle * 15.0 + t * 25.0)) * 0.03;
        float path = abs(sin(angle * 3.0 + t * 15.0) * 0.1 + noiseOffset + zigzag + branchNoise);

        float falloff = 1.0 / (dist * dist * 20.0 + 1.0);
        float core = smoothstep(0.02, 0.0, path) * falloff;
        float glow = smoothstep(0.1, 0.0, path) * falloff * 0.3;
        lightning += (core + glow) * (i == 0 ? 1.0 : 0.6);
    }
    return clamp(lightning, 0.0, 1.0);
}

float generateMouseSmoke(vec2 uv, vec2 mousePos, float t, float intensity) {
    float dist = length(uv - mousePos);
    if (dist > 0.2) return 0.0;
    float smokeNoise = snoise(uv * 15.0 + vec2(t * 2.0, t * 1.5));
    float density = smoothstep(0.2, 0.0, dist) * (0.5 + smokeNoise * 0.5);
    // Puff spreads as the trigger intensity decays from 1 to 0.
    return density * (1.0 - smoothstep(0.0, 1.0, intensity));
}

void main() {
    vec2 uv = gl_FragCoord.xy / resolution.xy;
    vec2 center = vec2(0.95, 0.5);

    vec3 color = litSmoke(uv, center, time, vec3(0.4, 0.5, 0.7));

    if (lightningIntensity > 0.0) {
        color += lightColor * generateLightning(uv, time) * lightningIntensity * 1.5;
    }
    if (mouseLightning > 0.0) {
        color += vec3(0.4, 0.6, 1.0) * generateMouseSmoke(uv, mousePosition, time, mouseLightning) * 0.5;
    }

    fragColor = vec4(toneMap(color), 1.0);
}
"#;
