/// Light-blue glow on the right with fBm plasma and a horizontal bolt.
pub const STORM_BODY: &str = r#"
float fbm(vec2 st) {
    float value = 0.0;
    float amplitude = 0.5;
    float frequency = 1.0;
    for (int i = 0; i < 6; i++) {
        value += amplitude * snoise(st * frequency);
        frequency *= 2.0;
        amplitude *= 0.5;
    }
    return value;
}

// Noisy curve from right to left: core, glow and three side branches.
float lightningMask(vec2 uv, float t) {
    float x = uv.x;
    float baseY = 0.5 + 0.12 * snoise(vec2(x * 8.0, t * 1.5));
    baseY += 0.04 * snoise(vec2(x * 40.0, t * 20.0));

    float d = abs(uv.y - baseY);
    float core = smoothstep(0.012, 0.0, d);
    float glow = smoothstep(0.08, 0.0, d);

    float branches = 0.0;
    for (int i = 0; i < 3; i++) {
        float bx = fract(x * (3.0 + float(i)));
        float by = baseY + (snoise(vec2(bx * 20.0 + float(i) * 7.0, t * 10.0)) * 0.15) * (1.0 - x);
        float bd = abs(uv.y - by) + (1.0 - x) * 0.02;
        branches += smoothstep(0.02, 0.0, bd);
    }

    float mask = max(glow, core);
    mask = max(mask, branches * 0.6);
    return mask * smoothstep(1.0, 0.0, x);
}

void main() {
    vec2 p = gl_FragCoord.xy / resolution.xy;
    vec2 center = vec2(0.8, 0.5);
    float dist = distance(p, center);

    vec2 smokeUv = p * 3.0 + vec2(time * 0.05, time * 0.03);
    float smoke = 0.5 + 0.5 * fbm(smokeUv);

    float lightPulse = 0.9 + sin(time * 2.0) * 0.1;
    float baseLight = lightPulse / (dist * dist * 8.0 + 0.5);
    baseLight += smoke * 0.5 * baseLight;

    vec3 color = mix(vec3(0.0), lightColor, clamp(baseLight, 0.0, 1.0));

    if (lightningIntensity > 0.0) {
        float m = lightningMask(p, time);
        float flash = 1.0 + 1.5 * lightningIntensity;
        vec3 boltColor = lightColor * (1.2 + 0.8 * lightningIntensity);
        color = mix(color, boltColor * flash, clamp(m * lightningIntensity, 0.0, 1.0));
    }

    color *= smoothstep(1.2, 0.3, dist * 1.2);
    fragColor = vec4(color, 1.0);
}
"#;
