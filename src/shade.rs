//! Host-side reference of the storm preset's fragment shader.
//!
//! The GPU evaluates `shaders::storm` per pixel; this mirrors it for tests and
//! for offline inspection of single pixels.

use crate::color::Rgb;
use crate::noise::{fbm, smoothstep, snoise};
use crate::uniforms::UniformSet;

/// Where the glow is centred, in UV space.
pub const LIGHT_CENTER: [f32; 2] = [0.8, 0.5];

/// Vertical position of the bolt's core at horizontal position `x`.
pub fn bolt_centerline(x: f32, t: f32) -> f32 {
    let base = 0.5 + 0.12 * snoise([x * 8.0, t * 1.5]);
    base + 0.04 * snoise([x * 40.0, t * 20.0])
}

/// Bolt coverage in `[0, ~1.6]`: thin core, wide glow and three side branches,
/// fading in from the right edge.
pub fn lightning_mask(uv: [f32; 2], t: f32) -> f32 {
    let x = uv[0];
    let base_y = bolt_centerline(x, t);
    let d = (uv[1] - base_y).abs();

    let core = smoothstep(0.012, 0.0, d);
    let glow = smoothstep(0.08, 0.0, d);

    let mut branches = 0.0;
    for i in 0..3 {
        let fi = i as f32;
        let bx = (x * (3.0 + fi)).fract();
        let by = base_y + (snoise([bx * 20.0 + fi * 7.0, t * 10.0]) * 0.15) * (1.0 - x);
        let bd = (uv[1] - by).abs() + (1.0 - x) * 0.02;
        branches += smoothstep(0.02, 0.0, bd);
    }

    let mask = glow.max(core).max(branches * 0.6);
    mask * smoothstep(1.0, 0.0, x)
}

/// Colour of one pixel at normalized screen position `uv`.
pub fn storm_pixel(uv: [f32; 2], uniforms: &UniformSet) -> Rgb {
    let time = uniforms.time() as f32;
    let dx = uv[0] - LIGHT_CENTER[0];
    let dy = uv[1] - LIGHT_CENTER[1];
    let dist = (dx * dx + dy * dy).sqrt();

    let smoke_uv = [uv[0] * 3.0 + time * 0.05, uv[1] * 3.0 + time * 0.03];
    let smoke = 0.5 + 0.5 * fbm(smoke_uv, 6);

    let pulse = 0.9 + (time * 2.0).sin() * 0.1;
    let mut light = pulse / (dist * dist * 8.0 + 0.5);
    light += smoke * 0.5 * light;

    let base = uniforms.light_color();
    let mut color = Rgb::new(0.0, 0.0, 0.0).mix(base, light.clamp(0.0, 1.0));

    let intensity = uniforms.lightning_intensity();
    if intensity > 0.0 {
        let m = lightning_mask(uv, time);
        let flash = 1.0 + 1.5 * intensity;
        let bolt = base.scale((1.2 + 0.8 * intensity) * flash);
        color = color.mix(bolt, (m * intensity).clamp(0.0, 1.0));
    }

    color.scale(smoothstep(1.2, 0.3, dist * 1.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn uniforms(intensity: bool) -> UniformSet {
        let mut u = UniformSet::new(Rgb::from_hex(0x87cefa), [1280.0, 720.0]);
        u.advance(3.25);
        u.set_striking(intensity);
        u
    }

    #[test]
    fn test_glow_peaks_near_light_center() {
        let u = uniforms(false);
        let center = storm_pixel(LIGHT_CENTER, &u);
        let corner = storm_pixel([0.02, 0.02], &u);
        assert!(center.b > corner.b);
        assert!(center.r <= u.light_color().r + 1e-6);
    }

    #[test]
    fn test_lightning_never_darkens() {
        let calm = uniforms(false);
        let strike = uniforms(true);
        for i in 0..=10 {
            for j in 0..=10 {
                let uv = [i as f32 / 10.0, j as f32 / 10.0];
                let a = storm_pixel(uv, &calm);
                let b = storm_pixel(uv, &strike);
                assert!(b.r >= a.r - 1e-6 && b.g >= a.g - 1e-6 && b.b >= a.b - 1e-6, "uv={uv:?}");
            }
        }
    }

    #[test]
    fn test_bolt_core_brightens() {
        let calm = uniforms(false);
        let strike = uniforms(true);
        let x = 0.5;
        let t = calm.time() as f32;
        let uv = [x, bolt_centerline(x, t)];
        assert!(lightning_mask(uv, t) > 0.4);
        let a = storm_pixel(uv, &calm);
        let b = storm_pixel(uv, &strike);
        assert!(b.b > a.b);
    }
}
