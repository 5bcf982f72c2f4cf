//! CPU port of the 2D simplex noise and fBm used by the fragment shaders.
//!
//! Follows the GLSL math step for step (single precision, same constants) so
//! host-side tests can reason about what the GPU draws.

const C: [f32; 4] = [
    0.211_324_87,  // (3 - sqrt 3) / 6
    0.366_025_42,  // (sqrt 3 - 1) / 2
    -0.577_350_26, // -1 + 2 * C.x
    0.024_390_243, // 1 / 41
];

fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: f32) -> f32 {
    mod289(((x * 34.0) + 1.0) * x)
}

fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Simplex noise in roughly `[-1, 1]`.
pub fn snoise(v: [f32; 2]) -> f32 {
    let s = (v[0] + v[1]) * C[1];
    let mut i = [(v[0] + s).floor(), (v[1] + s).floor()];
    let t = (i[0] + i[1]) * C[0];
    let x0 = [v[0] - i[0] + t, v[1] - i[1] + t];

    let i1 = if x0[0] > x0[1] { [1.0, 0.0] } else { [0.0, 1.0] };
    let x12 = [
        x0[0] + C[0] - i1[0],
        x0[1] + C[0] - i1[1],
        x0[0] + C[2],
        x0[1] + C[2],
    ];

    i = [mod289(i[0]), mod289(i[1])];
    let p = [
        permute(permute(i[1]) + i[0]),
        permute(permute(i[1] + i1[1]) + i[0] + i1[0]),
        permute(permute(i[1] + 1.0) + i[0] + 1.0),
    ];

    let falloff = |a: f32, b: f32| {
        let m = (0.5 - (a * a + b * b)).max(0.0);
        let m = m * m;
        m * m
    };
    let mut m = [
        falloff(x0[0], x0[1]),
        falloff(x12[0], x12[1]),
        falloff(x12[2], x12[3]),
    ];

    let mut g = [0.0f32; 3];
    let corners = [(x0[0], x0[1]), (x12[0], x12[1]), (x12[2], x12[3])];
    for k in 0..3 {
        let x = 2.0 * fract(p[k] * C[3]) - 1.0;
        let h = x.abs() - 0.5;
        let ox = (x + 0.5).floor();
        let a0 = x - ox;
        m[k] *= 1.792_842_9 - 0.853_734_7 * (a0 * a0 + h * h);
        g[k] = a0 * corners[k].0 + h * corners[k].1;
    }

    130.0 * (m[0] * g[0] + m[1] * g[1] + m[2] * g[2])
}

/// Fractal Brownian motion: `octaves` layers, doubling frequency and halving
/// amplitude from 0.5.
pub fn fbm(st: [f32; 2], octaves: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..octaves {
        value += amplitude * snoise([st[0] * frequency, st[1] * frequency]);
        frequency *= 2.0;
        amplitude *= 0.5;
    }
    value
}

/// GLSL `smoothstep`, including the reversed-edge form the shaders rely on.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
