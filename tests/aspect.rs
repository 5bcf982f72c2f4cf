use storm_backdrop::viewport::plane_vertices;
use storm_backdrop::{Camera, PlaneSizing, Preset};

const ASPECTS: [f32; 6] = [0.4, 0.5625, 1.0, 1.333, 1.7778, 2.4];

fn corners(width: f32, height: f32) -> Vec<(f32, f32)> {
    plane_vertices(width, height)
        .chunks(2)
        .map(|v| (v[0], v[1]))
        .collect()
}

#[test]
fn aspect_sized_plane_covers_the_view() {
    let sizing = Preset::Storm.config().plane;
    for &aspect in &ASPECTS {
        let camera = Camera::new(aspect);
        let (half_w, half_h) = camera.visible_half_extent();
        let (w, h) = sizing.extent(aspect);
        assert!(w / 2.0 >= half_w, "aspect {aspect}: plane {w} narrower than view {}", half_w * 2.0);
        assert!(h / 2.0 >= half_h, "aspect {aspect}: plane {h} shorter than view {}", half_h * 2.0);
        assert!((w / h - aspect).abs() < 1e-5);
    }
}

#[test]
fn projected_corners_land_off_screen() {
    for &aspect in &ASPECTS {
        let camera = Camera::new(aspect);
        let (w, h) = Preset::Tempest.config().plane.extent(aspect);
        for (x, y) in corners(w, h) {
            let (nx, ny) = camera.project(x, y);
            assert!(nx.abs() >= 1.0 && ny.abs() >= 1.0, "aspect {aspect}: corner ({x},{y}) -> ({nx},{ny})");
        }
    }
}

#[test]
fn fixed_plane_covers_moderate_aspects() {
    let sizing = Preset::Haze.config().plane;
    assert!(!sizing.follows_aspect());
    for &aspect in ASPECTS.iter().filter(|a| **a <= 1.25) {
        let camera = Camera::new(aspect);
        let (half_w, half_h) = camera.visible_half_extent();
        let (w, h) = sizing.extent(aspect);
        assert_eq!((w, h), (4.0, 6.0));
        assert!(w / 2.0 >= half_w && h / 2.0 >= half_h, "aspect {aspect} shows an edge");
    }
}

#[test]
fn plane_is_two_triangles_around_origin() {
    let verts = corners(PlaneSizing::ViewportAspect { height: 4.0 }.extent(2.0).0, 4.0);
    assert_eq!(verts.len(), 6);
    let (sx, sy) = verts.iter().fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    assert!(sx.abs() < 1e-6 && sy.abs() < 1e-6);
    assert!(verts.iter().all(|(x, y)| x.abs() == 4.0 && y.abs() == 2.0));
}
