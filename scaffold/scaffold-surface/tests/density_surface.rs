//! Integration tests for field construction and extraction.

use approx::assert_relative_eq;
use nalgebra::Point3;
use proptest::prelude::*;
use scaffold_surface::{
    DensityField, GridSpec, IsosurfaceExtractor, MarchingCubes, SurfaceParams, build_surface,
    capsule_sdf, smooth_min,
};
use scaffold_types::Strut;

#[test]
fn capsule_scenario_values() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(10.0, 0.0, 0.0);

    let inside = capsule_sdf(Point3::new(5.0, 0.0, 0.0), a, b, 1.0);
    let outside = capsule_sdf(Point3::new(5.0, 2.0, 0.0), a, b, 1.0);
    assert_relative_eq!(inside, -1.0);
    assert_relative_eq!(outside, 1.0);

    // Density is the negated distance.
    let strut = Strut::new(a, b, 1.0);
    let spec = GridSpec::new(Point3::new(5.0, 1.0, 0.0), 1.0, 1);
    let field = DensityField::sample(&spec, &[strut], 0.5, false);
    assert_relative_eq!(field.get(1, 0, 1).unwrap(), 1.0);
    assert_relative_eq!(field.get(1, 2, 1).unwrap(), -1.0);
}

#[test]
fn swapping_endpoints_keeps_the_field() {
    let struts = vec![
        Strut::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.5, 0.0), 0.4),
        Strut::new(Point3::new(1.0, 0.5, 0.0), Point3::new(0.5, 1.5, 1.0), 0.3),
    ];
    let swapped: Vec<_> = struts.iter().map(Strut::reversed).collect();
    let spec = GridSpec::new(Point3::new(0.0, 0.5, 0.5), 0.2, 8);

    let a = DensityField::sample(&spec, &struts, 0.5, true);
    let b = DensityField::sample(&spec, &swapped, 0.5, true);
    for (x, y) in a.values().iter().zip(b.values()) {
        assert_relative_eq!(x, y, epsilon = 1e-12);
    }
}

#[test]
fn all_negative_field_extracts_nothing() {
    let field = vec![-0.5; 5 * 6 * 7];
    let mesh = MarchingCubes::new()
        .extract(&field, [5, 6, 7], 0.0, 0.3)
        .unwrap();
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn distant_grid_yields_empty_mesh() {
    let strut = Strut::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0), 0.3);
    let params = SurfaceParams::preview()
        .with_half_extent(4)
        .with_center(Point3::new(100.0, 0.0, 0.0));
    let result = build_surface(&[strut], &params, &MarchingCubes::new()).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.solid_voxels, 0);
}

#[test]
fn single_sphere_volume() {
    // A zero-length strut is a sphere.
    let c = Point3::new(0.3, -0.2, 0.1);
    let radius = 1.0;
    let params = SurfaceParams::new()
        .with_spacing(0.1)
        .with_half_extent(14)
        .with_blur(false);
    let result = build_surface(&[Strut::new(c, c, radius)], &params, &MarchingCubes::new()).unwrap();

    let exact = 4.0 / 3.0 * std::f64::consts::PI;
    assert_relative_eq!(result.mesh.signed_volume(), exact, max_relative = 0.03);

    for v in &result.mesh.vertices {
        assert_relative_eq!((v - c).norm(), radius, epsilon = 0.02);
    }
}

#[test]
fn joints_are_filleted() {
    // Two struts meeting at a right angle: the blended field is solid in
    // the inner corner where neither capsule alone reaches.
    let hub = Point3::origin();
    let struts = [
        Strut::new(hub, Point3::new(2.0, 0.0, 0.0), 0.3),
        Strut::new(hub, Point3::new(0.0, 2.0, 0.0), 0.3),
    ];
    let corner = Point3::new(0.4, 0.4, 0.0);
    let hard = capsule_sdf(corner, hub, struts[0].end, 0.3)
        .min(capsule_sdf(corner, hub, struts[1].end, 0.3));
    let soft = scaffold_surface::network_sdf(corner, &struts, 0.6);
    assert!(hard > 0.0);
    assert!(soft < 0.0);
}

#[test]
fn blur_smooths_without_moving_the_surface_far() {
    let strut = Strut::new(Point3::new(-1.5, 0.0, 0.0), Point3::new(1.5, 0.0, 0.0), 0.6);
    let base = SurfaceParams::new()
        .with_spacing(0.1)
        .with_half_extent(24)
        .with_center(Point3::origin());

    let sharp = build_surface(&[strut], &base.clone().with_blur(false), &MarchingCubes::new()).unwrap();
    let smooth = build_surface(&[strut], &base, &MarchingCubes::new()).unwrap();

    let v_sharp = sharp.mesh.signed_volume();
    let v_smooth = smooth.mesh.signed_volume();
    assert!(v_smooth > 0.0);
    assert!(v_smooth <= v_sharp);
    assert_relative_eq!(v_smooth, v_sharp, max_relative = 0.15);
}

proptest! {
    #[test]
    fn smooth_min_is_symmetric(d1 in -10.0f64..10.0, d2 in -10.0f64..10.0, k in 0.3f64..0.8) {
        prop_assert!((smooth_min(d1, d2, k) - smooth_min(d2, d1, k)).abs() < 1e-9);
    }

    #[test]
    fn smooth_min_of_equal_values(d in -10.0f64..10.0, k in 0.3f64..0.8) {
        prop_assert!((smooth_min(d, d, k) - (d - k / 4.0)).abs() < 1e-9);
    }

    #[test]
    fn smooth_min_never_exceeds_min(d1 in -10.0f64..10.0, d2 in -10.0f64..10.0, k in 0.3f64..0.8) {
        let s = smooth_min(d1, d2, k);
        prop_assert!(s <= d1.min(d2) + 1e-12);
        prop_assert!(s >= d1.min(d2) - k / 4.0 - 1e-12);
    }

    #[test]
    fn capsule_midpoint_and_surface(
        ax in -5.0f64..5.0, ay in -5.0f64..5.0, az in -5.0f64..5.0,
        dx in 0.5f64..5.0, r in 0.1f64..2.0,
    ) {
        let a = Point3::new(ax, ay, az);
        let b = Point3::new(ax + dx, ay, az);
        let mid = nalgebra::center(&a, &b);
        prop_assert!((capsule_sdf(mid, a, b, r) + r).abs() < 1e-9);
        let on_surface = mid + nalgebra::Vector3::new(0.0, 0.0, r);
        prop_assert!(capsule_sdf(on_surface, a, b, r).abs() < 1e-9);
    }
}
