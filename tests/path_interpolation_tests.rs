use approx::assert_relative_eq;
use chart_morph::core::{Path, PathInterpolator, Point, Resampling, interpolate_path};

fn path(points: &[(f64, f64)]) -> Path {
    points.iter().map(|(x, y)| Point::new(*x, *y)).collect::<Vec<_>>().into()
}

#[test]
fn equal_length_paths_blend_pointwise() {
    let from = path(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
    let to = path(&[(0.0, 10.0), (10.0, 20.0), (20.0, 10.0)]);
    let mid = interpolate_path(&from, &to, 0.5);

    assert_eq!(mid, path(&[(0.0, 5.0), (10.0, 15.0), (20.0, 5.0)]));
}

#[test]
fn ends_return_the_input_outlines() {
    let from = path(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
    let to = path(&[(0.0, 5.0), (30.0, 5.0)]);
    let interpolator = PathInterpolator::new(&from, &to, Resampling::ExtendToLongest);

    assert_eq!(interpolator.at(0.0), from);
    assert_eq!(interpolator.at(1.0), to);
}

#[test]
fn shorter_outline_is_extended_along_its_own_length() {
    let from = path(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
    let to = path(&[(0.0, 10.0), (30.0, 10.0)]);
    let interpolator = PathInterpolator::new(&from, &to, Resampling::ExtendToLongest);

    assert_eq!(interpolator.resampled_len(), 4);
    let (resampled_from, resampled_to) = interpolator.resampled();
    assert_eq!(resampled_from, &from);
    for (point, expected_x) in resampled_to.points().iter().zip([0.0, 10.0, 20.0, 30.0]) {
        assert_relative_eq!(point.x, expected_x, epsilon = 1e-9);
        assert_relative_eq!(point.y, 10.0, epsilon = 1e-9);
    }

    let mid = interpolator.at(0.5);
    for (point, expected_x) in mid.points().iter().zip([0.0, 10.0, 20.0, 30.0]) {
        assert_relative_eq!(point.x, expected_x, epsilon = 1e-9);
        assert_relative_eq!(point.y, 5.0, epsilon = 1e-9);
    }
}

#[test]
fn uniform_resampling_uses_fixed_resolution() {
    let from = path(&[(0.0, 0.0), (100.0, 0.0)]);
    let to = path(&[(0.0, 0.0), (0.0, 50.0), (0.0, 100.0)]);
    let interpolator = PathInterpolator::new(&from, &to, Resampling::Uniform { resolution: 11 });

    assert_eq!(interpolator.resampled_len(), 11);
    let mid = interpolator.at(0.5);
    assert_eq!(mid.len(), 11);
    assert_relative_eq!(mid.points()[10].x, 50.0, epsilon = 1e-9);
    assert_relative_eq!(mid.points()[10].y, 50.0, epsilon = 1e-9);
}

#[test]
fn empty_input_gives_empty_output_everywhere() {
    let full = path(&[(0.0, 0.0), (1.0, 1.0)]);
    let empty = Path::empty();

    for position in [0.0, 0.25, 1.0] {
        assert!(interpolate_path(&full, &empty, position).is_empty());
        assert!(interpolate_path(&empty, &full, position).is_empty());
    }
}

#[test]
fn positions_outside_unit_range_extrapolate() {
    let from = path(&[(0.0, 0.0), (10.0, 0.0)]);
    let to = path(&[(0.0, 10.0), (10.0, 10.0)]);
    let beyond = interpolate_path(&from, &to, 1.5);

    assert_relative_eq!(beyond.points()[0].y, 15.0, epsilon = 1e-9);
}
