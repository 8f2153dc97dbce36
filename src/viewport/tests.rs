use super::*;
use crate::derivative::{CurvePoint, DerivativePoint};

fn curve() -> Vec<CurvePoint> {
    vec![
        CurvePoint::new(600.0, 10.0),
        CurvePoint::new(605.0, 12.0),
        CurvePoint::new(610.0, 20.0),
        CurvePoint::new(615.0, 22.0),
        CurvePoint::new(620.0, 100.0),
    ]
}

fn derivative() -> Vec<DerivativePoint> {
    [(602.5, 2.0), (607.5, 8.0), (612.5, 2.0), (617.5, 78.0)]
        .iter()
        .map(|&(x, y)| DerivativePoint {
            x,
            y,
            temp_gradient: 5.0,
        })
        .collect()
}

fn initial() -> ChartViewports {
    ChartViewports {
        main: Viewport::new(600.0, 620.0, 0.0, 110.0),
        derivative: Viewport::new(600.0, 620.0, -5.0, 85.0),
    }
}

#[test]
fn test_sync_propagates_x_and_rescales_y() {
    let mut viewports = initial();
    let sync = ViewportSync::default();

    let outcome = sync.sync(&mut viewports, 603.0, 613.0, &curve(), &derivative());

    assert_eq!(viewports.main.x_min, 603.0);
    assert_eq!(viewports.main.x_max, 613.0);
    assert_eq!(viewports.derivative.x_min, 603.0);
    assert_eq!(viewports.derivative.x_max, 613.0);

    // visible curve y: 12, 20 -> pad 0.4
    assert!(matches!(outcome.main, YRescale::Rescaled { .. }));
    assert!((viewports.main.y_min - 11.6).abs() < 1e-12);
    assert!((viewports.main.y_max - 20.4).abs() < 1e-12);

    // visible derivative y: 8, 2 -> pad 0.3
    assert!(matches!(outcome.derivative, YRescale::Rescaled { .. }));
    assert!((viewports.derivative.y_min - 1.7).abs() < 1e-12);
    assert!((viewports.derivative.y_max - 8.3).abs() < 1e-12);
}

#[test]
fn test_bounds_are_inclusive() {
    let range = visible_y_range(&curve(), 605.0, 610.0);
    assert_eq!(range, Some((12.0, 20.0)));
}

#[test]
fn test_empty_range_keeps_previous_y_bounds() {
    let mut viewports = initial();
    let before = viewports;

    let outcome =
        ViewportSync::default().sync(&mut viewports, 700.0, 710.0, &curve(), &derivative());

    assert_eq!(outcome.main, YRescale::Kept);
    assert_eq!(outcome.derivative, YRescale::Kept);
    assert_eq!(viewports.main.y_min, before.main.y_min);
    assert_eq!(viewports.main.y_max, before.main.y_max);
    assert_eq!(viewports.derivative.y_max, before.derivative.y_max);
    assert_eq!(viewports.main.x_min, 700.0);
}

#[test]
fn test_flat_visible_range_keeps_previous_y_bounds() {
    let mut viewports = initial();
    // one derivative point and no curve points inside
    let outcome =
        ViewportSync::default().sync(&mut viewports, 611.0, 614.0, &curve(), &derivative());
    assert_eq!(outcome.derivative, YRescale::Kept);
    assert_eq!(outcome.main, YRescale::Kept);
    assert_eq!(viewports.derivative.y_min, -5.0);
}

#[test]
fn test_repeated_sync_is_idempotent() {
    let sync = ViewportSync::default();
    let mut once = initial();
    sync.sync(&mut once, 601.0, 617.0, &curve(), &derivative());

    let mut many = initial();
    for _ in 0..50 {
        sync.sync(&mut many, 601.0, 617.0, &curve(), &derivative());
    }
    assert_eq!(once, many);
}

#[test]
fn test_fit_both() {
    let viewports = ViewportSync::default()
        .fit_both(&curve(), &derivative())
        .unwrap();

    assert_eq!(viewports.main.x_min, 600.0);
    assert_eq!(viewports.main.x_max, 620.0);
    assert!((viewports.main.y_min - 5.5).abs() < 1e-12);
    assert!((viewports.main.y_max - 104.5).abs() < 1e-12);
    assert_eq!(viewports.derivative.x_min, 600.0);
    assert_eq!(viewports.derivative.x_max, 620.0);
    assert!((viewports.derivative.y_min - (2.0 - 3.8)).abs() < 1e-12);
}

#[test]
fn test_fit_widens_flat_extent() {
    let flat = vec![CurvePoint::new(1.0, 5.0), CurvePoint::new(1.0, 5.0)];
    let viewport = ViewportSync::default().fit(&flat).unwrap();
    assert_eq!(viewport, Viewport::new(0.0, 2.0, 4.0, 6.0));

    let empty: Vec<CurvePoint> = Vec::new();
    assert!(ViewportSync::default().fit(&empty).is_none());
}

#[test]
fn test_linear_scale_roundtrip() {
    let scale = LinearScale::new(Viewport::new(600.0, 620.0, 0.0, 30.0), 400.0, 300.0);

    assert_eq!(scale.pixel_for_x(600.0), 0.0);
    assert_eq!(scale.pixel_for_x(620.0), 400.0);
    assert_eq!(scale.pixel_for_y(30.0), 0.0);
    assert_eq!(scale.pixel_for_y(0.0), 300.0);

    let x = scale.x_for_pixel(scale.pixel_for_x(613.7));
    assert!((x - 613.7).abs() < 1e-9);
    let y = scale.y_for_pixel(scale.pixel_for_y(12.25));
    assert!((y - 12.25).abs() < 1e-9);
}
