//! Property tests for ingest, derivative and tangent geometry

use proptest::prelude::*;
use thermotangent::config::TANGENT_SPAN_PERCENT;
use thermotangent::derivative::DerivativeEngine;
use thermotangent::geometry::{clip_tangent, intersect, TangentParams, Viewport};
use thermotangent::ingest::{DataIngestor, RawRow, RawValue, Sample};
use thermotangent::viewport::{ChartViewports, ViewportSync};

fn finite(range: std::ops::Range<f64>) -> impl Strategy<Value = f64> {
    range.prop_filter("finite", |v| v.is_finite())
}

/// Strictly increasing times with finite temperature and signal
fn clean_samples(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Sample>> {
    prop::collection::vec((finite(0.01..10.0), finite(-50.0..1500.0), finite(-1e3..1e3)), len)
        .prop_map(|steps| {
            let mut time = 0.0;
            steps
                .into_iter()
                .map(|(dt, temperature, signal)| {
                    time += dt;
                    Sample::new(time, temperature, signal)
                })
                .collect()
        })
}

fn to_row(sample: &Sample) -> RawRow {
    vec![
        RawValue::Number(sample.time),
        RawValue::Number(sample.temperature),
        RawValue::Number(sample.signal),
    ]
}

fn assert_on_line(params: &TangentParams, x: f64, y: f64) -> Result<(), TestCaseError> {
    let expected = params.y_at(x);
    let tolerance = 1e-9 * expected.abs().max(y.abs()).max(1.0);
    prop_assert!((y - expected).abs() <= tolerance, "({x}, {y}) off {params:?}");
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_ingest_keeps_clean_rows(samples in clean_samples(3..60)) {
        let rows: Vec<RawRow> = samples.iter().map(to_row).collect();
        let report = DataIngestor::default().ingest(&rows).unwrap();

        prop_assert_eq!(&report.samples, &samples);
        prop_assert_eq!(report.dropped_rows(), 0);
        prop_assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_ingest_counts_dropped_rows(
        samples in clean_samples(3..40),
        garbage in prop::collection::vec(0usize..40, 0..10),
        rewinds in prop::collection::vec(0usize..40, 0..10),
    ) {
        let mut rows: Vec<RawRow> = samples.iter().map(to_row).collect();
        // insert from the back so earlier positions stay valid
        let mut inserts: Vec<(usize, RawRow)> = Vec::new();
        for &at in &garbage {
            let row = vec![RawValue::Number(1.0), RawValue::Empty, RawValue::Number(2.0)];
            inserts.push((at.min(rows.len()), row));
        }
        for &at in &rewinds {
            let row = vec![RawValue::Number(-1.0), RawValue::Number(0.0), RawValue::Number(0.0)];
            inserts.push((at.min(rows.len()), row));
        }
        inserts.sort_by(|a, b| b.0.cmp(&a.0));
        for (at, row) in inserts {
            rows.insert(at.max(1), row);
        }

        let report = DataIngestor::default().ingest(&rows).unwrap();
        prop_assert_eq!(&report.samples, &samples);
        prop_assert_eq!(report.invalid_rows, garbage.len());
        prop_assert_eq!(report.non_monotonic_rows, rewinds.len());
    }

    #[test]
    fn test_derivative_shape(samples in clean_samples(0..80)) {
        let curves = DerivativeEngine::default().compute_unchecked(&samples);

        prop_assert_eq!(curves.curve.len(), samples.len());
        prop_assert_eq!(curves.derivative.len(), samples.len().saturating_sub(1));

        for (point, pair) in curves.derivative.iter().zip(samples.windows(2)) {
            let dt = pair[1].time - pair[0].time;
            let gradient = (pair[1].temperature - pair[0].temperature) / dt;
            prop_assert_eq!(point.temp_gradient, gradient);
        }
    }

    #[test]
    fn test_clip_returns_points_on_line(
        slope in finite(-1e3..1e3),
        anchor_x in finite(500.0..700.0),
        anchor_y in finite(-100.0..100.0),
        x_min in finite(500.0..650.0),
        width in finite(0.1..200.0),
        y_min in finite(-100.0..50.0),
        height in finite(0.1..200.0),
    ) {
        let params = TangentParams::new(slope, anchor_x, anchor_y);
        let viewport = Viewport::new(x_min, x_min + width, y_min, y_min + height);
        let segment = clip_tangent(&params, &viewport, TANGENT_SPAN_PERCENT);

        for point in segment.points() {
            prop_assert!(point.x.is_finite() && point.y.is_finite());
            assert_on_line(&params, point.x, point.y)?;
        }
        prop_assert!(segment.start.x <= segment.end.x);
    }

    #[test]
    fn test_horizontal_clip_keeps_anchor_y(
        anchor_y in finite(-100.0..100.0),
        x_min in finite(500.0..650.0),
        width in finite(0.1..200.0),
    ) {
        let params = TangentParams::new(0.0, x_min, anchor_y);
        let viewport = Viewport::new(x_min, x_min + width, -1.0, 1.0);
        let segment = clip_tangent(&params, &viewport, TANGENT_SPAN_PERCENT);

        prop_assert_eq!(segment.start.y, anchor_y);
        prop_assert_eq!(segment.end.y, anchor_y);
    }

    #[test]
    fn test_intersection_lies_on_both_lines(
        m1 in finite(-100.0..100.0),
        m2 in finite(-100.0..100.0),
        x1 in finite(500.0..700.0),
        x2 in finite(500.0..700.0),
        y1 in finite(-100.0..100.0),
        y2 in finite(-100.0..100.0),
    ) {
        prop_assume!((m1 - m2).abs() > 1e-3);
        let first = TangentParams::new(m1, x1, y1);
        let second = TangentParams::new(m2, x2, y2);

        let point = intersect(&first, &second).unwrap();
        let magnitude = point.y.abs().max(point.x.abs()).max(1.0);
        let tolerance = 1e-9 * magnitude * (m1.abs() + m2.abs()).max(1.0);
        prop_assert!((first.y_at(point.x) - point.y).abs() <= tolerance);
        prop_assert!((second.y_at(point.x) - point.y).abs() <= tolerance);
    }

    #[test]
    fn test_equal_slopes_never_intersect(
        m in finite(-100.0..100.0),
        x1 in finite(500.0..700.0),
        x2 in finite(500.0..700.0),
        y1 in finite(-100.0..100.0),
        y2 in finite(-100.0..100.0),
    ) {
        let first = TangentParams::new(m, x1, y1);
        let second = TangentParams::new(m, x2, y2);
        prop_assert!(intersect(&first, &second).is_none());
    }

    #[test]
    fn test_sync_is_idempotent(
        samples in clean_samples(3..60),
        lo in finite(-50.0..1500.0),
        span in finite(0.1..500.0),
    ) {
        let curves = DerivativeEngine::default().compute_unchecked(&samples);
        let sync = ViewportSync::default();
        let start = ChartViewports::default();

        let mut once = start;
        let first = sync.sync(&mut once, lo, lo + span, &curves.curve, &curves.derivative);
        let mut twice = once;
        let second = sync.sync(&mut twice, lo, lo + span, &curves.curve, &curves.derivative);

        prop_assert_eq!(once, twice);
        prop_assert_eq!(first, second);
    }
}
