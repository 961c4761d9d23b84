use axiscope::config::PlotConfig;
use axiscope::plotter::{FunctionPlotter, PlotOutcome};

#[test]
fn blank_input_clears() {
    let mut plotter = FunctionPlotter::default();
    assert!(matches!(plotter.plot("x"), PlotOutcome::Plotted { .. }));
    assert_eq!(plotter.plot("   "), PlotOutcome::Cleared);
    assert!(plotter.curve().is_none());
}

#[test]
fn parabola_covers_the_whole_domain() {
    let mut plotter = FunctionPlotter::default();
    let outcome = plotter.plot("x^2");
    assert_eq!(
        outcome,
        PlotOutcome::Plotted {
            samples: 100_001,
            skipped: 0
        }
    );

    let curve = plotter.curve().expect("curve drawn");
    assert_eq!(curve.len(), 100_001);
    assert_eq!(curve.expression, "x^2");
    assert!(curve.points.windows(2).all(|w| w[0].x < w[1].x));
    assert!(curve.points.iter().all(|p| p.z == 0.0));

    let at_two = curve.point_at(2.0, 1e-9).expect("sample at 2");
    assert!((at_two.y - 4.0).abs() < 1e-9);
    assert_eq!(curve.points[0].x, -5000.0);
    assert_eq!(curve.points[100_000].x, 5000.0);
}

#[test]
fn reciprocal_skips_only_the_pole() {
    let mut plotter = FunctionPlotter::default();
    let outcome = plotter.plot("1/x");
    assert_eq!(
        outcome,
        PlotOutcome::Plotted {
            samples: 100_000,
            skipped: 1
        }
    );

    let curve = plotter.curve().expect("curve drawn");
    assert!(curve.point_at(0.0, 1e-9).is_none());
    let right = curve.point_at(0.1, 1e-9).expect("sample at 0.1");
    let left = curve.point_at(-0.1, 1e-9).expect("sample at -0.1");
    assert!((right.y - 10.0).abs() < 1e-6);
    assert!((left.y + 10.0).abs() < 1e-6);
}

#[test]
fn failed_replot_leaves_nothing() {
    let mut plotter = FunctionPlotter::default();
    plotter.plot("sin(x)");
    assert!(plotter.curve().is_some());

    let outcome = plotter.plot("sin(");
    assert!(outcome.is_rejected());
    assert!(plotter.curve().is_none());
}

#[test]
fn custom_domain_and_variable() {
    let config = PlotConfig {
        min: -1.0,
        max: 1.0,
        step: 0.5,
        variable: "t".into(),
        ..PlotConfig::default()
    };
    let mut plotter = FunctionPlotter::new(&config);
    assert_eq!(plotter.domain().sample_count(), 5);
    plotter.plot("t * 2");
    let xs: Vec<f64> = plotter
        .curve()
        .expect("curve drawn")
        .points
        .iter()
        .map(|p| p.y)
        .collect();
    assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);

    // `x` is not bound here, so every sample is skipped
    assert_eq!(
        plotter.plot("x"),
        PlotOutcome::Plotted {
            samples: 0,
            skipped: 5
        }
    );
}
