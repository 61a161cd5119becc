extern crate plotters;
use plotters::prelude::*;

extern crate anchorline;
use anchorline::debug_draw::{draw_gizmos, DebugDrawSettings, GizmoSink, Tint};
use anchorline::{BezierSpline, ControlPointMode, Point, PointN};

/// Collects the debug spheres as plain coordinates for plotting
struct Spheres(Vec<(f64, f64)>);

impl GizmoSink<PointN<f64, 2>> for Spheres {
    fn draw_sphere(&mut self, center: PointN<f64, 2>, _radius: f64, _tint: Tint) {
        self.0.push((center.axis(0), center.axis(1)));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a closed rail with a mirrored and an aligned joint
    let mut spline: BezierSpline<PointN<f64, 2>> = BezierSpline::new();
    spline.add_curve();
    spline.add_curve();
    spline.set_control_point(1, PointN::new([2.0, 2.0]))?;
    spline.set_control_point(3, PointN::new([5.0, 2.5]))?;
    spline.set_control_point_mode(3, ControlPointMode::Mirrored)?;
    spline.set_control_point(4, PointN::new([7.0, 2.0]))?;
    spline.set_control_point(6, PointN::new([6.0, -2.0]))?;
    spline.set_control_point_mode(6, ControlPointMode::Aligned)?;
    spline.set_control_point(7, PointN::new([4.0, -3.0]))?;
    spline.set_loop(true);
    spline.set_control_point_mode(0, ControlPointMode::Mirrored)?;

    // render the curve to desired accuracy
    let nsteps: usize = 1000;
    let mut curve: Vec<(f64, f64)> = Vec::with_capacity(nsteps + 1);
    for t in 0..=nsteps {
        let p = spline.point(t as f64 / nsteps as f64);
        curve.push((p.axis(0), p.axis(1)));
    }

    let polygon: Vec<(f64, f64)> = spline
        .control_points()
        .iter()
        .map(|p| (p.axis(0), p.axis(1)))
        .collect();

    let mut spheres = Spheres(Vec::new());
    draw_gizmos(&spline, &DebugDrawSettings::default(), &mut spheres);

    let root = SVGBackend::new("bezier_spline.svg", (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-4f64..10f64, -5f64..5f64)?;

    // control polygon with handles
    chart.draw_series(LineSeries::new(polygon.clone(), BLACK.mix(0.3)))?;
    chart.draw_series(PointSeries::of_element(polygon, 4, &BLUE, &|coord, size, style| {
        EmptyElement::at(coord) + Circle::new((0, 0), size, style)
    }))?;

    // the actual spline
    chart.draw_series(LineSeries::new(curve, &RED))?;

    // debug gizmo samples
    chart.draw_series(PointSeries::of_element(spheres.0, 2, &GREEN, &|coord, size, style| {
        EmptyElement::at(coord) + Circle::new((0, 0), size, style.filled())
    }))?;

    root.present()?;
    println!("wrote bezier_spline.svg ({} curves)", spline.curve_count());
    Ok(())
}
