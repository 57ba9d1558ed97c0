// src/plot_framework.rs

use anyhow::Result;
use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{Polygon, Text};
use plotters::series::LineSeries;
use plotters::style::colors::WHITE;
use plotters::style::{Color, IntoFont};

use crate::animation::scene::FrameScene;
use crate::animation::Layout;
use crate::constants::{
    ANGLE_LABEL_POS, CLOCK_LABEL_POS, COLOR_ANGLE_TRACE, COLOR_CHARGE_STATION, COLOR_ROBOT,
    COLOR_SCENE_TEXT, COLOR_TARGET_TRACE, LINE_WIDTH_CHARGE_STATION, LINE_WIDTH_PLOT, SCENE_X_MAX,
    SCENE_X_MIN, SCENE_Y_MAX, SCENE_Y_MIN,
};
use crate::data_input::log_data::TelemetryLog;
use crate::font_config::{FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_SCENE_LABEL};
use crate::types::ChartRanges;

/// Limits fixed for the whole animation.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBounds {
    pub scene: ChartRanges,
    pub trace: ChartRanges,
}

impl StaticBounds {
    /// Scene limits are constant; trace limits span the log's time and angle.
    pub fn from_log(log: &TelemetryLog) -> Option<Self> {
        let (t_min, t_max) = log.time_bounds()?;
        let (a_min, a_max) = log.angle_bounds()?;
        Some(Self {
            scene: (SCENE_X_MIN..SCENE_X_MAX, SCENE_Y_MIN..SCENE_Y_MAX),
            trace: (t_min..t_max, a_min..a_max),
        })
    }
}

/// Draws the charge station, the robot and the two labels.
pub fn draw_scene_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    bounds: &StaticBounds,
    scene: &FrameScene,
) -> Result<()> {
    let (x_range, y_range) = bounds.scene.clone();
    let mut chart = ChartBuilder::on(area)
        .caption(title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    chart.draw_series(LineSeries::new(
        scene.charge_station.iter().copied(),
        COLOR_CHARGE_STATION.stroke_width(LINE_WIDTH_CHARGE_STATION),
    ))?;

    chart.draw_series(std::iter::once(Polygon::new(
        scene.robot.corners().to_vec(),
        COLOR_ROBOT.filled(),
    )))?;

    let text_style = FONT_TUPLE_SCENE_LABEL.into_font().color(COLOR_SCENE_TEXT);
    chart.draw_series([
        Text::new(scene.clock_label.clone(), CLOCK_LABEL_POS, text_style.clone()),
        Text::new(scene.angle_label.clone(), ANGLE_LABEL_POS, text_style),
    ])?;
    Ok(())
}

/// Draws the angle-vs-time trace against the zero target.
pub fn draw_trace_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    bounds: &StaticBounds,
    scene: &FrameScene,
) -> Result<()> {
    let (x_range, y_range) = bounds.trace.clone();
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Time [s]")
        .y_desc("Angle [rad]")
        .x_labels(10)
        .y_labels(8)
        .y_label_formatter(&|y| format!("{:.2}", y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    chart.draw_series(LineSeries::new(
        scene.target_trace.iter().copied(),
        COLOR_TARGET_TRACE.stroke_width(LINE_WIDTH_PLOT),
    ))?;
    chart.draw_series(LineSeries::new(
        scene.angle_trace.iter().copied(),
        COLOR_ANGLE_TRACE.stroke_width(LINE_WIDTH_PLOT),
    ))?;
    Ok(())
}

/// Clears `root` and draws one frame in the requested layout.
pub fn draw_frame(
    root: &DrawingArea<BitMapBackend, Shift>,
    layout: Layout,
    title: &str,
    bounds: &StaticBounds,
    scene: &FrameScene,
) -> Result<()> {
    root.fill(&WHITE)?;
    match layout {
        Layout::TwoPanel => {
            let panels = root.split_evenly((2, 1));
            draw_scene_panel(&panels[0], title, bounds, scene)?;
            draw_trace_panel(&panels[1], bounds, scene)?;
        }
        Layout::SinglePanel => draw_scene_panel(root, title, bounds, scene)?,
    }
    Ok(())
}


// src/plot_framework.rs
