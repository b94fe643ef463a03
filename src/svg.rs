use super::error::{Error, Result};
use super::pipeline::ForecastPanel;
use super::resample::HourlySeries;
use super::{min_and_max, suitable_xfmt};
use chrono::prelude::*;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

pub const PANEL_SIZE: (u32, u32) = (1600, 600);

/// x range padded by 5% (at least one hour), y range padded by 10%;
/// None when there is no value to plot
pub fn panel_ranges(series: &HourlySeries) -> Option<(Range<NaiveDateTime>, Range<f64>)> {
    let (xmindt, xmaxdt) = series.span()?;
    let values: Vec<f64> = series.load.iter().flatten().copied().collect();
    let (ymin, ymax) = min_and_max(&values[..])?;
    let xspan: chrono::Duration = xmaxdt - xmindt;
    let xmargin = std::cmp::max(xspan / 20, chrono::Duration::hours(1));
    let yspan = if ymax > ymin {
        (ymax - ymin) / 10f64
    } else {
        1f64
    };
    Some((
        xmindt - xmargin..xmaxdt + xmargin,
        ymin - yspan..ymax + yspan,
    ))
}

/// runs of consecutive known values, a None breaks the line
pub fn segments(series: &HourlySeries) -> Vec<Vec<(NaiveDateTime, f64)>> {
    let mut all = Vec::new();
    let mut current = Vec::new();
    for (t, w) in series.iter() {
        match w {
            Some(w) => current.push((t, w)),
            None if !current.is_empty() => all.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        all.push(current);
    }
    all
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &ForecastPanel,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (xrange, yrange) = match panel_ranges(&panel.series) {
        Some(r) => r,
        None => {
            area.titled(
                &format!("{} (no data)", panel.spec.title),
                ("sans-serif", 30),
            )?;
            return Ok(());
        }
    };
    let xfmt = suitable_xfmt(xrange.end - xrange.start);
    let xminutc = Utc.from_utc_datetime(&xrange.start);
    let xmaxutc = Utc.from_utc_datetime(&xrange.end);
    let (r, g, b) = panel.spec.color.rgb;
    let color = RGBColor(r, g, b);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.spec.title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(xminutc..xmaxutc, yrange)?;
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 24))
        .y_desc("load_fcst")
        .x_labels(14) // max number of labels
        .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
        .y_label_formatter(&|x: &f64| format!("{:5}", x))
        .x_desc(format!("datetime [{}]", xfmt.replace("%", "")))
        .draw()?;

    for segment in segments(&panel.series) {
        let line = LineSeries::new(
            segment
                .into_iter()
                .map(|(x, y)| (Utc.from_utc_datetime(&x), y)),
            color.stroke_width(2),
        );
        chart.draw_series(line)?;
    }
    Ok(())
}

fn plot_into(panels: &[ForecastPanel], fout: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let size = (PANEL_SIZE.0, PANEL_SIZE.1 * panels.len().max(1) as u32);
    let root = SVGBackend::new(fout, size).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((panels.len().max(1), 1));
    for (area, panel) in areas.iter().zip(panels) {
        draw_panel(area, panel)?;
    }
    root.present()?;
    Ok(())
}

/// plots the panels to svg, stacked top to bottom
pub fn plot_panels(panels: &[ForecastPanel], fout: &Path) -> Result<()> {
    plot_into(panels, fout).map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resample::resample_hourly;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn segments_break_at_leading_nulls_only() {
        let (series, _) = resample_hourly(vec![
            (Some(at(0)), None),
            (Some(at(1)), Some(1.)),
            (Some(at(3)), Some(3.)),
        ]);
        assert_eq!(
            segments(&series),
            vec![vec![(at(1), 1.), (at(2), 1.), (at(3), 3.)]]
        );
    }

    #[test]
    fn segments_of_a_series_with_holes() {
        let series = HourlySeries {
            time: vec![at(0), at(1), at(2), at(3)],
            load: vec![Some(1.), None, Some(2.), Some(4.)],
        };
        assert_eq!(
            segments(&series),
            vec![vec![(at(0), 1.)], vec![(at(2), 2.), (at(3), 4.)]]
        );
    }

    #[test]
    fn ranges_are_padded() {
        let series = HourlySeries {
            time: (0..21).map(at).collect(),
            load: (0..21).map(|h| Some(h as f64)).collect(),
        };
        let (x, y) = panel_ranges(&series).unwrap();
        assert_eq!(x.start, at(0) - chrono::Duration::hours(1));
        assert_eq!(x.end, at(20) + chrono::Duration::hours(1));
        assert_eq!(y, -2.0..22.0);
    }

    #[test]
    fn flat_and_empty_ranges() {
        let flat = HourlySeries {
            time: vec![at(5)],
            load: vec![Some(3.)],
        };
        let (x, y) = panel_ranges(&flat).unwrap();
        assert_eq!(x, at(4)..at(6));
        assert_eq!(y, 2.0..4.0);

        let unknown = HourlySeries {
            time: vec![at(5)],
            load: vec![None],
        };
        assert!(panel_ranges(&unknown).is_none());
        assert!(panel_ranges(&HourlySeries::default()).is_none());
    }
}
