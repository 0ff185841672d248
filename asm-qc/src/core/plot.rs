use config::{QcError, Removal, FIGURE_DPI, FIGURE_SIZE};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use std::ops::Range;
use std::path::Path;

use crate::core::model::{AnnotatedRecord, LinearFit};

pub const X_DESC: &str = "Genome Length (kbp)";
pub const Y_DESC: &str = "Coding Sequences";

// pastel palette: first two hues
pub const KEEP_COLOR: RGBColor = RGBColor(161, 201, 244);
pub const REMOVE_COLOR: RGBColor = RGBColor(255, 180, 130);

const POINT_RADIUS: i32 = 5;
const AXIS_PADDING: f64 = 0.05;
const FONT: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub remove: Removal,
}

/// everything the figure shows, computed without a drawing backend
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub points: Vec<PlotPoint>,
    pub line: [(f64, f64); 2],
    pub label: String,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub size: (u32, u32),
}

impl PlotData {
    /// Scatter of lengthkbp vs CDS keyed by removal tag, plus the single
    /// regression line drawn over the observed length range
    pub fn new(records: &[AnnotatedRecord], fit: &LinearFit) -> Result<Self, QcError> {
        if records.is_empty() {
            return Err(QcError::InsufficientData(
                "no records left to plot".to_string(),
            ));
        }

        let points: Vec<PlotPoint> = records
            .iter()
            .map(|r| PlotPoint {
                x: r.lengthkbp,
                y: r.cds,
                remove: r.remove,
            })
            .collect();

        let (min_x, max_x) = bounds(points.iter().map(|p| p.x));
        let line = [(min_x, fit.predict(min_x)), (max_x, fit.predict(max_x))];
        let (min_y, max_y) = bounds(points.iter().map(|p| p.y).chain(line.map(|(_, y)| y)));

        Ok(Self {
            points,
            line,
            label: fit.equation(),
            x_desc: X_DESC,
            y_desc: Y_DESC,
            x_range: padded(min_x, max_x),
            y_range: padded(min_y, max_y),
            size: figure_size(),
        })
    }

    pub fn points_for(&self, remove: Removal) -> impl Iterator<Item = &PlotPoint> + '_ {
        self.points.iter().filter(move |p| p.remove == remove)
    }
}

/// 18.5 x 10.5 in at 100 dpi
pub fn figure_size() -> (u32, u32) {
    (
        (FIGURE_SIZE.0 * FIGURE_DPI).round() as u32,
        (FIGURE_SIZE.1 * FIGURE_DPI).round() as u32,
    )
}

pub fn tag_color(remove: Removal) -> RGBColor {
    match remove {
        Removal::No => KEEP_COLOR,
        Removal::Yes => REMOVE_COLOR,
    }
}

fn bounds<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    let pad = if span > 0.0 { span * AXIS_PADDING } else { 1.0 };

    (lo - pad)..(hi + pad)
}

/// Render the figure to `path`
///
/// # Parameters
///
/// - `data`: precomputed plot content
/// - `path`: destination file
/// - `format`: raster [.png] or vector [.svg] backend
pub fn render(data: &PlotData, path: &Path, format: ImageFormat) -> Result<(), QcError> {
    match format {
        ImageFormat::Png => draw(BitMapBackend::new(path, data.size).into_drawing_area(), data),
        ImageFormat::Svg => draw(SVGBackend::new(path, data.size).into_drawing_area(), data),
    }
    .map_err(|e| QcError::Unexpected(format!("failed to render {}: {:#}", path.display(), e)))?;

    info!("Plot saved: {}", path.display());
    Ok(())
}

fn draw<DB>(root: DrawingArea<DB, Shift>, data: &PlotData) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(data.x_range.clone(), data.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(data.x_desc)
        .y_desc(data.y_desc)
        .label_style((FONT, 22))
        .axis_desc_style((FONT, 28))
        .draw()?;

    for remove in [Removal::No, Removal::Yes] {
        if data.points_for(remove).next().is_none() {
            continue;
        }

        let color = tag_color(remove);
        chart
            .draw_series(
                data.points_for(remove)
                    .map(|p| Circle::new((p.x, p.y), POINT_RADIUS, color.filled())),
            )?
            .label(format!("Remove: {}", remove))
            .legend(move |(x, y)| Circle::new((x + 10, y), POINT_RADIUS, color.filled()));

        // black outlines
        chart.draw_series(
            data.points_for(remove)
                .map(|p| Circle::new((p.x, p.y), POINT_RADIUS, BLACK.stroke_width(1))),
        )?;
    }

    chart
        .draw_series(LineSeries::new(data.line, BLACK.stroke_width(2)))?
        .label(data.label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 22))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated(id: &str, lengthkbp: f64, cds: f64, remove: Removal) -> AnnotatedRecord {
        AnnotatedRecord {
            genome_id: id.to_string(),
            lengthkbp,
            cds,
            predicted: 0.0,
            error: 0.0,
            remove,
        }
    }

    #[test]
    fn test_plot_data() {
        let fit = LinearFit {
            slope: 1.0,
            intercept: 0.0,
        };
        let records = vec![
            annotated("a", 4000.0, 4000.0, Removal::No),
            annotated("b", 5000.0, 6000.0, Removal::Yes),
            annotated("c", 6000.0, 6000.0, Removal::No),
        ];

        let data = PlotData::new(&records, &fit).unwrap();

        assert_eq!(data.points.len(), 3);
        assert_eq!(data.points_for(Removal::No).count(), 2);
        assert_eq!(data.points_for(Removal::Yes).count(), 1);
        assert_eq!(data.line, [(4000.0, 4000.0), (6000.0, 6000.0)]);
        assert_eq!(data.label, "y=1.000x+0.0");
        assert_eq!(data.x_desc, "Genome Length (kbp)");
        assert_eq!(data.y_desc, "Coding Sequences");
        assert_eq!(data.x_range, 3900.0..6100.0);
        assert_eq!(data.y_range, 3900.0..6100.0);
    }

    #[test]
    fn test_line_spans_every_point_regardless_of_tag() {
        let fit = LinearFit {
            slope: 0.5,
            intercept: 10.0,
        };
        let records = vec![
            annotated("low", 100.0, 60.0, Removal::Yes),
            annotated("mid", 150.0, 85.0, Removal::No),
            annotated("high", 300.0, 900.0, Removal::Yes),
        ];

        let data = PlotData::new(&records, &fit).unwrap();
        assert_eq!(data.line, [(100.0, 60.0), (300.0, 160.0)]);
        assert!(data.y_range.end > 900.0);
        assert!(data.y_range.start < 60.0);
    }

    #[test]
    fn test_figure_size() {
        assert_eq!(figure_size(), (1850, 1050));
    }

    #[test]
    fn test_empty_plot_is_rejected() {
        let fit = LinearFit {
            slope: 1.0,
            intercept: 0.0,
        };
        assert!(PlotData::new(&[], &fit).is_err());
    }

    #[test]
    fn test_render_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let fit = LinearFit {
            slope: 0.95,
            intercept: 0.0,
        };
        let records = vec![
            annotated("a", 100.0, 95.0, Removal::No),
            annotated("b", 100.0, 900.0, Removal::Yes),
            annotated("c", 200.0, 190.0, Removal::No),
        ];
        let data = PlotData::new(&records, &fit).unwrap();

        let png = dir.path().join("fit.png");
        let svg = dir.path().join("fit.svg");
        render(&data, &png, ImageFormat::Png).unwrap();
        render(&data, &svg, ImageFormat::Svg).unwrap();

        for path in [&png, &svg] {
            assert!(path.is_file());
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }

        let png_bytes = std::fs::read(&png).unwrap();
        assert_eq!(&png_bytes[..4], b"\x89PNG");

        let contents = std::fs::read_to_string(&svg).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains(X_DESC));
        assert!(contents.contains(Y_DESC));
        assert!(contents.contains("y=0.950x+0.0"));
        assert!(contents.contains("Remove: No"));
        assert!(contents.contains("Remove: Yes"));
    }

    #[test]
    fn test_tag_colors_differ() {
        assert_ne!(tag_color(Removal::No), tag_color(Removal::Yes));
    }
}
