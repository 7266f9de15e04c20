// src/utils/chart.rs

use std::fmt;
use std::sync::OnceLock;

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use plotters::prelude::*;
use plotters::style::register_font;

use crate::models::attempt::Stats;

const WIDTH: u32 = 500;
const HEIGHT: u32 = 500;

const CORRECT_COLOR: RGBColor = RGBColor(0x4a, 0xde, 0x80);
const INCORRECT_COLOR: RGBColor = RGBColor(0xf8, 0x71, 0x71);

const FONT_FAMILY: &str = "sans-serif";
static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

#[derive(Debug)]
pub enum ChartError {
    /// The embedded font could not be registered with plotters.
    Font,

    /// There is nothing to draw.
    Empty,

    Draw(String),

    Encode(image::ImageError),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::Font => f.write_str("failed to register chart font"),
            ChartError::Empty => f.write_str("no attempts to chart"),
            ChartError::Draw(msg) => write!(f, "failed to draw chart: {}", msg),
            ChartError::Encode(e) => write!(f, "failed to encode chart: {}", e),
        }
    }
}

impl std::error::Error for ChartError {}

fn ensure_font() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).is_ok());
    if registered {
        Ok(())
    } else {
        Err(ChartError::Font)
    }
}

fn draw_error<E: std::error::Error>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// Renders a correct/incorrect pie chart titled with the category, as PNG bytes.
pub fn render_pie_chart(category: &str, stats: &Stats) -> Result<Vec<u8>, ChartError> {
    if stats.correct + stats.incorrect == 0 {
        return Err(ChartError::Empty);
    }
    ensure_font()?;

    let mut pixels = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let title = format!("Performance in {}", category.to_uppercase());
        let area = root
            .titled(&title, (FONT_FAMILY, 28).into_font().color(&BLACK))
            .map_err(draw_error)?;

        // Pie coordinates are absolute backend pixels, so offset below the title.
        let (width, height) = area.dim_in_pixel();
        let top = (HEIGHT - height) as i32;
        let center = ((width / 2) as i32, top + (height / 2) as i32);
        let radius = f64::from(width.min(height)) * 0.32;

        let sizes = [stats.correct as f64, stats.incorrect as f64];
        let colors = [CORRECT_COLOR, INCORRECT_COLOR];
        let labels = ["Correct", "Incorrect"];

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style((FONT_FAMILY, 18).into_font().color(&BLACK));
        pie.percentages((FONT_FAMILY, 16).into_font().color(&BLACK));
        area.draw(&pie).map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, WIDTH, HEIGHT, ExtendedColorType::Rgb8)
        .map_err(ChartError::Encode)?;
    Ok(png)
}
