//! Turns a composed canvas into terminal lines.

use mindless_core::Rgba;
use mindless_effects::CellCanvas;
use ratatui::{
    Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Draw `canvas` over the whole frame, faded by `opacity` and shifted up by
/// `offset_y` pixels (negative is up).
pub fn render_canvas(frame: &mut Frame, canvas: &CellCanvas, opacity: f32, offset_y: f32) {
    let rows_up = rows_for_offset(offset_y, canvas.metrics().height);
    let lines = canvas_lines(canvas, opacity);
    frame.render_widget(Paragraph::new(lines).scroll((rows_up, 0)), frame.area());
}

/// Whole cell rows covered by an upward pixel offset.
fn rows_for_offset(offset_y: f32, cell_height: u16) -> u16 {
    if offset_y >= 0.0 {
        return 0;
    }
    (-offset_y / cell_height.max(1) as f32).round() as u16
}

/// One styled span per cell, row by row.
pub fn canvas_lines(canvas: &CellCanvas, opacity: f32) -> Vec<Line<'static>> {
    let cols = canvas.cols() as usize;
    if cols == 0 {
        return Vec::new();
    }
    canvas
        .cells()
        .chunks(cols)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| {
                    let style = Style::new()
                        .fg(to_color(cell.fg.dim(opacity)))
                        .bg(to_color(cell.bg.dim(opacity)));
                    Span::styled(cell.symbol.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindless_core::CellMetrics;
    use mindless_effects::PixelRect;

    #[test]
    fn one_line_per_row_one_span_per_cell() {
        let mut canvas = CellCanvas::new(24, 32, CellMetrics::default());
        canvas.fill_text("HI", 0.0, 16.0, Rgba::WHITE);
        let lines = canvas_lines(&canvas, 1.0);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.spans.len() == 3));
        assert_eq!(lines[1].spans[0].content, "H");
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn opacity_fades_towards_black() {
        let mut canvas = CellCanvas::new(8, 16, CellMetrics::default());
        canvas.fill_rect(PixelRect::new(0.0, 0.0, 8.0, 16.0), Rgba::rgb(200, 100, 50));
        let lines = canvas_lines(&canvas, 0.5);
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Rgb(100, 50, 25)));

        let hidden = canvas_lines(&canvas, 0.0);
        assert_eq!(hidden[0].spans[0].style.bg, Some(Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn upward_offsets_round_to_rows() {
        assert_eq!(rows_for_offset(0.0, 16), 0);
        assert_eq!(rows_for_offset(-100.0, 16), 6);
        assert_eq!(rows_for_offset(-7.0, 16), 0);
        assert_eq!(rows_for_offset(12.0, 16), 0);
    }
}
