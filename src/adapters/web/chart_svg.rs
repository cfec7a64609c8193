//! SVG line chart of closing prices.

use crate::domain::ohlcv::Bar;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 260.0;
const PADDING: f64 = 40.0;

pub fn price_chart_svg(bars: &[Bar]) -> String {
    if bars.is_empty() {
        return format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="price-chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><text x="{x}" y="{y}" text-anchor="middle">No price data available.</text></svg>"#,
            w = WIDTH,
            h = HEIGHT,
            x = WIDTH / 2.0,
            y = HEIGHT / 2.0
        );
    }

    let closes: Vec<f64> = bars
        .iter()
        .map(|b| b.close)
        .filter(|c| c.is_finite())
        .collect();
    let min_close = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_close = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_close - min_close;
    let scale_y = if range > 0.0 {
        plot_height / range
    } else {
        1.0
    };
    let scale_x = if bars.len() > 1 {
        plot_width / (bars.len() - 1) as f64
    } else {
        0.0
    };

    // Non-finite closes leave a gap rather than a spike.
    let points: Vec<String> = bars
        .iter()
        .enumerate()
        .filter(|(_, bar)| bar.close.is_finite())
        .map(|(i, bar)| {
            let x = PADDING + i as f64 * scale_x;
            let y = if range > 0.0 {
                HEIGHT - PADDING - (bar.close - min_close) * scale_y
            } else {
                HEIGHT / 2.0
            };
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    let first = bars[0].timestamp.format("%m-%d %H:%M");
    let last = bars[bars.len() - 1].timestamp.format("%m-%d %H:%M");
    let bottom = HEIGHT - PADDING;
    let right = WIDTH - PADDING;

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="price-chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}">
  <line class="axis" x1="{p}" y1="{p}" x2="{p}" y2="{bottom}" />
  <line class="axis" x1="{p}" y1="{bottom}" x2="{right}" y2="{bottom}" />
  <text class="label" x="{lx:.0}" y="{p}" text-anchor="end">{max:.2}</text>
  <text class="label" x="{lx:.0}" y="{bottom}" text-anchor="end">{min:.2}</text>
  <text class="label" x="{p}" y="{ty:.0}">{first}</text>
  <text class="label" x="{right}" y="{ty:.0}" text-anchor="end">{last}</text>
  <polyline class="price-line" fill="none" points="{points}" />
</svg>"#,
        w = WIDTH,
        h = HEIGHT,
        p = PADDING,
        bottom = bottom,
        right = right,
        lx = PADDING - 4.0,
        ty = HEIGHT - PADDING / 3.0,
        max = max_close,
        min = min_close,
        first = first,
        last = last,
        points = points.join(" ")
    )
}
