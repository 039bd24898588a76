//! Places a [`BarChart`] on a fixed-size page.
//!
//! The page is 5in by 2in. Margins are sized to fit the tick and axis labels
//! and nothing more, so the plot area takes whatever room is left.

use crate::model::{BarChart, Element, Figure, TextAlign, XAxis};

pub const FIGURE_WIDTH: f64 = 5.0 * 72.0;
pub const FIGURE_HEIGHT: f64 = 2.0 * 72.0;

pub const BAR_WIDTH: f64 = 0.8;
const AXIS_MARGIN: f64 = 0.05;
const MAX_TICKS: usize = 6;

const PAD: f64 = 4.0;
const TICK_FONT: f64 = 7.0;
const LABEL_FONT: f64 = 8.0;
const LINE_HEIGHT: f64 = 1.25;
const TICK_LEN: f64 = 3.5;
const TICK_GAP: f64 = 2.0;

// Rough advance of a digit in the body font, as a fraction of its size.
const CHAR_WIDTH: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub lo: f64,
    pub hi: f64,
}

impl Limits {
    fn span(&self) -> f64 {
        self.hi - self.lo
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: Limits,
    y: Limits,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x.lo) / self.x.span() * self.width
    }

    fn py(&self, y: f64) -> f64 {
        self.top + self.height - (y - self.y.lo) / self.y.span() * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub fn x_limits(chart: &BarChart) -> Limits {
    let positions = chart.bars.iter().map(|b| b.position);
    let (min, max) = positions.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });
    if !min.is_finite() || !max.is_finite() {
        return Limits { lo: 0.0, hi: 1.0 };
    }

    let mut lo = min - BAR_WIDTH / 2.0;
    let mut hi = max + BAR_WIDTH / 2.0;
    if hi - lo <= 0.0 {
        lo = min - BAR_WIDTH;
        hi = max + BAR_WIDTH;
    }
    let margin = (hi - lo) * AXIS_MARGIN;
    Limits {
        lo: lo - margin,
        hi: hi + margin,
    }
}

pub fn y_limits(chart: &BarChart) -> Limits {
    let max = chart.bars.iter().map(|b| b.height).fold(0.0, f64::max);
    if max <= 0.0 {
        Limits { lo: 0.0, hi: 1.0 }
    } else {
        Limits {
            lo: 0.0,
            hi: max * (1.0 + AXIS_MARGIN),
        }
    }
}

/// Integer tick step from {1, 2, 5} x 10^k giving at most `max_ticks` ticks.
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    let raw = span / (max_ticks.max(2) - 1) as f64;
    if raw <= 1.0 {
        return 1.0;
    }
    let magnitude = 10u128.pow(raw.log10().floor() as u32) as f64;
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

/// Ticks inside `limits`, labelled with `origin` added back in integer space.
pub fn numeric_ticks(limits: Limits, max_ticks: usize, origin: u64) -> Vec<Tick> {
    let step = nice_step(limits.span(), max_ticks);
    let first = (limits.lo / step).ceil() as i64;
    let last = (limits.hi / step).floor() as i64;
    (first..=last)
        .filter_map(|k| {
            let absolute = origin as i128 + k as i128 * step as i128;
            (absolute >= 0).then(|| Tick {
                value: k as f64 * step,
                label: absolute.to_string(),
            })
        })
        .collect()
}

pub fn x_ticks(chart: &BarChart, limits: Limits) -> Vec<Tick> {
    match chart.x_axis {
        XAxis::Numeric => numeric_ticks(limits, MAX_TICKS, chart.origin),
        XAxis::Categorical => chart
            .bars
            .iter()
            .map(|b| Tick {
                value: b.position,
                label: b.label.clone(),
            })
            .collect(),
    }
}

fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * CHAR_WIDTH
}

fn widest(ticks: &[Tick], size: f64) -> f64 {
    ticks
        .iter()
        .map(|t| text_width(&t.label, size))
        .fold(0.0, f64::max)
}

pub fn layout(chart: &BarChart) -> Figure {
    let x = x_limits(chart);
    let y = y_limits(chart);
    let xt = x_ticks(chart, x);
    let yt = numeric_ticks(y, MAX_TICKS, 0);

    let label_band = LABEL_FONT * LINE_HEIGHT;
    let tick_band = TICK_FONT * LINE_HEIGHT;
    let ytick_width = widest(&yt, TICK_FONT);

    let left = PAD + label_band + TICK_GAP + ytick_width + TICK_GAP + TICK_LEN;
    let bottom = PAD + label_band + TICK_GAP + tick_band + TICK_GAP + TICK_LEN;
    let top = PAD + tick_band / 2.0;
    let right = PAD + widest(&xt, TICK_FONT) / 2.0;

    let frame = Frame {
        left,
        top,
        width: FIGURE_WIDTH - left - right,
        height: FIGURE_HEIGHT - top - bottom,
        x,
        y,
    };

    let mut elements = Vec::with_capacity(chart.bars.len() + 2 * (xt.len() + yt.len()) + 6);

    for bar in &chart.bars {
        let x0 = frame.px(bar.position - BAR_WIDTH / 2.0);
        let x1 = frame.px(bar.position + BAR_WIDTH / 2.0);
        let y0 = frame.py(bar.height);
        elements.push(Element::Rect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: frame.py(0.0) - y0,
        });
    }

    // Spines, clockwise from the top.
    let corners = [
        (frame.left, frame.top),
        (frame.right(), frame.top),
        (frame.right(), frame.bottom()),
        (frame.left, frame.bottom()),
    ];
    for i in 0..corners.len() {
        let (x1, y1) = corners[i];
        let (x2, y2) = corners[(i + 1) % corners.len()];
        elements.push(Element::Line { x1, y1, x2, y2 });
    }

    for tick in &xt {
        let at = frame.px(tick.value);
        elements.push(Element::Line {
            x1: at,
            y1: frame.bottom(),
            x2: at,
            y2: frame.bottom() + TICK_LEN,
        });
        let width = text_width(&tick.label, TICK_FONT) + 2.0 * TICK_FONT;
        elements.push(Element::Text {
            x: at - width / 2.0,
            y: frame.bottom() + TICK_LEN + TICK_GAP,
            width,
            height: tick_band,
            size: TICK_FONT,
            align: TextAlign::Center,
            rotated: false,
            content: tick.label.clone(),
        });
    }

    let ytick_box = ytick_width + TICK_FONT;
    for tick in &yt {
        let at = frame.py(tick.value);
        elements.push(Element::Line {
            x1: frame.left - TICK_LEN,
            y1: at,
            x2: frame.left,
            y2: at,
        });
        elements.push(Element::Text {
            x: frame.left - TICK_LEN - TICK_GAP - ytick_box,
            y: at - tick_band / 2.0,
            width: ytick_box,
            height: tick_band,
            size: TICK_FONT,
            align: TextAlign::Right,
            rotated: false,
            content: tick.label.clone(),
        });
    }

    elements.push(Element::Text {
        x: frame.left,
        y: FIGURE_HEIGHT - PAD - label_band,
        width: frame.width,
        height: label_band,
        size: LABEL_FONT,
        align: TextAlign::Center,
        rotated: false,
        content: chart.x_label.to_string(),
    });
    elements.push(Element::Text {
        x: PAD,
        y: frame.top,
        width: label_band,
        height: frame.height,
        size: LABEL_FONT,
        align: TextAlign::Center,
        rotated: true,
        content: chart.y_label.to_string(),
    });

    Figure {
        width: FIGURE_WIDTH,
        height: FIGURE_HEIGHT,
        elements,
    }
}
