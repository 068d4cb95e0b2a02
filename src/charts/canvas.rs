//! Minimal raster drawing on an RGB buffer

use image::{Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const GRID: Rgb<u8> = Rgb([229, 236, 246]);
pub const AXIS: Rgb<u8> = Rgb([120, 120, 120]);
pub const GREEN: Rgb<u8> = Rgb([38, 166, 91]);
pub const RED: Rgb<u8> = Rgb([234, 57, 67]);
pub const BLUE: Rgb<u8> = Rgb([31, 119, 180]);
pub const ORANGE: Rgb<u8> = Rgb([255, 127, 14]);
pub const PURPLE: Rgb<u8> = Rgb([148, 103, 189]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    /// 8 on, 6 off
    Dash,
    /// 2 on, 4 off
    Dot,
}

impl Stroke {
    fn draws(&self, step: u32) -> bool {
        match self {
            Stroke::Solid => true,
            Stroke::Dash => step % 14 < 8,
            Stroke::Dot => step % 6 < 2,
        }
    }
}

/// Plot area inside the image, in pixels
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn with_margin(width: u32, height: u32, margin: u32) -> Self {
        let m = margin as f64;
        Self {
            left: m,
            top: m,
            right: width as f64 - m,
            bottom: height as f64 - m,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Linear map from a data range onto a pixel range
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    min: f64,
    max: f64,
    from: f64,
    to: f64,
}

impl Scale {
    pub fn new(min: f64, max: f64, from: f64, to: f64) -> Self {
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        };
        Self { min, max, from, to }
    }

    pub fn map(&self, value: f64) -> f64 {
        self.from + (value - self.min) / (self.max - self.min) * (self.to - self.from)
    }
}

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, WHITE),
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Bresenham line, `thickness` pixels wide
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, stroke: Stroke, thickness: u32) {
        let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let half = thickness as i64 / 2;
        let mut step = 0u32;

        loop {
            if stroke.draws(step) {
                for ox in -half..=half {
                    for oy in -half..=half {
                        self.put(x0 + ox, y0 + oy, color);
                    }
                }
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
            step += 1;
        }
    }

    /// Connected line through `points`
    pub fn polyline(&mut self, points: &[(f64, f64)], color: Rgb<u8>, stroke: Stroke) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, stroke, 2);
        }
    }

    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
        let (left, right) = (x0.min(x1).round() as i64, x0.max(x1).round() as i64);
        let (top, bottom) = (y0.min(y1).round() as i64, y0.max(y1).round() as i64);
        for x in left..=right {
            for y in top..=bottom {
                self.put(x, y, color);
            }
        }
    }

    /// Horizontal grid lines plus the frame around the plot area
    pub fn grid(&mut self, area: &PlotArea, rows: u32) {
        for i in 0..=rows {
            let y = area.top + area.height() * i as f64 / rows as f64;
            self.line((area.left, y), (area.right, y), GRID, Stroke::Solid, 1);
        }
        self.line((area.left, area.bottom), (area.right, area.bottom), AXIS, Stroke::Solid, 1);
        self.line((area.left, area.top), (area.left, area.bottom), AXIS, Stroke::Solid, 1);
    }
}
