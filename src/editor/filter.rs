use std::fmt;
use std::ops::RangeInclusive;

use image::{DynamicImage, ImageBuffer, Pixel};

pub const BLUR_INTENSITY_RANGE: RangeInclusive<u32> = 1..=20;
pub const BLUR_INTENSITY_DEFAULT: u32 = 2;

/// Named convolution filters. Blur has its own operation and is not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Contour,
    Detail,
    Sharpen,
}

struct Kernel {
    weights: [i32; 9],
    scale: i32,
    offset: i32,
}

const CONTOUR: Kernel = Kernel {
    weights: [-1, -1, -1, -1, 8, -1, -1, -1, -1],
    scale: 1,
    offset: 255,
};

const DETAIL: Kernel = Kernel {
    weights: [0, -1, 0, -1, 10, -1, 0, -1, 0],
    scale: 6,
    offset: 0,
};

const SHARPEN: Kernel = Kernel {
    weights: [-2, -2, -2, -2, 32, -2, -2, -2, -2],
    scale: 16,
    offset: 0,
};

impl FilterKind {
    pub const ALL: [Self; 3] = [Self::Contour, Self::Detail, Self::Sharpen];

    /// Case-insensitive lookup. Unrecognized names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Contour => "contour",
            Self::Detail => "detail",
            Self::Sharpen => "sharpen",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Contour => "Contour",
            Self::Detail => "Detail",
            Self::Sharpen => "Sharpen",
        }
    }

    const fn kernel(self) -> &'static Kernel {
        match self {
            Self::Contour => &CONTOUR,
            Self::Detail => &DETAIL,
            Self::Sharpen => &SHARPEN,
        }
    }

    /// Returns the filtered copy of `image`, keeping its color type where possible.
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        let kernel = self.kernel();
        match image {
            DynamicImage::ImageLuma8(buf) => {
                DynamicImage::ImageLuma8(convolve(buf, kernel, false))
            }
            DynamicImage::ImageLumaA8(buf) => {
                DynamicImage::ImageLumaA8(convolve(buf, kernel, true))
            }
            DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(convolve(buf, kernel, false)),
            DynamicImage::ImageRgba8(buf) => {
                DynamicImage::ImageRgba8(convolve(buf, kernel, true))
            }
            other if other.color().has_alpha() => {
                DynamicImage::ImageRgba8(convolve(&other.to_rgba8(), kernel, true))
            }
            other => DynamicImage::ImageRgb8(convolve(&other.to_rgb8(), kernel, false)),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamps a requested blur intensity into range. Zero is rejected.
pub fn clamp_blur_intensity(intensity: u32) -> Option<u32> {
    if intensity < *BLUR_INTENSITY_RANGE.start() {
        return None;
    }
    Some(intensity.min(*BLUR_INTENSITY_RANGE.end()))
}

/// 3x3 convolution over the color channels; alpha, when present, is the last
/// channel and is copied through untouched. Border taps clamp to the edge.
fn convolve<P>(
    source: &ImageBuffer<P, Vec<u8>>,
    kernel: &Kernel,
    has_alpha: bool,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = source.dimensions();
    let channels = usize::from(P::CHANNEL_COUNT);
    let color_channels = if has_alpha { channels - 1 } else { channels };
    let mut output = source.clone();
    if width == 0 || height == 0 {
        return output;
    }

    let max_x = i64::from(width) - 1;
    let max_y = i64::from(height) - 1;
    for y in 0..height {
        for x in 0..width {
            let mut sums = [0_i32; 4];
            for (tap, weight) in kernel.weights.iter().enumerate() {
                if *weight == 0 {
                    continue;
                }
                let dx = (tap % 3) as i64 - 1;
                let dy = (tap / 3) as i64 - 1;
                let sx = (i64::from(x) + dx).clamp(0, max_x) as u32;
                let sy = (i64::from(y) + dy).clamp(0, max_y) as u32;
                let sample = source.get_pixel(sx, sy).channels();
                for (sum, value) in sums.iter_mut().zip(&sample[..color_channels]) {
                    *sum += weight * i32::from(*value);
                }
            }

            let target = output.get_pixel_mut(x, y).channels_mut();
            for (channel, sum) in target[..color_channels].iter_mut().zip(sums) {
                *channel = (div_round(sum, kernel.scale) + kernel.offset).clamp(0, 255) as u8;
            }
        }
    }

    output
}

/// Integer division rounding half away from zero.
fn div_round(value: i32, divisor: i32) -> i32 {
    let half = divisor / 2;
    if value >= 0 {
        (value + half) / divisor
    } else {
        (value - half) / divisor
    }
}
