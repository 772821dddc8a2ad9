//! Codec boundary: format detection, decoding and encoding of image files.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageError, ImageFormat, ImageReader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("unsupported image format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// File formats the editor reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    Png,
    Jpeg,
    Bmp,
}

impl SupportedFormat {
    pub const ALL: [Self; 3] = [Self::Png, Self::Jpeg, Self::Bmp];

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_image_format(ImageFormat::from_path(path).ok()?)
    }

    pub const fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }

    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Bmp => &["bmp"],
        }
    }

    /// Whether the encoder for this format takes `color` as is.
    const fn encodes_natively(self, color: ColorType) -> bool {
        match self {
            Self::Png => !matches!(color, ColorType::Rgb32F | ColorType::Rgba32F),
            Self::Jpeg => matches!(color, ColorType::L8 | ColorType::Rgb8),
            Self::Bmp => matches!(
                color,
                ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
            ),
        }
    }

    /// Converts `image` to a color type this format's encoder accepts.
    /// JPEG loses alpha; BMP and JPEG drop to 8 bits per channel.
    fn encodable<'a>(self, image: &'a DynamicImage) -> Cow<'a, DynamicImage> {
        let color = image.color();
        if self.encodes_natively(color) {
            return Cow::Borrowed(image);
        }
        let converted = match self {
            Self::Png if color.has_alpha() => DynamicImage::ImageRgba16(image.to_rgba16()),
            Self::Png => DynamicImage::ImageRgb16(image.to_rgb16()),
            Self::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
            Self::Bmp if color.has_alpha() => DynamicImage::ImageRgba8(image.to_rgba8()),
            Self::Bmp => DynamicImage::ImageRgb8(image.to_rgb8()),
        };
        tracing::debug!(
            from = ?color,
            to = ?converted.color(),
            format = ?self,
            "converted for encoding"
        );
        Cow::Owned(converted)
    }
}

/// Decodes the file at `path`, sniffing the format from its contents.
/// Contents in a format outside [`SupportedFormat`] are rejected.
pub fn decode_image(path: &Path) -> CodecResult<DynamicImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    if let Some(format) = reader.format() {
        if SupportedFormat::from_image_format(format).is_none() {
            return Err(CodecError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    }
    reader.decode().map_err(|source| match source {
        ImageError::IoError(err) => CodecError::Io(err),
        source => CodecError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Encodes `image` to `path` using the format named by the path's extension.
pub fn encode_image(image: &DynamicImage, path: &Path) -> CodecResult<()> {
    let format = SupportedFormat::from_path(path).ok_or_else(|| CodecError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    format
        .encodable(image)
        .save_with_format(path, format.image_format())
        .map_err(|source| match source {
            ImageError::IoError(err) => CodecError::Io(err),
            source => CodecError::Encode {
                path: path.to_path_buf(),
                source,
            },
        })
}
