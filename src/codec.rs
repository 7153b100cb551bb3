use crate::constants::{DATA_URI_PREFIX, MIN_JPEG_QUALITY};
use crate::error::Result;
use crate::rate::Quality;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView};
use std::sync::Arc;

/// The only output format the compressor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
}

/// How the encoded result is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    /// A `data:image/jpeg;base64,...` URI
    #[default]
    Base64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Half,
    Clockwise270,
}

/// Everything the codec needs for one resize/recompress call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecRequest {
    pub source: Arc<[u8]>,
    /// `None` keeps the source width
    pub target_width: Option<u32>,
    /// `None` keeps the source height
    pub target_height: Option<u32>,
    pub format: OutputFormat,
    pub quality: Quality,
    pub rotation: Rotation,
    pub encoding: OutputEncoding,
}

impl CodecRequest {
    /// Unconstrained dimensions, no rotation, JPEG as base64.
    pub fn jpeg(source: Arc<[u8]>, quality: Quality) -> Self {
        Self {
            source,
            target_width: None,
            target_height: None,
            format: OutputFormat::Jpeg,
            quality,
            rotation: Rotation::None,
            encoding: OutputEncoding::Base64,
        }
    }
}

/// Encoded codec output in its text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data_uri: String,
}

impl EncodedImage {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
        }
    }

    pub fn from_jpeg_bytes(bytes: &[u8]) -> Self {
        Self::new(format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(bytes)))
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// The base64 part of the URI, or the whole text if it has no header.
    pub fn payload(&self) -> &str {
        match self.data_uri.split_once(',') {
            Some((_, payload)) => payload,
            None => &self.data_uri,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.payload())?)
    }
}

/// Image resize/recompress service.
///
/// Implementations are called from a blocking worker thread, once per
/// accepted compression.
pub trait Codec: Send + Sync {
    fn encode(&self, request: &CodecRequest) -> Result<EncodedImage>;
}

/// [`Codec`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn encode(&self, request: &CodecRequest) -> Result<EncodedImage> {
        let mut img = image::load_from_memory(&request.source)?;

        resize_image(&mut img, request.target_width, request.target_height);
        let img = rotate_image(img, request.rotation);

        let jpeg = encode_jpeg(&img, request.quality)?;
        crate::verbose!(
            "Encoded {}x{} JPEG at quality {} ({} bytes)",
            img.width(),
            img.height(),
            request.quality,
            jpeg.len()
        );

        match request.encoding {
            OutputEncoding::Base64 => Ok(EncodedImage::from_jpeg_bytes(&jpeg)),
        }
    }
}

/// Resizes to the requested dimensions, leaving unset or unchanged sides alone.
pub fn resize_image(img: &mut DynamicImage, width: Option<u32>, height: Option<u32>) {
    if let Some(w) = width.filter(|&w| w > 0 && w != img.width()) {
        *img = img.resize_exact(w, img.height(), image::imageops::FilterType::Lanczos3);
    }

    if let Some(h) = height.filter(|&h| h > 0 && h != img.height()) {
        *img = img.resize_exact(img.width(), h, image::imageops::FilterType::Lanczos3);
    }
}

pub fn rotate_image(img: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => img,
        Rotation::Clockwise90 => img.rotate90(),
        Rotation::Half => img.rotate180(),
        Rotation::Clockwise270 => img.rotate270(),
    }
}

/// Encodes as baseline JPEG. JPEG has no alpha channel, so pixels are
/// flattened to RGB8 first.
pub fn encode_jpeg(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let quality = quality.value().max(MIN_JPEG_QUALITY);

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    Ok(jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompressionError;
    use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_jpeg_request_defaults() {
        let request = CodecRequest::jpeg(Arc::from(vec![1u8, 2, 3]), Quality::new(30));
        assert_eq!(request.target_width, None);
        assert_eq!(request.target_height, None);
        assert_eq!(request.format, OutputFormat::Jpeg);
        assert_eq!(request.rotation, Rotation::None);
        assert_eq!(request.encoding, OutputEncoding::Base64);
        assert_eq!(request.quality.value(), 30);
    }

    #[test]
    fn test_encoded_image_payload_and_decode() {
        let encoded = EncodedImage::from_jpeg_bytes(b"AB");
        assert_eq!(encoded.data_uri(), "data:image/jpeg;base64,QUI=");
        assert_eq!(encoded.payload(), "QUI=");
        assert_eq!(encoded.decode().unwrap(), b"AB");

        let bare = EncodedImage::new("QUJD");
        assert_eq!(bare.payload(), "QUJD");
    }

    #[test]
    fn test_encoded_image_decode_invalid() {
        let encoded = EncodedImage::new("data:image/jpeg;base64,@@@@");
        assert!(matches!(
            encoded.decode(),
            Err(CompressionError::Base64Decode(_))
        ));
    }

    #[test]
    fn test_image_codec_produces_jpeg() {
        let request = CodecRequest::jpeg(Arc::from(png_bytes(64, 48)), Quality::new(30));
        let encoded = ImageCodec.encode(&request).unwrap();

        assert!(encoded.data_uri().starts_with("data:image/jpeg;base64,"));
        let bytes = encoded.decode().unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_image_codec_accepts_quality_zero() {
        let request = CodecRequest::jpeg(Arc::from(png_bytes(16, 16)), Quality::new(0));
        assert!(ImageCodec.encode(&request).is_ok());
    }

    #[test]
    fn test_image_codec_lower_quality_is_smaller() {
        let source: Arc<[u8]> = Arc::from(png_bytes(128, 128));
        let high = ImageCodec
            .encode(&CodecRequest::jpeg(Arc::clone(&source), Quality::new(95)))
            .unwrap();
        let low = ImageCodec
            .encode(&CodecRequest::jpeg(source, Quality::new(10)))
            .unwrap();

        assert!(low.decode().unwrap().len() < high.decode().unwrap().len());
    }

    #[test]
    fn test_image_codec_rejects_garbage() {
        let request = CodecRequest::jpeg(Arc::from(b"not an image".to_vec()), Quality::new(50));
        assert!(matches!(
            ImageCodec.encode(&request),
            Err(CompressionError::ImageProcessing(_))
        ));
    }

    #[test]
    fn test_image_codec_resizes_and_rotates() {
        let mut request = CodecRequest::jpeg(Arc::from(png_bytes(40, 20)), Quality::new(80));
        request.target_width = Some(30);
        request.rotation = Rotation::Clockwise90;

        let bytes = ImageCodec.encode(&request).unwrap().decode().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (20, 30));
    }

    #[test]
    fn test_encode_jpeg_flattens_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        let jpeg = encode_jpeg(&img, Quality::new(50)).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_resize_image_no_dimensions() {
        let mut img = DynamicImage::new_rgb8(200, 150);
        resize_image(&mut img, None, None);
        assert_eq!(img.dimensions(), (200, 150));
    }

    #[test]
    fn test_resize_image_both_dimensions() {
        let mut img = DynamicImage::new_rgb8(200, 150);
        resize_image(&mut img, Some(80), Some(60));
        assert_eq!(img.dimensions(), (80, 60));
    }
}
