//! Drawing elements.
//!
//! Images are embedded in the flat document as base64 `office:binary-data`
//! inside a `draw:frame`.

use super::element::Element;
use super::node::{NodeKind, OdfNode};
use crate::common::{Error, Result};
use crate::odf::style::StyleRegistry;
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// How a frame is anchored in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorType {
    #[default]
    Paragraph,
    Char,
    AsChar,
    Page,
}

impl AnchorType {
    pub fn as_str(self) -> &'static str {
        match self {
            AnchorType::Paragraph => "paragraph",
            AnchorType::Char => "char",
            AnchorType::AsChar => "as-char",
            AnchorType::Page => "page",
        }
    }
}

/// An embedded image with its display size in centimeters
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Vec<u8>,
    width: f64,
    height: f64,
    anchor: AnchorType,
}

impl Image {
    pub fn new(data: Vec<u8>, width: f64, height: f64) -> Self {
        Self {
            data,
            width,
            height,
            anchor: AnchorType::default(),
        }
    }

    /// Raw image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn anchor(&self) -> AnchorType {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: AnchorType) {
        self.anchor = anchor;
    }
}

impl OdfNode for Image {
    fn kind(&self) -> NodeKind {
        NodeKind::Image
    }

    fn to_element(&self, _styles: &mut StyleRegistry) -> Option<Element> {
        let mut binary = Element::new("office:binary-data");
        binary.push_text(&STANDARD.encode(&self.data));

        let mut image = Element::new("draw:image");
        image.add_child(binary);

        let mut frame = Element::new(self.kind().element_name())
            .with_attribute("text:anchor-type", self.anchor.as_str())
            .with_attribute("svg:width", &format!("{}cm", self.width))
            .with_attribute("svg:height", &format!("{}cm", self.height));
        frame.add_child(image);
        Some(frame)
    }
}

/// Reads the pixel dimensions of encoded image data.
pub trait ImageSizeProbe {
    /// Return `(width, height)` in pixels
    fn probe(&self, data: &[u8]) -> Result<(u32, u32)>;
}

/// [`ImageSizeProbe`] backed by the `image` crate.
///
/// Only the header is decoded. Without the `image-probe` feature every probe
/// fails with [`Error::FeatureDisabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateProbe;

impl ImageSizeProbe for ImageCrateProbe {
    #[cfg(feature = "image-probe")]
    fn probe(&self, data: &[u8]) -> Result<(u32, u32)> {
        let reader = image::ImageReader::new(std::io::Cursor::new(data)).with_guessed_format()?;
        Ok(reader.into_dimensions()?)
    }

    #[cfg(not(feature = "image-probe"))]
    fn probe(&self, _data: &[u8]) -> Result<(u32, u32)> {
        Err(Error::FeatureDisabled("image-probe".to_string()))
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL into its media type and bytes.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::elements::decode_data_url;
///
/// let (mime, bytes) = decode_data_url("data:image/png;base64,iVBORw==").unwrap();
/// assert_eq!(mime, "image/png");
/// assert_eq!(bytes, [0x89, b'P', b'N', b'G']);
///
/// assert!(decode_data_url("https://example.com/a.png").is_err());
/// ```
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::InvalidImage("not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::InvalidImage("data URL has no payload".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::InvalidImage("data URL is not base64 encoded".to_string()))?;

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let data = STANDARD.decode(compact.as_bytes())?;
    Ok((mime.to_string(), data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rendering() {
        let mut image = Image::new(vec![1, 2, 3], 4.0, 2.5);
        image.set_anchor(AnchorType::AsChar);
        let frame = image.to_element(&mut StyleRegistry::new()).unwrap();

        assert_eq!(frame.get_attribute("text:anchor-type"), Some("as-char"));
        assert_eq!(frame.get_attribute("svg:width"), Some("4cm"));
        assert_eq!(frame.get_attribute("svg:height"), Some("2.5cm"));
        let binary = &frame.find_all("office:binary-data")[0];
        assert_eq!(binary.text(), "AQID");
    }

    #[test]
    fn test_data_url_errors() {
        assert!(matches!(
            decode_data_url("data:image/png,raw"),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64"),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(Error::InvalidImage(_))
        ));
    }

    #[cfg(feature = "image-probe")]
    #[test]
    fn test_probe_reads_png_dimensions() {
        let mut png = Vec::new();
        image::RgbImage::new(6, 3)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(ImageCrateProbe.probe(&png).unwrap(), (6, 3));
    }

    #[cfg(feature = "image-probe")]
    #[test]
    fn test_probe_rejects_garbage() {
        assert!(matches!(
            ImageCrateProbe.probe(b"not an image"),
            Err(Error::InvalidImage(_)) | Err(Error::Io(_))
        ));
    }
}
