//! Match request framing.
//!
//! Combines the JSON metadata and the raw image into the single binary
//! body the comparator accepts. The layout is a wire contract and must be
//! reproduced byte for byte.

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};

use super::MatchData;

// ============================================================================
// Constants
// ============================================================================

/// Size of the big-endian metadata length prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;

// ============================================================================
// MatchRequest
// ============================================================================

/// One attempt's metadata and image, ready to be framed.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    data: MatchData,
    image: Vec<u8>,
}

impl MatchRequest {
    /// Creates a request from metadata and encoded image bytes.
    #[inline]
    #[must_use]
    pub fn new(data: MatchData, image: Vec<u8>) -> Self {
        Self { data, image }
    }

    /// Returns the metadata.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &MatchData {
        &self.data
    }

    /// Returns the encoded image.
    #[inline]
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Encodes the request body.
    ///
    /// # Format
    ///
    /// ```text
    /// [u32 BE = N] [N bytes JSON] [image bytes]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the metadata cannot be serialized and
    /// [`Error::Protocol`] if it exceeds `u32::MAX` bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let json = self.data.to_json_bytes()?;
        frame(&json, &self.image)
    }
}

// ============================================================================
// Framing
// ============================================================================

/// Frames pre-serialized metadata and image bytes.
///
/// # Errors
///
/// Returns [`Error::Protocol`] if the metadata is longer than `u32::MAX`.
pub fn frame(metadata: &[u8], image: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(metadata.len()).map_err(|_| {
        Error::protocol(format!(
            "Match metadata too large: {} bytes",
            metadata.len()
        ))
    })?;

    let mut body = Vec::with_capacity(LENGTH_PREFIX_SIZE + metadata.len() + image.len());
    body.extend_from_slice(&length.to_be_bytes());
    body.extend_from_slice(metadata);
    body.extend_from_slice(image);
    Ok(body)
}

/// A framed body split back into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramedBody<'a> {
    /// JSON metadata bytes.
    pub metadata: &'a [u8],
    /// Image bytes.
    pub image: &'a [u8],
}

impl<'a> FramedBody<'a> {
    /// Splits a framed body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the body is shorter than its prefix
    /// claims.
    pub fn parse(body: &'a [u8]) -> Result<Self> {
        let (prefix, rest) = body
            .split_first_chunk::<LENGTH_PREFIX_SIZE>()
            .ok_or_else(|| Error::protocol("Body shorter than length prefix"))?;

        let length = u32::from_be_bytes(*prefix) as usize;
        if rest.len() < length {
            return Err(Error::protocol(format!(
                "Metadata length {} exceeds remaining {} bytes",
                length,
                rest.len()
            )));
        }

        let (metadata, image) = rest.split_at(length);
        Ok(Self { metadata, image })
    }

    /// Parses the metadata as [`MatchData`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the metadata is not valid match data.
    pub fn match_data(&self) -> Result<MatchData> {
        Ok(serde_json::from_slice(self.metadata)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::protocol::AppOutput;

    const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    #[test]
    fn test_prefix_is_big_endian_json_length() {
        let data = MatchData::new("login", AppOutput::new("Login"), false);
        let json = data.to_json_bytes().expect("json");
        let body = MatchRequest::new(data, IMAGE.to_vec()).encode().expect("encode");

        let expected_prefix = (json.len() as u32).to_be_bytes();
        assert_eq!(&body[..LENGTH_PREFIX_SIZE], &expected_prefix);
        assert_eq!(&body[LENGTH_PREFIX_SIZE..LENGTH_PREFIX_SIZE + json.len()], json.as_slice());
        assert_eq!(&body[LENGTH_PREFIX_SIZE + json.len()..], IMAGE);
    }

    #[test]
    fn test_parse_reconstructs_payload() {
        let data = MatchData::new("cart", AppOutput::new("Cart"), true);
        let body = MatchRequest::new(data.clone(), IMAGE.to_vec()).encode().expect("encode");

        let parsed = FramedBody::parse(&body).expect("parse");
        assert_eq!(parsed.image, IMAGE);
        assert_eq!(parsed.match_data().expect("match data"), data);

        let mut rebuilt = (parsed.metadata.len() as u32).to_be_bytes().to_vec();
        rebuilt.extend_from_slice(parsed.metadata);
        rebuilt.extend_from_slice(parsed.image);
        assert_eq!(rebuilt, body);
    }

    #[test]
    fn test_known_bytes() {
        let body = frame(b"{}", b"IMG").expect("frame");
        assert_eq!(body, b"\x00\x00\x00\x02{}IMG");
    }

    #[test]
    fn test_parse_short_body() {
        assert!(matches!(
            FramedBody::parse(&[0, 0]),
            Err(Error::Protocol { .. })
        ));
    }

    #[test]
    fn test_parse_truncated_metadata() {
        assert!(matches!(
            FramedBody::parse(b"\x00\x00\x00\x10{}"),
            Err(Error::Protocol { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_frame_then_parse(
            metadata in prop::collection::vec(any::<u8>(), 0..512),
            image in prop::collection::vec(any::<u8>(), 0..512),
        ) {
            let body = frame(&metadata, &image).expect("frame");
            prop_assert_eq!(body.len(), LENGTH_PREFIX_SIZE + metadata.len() + image.len());

            let parsed = FramedBody::parse(&body).expect("parse");
            prop_assert_eq!(parsed.metadata, metadata.as_slice());
            prop_assert_eq!(parsed.image, image.as_slice());
        }
    }
}
