//! Form encoding in the server's legacy character set
//!
//! ACS decodes `application/x-www-form-urlencoded` bodies as EUC-JP, so the
//! percent escapes have to be built from EUC-JP bytes rather than UTF-8.

use crate::error::AcsError;
use encoding_rs::{EUC_JP, Encoding};

/// Reported as the field of a standalone component that failed to encode
const UNNAMED_FIELD: &str = "<value>";

/// Percent-encodes form parameters using a fixed character encoding
#[derive(Clone, Copy, Debug)]
pub struct FormEncoder {
    encoding: &'static Encoding,
}

impl FormEncoder {
    /// Create an encoder for the given encoding
    ///
    /// # Errors
    ///
    /// Returns `AcsError::UnsupportedEncoding` for encodings `encoding_rs` only
    /// decodes (UTF-16, `replacement`); their encoder would emit UTF-8 instead.
    pub fn new(encoding: &'static Encoding) -> Result<Self, AcsError> {
        if encoding.output_encoding() != encoding {
            return Err(AcsError::UnsupportedEncoding(encoding.name()));
        }
        Ok(Self { encoding })
    }

    /// Create an encoder from a WHATWG encoding label such as `"euc-jp"` or `"shift_jis"`
    pub fn for_label(label: &str) -> Result<Self, AcsError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| AcsError::UnknownEncoding(label.to_string()))?;
        Self::new(encoding)
    }

    /// The encoding in use
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Percent-encode a single key or value
    ///
    /// Returns `None` if the text contains characters the encoding cannot represent.
    fn try_encode(&self, text: &str) -> Option<String> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            return None;
        }
        Some(urlencoding::encode_binary(&bytes).into_owned())
    }

    /// Percent-encode a single key or value
    ///
    /// # Errors
    ///
    /// Returns `AcsError::Encoding` if `text` has characters outside the encoding.
    /// The error does not echo `text`, which may be a secret.
    pub fn encode_component(&self, text: &str) -> Result<String, AcsError> {
        self.try_encode(text).ok_or_else(|| AcsError::Encoding {
            encoding: self.encoding.name(),
            field: UNNAMED_FIELD.to_string(),
        })
    }

    /// Build a form body from ordered key/value pairs
    ///
    /// Pairs are joined with `&` in the order given. An encoding error names
    /// the parameter key, never its value.
    ///
    /// # Example
    ///
    /// ```
    /// use acs_http_client::FormEncoder;
    ///
    /// let encoder = FormEncoder::default();
    /// let body = encoder.encode_pairs(&[("subject", "テスト"), ("body", "a b")]).unwrap();
    /// assert_eq!(body, "subject=%A5%C6%A5%B9%A5%C8&body=a%20b");
    /// ```
    pub fn encode_pairs(&self, pairs: &[(&str, &str)]) -> Result<String, AcsError> {
        let mut body = String::new();
        for (key, value) in pairs {
            let (Some(key_enc), Some(value_enc)) = (self.try_encode(key), self.try_encode(value))
            else {
                return Err(AcsError::Encoding {
                    encoding: self.encoding.name(),
                    field: key.to_string(),
                });
            };
            if !body.is_empty() {
                body.push('&');
            }
            body.push_str(&key_enc);
            body.push('=');
            body.push_str(&value_enc);
        }
        Ok(body)
    }

    /// Decode a percent-encoded key or value; `+` is read as a space
    ///
    /// # Errors
    ///
    /// Returns `AcsError::Decoding` if the bytes are not valid in the encoding.
    pub fn decode_component(&self, encoded: &str) -> Result<String, AcsError> {
        let spaced = encoded.replace('+', " ");
        let bytes = urlencoding::decode_binary(spaced.as_bytes());
        self.encoding
            .decode_without_bom_handling_and_without_replacement(&bytes)
            .map(|text| text.into_owned())
            .ok_or(AcsError::Decoding(self.encoding.name()))
    }
}

impl Default for FormEncoder {
    fn default() -> Self {
        Self { encoding: EUC_JP }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_katakana_encodes_to_euc_jp_bytes() {
        let encoder = FormEncoder::default();
        assert_eq!(
            encoder.encode_component("テスト").unwrap(),
            "%A5%C6%A5%B9%A5%C8"
        );
    }

    #[test]
    fn test_unreserved_ascii_is_kept() {
        let encoder = FormEncoder::default();
        assert_eq!(encoder.encode_component("aZ09-_.~").unwrap(), "aZ09-_.~");
        assert_eq!(
            encoder.encode_component("except_community_id_array[]").unwrap(),
            "except_community_id_array%5B%5D"
        );
        assert_eq!(encoder.encode_component("a&b=c").unwrap(), "a%26b%3Dc");
    }

    #[test]
    fn test_unrepresentable_character_is_an_error() {
        let encoder = FormEncoder::default();
        let result = encoder.encode_pairs(&[("subject", "ok"), ("body", "smile 😀")]);

        match result {
            Err(AcsError::Encoding { encoding, field }) => {
                assert_eq!(encoding, "EUC-JP");
                assert_eq!(field, "body");
            }
            other => panic!("Expected AcsError::Encoding, got {:?}", other),
        }
    }

    #[test]
    fn test_component_error_does_not_echo_value() {
        let encoder = FormEncoder::default();
        let error = encoder.encode_component("secret😀").unwrap_err();

        assert!(matches!(&error, AcsError::Encoding { field, .. } if field == "<value>"));
        assert!(!error.to_string().contains("secret"));
    }

    #[test]
    fn test_decode_only_encodings_are_rejected() {
        for label in ["utf-16le", "utf-16be", "iso-2022-kr"] {
            let result = FormEncoder::for_label(label);
            assert!(
                matches!(result, Err(AcsError::UnsupportedEncoding(_))),
                "{} should be rejected, got {:?}",
                label,
                result
            );
        }
        assert!(matches!(
            FormEncoder::new(encoding_rs::UTF_16LE),
            Err(AcsError::UnsupportedEncoding("UTF-16LE"))
        ));
        assert!(FormEncoder::for_label("utf-8").is_ok());
    }

    #[test]
    fn test_encode_pairs_preserves_order() {
        let encoder = FormEncoder::default();
        let body = encoder
            .encode_pairs(&[
                ("module", "User"),
                ("action", "Login"),
                ("search", "1"),
            ])
            .unwrap();
        assert_eq!(body, "module=User&action=Login&search=1");
    }

    #[test]
    fn test_encode_pairs_empty() {
        assert_eq!(FormEncoder::default().encode_pairs(&[]).unwrap(), "");
    }

    #[test]
    fn test_for_label() {
        let encoder = FormEncoder::for_label("Shift_JIS").unwrap();
        assert_eq!(encoder.encoding().name(), "Shift_JIS");
        assert_eq!(encoder.encode_component("テ").unwrap(), "%83e");

        let result = FormEncoder::for_label("klingon");
        assert!(matches!(result, Err(AcsError::UnknownEncoding(label)) if label == "klingon"));
    }

    #[test]
    fn test_decode_reads_plus_as_space() {
        let encoder = FormEncoder::default();
        assert_eq!(encoder.decode_component("a+b%20c").unwrap(), "a b c");
    }

    #[test]
    fn test_decode_invalid_bytes_is_an_error() {
        let encoder = FormEncoder::default();
        assert!(matches!(
            encoder.decode_component("%A5"),
            Err(AcsError::Decoding("EUC-JP"))
        ));
    }

    fn euc_jp_text() -> impl Strategy<Value = String> {
        let chars: Vec<char> = "abcXYZ019 -_.~!\"#$%&'()*+,/:;<=>?@[]^`{|}\n\
             あいうえおかきくけこぱぴ\
             アイウエオガギグゲゴヴー\
             掲示板投稿件名本文漢字名古屋大学\
             、。「」・！？ー"
            .chars()
            .collect();
        prop::collection::vec(prop::sample::select(chars), 0..40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    // Encoded subjects and bodies decode back to the original text
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_euc_jp_round_trip(text in euc_jp_text()) {
            let encoder = FormEncoder::default();
            let encoded = encoder.encode_component(&text).unwrap();

            prop_assert!(encoded.is_ascii());
            prop_assert!(!encoded.contains('&') && !encoded.contains('=') && !encoded.contains('+'));
            prop_assert_eq!(encoder.decode_component(&encoded).unwrap(), text);
        }
    }
}
