//! Data URI encoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Every inlined image is labelled JPEG regardless of what the host served
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

pub fn to_data_uri(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(DATA_URI_PREFIX.len() + bytes.len().div_ceil(3) * 4);
    out.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(bytes, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_prefix_and_payload() {
        let uri = to_data_uri(b"hello");
        assert_eq!(uri, "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(to_data_uri(&[]), DATA_URI_PREFIX);
    }

    #[test]
    fn test_payload_decodes_to_original_bytes() {
        let bytes = [0xFFu8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let uri = to_data_uri(&bytes);
        let payload = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), bytes);
    }
}
