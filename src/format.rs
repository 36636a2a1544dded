//! Response body rendering.

/// Render decoded texts as the response body: each text verbatim followed
/// by a newline, UTF-8 encoded.
pub fn render<S: AsRef<str>>(texts: &[S]) -> Vec<u8> {
    let capacity = texts.iter().map(|t| t.as_ref().len() + 1).sum();
    let mut body = Vec::with_capacity(capacity);
    for text in texts {
        body.extend_from_slice(text.as_ref().as_bytes());
        body.push(b'\n');
    }
    body
}
