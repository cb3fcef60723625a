//! Static UI assets embedded into the binary.

/// The chat console page, including the Commands tab markup and script.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_is_embedded() {
        assert!(INDEX_HTML.contains("<!DOCTYPE html>"));
        assert!(INDEX_HTML.contains("id=\"commands\""));
    }
}
