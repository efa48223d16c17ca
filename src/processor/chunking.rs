//! Text chunking
//!
//! Splits a document's text into overlapping fixed-size chunks. Lengths are
//! counted in characters, not bytes, so multi-byte text never splits inside a
//! character. Overlap preserves context across chunk boundaries for
//! retrieval quality.

use tracing::instrument;

/// Split text into chunks of at most `chunk_size` characters
///
/// Consecutive chunks share `overlap` characters; together they cover the
/// whole input with no gaps. Chunk order follows text order.
#[instrument(skip(text), fields(len = text.len()))]
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if chunk_size == 0 || text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let stride = chunk_size.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = usize::min(start + chunk_size, chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += stride;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = split_text("hello", 1000, 200);
        assert_eq!(chunks, vec!["hello".to_string()]);
    }

    #[test]
    fn test_four_thousand_chars_split_into_five_chunks() {
        let text: String = (0..4000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = split_text(&text, 1000, 200);

        assert_eq!(chunks.len(), 5);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 1000);
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let text: String = (0..4000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = split_text(&text, 1000, 200);

        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(800).collect();
            let head: String = pair[1].chars().take(tail.chars().count()).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_chunks_cover_text_without_gaps() {
        let text: String = (0..2500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = split_text(&text, 1000, 200);

        // dropping each chunk's overlap with its predecessor reconstructs the text
        let mut rebuilt: String = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(200));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text: String = "héllо→".chars().cycle().take(50).collect();
        let chunks = split_text(&text, 20, 4);

        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20);
        }
        let mut rebuilt: String = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(4));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_text("", 1000, 200).is_empty());
    }
}
