use super::*;

#[test]
fn test_push_and_render_simple() {
    let mut buf = OutputRingBuffer::new(10, 1024);
    buf.push("hello\nworld\n");
    assert_eq!(buf.render(), "hello\nworld");
}

#[test]
fn test_unterminated_trailing_line() {
    let mut buf = OutputRingBuffer::new(10, 1024);
    buf.push("line1\npartial");
    assert_eq!(buf.render(), "line1\npartial");
}

#[test]
fn test_eviction_of_oldest_lines() {
    let mut buf = OutputRingBuffer::new(2, 1024);
    buf.push("a\nb\nc\n");
    assert_eq!(buf.render(), "b\nc");
    assert!(buf.is_truncated());
}

#[test]
fn test_no_truncation_when_under_capacity() {
    let mut buf = OutputRingBuffer::new(10, 1024);
    buf.push("a\nb\n");
    assert!(!buf.is_truncated());
}

#[test]
fn test_line_byte_cap() {
    let mut buf = OutputRingBuffer::new(10, 4);
    buf.push("abcdefgh\n");
    assert_eq!(buf.render(), "abcd");
}

#[test]
fn test_incremental_pushes_across_chunks() {
    let mut buf = OutputRingBuffer::new(10, 1024);
    buf.push("hel");
    buf.push("lo\nworld");
    assert_eq!(buf.render(), "hello\nworld");
}
