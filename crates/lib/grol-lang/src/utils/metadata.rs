/// Byte range of a token in the source it was lexed from.
pub type Span = std::ops::Range<usize>;

/// Span of nodes built without any source, e.g. by the tree builders.
pub fn dummy_span() -> Span {
    0..0
}
