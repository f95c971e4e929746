mod index;

#[doc(inline)]
pub use index::EmbeddingIndex;
