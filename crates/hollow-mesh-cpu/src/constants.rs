//! Shared constants for hollow-mesh-cpu. Centralizes common magic numbers.

// Bitset configuration (u64-based)
pub(crate) const BITS_PER_WORD: usize = 64;
pub(crate) const WORD_INDEX_SHIFT: usize = 6; // log2(64)
pub(crate) const WORD_INDEX_MASK: usize = 63; // (1<<6) - 1

// Largest chunk edge the u8 merge counters in RenderCell can span
pub(crate) const MAX_CHUNK_SIZE: usize = 256;

// Vertices/indices/uv-floats per emitted quad
pub(crate) const VERTS_PER_QUAD: usize = 4;
pub(crate) const INDICES_PER_QUAD: usize = 6;
