mod chunk_reader;

pub use chunk_reader::{ChunkReader, DEFAULT_WINDOW_SIZE};
