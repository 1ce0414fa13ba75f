pub mod atomic_writer;
pub mod json_file_store;
pub mod title_cache;

pub use atomic_writer::AtomicWriter;
pub use json_file_store::JsonFileStore;
pub use title_cache::TitleCache;
