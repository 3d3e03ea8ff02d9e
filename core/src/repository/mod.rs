pub mod file;
pub mod record;
pub mod traits;

// Re-export
pub use file::FileTaskRepository;
pub use record::decode_record;
pub use traits::TaskRepository;
