// In-process adapters for the store ports. Used with STORE_BACKEND=memory
// and by the test suites; contents are lost on restart.

mod bookmark_repository_memory;
mod user_repository_memory;

pub use bookmark_repository_memory::MemoryBookmarkRepository;
pub use user_repository_memory::MemoryUserRepository;
