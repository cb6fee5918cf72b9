mod in_memory_user_repository;
mod traits;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use traits::UserRepository;
