pub mod mock_user_repository;

pub use mock_user_repository::MockUserRepository;
