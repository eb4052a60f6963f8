pub mod category;
pub mod memory;
pub mod user;

pub use category::PostgresCategoryRepository;
pub use memory::InMemoryRepository;
pub use user::PostgresUserRepository;
