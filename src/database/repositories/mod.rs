mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;
