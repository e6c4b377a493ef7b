pub mod store;
pub use store::{Store, UnitOfWork};
pub mod postgres;
pub use postgres::PgStore;
pub mod memory;
pub use memory::MemoryStore;

pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
pub mod imovel_repo;
pub use imovel_repo::ImovelRepository;
pub mod unidade_repo;
pub use unidade_repo::UnidadeRepository;
pub mod locatario_repo;
pub use locatario_repo::LocatarioRepository;
