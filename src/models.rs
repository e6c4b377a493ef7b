pub mod auth;
pub mod endereco;
pub mod imovel;
pub mod locatario;
pub mod unidade;
