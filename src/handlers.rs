pub mod auth;
pub mod imoveis;
pub mod locatarios;
pub mod unidades;
