pub mod auth;
pub mod autorizacao;
pub mod cep_service;
pub mod imovel_service;
pub mod locatario_service;
pub mod unidade_service;

#[cfg(test)]
mod fixtures;
