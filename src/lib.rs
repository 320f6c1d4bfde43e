// src/lib.rs
//
// Backend do painel de controle do provedor: diretório de escolas
// (tenants), catálogo de tipos de documento e o ledger de concessões e
// consumo de créditos. O binário monta as rotas; os testes de
// integração exercitam a camada de serviços diretamente.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
