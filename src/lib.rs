//! Cadastro Assistant - Conversational Registration for Municipal Programs
//!
//! A chat assistant that answers questions about the agriculture, fishing
//! and food-acquisition (PAA) programs and walks residents through their
//! registration one question at a time, producing the same request records
//! the web forms create.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
