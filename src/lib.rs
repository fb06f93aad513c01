pub mod answer;
pub mod backend;
pub mod cli;
pub mod config;
pub mod dialog;
pub mod engine;
pub mod error;
pub mod image;
pub mod locale;
pub mod mail;
pub mod parse;
pub mod skill;
pub mod translate;
