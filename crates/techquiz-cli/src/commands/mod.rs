pub mod annotate;
pub mod generate;
pub mod glossary;
pub mod init;
pub mod list_models;
pub mod play;
