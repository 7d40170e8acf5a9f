//! Caption Prep CLI
//!
//! データセットのキャプション編集をバックエンドAPI経由で行う端末フロントエンド

pub mod backend;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod hud;
pub mod terminal;
