//! Caption Prep Common Library
//!
//! CLIとWeb(WASM)で共有される状態モデル・表示射影・バックエンド契約

pub mod api;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod model;
pub mod sequence;
pub mod session;
pub mod theme;
pub mod types;
pub mod view;

pub use controller::{Completion, Controller, Notice, Pending};
pub use error::{Error, Result};
pub use gateway::Gateway;
pub use model::DatasetState;
pub use sequence::{RequestKind, Ticket};
pub use session::Session;
pub use theme::Theme;
pub use types::{CaptionEntry, ImageDescriptor, ImageRecord, ImageRef};
