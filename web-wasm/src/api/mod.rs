//! バックエンドAPI連携

mod backend;

pub use backend::FetchGateway;
