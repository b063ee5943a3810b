//! Imagevault HTTP Server
//!
//! Exposes the storage gateway over HTTP:
//! - `GET /files` lists the stored image filenames
//! - `GET /files/download/{image_name}` downloads by partial name match
//! - `POST /files` uploads a new image from a multipart form

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, Result};
pub use server::Server;
pub use state::AppState;
