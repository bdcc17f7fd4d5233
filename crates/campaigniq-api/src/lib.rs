pub mod error;
pub mod handlers;
pub mod report;
pub mod routes;
pub mod server;
pub mod state;
pub mod streaming;
pub mod ui;

pub use error::*;
pub use handlers::*;
pub use routes::*;
pub use server::*;
pub use state::*;
pub use streaming::*;
