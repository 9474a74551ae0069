//! Outbound ports - Interfaces that the application requires from external systems

mod api_error;
mod auth_port;
mod character_port;
mod game_data_port;
mod local_store_port;
mod session_state;

pub use api_error::{ApiError, FieldErrors};
pub use auth_port::AuthPort;
pub use character_port::CharacterPort;
pub use game_data_port::GameDataPort;
pub use local_store_port::{
    LocalStorePort, StorageError, ACCESS_TOKEN_KEY, DRAFT_KEY, REFRESH_TOKEN_KEY,
};
pub use session_state::SessionState;
