pub mod extensions;
pub mod handle_websocket;
pub mod health;
