pub mod config;
pub mod health;
pub mod http;
pub mod pm2;
pub mod system;
pub mod tts_api;
