//! Operational tooling for the MoshengAI deployment: the pm2 process
//! declaration, a smoke test for the TTS HTTP API and a service monitor.

pub mod controllers;
pub mod domain;
pub mod error;
pub mod infrastructure;
