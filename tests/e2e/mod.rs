// End-to-end tests for mosheng-ops
//
// Each test gets its own mock TTS service and monitor panel, both bound to
// 127.0.0.1:0, so tests run in parallel without sharing state.
//
// - test_smoke: the smoke run against the mock TTS API
// - test_tts_client: single API calls and their failure modes
// - test_monitor: the JSON monitor panel

mod test_monitor;
mod test_smoke;
mod test_tts_client;
