// Adapters layer: concrete implementations for external systems (http backend, local storage).

pub mod http;
pub mod storage;
