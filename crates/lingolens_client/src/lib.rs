//! LingoLens client: the wire contract with the image translation backend.
mod client;
mod handle;
mod types;
mod wire;

pub use client::{
    upload_percent, ClientSettings, ProgressSink, ReqwestTranslateClient, TranslateClient,
    DEFAULT_BASE_URL,
};
pub use handle::ClientHandle;
pub use types::{ClientError, ClientEvent};
