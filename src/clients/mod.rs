/// Error types and result aliases
pub mod errors;
/// YouTube Music metadata API client
pub mod ytmusic;

pub use ytmusic::YtMusicClient;
