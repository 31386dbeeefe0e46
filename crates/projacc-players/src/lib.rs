//! projacc Players - manifest-indexed player data loader
//!
//! Player records are split across numbered chunk files. A manifest maps
//! each player id to its chunk and display name, so a page can show a name
//! without touching chunk data, and a full record costs one chunk read the
//! first time its chunk is needed.
//!
//! ```ignore
//! let loader = PlayerLoader::open(&config.data);
//! let name = loader.get_player_name("545361");
//! if let Some(record) = loader.get_player("545361") {
//!     render_stats(name, &record);
//! }
//! ```

pub mod audit;
pub mod cache;
pub mod chunk;
pub mod loader;
pub mod manifest;
pub mod record;
pub mod source;
pub mod status;

pub use audit::AuditReport;
pub use cache::{CacheStats, ChunkCache, ChunkRecords};
pub use loader::PlayerLoader;
pub use manifest::{Manifest, PlayerInfo};
pub use record::PlayerRecord;
pub use source::{DataSource, FsSource, Resource};
pub use status::LoadStatus;
