pub mod active_game_client;
pub mod puzzle_client;
pub mod statistics_client;
pub mod transport;

pub use active_game_client::ActiveGameStoreClient;
pub use puzzle_client::PuzzleCatalogClient;
pub use statistics_client::StatisticsStoreClient;
pub use transport::{build_http_client, BackendClient, BackendRequest};
