pub mod client;
pub mod dataset;
pub mod render;
pub mod types;
pub mod widget;

pub use client::{FrostClient, FrostClientConfig, LookupError, DEFAULT_DATASET_PATH};
pub use dataset::FrostDataset;
pub use render::{FETCH_ERROR_MESSAGE, NOT_FOUND_MESSAGE, OutputRegion, RenderTicket};
pub use types::{FreezeDate, FrostRecord, PlaceRecord};
pub use widget::{LocalLookup, RemoteLookup};
