mod load;
mod normalize;
mod record;
mod sample;

pub use load::{load_dataset, DatasetError};
pub use normalize::{normalize_row, normalize_rows, RawRecord};
pub use record::{AudioCharacteristic, PlatformPresence, SongRecord};
pub use sample::sample_dataset;
