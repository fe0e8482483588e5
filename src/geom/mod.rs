mod proj;
mod zones;

pub use proj::{project, unproject, EARTH_RADIUS, MAX_LATITUDE};
pub(crate) use zones::ZoneIndex;
