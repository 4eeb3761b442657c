//! Ride type and ride object catalogue loader.

use std::path::Path;

use park_core::{GameConfig, RideDataOracle, StaticRideData};
use ron::extensions::Extensions;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Catalogue compiled into the binary; used when no data directory is configured.
const BUILTIN_RIDES: &str = include_str!("../../data/rides.ron");

/// Loader for ride catalogues from RON files.
///
/// The file deserialises straight into [`StaticRideData`]: `ride_types` is
/// indexed by ride type, `entries` by object index with `None` for an
/// unloaded slot.
pub struct RideDataLoader;

impl RideDataLoader {
    /// Load a ride catalogue from a RON file.
    pub fn load(path: &Path) -> LoadResult<StaticRideData> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid ride catalogue {}: {}", path.display(), e))
    }

    /// The catalogue shipped with the crate.
    pub fn builtin() -> LoadResult<StaticRideData> {
        Self::parse(BUILTIN_RIDES)
    }

    /// Parse a catalogue. Newtype wrappers such as ride type flags are
    /// written bare, e.g. `flags: "IS_SHOP | IS_TOILET"`.
    pub fn parse(content: &str) -> LoadResult<StaticRideData> {
        let data: StaticRideData = ron::Options::default()
            .with_default_extension(Extensions::UNWRAP_NEWTYPES)
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ride catalogue RON: {}", e))?;
        validate(&data)?;

        debug!(
            ride_types = data.ride_types.len(),
            entries = data.entries.len(),
            "loaded ride catalogue"
        );
        Ok(data)
    }
}

fn validate(data: &StaticRideData) -> LoadResult<()> {
    let max_objects = usize::from(GameConfig::MAX_RIDE_OBJECTS);
    if data.entries.len() > max_objects {
        anyhow::bail!(
            "{} ride objects exceed the limit of {}",
            data.entries.len(),
            max_objects
        );
    }
    if data.ride_types.len() >= usize::from(u16::MAX) {
        anyhow::bail!("too many ride types: {}", data.ride_types.len());
    }

    for (index, descriptor) in data.ride_types.iter().enumerate() {
        if descriptor.track_colour_presets.is_empty() {
            anyhow::bail!(
                "ride type {} ({}) has no track colour presets",
                index,
                descriptor.name
            );
        }
        let operating = descriptor.operating;
        if operating.min_value > operating.max_value {
            anyhow::bail!(
                "ride type {} ({}) has operating range {}..{}",
                index,
                descriptor.name,
                operating.min_value,
                operating.max_value
            );
        }
    }

    for (index, entry) in data.entries.iter().enumerate() {
        let Some(entry) = entry else { continue };
        if entry.ride_types.is_empty() {
            anyhow::bail!("ride object {} ({}) provides no ride type", index, entry.name);
        }
        if let Some(unknown) = entry
            .ride_types
            .iter()
            .find(|ride_type| data.ride_type(**ride_type).is_none())
        {
            anyhow::bail!(
                "ride object {} ({}) refers to unknown ride type {}",
                index,
                entry.name,
                unknown.0
            );
        }
        if entry.min_cars_in_train > entry.max_cars_in_train {
            anyhow::bail!(
                "ride object {} ({}) has car range {}..{}",
                index,
                entry.name,
                entry.min_cars_in_train,
                entry.max_cars_in_train
            );
        }
    }
    Ok(())
}
