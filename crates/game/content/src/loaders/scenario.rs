//! Scenario loader.
//!
//! A scenario file describes the park a session starts from: its name,
//! rules, finances and cheats. [`ScenarioSpec::into_world`] turns it into
//! the initial [`WorldState`].

use std::collections::BTreeSet;
use std::path::Path;

use park_core::{
    Cheats, FinanceState, GameConfig, Money, Objective, ParkFlags, ParkState, ShopItem, WorldState,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn yes() -> bool {
    true
}

/// Park section of a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkSpec {
    pub name: String,
    #[serde(default)]
    pub open: bool,
    #[serde(default = "yes")]
    pub money: bool,
    #[serde(default)]
    pub free_entry: bool,
    #[serde(default)]
    pub entrance_fee: Money,
    #[serde(default)]
    pub objective: Objective,
    #[serde(default)]
    pub same_price_throughout: Vec<ShopItem>,
}

impl ParkSpec {
    fn flags(&self) -> ParkFlags {
        let mut flags = ParkFlags::empty();
        flags.set(ParkFlags::PARK_OPEN, self.open);
        flags.set(ParkFlags::NO_MONEY, !self.money);
        flags.set(ParkFlags::PARK_FREE_ENTRY, self.free_entry);
        flags
    }
}

/// Finance section of a scenario file. Amounts are Money units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSpec {
    pub cash: Money,
    #[serde(default)]
    pub loan: Money,
    #[serde(default)]
    pub max_loan: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheatsSpec {
    pub unlock_all_prices: bool,
    pub build_in_pause_mode: bool,
}

/// Scenario definition for TOML files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    #[serde(default)]
    pub months_elapsed: u16,
    /// Ride slots; defaults to [`GameConfig::MAX_RIDES`].
    #[serde(default)]
    pub ride_capacity: Option<usize>,
    pub park: ParkSpec,
    pub finance: FinanceSpec,
    #[serde(default)]
    pub cheats: CheatsSpec,
}

impl ScenarioSpec {
    /// Builds the initial world: empty ride table, game running, not paused.
    pub fn into_world(self) -> WorldState {
        let park = ParkState {
            flags: self.park.flags(),
            name: self.park.name,
            entrance_fee: self.park.entrance_fee,
            same_price_throughout: self
                .park
                .same_price_throughout
                .into_iter()
                .collect::<BTreeSet<_>>(),
            campaigns: Vec::new(),
            objective: self.park.objective,
        };
        let finance = FinanceState::new(self.finance.cash, self.finance.loan, self.finance.max_loan);

        let mut world = WorldState::new(park, finance)
            .with_ride_capacity(self.ride_capacity.unwrap_or(GameConfig::MAX_RIDES));
        world.months_elapsed = self.months_elapsed;
        world.cheats = Cheats {
            unlock_all_prices: self.cheats.unlock_all_prices,
            build_in_pause_mode: self.cheats.build_in_pause_mode,
        };
        world
    }

    fn validate(&self) -> LoadResult<()> {
        if self.park.name.trim().is_empty() {
            anyhow::bail!("Scenario '{}' has an empty park name", self.name);
        }
        if self.park.name.chars().count() > GameConfig::MAX_PARK_NAME_LENGTH {
            anyhow::bail!(
                "Park name '{}' is longer than {} characters",
                self.park.name,
                GameConfig::MAX_PARK_NAME_LENGTH
            );
        }
        if self.park.entrance_fee < Money::FREE {
            anyhow::bail!("Entrance fee must not be negative");
        }
        if self.finance.loan < Money::ZERO || self.finance.loan > self.finance.max_loan {
            anyhow::bail!(
                "Loan {} must lie between 0 and the maximum loan {}",
                self.finance.loan,
                self.finance.max_loan
            );
        }
        if let Some(capacity) = self.ride_capacity {
            if capacity > GameConfig::MAX_RIDES {
                anyhow::bail!(
                    "Ride capacity {} exceeds the limit of {}",
                    capacity,
                    GameConfig::MAX_RIDES
                );
            }
        }
        Ok(())
    }
}

/// Loader for scenario definitions from TOML files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        let spec: ScenarioSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario TOML: {}", e))?;
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use park_core::ExpenditureType;

    use super::*;

    const FOREST_FRONTIERS: &str = include_str!("../../data/scenarios/forest_frontiers.toml");
    const SANDBOX: &str = include_str!("../../data/scenarios/sandbox.toml");

    #[test]
    fn bundled_scenario_builds_its_world() {
        let world = ScenarioLoader::parse(FOREST_FRONTIERS)
            .unwrap()
            .into_world();

        assert_eq!(world.park.name, "Forest Frontiers");
        assert_eq!(world.park.flags, ParkFlags::PARK_OPEN);
        assert!(world.park.money_enabled());
        assert_eq!(world.park.entrance_fee, Money::new(10, 0));
        assert_eq!(world.park.objective, Objective::GuestsBy);
        assert!(world.park.has_common_price(ShopItem::Photo));
        assert_eq!(world.finance.cash, Money::new(10_000, 0));
        assert_eq!(world.finance.max_loan, Money::new(20_000, 0));
        assert_eq!(
            world.finance.expenditure.get(ExpenditureType::Marketing),
            Money::ZERO
        );
        assert_eq!(world.rides.capacity(), GameConfig::MAX_RIDES);
        assert!(world.rides.is_empty());
        assert!(!world.paused);
    }

    #[test]
    fn flags_and_cheats_map_onto_the_world() {
        let world = ScenarioLoader::parse(SANDBOX).unwrap().into_world();

        assert!(!world.park.money_enabled());
        assert!(world.park.has_flag(ParkFlags::PARK_FREE_ENTRY));
        assert!(world.cheats.build_in_pause_mode);
        assert!(!world.cheats.unlock_all_prices);
    }

    #[test]
    fn loan_above_maximum_is_rejected() {
        let content = r#"
            name = "Debt"
            [park]
            name = "Debt Park"
            [finance]
            cash = 0
            loan = 500
            max_loan = 100
        "#;
        let err = ScenarioLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("maximum loan"), "{err}");
    }

    #[test]
    fn ride_capacity_is_capped() {
        let content = r#"
            name = "Huge"
            ride_capacity = 4096
            [park]
            name = "Huge Park"
            [finance]
            cash = 0
        "#;
        assert!(ScenarioLoader::parse(content).is_err());

        let small = content.replace("4096", "2");
        let world = ScenarioLoader::parse(&small).unwrap().into_world();
        assert_eq!(world.rides.capacity(), 2);
    }
}
