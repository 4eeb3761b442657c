use strum::{EnumIter, IntoStaticStr};

use crate::state::Money;

/// Goods a ride or stall can sell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ShopItem {
    Balloon,
    Burger,
    Chips,
    IceCream,
    Candyfloss,
    Drink,
    Coffee,
    Umbrella,
    Photo,
    Admission,
}

impl ShopItem {
    /// Price a newly built stall charges before the player changes it.
    pub const fn default_price(self) -> Money {
        match self {
            Self::Balloon => Money::new(0, 90),
            Self::Burger => Money::new(1, 50),
            Self::Chips => Money::new(1, 20),
            Self::IceCream => Money::new(0, 90),
            Self::Candyfloss => Money::new(0, 80),
            Self::Drink => Money::new(1, 20),
            Self::Coffee => Money::new(1, 0),
            Self::Umbrella => Money::new(2, 50),
            Self::Photo => Money::new(2, 0),
            Self::Admission => Money::new(0, 40),
        }
    }
}
