//! Park-wide price lookups shared by ride construction and price changes.

use crate::env::{RideDataOracle, RideTypeFlags, ShopItem};
use crate::state::{Money, Ride, RideId, RideType, WorldState};

/// Which of a ride's two prices an item is sold at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PriceSlot {
    Primary,
    Secondary,
}

/// Slot at which `ride` sells `item`, if it sells it at all.
pub(crate) fn price_slot(
    oracle: &dyn RideDataOracle,
    ride: &Ride,
    item: ShopItem,
) -> Option<PriceSlot> {
    let entry = oracle.ride_entry(ride.subtype)?;
    if entry.shop_item == Some(item) {
        return Some(PriceSlot::Primary);
    }
    if entry.shop_item_secondary == Some(item) {
        return Some(PriceSlot::Secondary);
    }
    let has_photo = oracle
        .ride_type(ride.ride_type)
        .is_some_and(|descriptor| descriptor.has_flag(RideTypeFlags::HAS_ON_RIDE_PHOTO));
    (item == ShopItem::Photo && has_photo).then_some(PriceSlot::Secondary)
}

/// Price any other ride in the park already charges for `item`.
pub(crate) fn common_item_price(
    world: &WorldState,
    oracle: &dyn RideDataOracle,
    item: ShopItem,
    exclude: Option<RideId>,
) -> Option<Money> {
    world
        .rides
        .iter()
        .filter(|(id, _)| Some(*id) != exclude)
        .find_map(|(_, ride)| {
            price_slot(oracle, ride, item).map(|slot| match slot {
                PriceSlot::Primary => ride.price,
                PriceSlot::Secondary => ride.price_secondary,
            })
        })
}

/// Price any other ride of the same type charges for admission.
pub(crate) fn common_ride_price(
    world: &WorldState,
    ride_type: RideType,
    exclude: Option<RideId>,
) -> Option<Money> {
    world
        .rides
        .iter()
        .find(|(id, ride)| Some(*id) != exclude && ride.ride_type == ride_type)
        .map(|(_, ride)| ride.price)
}
