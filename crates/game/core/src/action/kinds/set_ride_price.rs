use tracing::warn;

use super::pricing::{PriceSlot, price_slot};
use crate::action::{
    ActionFlags, ActionResult, ActionType, ErrorKind, ExecuteContext, GameAction, Permissions,
    QueryContext,
};
use crate::env::{RideDataOracle, RideTypeFlags, ShopItem};
use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::{Money, Ride, RideId};
use crate::stream::DataSerialiser;
use crate::ui::WindowClass;

/// Changes the primary (admission or main item) or secondary price of a ride.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetRidePriceAction {
    ride: RideId,
    price: Money,
    primary: bool,
}

impl Default for SetRidePriceAction {
    fn default() -> Self {
        Self {
            ride: RideId::default(),
            price: Money::ZERO,
            primary: true,
        }
    }
}

impl SetRidePriceAction {
    pub fn new(ride: RideId, price: Money, primary: bool) -> Self {
        Self {
            ride,
            price,
            primary,
        }
    }

    fn slot(&self) -> PriceSlot {
        if self.primary {
            PriceSlot::Primary
        } else {
            PriceSlot::Secondary
        }
    }

    /// Shop item sold at the slot this action changes, if any.
    fn item_sold(&self, oracle: &dyn RideDataOracle, ride: &Ride) -> Option<ShopItem> {
        let entry = oracle.ride_entry(ride.subtype)?;
        if self.primary {
            return entry.shop_item;
        }
        let has_photo = oracle
            .ride_type(ride.ride_type)
            .is_some_and(|descriptor| descriptor.has_flag(RideTypeFlags::HAS_ON_RIDE_PHOTO));
        entry
            .shop_item_secondary
            .or(has_photo.then_some(ShopItem::Photo))
    }
}

fn set_slot(ride: &mut Ride, slot: PriceSlot, price: Money) {
    match slot {
        PriceSlot::Primary => ride.price = price,
        PriceSlot::Secondary => ride.price_secondary = price,
    }
}

impl GameAction for SetRidePriceAction {
    fn action_type(&self) -> ActionType {
        ActionType::SET_RIDE_PRICE
    }

    fn action_flags(&self, base: ActionFlags) -> ActionFlags {
        base | ActionFlags::ALLOW_WHILE_PAUSED
    }

    fn required_permission(&self) -> Permissions {
        Permissions::RIDE_PROPERTIES
    }

    fn error_title(&self) -> StringId {
        StringId::CANT_CHANGE_PRICE
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream
            .field(&mut self.ride)?
            .field(&mut self.price)?
            .field(&mut self.primary)?;
        Ok(())
    }

    fn query(&self, ctx: &QueryContext<'_>) -> ActionResult {
        if ctx.world.rides.get(self.ride).is_none() {
            return ActionResult::error(ErrorKind::InvalidParameters, StringId::RIDE_NOT_FOUND);
        }
        if !ctx.world.park.money_enabled() {
            return ActionResult::error(ErrorKind::Disallowed, StringId::MONEY_DISABLED);
        }
        if self.price < Money::FREE || self.price > ctx.config().max_ride_price {
            return ActionResult::error(ErrorKind::InvalidParameters, StringId::NONE);
        }
        ActionResult::ok()
    }

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
        let oracle = ctx.rides();
        let Some(ride) = ctx.world.rides.get_mut(self.ride) else {
            warn!(ride = %self.ride, "ride vanished before price change");
            return ActionResult::error(ErrorKind::Unknown, StringId::RIDE_NOT_FOUND);
        };
        set_slot(ride, self.slot(), self.price);
        let ride_type = ride.ride_type;
        let item = self.item_sold(oracle, ride);

        let park = &ctx.world.park;
        match item {
            Some(item) if park.has_common_price(item) => {
                for (_, other) in ctx.world.rides.iter_mut() {
                    if let Some(slot) = price_slot(oracle, other, item) {
                        set_slot(other, slot, self.price);
                    }
                }
            }
            None if self.primary && park.has_common_price(ShopItem::Admission) => {
                for (_, other) in ctx.world.rides.iter_mut() {
                    if other.ride_type == ride_type {
                        other.price = self.price;
                    }
                }
            }
            _ => {}
        }

        ctx.invalidate(WindowClass::Ride);
        ctx.invalidate(WindowClass::RideList);
        ActionResult::ok()
    }
}
