use crate::action::{
    ActionFlags, ActionResult, ActionType, ErrorKind, ExecuteContext, GameAction, Permissions,
    QueryContext,
};
use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::{Money, ParkFlags};
use crate::stream::DataSerialiser;
use crate::ui::WindowClass;

/// Changes what guests pay at the park gate.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SetParkEntranceFeeAction {
    fee: Money,
}

impl SetParkEntranceFeeAction {
    pub fn new(fee: Money) -> Self {
        Self { fee }
    }

    pub fn fee(&self) -> Money {
        self.fee
    }
}

impl GameAction for SetParkEntranceFeeAction {
    fn action_type(&self) -> ActionType {
        ActionType::SET_PARK_ENTRANCE_FEE
    }

    fn action_flags(&self, base: ActionFlags) -> ActionFlags {
        base | ActionFlags::ALLOW_WHILE_PAUSED
    }

    fn required_permission(&self) -> Permissions {
        Permissions::PARK_FUNDING
    }

    fn error_title(&self) -> StringId {
        StringId::CANT_CHANGE_PARK_ENTRANCE_FEE
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream.field(&mut self.fee)?;
        Ok(())
    }

    fn query(&self, ctx: &QueryContext<'_>) -> ActionResult {
        let world = ctx.world;
        if !world.park.money_enabled() {
            return ActionResult::error(ErrorKind::Disallowed, StringId::MONEY_DISABLED);
        }
        if world.park.has_flag(ParkFlags::PARK_FREE_ENTRY) && !world.cheats.unlock_all_prices {
            return ActionResult::error(ErrorKind::Disallowed, StringId::PARK_ENTRY_ALWAYS_FREE);
        }
        if self.fee < Money::FREE || self.fee > ctx.config().max_entrance_fee {
            return ActionResult::error(ErrorKind::InvalidParameters, StringId::NONE);
        }
        ActionResult::ok()
    }

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
        ctx.world.park.entrance_fee = self.fee;
        ctx.invalidate(WindowClass::ParkInformation);
        ActionResult::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionHeader;
    use crate::config::GameConfig;
    use crate::env::GameEnv;
    use crate::state::WorldState;
    use crate::testing;

    fn query(world: &WorldState, fee: Money) -> ActionResult {
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::SET_PARK_ENTRANCE_FEE);
        SetParkEntranceFeeAction::new(fee)
            .query(&QueryContext::new(world, GameEnv::new(&data, &config), &header))
    }

    #[test]
    fn fee_outside_bounds_is_invalid() {
        let world = testing::world();
        assert_eq!(
            query(&world, Money(-1)).error_kind(),
            ErrorKind::InvalidParameters
        );
        assert_eq!(
            query(&world, Money::new(101, 0)).error_kind(),
            ErrorKind::InvalidParameters
        );
        assert!(query(&world, Money::FREE).is_ok());
        assert!(query(&world, Money::new(100, 0)).is_ok());
    }

    #[test]
    fn money_disabled_or_forced_free_entry_is_disallowed() {
        let mut world = testing::world();
        world.park.flags |= ParkFlags::NO_MONEY;
        assert_eq!(
            query(&world, Money::new(50, 0)).error_kind(),
            ErrorKind::Disallowed
        );

        let mut world = testing::world();
        world.park.flags |= ParkFlags::PARK_FREE_ENTRY;
        assert_eq!(
            query(&world, Money::new(50, 0)).error_kind(),
            ErrorKind::Disallowed
        );

        world.cheats.unlock_all_prices = true;
        assert!(query(&world, Money::new(50, 0)).is_ok());
    }

    #[test]
    fn execute_sets_fee_and_invalidates_park_window() {
        let mut world = testing::world();
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::SET_PARK_ENTRANCE_FEE);
        let action = SetParkEntranceFeeAction::new(Money::new(50, 0));

        let mut ctx = ExecuteContext::new(&mut world, GameEnv::new(&data, &config), &header);
        assert!(action.execute(&mut ctx).is_ok());
        assert_eq!(ctx.into_invalidations(), vec![WindowClass::ParkInformation]);
        assert_eq!(world.park.entrance_fee, Money::new(50, 0));
    }
}
