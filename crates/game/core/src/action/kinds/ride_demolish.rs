use tracing::warn;

use crate::action::{
    ActionResult, ActionType, ErrorKind, ExecuteContext, GameAction, Permissions, QueryContext,
};
use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::{ExpenditureType, RideId, RideLifecycleFlags};
use crate::stream::DataSerialiser;
use crate::ui::WindowClass;

/// Removes a ride from the ride table.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RideDemolishAction {
    ride: RideId,
}

impl RideDemolishAction {
    pub fn new(ride: RideId) -> Self {
        Self { ride }
    }

    pub fn ride(&self) -> RideId {
        self.ride
    }
}

impl GameAction for RideDemolishAction {
    fn action_type(&self) -> ActionType {
        ActionType::RIDE_DEMOLISH
    }

    fn required_permission(&self) -> Permissions {
        Permissions::RIDE_CONSTRUCTION
    }

    fn error_title(&self) -> StringId {
        StringId::CANT_DEMOLISH_RIDE
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream.field(&mut self.ride)?;
        Ok(())
    }

    fn query(&self, ctx: &QueryContext<'_>) -> ActionResult {
        let Some(ride) = ctx.world.rides.get(self.ride) else {
            return ActionResult::error(ErrorKind::InvalidParameters, StringId::RIDE_NOT_FOUND);
        };
        if ride.lifecycle_flags.contains(RideLifecycleFlags::INDESTRUCTIBLE) {
            return ActionResult::error(ErrorKind::Disallowed, StringId::RIDE_IS_INDESTRUCTIBLE);
        }
        ActionResult::ok().with_expenditure(ExpenditureType::RideConstruction)
    }

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
        if ctx.world.rides.remove(self.ride).is_none() {
            warn!(ride = %self.ride, "ride vanished before demolition");
            return ActionResult::error(ErrorKind::Unknown, StringId::RIDE_NOT_FOUND);
        }
        ctx.invalidate(WindowClass::RideList);
        ActionResult::ok().with_expenditure(ExpenditureType::RideConstruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionHeader;
    use crate::config::GameConfig;
    use crate::env::GameEnv;
    use crate::testing;

    #[test]
    fn demolish_checks_existence_and_protection() {
        let mut world = testing::world_with_coaster();
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::RIDE_DEMOLISH);
        let env = GameEnv::new(&data, &config);

        let missing = RideDemolishAction::new(RideId(42));
        assert_eq!(
            missing.query(&QueryContext::new(&world, env, &header)).error_kind(),
            ErrorKind::InvalidParameters
        );

        let action = RideDemolishAction::new(RideId(0));
        world.rides.get_mut(RideId(0)).unwrap().lifecycle_flags |=
            RideLifecycleFlags::INDESTRUCTIBLE;
        assert_eq!(
            action.query(&QueryContext::new(&world, env, &header)).error_kind(),
            ErrorKind::Disallowed
        );

        world.rides.get_mut(RideId(0)).unwrap().lifecycle_flags = RideLifecycleFlags::empty();
        assert!(action.query(&QueryContext::new(&world, env, &header)).is_ok());

        let mut ctx = ExecuteContext::new(&mut world, env, &header);
        assert!(action.execute(&mut ctx).is_ok());
        assert_eq!(ctx.into_invalidations(), vec![WindowClass::RideList]);
        assert!(world.rides.is_empty());
    }
}
