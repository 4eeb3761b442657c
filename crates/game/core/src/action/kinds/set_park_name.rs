use crate::action::{
    ActionFlags, ActionResult, ActionType, ErrorKind, ExecuteContext, GameAction, Permissions,
    QueryContext,
};
use crate::config::GameConfig;
use crate::error::StreamError;
use crate::localisation::StringId;
use crate::stream::DataSerialiser;
use crate::ui::WindowClass;

/// Renames the park.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SetParkNameAction {
    name: String,
}

impl SetParkNameAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl GameAction for SetParkNameAction {
    fn action_type(&self) -> ActionType {
        ActionType::SET_PARK_NAME
    }

    fn action_flags(&self, base: ActionFlags) -> ActionFlags {
        base | ActionFlags::ALLOW_WHILE_PAUSED
    }

    fn required_permission(&self) -> Permissions {
        Permissions::PARK_PROPERTIES
    }

    fn error_title(&self) -> StringId {
        StringId::CANT_RENAME_PARK
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream.field(&mut self.name)?;
        Ok(())
    }

    fn query(&self, _ctx: &QueryContext<'_>) -> ActionResult {
        let length = self.name.chars().count();
        if length == 0 || length > GameConfig::MAX_PARK_NAME_LENGTH {
            return ActionResult::error(
                ErrorKind::InvalidParameters,
                StringId::INVALID_NAME_FOR_PARK,
            );
        }
        ActionResult::ok()
    }

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
        ctx.world.park.name.clone_from(&self.name);
        ctx.invalidate(WindowClass::ParkInformation);
        ActionResult::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionHeader;
    use crate::env::GameEnv;
    use crate::testing;

    #[test]
    fn name_length_is_bounded() {
        let world = testing::world();
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::SET_PARK_NAME);
        let ctx = QueryContext::new(&world, GameEnv::new(&data, &config), &header);

        assert!(!SetParkNameAction::new("").query(&ctx).is_ok());
        assert!(!SetParkNameAction::new("x".repeat(33)).query(&ctx).is_ok());
        assert!(SetParkNameAction::new("x".repeat(32)).query(&ctx).is_ok());
    }

    #[test]
    fn execute_renames_the_park() {
        let mut world = testing::world();
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::SET_PARK_NAME);
        let mut ctx = ExecuteContext::new(&mut world, GameEnv::new(&data, &config), &header);

        assert!(SetParkNameAction::new("Forest Frontiers").execute(&mut ctx).is_ok());
        assert_eq!(ctx.into_invalidations(), vec![WindowClass::ParkInformation]);
        assert_eq!(world.park.name, "Forest Frontiers");
    }
}
