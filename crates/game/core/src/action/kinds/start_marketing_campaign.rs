use crate::action::{
    ActionResult, ActionType, ErrorKind, ExecuteContext, GameAction, Permissions, QueryContext,
};
use crate::config::GameConfig;
use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::{ExpenditureType, MarketingCampaign, MarketingCampaignKind, Money};
use crate::stream::DataSerialiser;
use crate::ui::WindowClass;

/// Buys a marketing campaign for a number of weeks, paid up front.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StartMarketingCampaignAction {
    /// Wire value of a [`MarketingCampaignKind`]; unknown values fail Query.
    campaign: u8,
    weeks: u8,
}

impl StartMarketingCampaignAction {
    pub fn new(campaign: MarketingCampaignKind, weeks: u8) -> Self {
        Self {
            campaign: campaign as u8,
            weeks,
        }
    }

    pub fn campaign(&self) -> Option<MarketingCampaignKind> {
        MarketingCampaignKind::from_repr(self.campaign)
    }

    fn cost(&self, kind: MarketingCampaignKind) -> Money {
        kind.weekly_cost() * i32::from(self.weeks)
    }
}

impl GameAction for StartMarketingCampaignAction {
    fn action_type(&self) -> ActionType {
        ActionType::START_MARKETING_CAMPAIGN
    }

    fn required_permission(&self) -> Permissions {
        Permissions::PARK_FUNDING
    }

    fn error_title(&self) -> StringId {
        StringId::CANT_START_MARKETING_CAMPAIGN
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream.field(&mut self.campaign)?.field(&mut self.weeks)?;
        Ok(())
    }

    fn query(&self, ctx: &QueryContext<'_>) -> ActionResult {
        let Some(kind) = self.campaign() else {
            return ActionResult::error(ErrorKind::InvalidParameters, StringId::NONE);
        };
        if !(1..=GameConfig::MAX_MARKETING_WEEKS).contains(&self.weeks) {
            return ActionResult::error(
                ErrorKind::InvalidParameters,
                StringId::INVALID_CAMPAIGN_DURATION,
            );
        }

        let park = &ctx.world.park;
        if !park.money_enabled() {
            return ActionResult::error(ErrorKind::Disallowed, StringId::MONEY_DISABLED);
        }
        if park.campaign(kind).is_some() {
            return ActionResult::error(ErrorKind::Disallowed, StringId::CAMPAIGN_ALREADY_RUNNING);
        }

        ActionResult::ok()
            .with_cost(self.cost(kind))
            .with_expenditure(ExpenditureType::Marketing)
    }

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
        let Some(kind) = self.campaign() else {
            return ActionResult::error(ErrorKind::Unknown, StringId::NONE);
        };
        ctx.world.park.campaigns.push(MarketingCampaign {
            kind,
            weeks_left: self.weeks,
        });
        ctx.invalidate(WindowClass::Finances);

        ActionResult::ok()
            .with_cost(self.cost(kind))
            .with_expenditure(ExpenditureType::Marketing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionHeader;
    use crate::env::GameEnv;
    use crate::state::ParkFlags;
    use crate::testing;

    #[test]
    fn campaign_parameters_are_validated() {
        let mut world = testing::world();
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::START_MARKETING_CAMPAIGN);
        let env = GameEnv::new(&data, &config);

        let unknown = StartMarketingCampaignAction {
            campaign: 77,
            weeks: 2,
        };
        let zero_weeks = StartMarketingCampaignAction::new(MarketingCampaignKind::Park, 0);
        let too_long = StartMarketingCampaignAction::new(MarketingCampaignKind::Park, 13);
        for action in [unknown, zero_weeks, too_long] {
            let result = action.query(&QueryContext::new(&world, env, &header));
            assert_eq!(result.error_kind(), ErrorKind::InvalidParameters);
        }

        world.park.flags |= ParkFlags::NO_MONEY;
        let action = StartMarketingCampaignAction::new(MarketingCampaignKind::Park, 2);
        let result = action.query(&QueryContext::new(&world, env, &header));
        assert_eq!(result.error_kind(), ErrorKind::Disallowed);
    }

    #[test]
    fn query_reports_cost_and_execute_records_campaign() {
        let mut world = testing::world();
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::START_MARKETING_CAMPAIGN);
        let env = GameEnv::new(&data, &config);
        let action = StartMarketingCampaignAction::new(MarketingCampaignKind::Ride, 3);

        let query = action.query(&QueryContext::new(&world, env, &header));
        assert_eq!(query.cost(), Some(Money::new(600, 0)));
        assert_eq!(query.expenditure(), Some(ExpenditureType::Marketing));

        let mut ctx = ExecuteContext::new(&mut world, env, &header);
        assert!(action.execute(&mut ctx).is_ok());
        assert_eq!(
            world.park.campaign(MarketingCampaignKind::Ride),
            Some(&MarketingCampaign {
                kind: MarketingCampaignKind::Ride,
                weeks_left: 3
            })
        );

        let again = action.query(&QueryContext::new(&world, env, &header));
        assert_eq!(again.error_kind(), ErrorKind::Disallowed);
    }
}
