use crate::action::{
    ActionFlags, ActionResult, ActionType, ErrorKind, ExecuteContext, FormatArg, GameAction,
    Permissions, QueryContext,
};
use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::Money;
use crate::stream::DataSerialiser;
use crate::ui::WindowClass;

/// Borrows from or repays the bank so the loan equals the requested amount.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SetCurrentLoanAction {
    loan: Money,
}

impl SetCurrentLoanAction {
    pub fn new(loan: Money) -> Self {
        Self { loan }
    }

    pub fn loan(&self) -> Money {
        self.loan
    }
}

impl GameAction for SetCurrentLoanAction {
    fn action_type(&self) -> ActionType {
        ActionType::SET_CURRENT_LOAN
    }

    fn action_flags(&self, base: ActionFlags) -> ActionFlags {
        base | ActionFlags::ALLOW_WHILE_PAUSED
    }

    fn required_permission(&self) -> Permissions {
        Permissions::PARK_FUNDING
    }

    fn error_title(&self) -> StringId {
        if self.loan.raw() > 0 {
            StringId::CANT_BORROW_ANY_MORE_MONEY
        } else {
            StringId::CANT_PAY_BACK_LOAN
        }
    }

    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), StreamError> {
        stream.field(&mut self.loan)?;
        Ok(())
    }

    fn query(&self, ctx: &QueryContext<'_>) -> ActionResult {
        let world = ctx.world;
        if !world.park.money_enabled() {
            return ActionResult::error(ErrorKind::Disallowed, StringId::MONEY_DISABLED);
        }
        if self.loan < Money::ZERO {
            return ActionResult::error(ErrorKind::InvalidParameters, StringId::NONE);
        }

        let finance = &world.finance;
        if self.loan > finance.loan {
            if self.loan > finance.max_loan {
                return ActionResult::error(
                    ErrorKind::Disallowed,
                    StringId::BANK_REFUSES_TO_INCREASE_LOAN,
                )
                .with_title(StringId::CANT_BORROW_ANY_MORE_MONEY);
            }
        } else {
            let repayment = finance.loan - self.loan;
            if repayment > finance.cash {
                return ActionResult::error(
                    ErrorKind::InsufficientFunds,
                    StringId::NOT_ENOUGH_CASH_AVAILABLE,
                )
                .with_title(StringId::CANT_PAY_BACK_LOAN)
                .with_arg(FormatArg::Money(repayment));
            }
        }
        ActionResult::ok()
    }

    fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
        let finance = &mut ctx.world.finance;
        let change = self.loan - finance.loan;
        finance.cash += change;
        finance.loan = self.loan;
        ctx.invalidate(WindowClass::Finances);
        ctx.invalidate(WindowClass::BottomToolbar);
        ActionResult::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionHeader;
    use crate::config::GameConfig;
    use crate::env::GameEnv;
    use crate::state::{FinanceState, WorldState};
    use crate::testing;

    fn run(world: &mut WorldState, loan: Money) -> ActionResult {
        let data = testing::ride_data();
        let config = GameConfig::default();
        let header = ActionHeader::new(ActionType::SET_CURRENT_LOAN);
        let env = GameEnv::new(&data, &config);
        let action = SetCurrentLoanAction::new(loan);
        let query = action.query(&QueryContext::new(world, env, &header));
        if !query.is_ok() {
            return query;
        }
        action.execute(&mut ExecuteContext::new(world, env, &header))
    }

    #[test]
    fn borrowing_moves_money_into_cash() {
        let mut world = testing::world();
        world.finance = FinanceState::new(Money::new(100, 0), Money::new(500, 0), Money::new(2000, 0));

        assert!(run(&mut world, Money::new(1500, 0)).is_ok());
        assert_eq!(world.finance.loan, Money::new(1500, 0));
        assert_eq!(world.finance.cash, Money::new(1100, 0));
    }

    #[test]
    fn bank_refuses_loans_above_the_limit() {
        let mut world = testing::world();
        world.finance = FinanceState::new(Money::ZERO, Money::ZERO, Money::new(1000, 0));

        let result = run(&mut world, Money::new(1000, 10));
        assert_eq!(result.error_kind(), ErrorKind::Disallowed);
        assert_eq!(
            result.error_message(),
            Some(StringId::BANK_REFUSES_TO_INCREASE_LOAN)
        );
        assert!(!run(&mut world, Money(-10)).is_ok());
    }

    #[test]
    fn repayment_needs_cash() {
        let mut world = testing::world();
        world.finance = FinanceState::new(Money::new(100, 0), Money::new(500, 0), Money::new(2000, 0));

        let result = run(&mut world, Money::new(300, 0));
        assert_eq!(result.error_kind(), ErrorKind::InsufficientFunds);
        assert_eq!(result.args(), &[FormatArg::Money(Money::new(200, 0))]);

        assert!(run(&mut world, Money::new(400, 0)).is_ok());
        assert_eq!(world.finance.cash, Money::ZERO);
        assert_eq!(world.finance.loan, Money::new(400, 0));
    }
}
