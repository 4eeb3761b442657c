use strum::{EnumCount, EnumIter, IntoStaticStr};

use super::Money;

/// Ledger category a cost is booked against.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ExpenditureType {
    RideConstruction,
    RideRunningCosts,
    LandPurchase,
    Landscaping,
    ParkEntranceTickets,
    ParkRideTickets,
    ShopSales,
    ShopStock,
    FoodDrinkSales,
    FoodDrinkStock,
    Wages,
    Marketing,
    Research,
    Interest,
}

/// Running totals for the current month, one slot per [`ExpenditureType`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpenditureTable([Money; ExpenditureType::COUNT]);

impl ExpenditureTable {
    pub fn get(&self, kind: ExpenditureType) -> Money {
        self.0[kind as usize]
    }

    pub fn record(&mut self, kind: ExpenditureType, amount: Money) {
        self.0[kind as usize] += amount;
    }
}

/// Park bank balance and loan.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinanceState {
    pub cash: Money,
    pub loan: Money,
    pub max_loan: Money,
    pub expenditure: ExpenditureTable,
}

impl FinanceState {
    pub fn new(cash: Money, loan: Money, max_loan: Money) -> Self {
        Self {
            cash,
            loan,
            max_loan,
            expenditure: ExpenditureTable::default(),
        }
    }

    /// Deducts `cost` from the bank balance and books it as spending.
    ///
    /// Negative costs are refunds.
    pub fn payment(&mut self, cost: Money, kind: ExpenditureType) {
        self.cash -= cost;
        self.expenditure.record(kind, -cost);
    }

    /// Returns true if the park can pay `cost` right now.
    pub fn can_afford(&self, cost: Money) -> bool {
        cost <= Money::ZERO || cost <= self.cash
    }
}
