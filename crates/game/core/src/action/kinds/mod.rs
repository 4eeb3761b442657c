mod pricing;
pub mod ride_create;
pub mod ride_demolish;
pub mod set_current_loan;
pub mod set_park_entrance_fee;
pub mod set_park_name;
pub mod set_ride_price;
pub mod start_marketing_campaign;

pub use ride_create::RideCreateAction;
pub use ride_demolish::RideDemolishAction;
pub use set_current_loan::SetCurrentLoanAction;
pub use set_park_entrance_fee::SetParkEntranceFeeAction;
pub use set_park_name::SetParkNameAction;
pub use set_ride_price::SetRidePriceAction;
pub use start_marketing_campaign::StartMarketingCampaignAction;
