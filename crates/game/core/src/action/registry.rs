//! Type tag to factory table.

use std::collections::BTreeMap;

use super::kinds::{
    RideCreateAction, RideDemolishAction, SetCurrentLoanAction, SetParkEntranceFeeAction,
    SetParkNameAction, SetRidePriceAction, StartMarketingCampaignAction,
};
use super::{Action, ActionPacket, ActionType, GameAction};
use crate::error::ProtocolError;
use crate::stream::DataSerialiser;

/// Builds a blank instance of one concrete action type.
pub type ActionFactory = fn() -> Box<dyn GameAction>;

/// Maps each [`ActionType`] to the factory that materialises it.
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    factories: BTreeMap<ActionType, ActionFactory>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every action this crate defines.
    pub fn with_builtin_actions() -> Self {
        let mut registry = Self::new();
        registry.register_action::<RideCreateAction>();
        registry.register_action::<RideDemolishAction>();
        registry.register_action::<SetRidePriceAction>();
        registry.register_action::<SetParkNameAction>();
        registry.register_action::<SetParkEntranceFeeAction>();
        registry.register_action::<SetCurrentLoanAction>();
        registry.register_action::<StartMarketingCampaignAction>();
        registry
    }

    /// Installs `factory` for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` already has a factory, if `id` is the reserved
    /// [`ActionType::REJECTION`] tag, or if the factory builds an action
    /// reporting a different type. All are programming errors.
    pub fn register(&mut self, id: ActionType, factory: ActionFactory) -> ActionFactory {
        assert_ne!(id, ActionType::REJECTION, "the rejection tag is reserved");
        let built = factory().action_type();
        assert_eq!(
            built, id,
            "factory registered for {id} builds actions of type {built}"
        );
        if self.factories.insert(id, factory).is_some() {
            panic!("action type {id} registered twice");
        }
        factory
    }

    /// Registers `T` under the type its default instance reports.
    pub fn register_action<T>(&mut self) -> ActionFactory
    where
        T: GameAction + Default + 'static,
    {
        fn build<T: GameAction + Default + 'static>() -> Box<dyn GameAction> {
            Box::new(T::default())
        }
        let id = T::default().action_type();
        self.register(id, build::<T>)
    }

    pub fn is_registered(&self, id: ActionType) -> bool {
        self.factories.contains_key(&id)
    }

    pub fn registered_types(&self) -> impl Iterator<Item = ActionType> + '_ {
        self.factories.keys().copied()
    }

    /// Blank action of type `id`, or `None` when `id` was never registered.
    pub fn create(&self, id: ActionType) -> Option<Action> {
        self.factories
            .get(&id)
            .map(|factory| Action::from_boxed(factory()))
    }

    /// Rebuilds an action from a packet received over the wire or read from a journal.
    pub fn decode(&self, packet: &ActionPacket) -> Result<Action, ProtocolError> {
        let action_type = packet.action_type;
        let mut action = self
            .create(action_type)
            .ok_or(ProtocolError::UnknownActionType(action_type))?;

        let mut stream = DataSerialiser::for_reading(packet.body.as_slice());
        action
            .serialise(&mut stream)
            .and_then(|()| stream.finish())
            .map_err(|source| ProtocolError::Malformed {
                action_type,
                source,
            })?;
        Ok(action)
    }
}
