//! Window collaborator that forwards dispatcher UI requests to the event bus.

use park_core::state::CoordsXYZ;
use park_core::{FormatArg, Money, StringId, WindowClass, WindowManager};

use crate::events::{Event, EventBus, UiEvent};

/// [`WindowManager`] for headless runtimes: every request becomes a
/// [`UiEvent`] on [`crate::Topic::Ui`] for whatever front end subscribes.
#[derive(Clone, Default)]
pub struct EventWindowManager {
    event_bus: EventBus,
}

impl EventWindowManager {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

impl WindowManager for EventWindowManager {
    fn invalidate_by_class(&mut self, class: WindowClass) {
        self.event_bus.publish(Event::Ui(UiEvent::Invalidate(class)));
    }

    fn show_error(&mut self, title: StringId, message: StringId, args: &[FormatArg]) {
        self.event_bus.publish(Event::Ui(UiEvent::Error {
            title,
            message,
            args: args.to_vec(),
        }));
    }

    fn money_effect(&mut self, cost: Money, position: Option<CoordsXYZ>) {
        self.event_bus
            .publish(Event::Ui(UiEvent::MoneyEffect { cost, position }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;

    #[tokio::test]
    async fn requests_become_ui_events() {
        let bus = EventBus::with_capacity(8);
        let mut rx = bus.subscribe(Topic::Ui);
        let mut windows = EventWindowManager::new(bus);

        windows.invalidate_by_class(WindowClass::Finances);
        windows.show_error(
            StringId::CANT_CHANGE_PARK_ENTRANCE_FEE,
            StringId::PARK_ENTRY_ALWAYS_FREE,
            &[],
        );

        assert_eq!(
            rx.recv().await.unwrap(),
            Event::Ui(UiEvent::Invalidate(WindowClass::Finances))
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            Event::Ui(UiEvent::Error {
                title: StringId::CANT_CHANGE_PARK_ENTRANCE_FEE,
                message: StringId::PARK_ENTRY_ALWAYS_FREE,
                args: Vec::new(),
            })
        );
    }
}
