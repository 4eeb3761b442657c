//! The action dispatcher.
//!
//! [`GameActions`] is the only sanctioned way to run an action. It borrows
//! the world, the read-only environment, the peer's [`Session`] and the
//! window collaborator for the duration of one call, runs the dispatcher
//! gates and the action's Query, and only then the action's Execute.
//! Bookkeeping that every action shares (payment, window invalidation,
//! journaling, replication, callbacks, the error window) lives here rather
//! than in the actions.
//!
//! A server answers a forwarded request it refuses with an
//! [`ActionRejection`]; the client completes the parked request through
//! [`GameActions::receive_rejection`].

mod session;

pub use session::{ActionSink, NetworkMode, Session};

use tracing::{debug, error, warn};

use crate::action::{
    Action, ActionCallback, ActionFlags, ActionPacket, ActionRejection, ActionResult,
    CommandFlags, ErrorKind, ExecuteContext, FormatArg, QueryContext,
};
use crate::env::GameEnv;
use crate::localisation::StringId;
use crate::state::{Money, WorldState};
use crate::ui::WindowManager;

/// Dispatcher façade bound to one world for the duration of a call.
pub struct GameActions<'a> {
    world: &'a mut WorldState,
    env: GameEnv<'a>,
    session: &'a mut Session,
    windows: &'a mut dyn WindowManager,
}

impl<'a> GameActions<'a> {
    pub fn new(
        world: &'a mut WorldState,
        env: GameEnv<'a>,
        session: &'a mut Session,
        windows: &'a mut dyn WindowManager,
    ) -> Self {
        Self {
            world,
            env,
            session,
            windows,
        }
    }

    pub fn world(&self) -> &WorldState {
        &*self.world
    }

    pub fn session(&self) -> &Session {
        &*self.session
    }

    /// Validates `action` against the current world without changing anything.
    ///
    /// Runs the pause, editor and permission gates, then the action's own
    /// Query, then checks the park can pay the reported cost.
    pub fn query(&self, action: &Action) -> ActionResult {
        let mut result = self.run_query(action);
        if !result.is_ok() {
            result.set_title_if_missing(action.payload().error_title());
            debug!(
                action = %action.action_type(),
                player = %action.player(),
                error = %result.error_kind(),
                "query rejected action"
            );
        }
        result
    }

    fn run_query(&self, action: &Action) -> ActionResult {
        let world = &*self.world;
        let flags = action.action_flags();

        if world.paused
            && !flags.contains(ActionFlags::ALLOW_WHILE_PAUSED)
            && !world.cheats.build_in_pause_mode
        {
            return ActionResult::error(
                ErrorKind::GamePaused,
                StringId::CONSTRUCTION_NOT_POSSIBLE_WHILE_GAME_IS_PAUSED,
            );
        }
        if flags.contains(ActionFlags::EDITOR_ONLY) && !world.in_editor() {
            return ActionResult::error(
                ErrorKind::NotInEditorMode,
                StringId::THIS_CAN_ONLY_BE_USED_IN_THE_EDITOR,
            );
        }
        if !self
            .session
            .has_permission(action.player(), action.required_permission())
        {
            return ActionResult::error(ErrorKind::Disallowed, StringId::INSUFFICIENT_PERMISSIONS);
        }

        let ctx = QueryContext::new(world, self.env, action.header());
        let result = action.payload().query(&ctx);
        if !result.is_ok() {
            return result;
        }

        let cost = result.raw_cost();
        if world.park.money_enabled() && !world.finance.can_afford(cost) {
            return ActionResult::error(
                ErrorKind::InsufficientFunds,
                StringId::NOT_ENOUGH_CASH_REQUIRES,
            )
            .with_arg(FormatArg::Money(cost));
        }
        result
    }

    /// Runs a locally issued action: Query, then Execute only if Query passed.
    ///
    /// On a client, replicated actions are sent to the server instead of
    /// being applied; the callback fires when the server's echo arrives
    /// through [`GameActions::execute_received`].
    pub fn execute(&mut self, mut action: Action) -> ActionResult {
        if action.player().is_none() {
            action.set_player(self.session.local_player());
        }
        let callback = action.take_callback();
        let flags = action.action_flags();

        let result = self.query(&action);
        if !result.is_ok() {
            return self.complete(&action, callback, result);
        }

        if self.session.mode() == NetworkMode::Client && !flags.contains(ActionFlags::CLIENT_ONLY)
        {
            return self.forward_to_server(action, callback, result);
        }

        let result = self.apply(&action, flags, result.raw_cost());
        self.complete(&action, callback, result)
    }

    /// Runs an action that arrived from another peer.
    ///
    /// Received actions are re-validated with the full [`GameActions::query`]
    /// before Execute, on every peer. Ghost and no-spend requests are refused
    /// outright: they are local previews and must never reach another peer's
    /// world. A callback parked for the same network id is re-attached when
    /// the action is the local player's own request.
    ///
    /// On a server, a refused request from a remote client is answered with
    /// an [`ActionRejection`] so the client can complete it.
    pub fn execute_received(&mut self, mut action: Action) -> ActionResult {
        let mut callback = action.take_callback();
        if self.session.is_local(action.player()) && action.network_id() != 0 {
            if let Some(pending) = self.session.take_pending(action.network_id()) {
                callback = pending.callback.or(callback);
            }
        }

        if action
            .flags()
            .intersects(CommandFlags::GHOST | CommandFlags::NO_SPEND)
        {
            warn!(
                action = %action.action_type(),
                player = %action.player(),
                network_id = action.network_id(),
                flags = ?action.flags(),
                "received action carries client-only flags"
            );
            let result = ActionResult::error(ErrorKind::Disallowed, StringId::NONE);
            return self.refuse(&action, callback, result);
        }
        let flags = action.action_flags();

        let result = self.query(&action);
        if !result.is_ok() {
            warn!(
                action = %action.action_type(),
                player = %action.player(),
                network_id = action.network_id(),
                error = %result.error_kind(),
                "received action failed validation"
            );
            return self.refuse(&action, callback, result);
        }

        let result = self.apply(&action, flags, result.raw_cost());
        if !result.is_ok() {
            return self.refuse(&action, callback, result);
        }
        self.complete(&action, callback, result)
    }

    /// Completes a forwarded request the server refused.
    ///
    /// Only clients act on rejections. Returns `None` when the rejection is
    /// addressed to another player or no request with its network id is
    /// waiting; otherwise the parked callback fires with the server's error
    /// and the error window opens.
    pub fn receive_rejection(&mut self, rejection: &ActionRejection) -> Option<ActionResult> {
        if self.session.mode() != NetworkMode::Client || !self.session.is_local(rejection.player) {
            return None;
        }
        let Some(pending) = self.session.take_pending(rejection.network_id) else {
            warn!(
                action = %rejection.action_type,
                network_id = rejection.network_id,
                "rejection for a request that is not pending"
            );
            return None;
        };

        warn!(
            action = %pending.action.action_type(),
            network_id = rejection.network_id,
            error = %rejection.error,
            "server rejected action"
        );
        Some(self.complete(&pending.action, pending.callback, rejection.to_result()))
    }

    /// Completes a received action that was not applied and, on a server,
    /// tells the requesting client.
    fn refuse(
        &mut self,
        action: &Action,
        callback: Option<ActionCallback>,
        result: ActionResult,
    ) -> ActionResult {
        let result = self.complete(action, callback, result);
        if self.session.mode() != NetworkMode::Server
            || action.network_id() == 0
            || self.session.is_local(action.player())
        {
            return result;
        }

        let rejection = ActionRejection::new(action, &result);
        let sent = rejection
            .to_packet()
            .map_err(|err| err.to_string())
            .and_then(|packet| self.session.send(&packet).map_err(|err| err.to_string()));
        match sent {
            Ok(()) => debug!(
                action = %action.action_type(),
                player = %action.player(),
                network_id = action.network_id(),
                "sent rejection"
            ),
            Err(reason) => error!(
                action = %action.action_type(),
                network_id = action.network_id(),
                %reason,
                "failed to send rejection"
            ),
        }
        result
    }

    fn forward_to_server(
        &mut self,
        mut action: Action,
        callback: Option<ActionCallback>,
        query: ActionResult,
    ) -> ActionResult {
        let network_id = self.session.next_network_id();
        action.set_network_id(network_id);
        action.set_flags(action.flags() | CommandFlags::NETWORKED);

        let sent = ActionPacket::from_action(&action)
            .map_err(|err| err.to_string())
            .and_then(|packet| self.session.send(&packet).map_err(|err| err.to_string()));
        match sent {
            Ok(()) => {
                debug!(action = %action.action_type(), network_id, "sent action to server");
                self.session.park_request(network_id, action, callback);
                query
            }
            Err(reason) => {
                error!(action = %action.action_type(), network_id, %reason, "failed to send action");
                let result = ActionResult::error(ErrorKind::Unknown, StringId::NONE);
                self.complete(&action, callback, result)
            }
        }
    }

    /// Executes a validated action and performs the shared post-execute duties.
    ///
    /// `quoted` is the cost Query reported and affordability was checked
    /// against. The park is charged what Execute reports; the two agree for
    /// every built-in action and a mismatch is logged.
    fn apply(&mut self, action: &Action, flags: ActionFlags, quoted: Money) -> ActionResult {
        let mut ctx = ExecuteContext::new(self.world, self.env, action.header());
        let mut result = action.payload().execute(&mut ctx);
        let invalidations = ctx.into_invalidations();

        if !result.is_ok() {
            warn!(
                action = %action.action_type(),
                player = %action.player(),
                error = %result.error_kind(),
                message = ?result.error_message(),
                "execute failed after a passing query"
            );
            result.set_error_kind(ErrorKind::Unknown);
            return result;
        }

        let cost = result.raw_cost();
        if cost != quoted {
            warn!(
                action = %action.action_type(),
                %quoted,
                charged = %cost,
                "execute cost differs from the query quote"
            );
        }
        let spends = !action
            .flags()
            .intersects(CommandFlags::GHOST | CommandFlags::NO_SPEND);
        if self.world.park.money_enabled() && cost != Money::ZERO && spends {
            let finance = &mut self.world.finance;
            match result.expenditure() {
                Some(kind) => finance.payment(cost, kind),
                None => finance.cash -= cost,
            }
            self.windows.money_effect(cost, result.position());
        }

        for class in invalidations {
            self.windows.invalidate_by_class(class);
        }

        if !flags.contains(ActionFlags::CLIENT_ONLY) {
            self.replicate(action);
        }
        result
    }

    /// Journals an applied action and, on a server, broadcasts it.
    fn replicate(&mut self, action: &Action) {
        let packet = match ActionPacket::from_action(action) {
            Ok(packet) => packet,
            Err(err) => {
                error!(action = %action.action_type(), %err, "failed to encode applied action");
                return;
            }
        };
        if let Err(err) = self.session.record(&packet) {
            error!(action = %action.action_type(), %err, "journal rejected action");
        }
        if self.session.mode() == NetworkMode::Server {
            if let Err(err) = self.session.send(&packet) {
                error!(action = %action.action_type(), %err, "broadcast rejected action");
            }
        }
    }

    /// Fires the callback, then opens the error window for failed local actions.
    fn complete(
        &mut self,
        action: &Action,
        callback: Option<ActionCallback>,
        mut result: ActionResult,
    ) -> ActionResult {
        if !result.is_ok() {
            result.set_title_if_missing(action.payload().error_title());
        }
        if let Some(callback) = callback {
            callback(action, &result);
        }
        if !result.is_ok()
            && !action.flags().contains(CommandFlags::GHOST)
            && self.session.is_local(action.player())
        {
            self.windows.show_error(
                result.error_title().unwrap_or_default(),
                result.error_message().unwrap_or_default(),
                result.args(),
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::action::{
        ActionRegistry, ActionType, GameAction, Permissions, SetParkEntranceFeeAction,
        StartMarketingCampaignAction,
    };
    use crate::config::GameConfig;
    use crate::env::StaticRideData;
    use crate::error::StreamError;
    use crate::state::{ExpenditureType, MarketingCampaignKind, PlayerId, ScreenMode};
    use crate::stream::DataSerialiser;
    use crate::testing::{self, PacketLog};
    use crate::ui::{RecordingWindowManager, WindowClass};

    struct Park {
        world: WorldState,
        data: StaticRideData,
        config: GameConfig,
        session: Session,
        windows: RecordingWindowManager,
    }

    impl Park {
        fn new(session: Session) -> Self {
            Self {
                world: testing::world(),
                data: testing::ride_data(),
                config: GameConfig::default(),
                session,
                windows: RecordingWindowManager::default(),
            }
        }

        fn offline() -> Self {
            Self::new(Session::offline())
        }

        fn actions(&mut self) -> GameActions<'_> {
            GameActions::new(
                &mut self.world,
                GameEnv::new(&self.data, &self.config),
                &mut self.session,
                &mut self.windows,
            )
        }
    }

    type Seen = Arc<Mutex<Vec<ErrorKind>>>;

    fn observed(action: Action) -> (Action, Seen) {
        let seen = Seen::default();
        let sink = Arc::clone(&seen);
        let action = action.with_callback(move |_, result| {
            sink.lock().unwrap().push(result.error_kind());
        });
        (action, seen)
    }

    fn fee(amount: Money) -> Action {
        Action::new(SetParkEntranceFeeAction::new(amount))
    }

    fn campaign(weeks: u8) -> Action {
        Action::new(StartMarketingCampaignAction::new(
            MarketingCampaignKind::Park,
            weeks,
        ))
    }

    /// Only usable from the scenario editor.
    #[derive(Clone, Debug, Default)]
    struct EditorTool;

    impl GameAction for EditorTool {
        fn action_type(&self) -> ActionType {
            ActionType(900)
        }

        fn action_flags(&self, base: ActionFlags) -> ActionFlags {
            base | ActionFlags::EDITOR_ONLY
        }

        fn required_permission(&self) -> Permissions {
            Permissions::EDIT_SCENERY
        }

        fn serialise(&mut self, _stream: &mut DataSerialiser) -> Result<(), StreamError> {
            Ok(())
        }

        fn query(&self, _ctx: &QueryContext<'_>) -> ActionResult {
            ActionResult::ok()
        }

        fn execute(&self, _ctx: &mut ExecuteContext<'_>) -> ActionResult {
            ActionResult::ok()
        }
    }

    /// Passes Query, then fails and half-applies in Execute.
    #[derive(Clone, Debug, Default)]
    struct BrokenExecute;

    impl GameAction for BrokenExecute {
        fn action_type(&self) -> ActionType {
            ActionType(901)
        }

        fn required_permission(&self) -> Permissions {
            Permissions::PARK_PROPERTIES
        }

        fn serialise(&mut self, _stream: &mut DataSerialiser) -> Result<(), StreamError> {
            Ok(())
        }

        fn query(&self, _ctx: &QueryContext<'_>) -> ActionResult {
            ActionResult::ok().with_cost(Money::new(10, 0))
        }

        fn execute(&self, ctx: &mut ExecuteContext<'_>) -> ActionResult {
            ctx.invalidate(WindowClass::ParkInformation);
            ActionResult::error(ErrorKind::InvalidParameters, StringId::NONE)
        }
    }

    /// Quotes less in Query than it charges in Execute.
    #[derive(Clone, Debug, Default)]
    struct Overcharge;

    impl GameAction for Overcharge {
        fn action_type(&self) -> ActionType {
            ActionType(902)
        }

        fn required_permission(&self) -> Permissions {
            Permissions::PARK_FUNDING
        }

        fn serialise(&mut self, _stream: &mut DataSerialiser) -> Result<(), StreamError> {
            Ok(())
        }

        fn query(&self, _ctx: &QueryContext<'_>) -> ActionResult {
            ActionResult::ok().with_cost(Money::new(10, 0))
        }

        fn execute(&self, _ctx: &mut ExecuteContext<'_>) -> ActionResult {
            ActionResult::ok().with_cost(Money::new(25, 0))
        }
    }

    #[test]
    fn paused_game_only_runs_pause_safe_actions() {
        let mut park = Park::offline();
        park.world.paused = true;

        let result = park.actions().execute(campaign(2));
        assert_eq!(result.error_kind(), ErrorKind::GamePaused);
        assert!(park.world.park.campaigns.is_empty());

        assert!(park.actions().execute(fee(Money::new(20, 0))).is_ok());
        assert_eq!(park.world.park.entrance_fee, Money::new(20, 0));

        park.world.cheats.build_in_pause_mode = true;
        assert!(park.actions().execute(campaign(2)).is_ok());
    }

    #[test]
    fn editor_only_actions_need_the_editor() {
        let mut park = Park::offline();
        let result = park.actions().query(&Action::new(EditorTool));
        assert_eq!(result.error_kind(), ErrorKind::NotInEditorMode);
        assert_eq!(
            result.error_message(),
            Some(StringId::THIS_CAN_ONLY_BE_USED_IN_THE_EDITOR)
        );

        park.world.screen = ScreenMode::ScenarioEditor;
        assert!(park.actions().query(&Action::new(EditorTool)).is_ok());
    }

    #[test]
    fn remote_players_need_the_permission() {
        let mut session = Session::server(PlayerId(1));
        session.set_permissions(PlayerId(7), Permissions::RIDE_PROPERTIES);
        let mut park = Park::new(session);

        let result = park
            .actions()
            .execute(fee(Money::new(20, 0)).with_player(PlayerId(7)));

        assert_eq!(result.error_kind(), ErrorKind::Disallowed);
        assert_eq!(result.error_message(), Some(StringId::INSUFFICIENT_PERMISSIONS));
        assert_eq!(park.world.park.entrance_fee, Money::new(10, 0));
        // The error window belongs to the remote player's screen.
        assert!(park.windows.errors.is_empty());

        let granted = fee(Money::new(20, 0)).with_player(PlayerId(1));
        assert!(park.actions().execute(granted).is_ok());
    }

    #[test]
    fn unaffordable_cost_reports_the_amount() {
        let mut park = Park::offline();
        park.world.finance.cash = Money::new(100, 0);

        let result = park.actions().execute(campaign(2));

        assert_eq!(result.error_kind(), ErrorKind::InsufficientFunds);
        assert_eq!(result.error_message(), Some(StringId::NOT_ENOUGH_CASH_REQUIRES));
        assert_eq!(result.args(), &[FormatArg::Money(Money::new(700, 0))]);
        assert_eq!(result.error_title(), Some(StringId::CANT_START_MARKETING_CAMPAIGN));
        assert_eq!(park.world.finance.cash, Money::new(100, 0));
    }

    #[test]
    fn callback_fires_once_on_success_and_failure() {
        let mut park = Park::offline();

        let (ok, seen_ok) = observed(fee(Money::new(30, 0)));
        let (bad, seen_bad) = observed(fee(Money(-1)));
        park.actions().execute(ok);
        park.actions().execute(bad);

        assert_eq!(*seen_ok.lock().unwrap(), vec![ErrorKind::Ok]);
        assert_eq!(*seen_bad.lock().unwrap(), vec![ErrorKind::InvalidParameters]);
    }

    #[test]
    fn local_failures_open_the_error_window_except_for_ghosts() {
        let mut park = Park::offline();

        park.actions()
            .execute(fee(Money(-1)).with_flags(CommandFlags::GHOST));
        assert!(park.windows.errors.is_empty());

        park.actions().execute(fee(Money(-1)));
        assert_eq!(
            park.windows.errors,
            vec![(
                StringId::CANT_CHANGE_PARK_ENTRANCE_FEE,
                StringId::NONE,
                Vec::new()
            )]
        );
    }

    #[test]
    fn execute_pays_books_and_invalidates() {
        let journal = PacketLog::default();
        let mut park = Park::new(Session::offline().with_journal(journal.clone()));

        let result = park.actions().execute(campaign(2));

        assert!(result.is_ok());
        assert_eq!(result.cost(), Some(Money::new(700, 0)));
        let finance = &park.world.finance;
        assert_eq!(finance.cash, Money::new(9_300, 0));
        assert_eq!(
            finance.expenditure.get(ExpenditureType::Marketing),
            Money::new(-700, 0)
        );
        assert_eq!(park.windows.money_effects, vec![Money::new(700, 0)]);
        assert_eq!(park.windows.invalidated, vec![WindowClass::Finances]);
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn ghost_and_no_spend_actions_are_free_and_local() {
        for flags in [CommandFlags::GHOST, CommandFlags::NO_SPEND] {
            let journal = PacketLog::default();
            let mut park = Park::new(Session::offline().with_journal(journal.clone()));

            let result = park.actions().execute(campaign(2).with_flags(flags));

            assert!(result.is_ok());
            assert_eq!(park.world.finance.cash, Money::new(10_000, 0));
            assert_eq!(park.world.park.campaigns.len(), 1);
            assert!(park.windows.money_effects.is_empty());
            assert_eq!(journal.len(), 0, "{flags:?}");
        }
    }

    #[test]
    fn failed_execute_is_demoted_and_not_replicated() {
        let journal = PacketLog::default();
        let mut park = Park::new(Session::offline().with_journal(journal.clone()));

        let (action, seen) = observed(Action::new(BrokenExecute));
        let result = park.actions().execute(action);

        assert_eq!(result.error_kind(), ErrorKind::Unknown);
        assert_eq!(*seen.lock().unwrap(), vec![ErrorKind::Unknown]);
        assert_eq!(park.world.finance.cash, Money::new(10_000, 0));
        assert!(park.windows.invalidated.is_empty());
        assert_eq!(journal.len(), 0);
    }

    #[test]
    fn journal_receives_only_applied_actions() {
        let journal = PacketLog::default();
        let mut park = Park::new(Session::offline().with_journal(journal.clone()));

        park.actions().execute(fee(Money::new(25, 0)));
        park.actions().execute(fee(Money(-5)));
        park.actions().execute(fee(Money::new(35, 0)));

        let registry = ActionRegistry::with_builtin_actions();
        let fees: Vec<_> = journal
            .packets()
            .iter()
            .map(|packet| {
                let action = registry.decode(packet).unwrap();
                action.payload_as::<SetParkEntranceFeeAction>().unwrap().fee()
            })
            .collect();
        assert_eq!(fees, [Money::new(25, 0), Money::new(35, 0)]);
    }

    #[test]
    fn client_waits_for_the_server_echo() {
        let outbound = PacketLog::default();
        let mut client = Park::new(Session::client(PlayerId(2)).with_outbound(outbound.clone()));

        let (action, seen) = observed(fee(Money::new(40, 0)));
        let result = client.actions().execute(action);

        assert!(result.is_ok());
        assert_eq!(client.world.park.entrance_fee, Money::new(10, 0));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(client.session.pending_count(), 1);

        let packets = outbound.packets();
        assert_eq!(packets.len(), 1);
        let echoed = ActionRegistry::with_builtin_actions()
            .decode(&packets[0])
            .unwrap();
        assert_eq!(echoed.player(), PlayerId(2));
        assert_eq!(echoed.network_id(), 1);
        assert!(echoed.flags().contains(CommandFlags::NETWORKED));

        let applied = client.actions().execute_received(echoed);

        assert!(applied.is_ok());
        assert_eq!(client.world.park.entrance_fee, Money::new(40, 0));
        assert_eq!(*seen.lock().unwrap(), vec![ErrorKind::Ok]);
        assert_eq!(client.session.pending_count(), 0);
    }

    #[test]
    fn client_without_transport_fails_the_request() {
        let mut client = Park::new(Session::client(PlayerId(2)));

        let (action, seen) = observed(fee(Money::new(40, 0)));
        let result = client.actions().execute(action);

        assert_eq!(result.error_kind(), ErrorKind::Unknown);
        assert_eq!(*seen.lock().unwrap(), vec![ErrorKind::Unknown]);
        assert_eq!(client.session.pending_count(), 0);
    }

    #[test]
    fn client_only_actions_apply_on_the_client() {
        let outbound = PacketLog::default();
        let mut client = Park::new(Session::client(PlayerId(2)).with_outbound(outbound.clone()));

        let ghost = fee(Money::new(40, 0)).with_flags(CommandFlags::GHOST);
        assert!(client.actions().execute(ghost).is_ok());

        assert_eq!(client.world.park.entrance_fee, Money::new(40, 0));
        assert_eq!(outbound.len(), 0);
    }

    #[test]
    fn server_broadcasts_applied_actions() {
        let outbound = PacketLog::default();
        let mut server = Park::new(Session::server(PlayerId(1)).with_outbound(outbound.clone()));
        let mut peer = Park::new(Session::client(PlayerId(2)));

        let remote = fee(Money::new(15, 0)).with_player(PlayerId(2));
        assert!(server.actions().execute(remote).is_ok());
        server.actions().execute(fee(Money(-1)));

        let packets = outbound.packets();
        assert_eq!(packets.len(), 1);

        let received = ActionRegistry::with_builtin_actions()
            .decode(&packets[0])
            .unwrap();
        assert!(peer.actions().execute_received(received).is_ok());
        assert_eq!(peer.world, server.world);
    }

    #[test]
    fn received_client_only_flags_are_refused() {
        for flags in [CommandFlags::GHOST, CommandFlags::NO_SPEND] {
            let outbound = PacketLog::default();
            let journal = PacketLog::default();
            let mut server = Park::new(
                Session::server(PlayerId(1))
                    .with_outbound(outbound.clone())
                    .with_journal(journal.clone()),
            );

            let mut request = campaign(2).with_player(PlayerId(7)).with_flags(flags);
            request.set_network_id(3);
            let packet = ActionPacket::from_action(&request).unwrap();
            let received = ActionRegistry::with_builtin_actions()
                .decode(&packet)
                .unwrap();

            let result = server.actions().execute_received(received);

            assert_eq!(result.error_kind(), ErrorKind::Disallowed, "{flags:?}");
            assert_eq!(server.world.finance.cash, Money::new(10_000, 0));
            assert!(server.world.park.campaigns.is_empty());
            assert_eq!(journal.len(), 0);

            let packets = outbound.packets();
            assert_eq!(packets.len(), 1);
            let rejection = ActionRejection::from_packet(&packets[0]).unwrap();
            assert_eq!(rejection.network_id, 3);
            assert_eq!(rejection.player, PlayerId(7));
            assert_eq!(rejection.error, ErrorKind::Disallowed);
        }
    }

    #[test]
    fn server_rejection_completes_the_parked_request() {
        let to_server = PacketLog::default();
        let mut client = Park::new(Session::client(PlayerId(2)).with_outbound(to_server.clone()));
        let to_clients = PacketLog::default();
        let mut server_session = Session::server(PlayerId(1)).with_outbound(to_clients.clone());
        server_session.set_permissions(PlayerId(2), Permissions::RIDE_PROPERTIES);
        let mut server = Park::new(server_session);

        let (action, seen) = observed(fee(Money::new(40, 0)));
        assert!(client.actions().execute(action).is_ok());
        assert_eq!(client.session.pending_count(), 1);

        let forwarded = ActionRegistry::with_builtin_actions()
            .decode(&to_server.packets()[0])
            .unwrap();
        let refused = server.actions().execute_received(forwarded);
        assert_eq!(refused.error_kind(), ErrorKind::Disallowed);

        let packets = to_clients.packets();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].action_type, ActionType::REJECTION);
        let rejection = ActionRejection::from_packet(&packets[0]).unwrap();

        let elsewhere = ActionRejection {
            player: PlayerId(5),
            ..rejection
        };
        assert_eq!(client.actions().receive_rejection(&elsewhere), None);
        assert_eq!(client.session.pending_count(), 1);

        let result = client.actions().receive_rejection(&rejection).unwrap();

        assert_eq!(result.error_kind(), ErrorKind::Disallowed);
        assert_eq!(*seen.lock().unwrap(), vec![ErrorKind::Disallowed]);
        assert_eq!(client.session.pending_count(), 0);
        assert_eq!(client.world.park.entrance_fee, Money::new(10, 0));
        assert_eq!(
            client.windows.errors,
            vec![(
                StringId::CANT_CHANGE_PARK_ENTRANCE_FEE,
                StringId::INSUFFICIENT_PERMISSIONS,
                Vec::new()
            )]
        );

        assert_eq!(client.actions().receive_rejection(&rejection), None);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn local_failures_are_never_answered_with_rejections() {
        let outbound = PacketLog::default();
        let mut server = Park::new(Session::server(PlayerId(1)).with_outbound(outbound.clone()));

        let mut own = fee(Money(-1)).with_player(PlayerId(1));
        own.set_network_id(4);
        server.actions().execute_received(own);
        server.actions().execute_received(fee(Money(-1)).with_player(PlayerId(6)));

        assert_eq!(outbound.len(), 0);
    }

    #[test]
    fn execute_cost_is_what_the_park_pays() {
        let mut park = Park::offline();

        let result = park.actions().execute(Action::new(Overcharge));

        assert_eq!(result.cost(), Some(Money::new(25, 0)));
        assert_eq!(park.world.finance.cash, Money::new(9_975, 0));
        assert_eq!(park.windows.money_effects, vec![Money::new(25, 0)]);
    }

    #[test]
    fn received_actions_are_revalidated() {
        let mut park = Park::new(Session::client(PlayerId(2)));
        park.world.paused = true;

        let result = park
            .actions()
            .execute_received(campaign(2).with_player(PlayerId(1)));

        assert_eq!(result.error_kind(), ErrorKind::GamePaused);
        assert!(park.world.park.campaigns.is_empty());
        assert!(park.windows.errors.is_empty());
    }

    #[test]
    fn decoded_action_behaves_like_the_original() {
        let registry = ActionRegistry::with_builtin_actions();
        let original = campaign(3).with_player(PlayerId(4));
        let packet = ActionPacket::from_action(&original).unwrap();
        let decoded = registry.decode(&packet).unwrap();

        let mut left = Park::offline();
        let mut right = Park::offline();
        assert_eq!(
            left.actions().query(&original),
            right.actions().query(&decoded)
        );

        assert_eq!(
            left.actions().execute(original),
            right.actions().execute(decoded)
        );
        assert_eq!(left.world, right.world);
    }

    #[test]
    fn query_is_repeatable_and_read_only() {
        let mut park = Park::offline();
        let before = park.world.clone();
        let action = campaign(4);

        let actions = park.actions();
        let first = actions.query(&action);
        let second = actions.query(&action);

        assert_eq!(first, second);
        assert_eq!(first.cost(), Some(Money::new(1_400, 0)));
        assert_eq!(park.world, before);
        assert!(park.windows.invalidated.is_empty());
    }
}
