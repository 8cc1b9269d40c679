//! Dependency wiring for the in-memory deployment.

use std::sync::Arc;

use kotoba_shared::time::{Clock, SystemClock};

use crate::{
    config::ServerConfig,
    domain::{
        Authenticator, GameNotifier, MessagePusher, ParticipantRepository, RoomRepository,
        RoomSessionStore, TeamRepository, WordProvider,
    },
    infrastructure::{
        auth::BearerTokenAuthenticator,
        message_pusher::WebSocketMessagePusher,
        notifier::PushGameNotifier,
        repository::{
            InMemoryDatabase, InMemoryParticipantRepository, InMemoryRoomRepository,
            InMemoryTeamRepository, ResilientRepository, RetryPolicy,
        },
        session::InMemoryRoomSessionStore,
        word_provider::RandomWordProvider,
    },
    ui::AppState,
    usecase::{
        AdvanceRoundUseCase, ChangeVisibilityUseCase, ConnectParticipantUseCase,
        CreateRoomUseCase, DeleteRoomUseCase, DisconnectParticipantUseCase, GetRoomsUseCase,
        GetWordsUseCase, JoinRoomUseCase, LeaveRoomUseCase, ManageTeamsUseCase, PassAdminUseCase,
        ResetGameUseCase, StartGameUseCase, TeamLocks,
    },
};

/// Build the application state backed by in-memory storage.
///
/// Dependencies are created in order:
/// 1. Repository
/// 2. MessagePusher / RoomSessionStore
/// 3. Notifier, WordProvider, Authenticator
/// 4. UseCases
pub fn build_in_memory_state(config: &ServerConfig) -> Arc<AppState> {
    let settings = config.game_settings();

    // 1. Create Repository (in-memory database with timeout and retry)
    let policy = RetryPolicy::new(config.persistence_timeout);
    let db = Arc::new(InMemoryDatabase::new());
    let rooms: Arc<dyn RoomRepository> = Arc::new(ResilientRepository::new(
        InMemoryRoomRepository::new(db.clone()),
        policy,
    ));
    let teams: Arc<dyn TeamRepository> = Arc::new(ResilientRepository::new(
        InMemoryTeamRepository::new(db.clone()),
        policy,
    ));
    let participants: Arc<dyn ParticipantRepository> = Arc::new(ResilientRepository::new(
        InMemoryParticipantRepository::new(db),
        policy,
    ));

    // 2. Create MessagePusher (Connection Registry) and RoomSessionStore
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
    let sessions: Arc<dyn RoomSessionStore> =
        Arc::new(InMemoryRoomSessionStore::new(message_pusher.clone()));

    // 3. Create Notifier, WordProvider, Authenticator
    let notifier: Arc<dyn GameNotifier> = Arc::new(PushGameNotifier::new(
        message_pusher.clone(),
        sessions.clone(),
    ));
    let word_provider: Arc<dyn WordProvider> = Arc::new(RandomWordProvider::builtin());
    let authenticator: Arc<dyn Authenticator> = Arc::new(BearerTokenAuthenticator::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let team_locks = Arc::new(TeamLocks::new());

    // 4. Create UseCases
    Arc::new(AppState {
        authenticator,
        connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
            rooms.clone(),
            participants.clone(),
            message_pusher.clone(),
            sessions.clone(),
        )),
        disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
            message_pusher,
            sessions.clone(),
        )),
        create_room_usecase: Arc::new(CreateRoomUseCase::new(
            rooms.clone(),
            sessions.clone(),
            clock.clone(),
        )),
        get_rooms_usecase: Arc::new(GetRoomsUseCase::new(
            rooms.clone(),
            teams.clone(),
            participants.clone(),
        )),
        change_visibility_usecase: Arc::new(ChangeVisibilityUseCase::new(rooms.clone())),
        pass_admin_usecase: Arc::new(PassAdminUseCase::new(rooms.clone(), participants.clone())),
        delete_room_usecase: Arc::new(DeleteRoomUseCase::new(
            rooms.clone(),
            teams.clone(),
            sessions.clone(),
            notifier.clone(),
            team_locks.clone(),
        )),
        join_room_usecase: Arc::new(JoinRoomUseCase::new(
            rooms.clone(),
            participants.clone(),
            sessions.clone(),
            clock,
        )),
        leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
            rooms.clone(),
            participants.clone(),
            sessions,
        )),
        manage_teams_usecase: Arc::new(ManageTeamsUseCase::new(
            rooms.clone(),
            teams.clone(),
            participants.clone(),
            team_locks.clone(),
        )),
        start_game_usecase: Arc::new(StartGameUseCase::new(
            rooms.clone(),
            teams.clone(),
            participants.clone(),
            word_provider.clone(),
            notifier.clone(),
            settings,
        )),
        advance_round_usecase: Arc::new(AdvanceRoundUseCase::new(
            rooms.clone(),
            teams.clone(),
            participants,
            word_provider.clone(),
            notifier.clone(),
            team_locks,
            settings,
        )),
        reset_game_usecase: Arc::new(ResetGameUseCase::new(rooms, teams, notifier)),
        get_words_usecase: Arc::new(GetWordsUseCase::new(word_provider)),
    })
}
