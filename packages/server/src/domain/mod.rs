//! ドメイン層
//!
//! エンティティ・値オブジェクトと、ドメインが外部に要求するインターフェース
//! （Repository、MessagePusher など）を定義します。

pub mod authenticator;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod notification;
pub mod repository;
pub mod rotation;
pub mod session;
pub mod value_object;
pub mod word_provider;

pub use authenticator::Authenticator;
pub use entity::{Participant, Room, RoomStatus, Team, Visibility};
pub use error::{
    MessagePushError, RepositoryError, RoomStatusError, SessionError, ValueObjectError,
};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::{Dispatch, GameEvent, GameNotifier};
pub use repository::{ParticipantRepository, RoomRepository, TeamRepository};
pub use rotation::RotationPolicy;
pub use session::RoomSessionStore;
pub use value_object::{
    InviteCode, NumberOfRounds, ParticipantId, RoomId, RoomName, Score, ScoreDelta, TeamId,
    TeamName, Timestamp, UserId,
};
pub use word_provider::WordProvider;
