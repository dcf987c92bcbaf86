//! UseCase layer: the session lifecycle controller.
//!
//! One use case per lifecycle operation, each orchestrating atomic state
//! transitions (via the repository) and the fan-out those transitions
//! trigger (via the broadcast router).

pub mod disconnect_session;
pub mod join_room;
pub mod list_rooms;
pub mod register_user;
pub mod router;
pub mod send_message;

pub use disconnect_session::DisconnectSessionUseCase;
pub use join_room::JoinRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use register_user::RegisterUserUseCase;
pub use router::BroadcastRouter;
pub use send_message::SendMessageUseCase;
