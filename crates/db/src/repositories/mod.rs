//! Database repositories.

#![allow(missing_docs)]

mod check_in;
mod favorite;
mod friend_group;
mod friend_request;
mod friendship;
mod hidden;
mod moderation;
mod moment;
mod note;
mod notification;
mod ping;
mod question;
mod response;
mod response_request;
mod user;

pub use check_in::CheckInRepository;
pub use favorite::FavoriteRepository;
pub use friend_group::FriendGroupRepository;
pub use friend_request::FriendRequestRepository;
pub use friendship::{canonical_pair, FriendshipRepository};
pub use hidden::HiddenRepository;
pub use moderation::ModerationRepository;
pub use moment::MomentRepository;
pub use note::NoteRepository;
pub use notification::NotificationRepository;
pub use ping::PingRepository;
pub use question::QuestionRepository;
pub use response::ResponseRepository;
pub use response_request::ResponseRequestRepository;
pub use user::UserRepository;
