//! Business logic services.

#![allow(missing_docs)]

pub mod block;
pub mod content;
pub mod friend_group;
pub mod friendship;
pub mod notification;
pub mod ping;
pub mod question;
pub mod user;
pub mod visibility;

pub use block::BlockService;
pub use content::{ContentService, CreateCheckInInput, CreateResponseInput, Feed};
pub use friend_group::FriendGroupService;
pub use friendship::{FriendListFilter, FriendshipService};
pub use notification::NotificationService;
pub use ping::{PingListing, PingService};
pub use question::QuestionService;
pub use user::{SignupInput, UserService};
pub use visibility::{is_audience, AudienceCtx, ContentView, VisibilityService};
