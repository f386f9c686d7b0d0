//! Database entities.

#![allow(missing_docs)]

pub mod block_rec;
pub mod category;
pub mod check_in;
pub mod content_report;
pub mod favorite;
pub mod friend_group;
pub mod friend_group_member;
pub mod friend_request;
pub mod friendship;
pub mod hidden;
pub mod moment;
pub mod note;
pub mod notification;
pub mod ping;
pub mod ping_room;
pub mod question;
pub mod response;
pub mod response_request;
pub mod user;
pub mod user_report;

pub use block_rec::Entity as BlockRec;
pub use category::Entity as Category;
pub use check_in::Entity as CheckIn;
pub use content_report::Entity as ContentReport;
pub use favorite::Entity as Favorite;
pub use friend_group::Entity as FriendGroup;
pub use friend_group_member::Entity as FriendGroupMember;
pub use friend_request::Entity as FriendRequest;
pub use friendship::Entity as Friendship;
pub use hidden::Entity as Hidden;
pub use moment::Entity as Moment;
pub use note::Entity as Note;
pub use notification::Entity as Notification;
pub use ping::Entity as Ping;
pub use ping_room::Entity as PingRoom;
pub use question::Entity as Question;
pub use response::Entity as Response;
pub use response_request::Entity as ResponseRequest;
pub use user::Entity as User;
pub use user_report::Entity as UserReport;
