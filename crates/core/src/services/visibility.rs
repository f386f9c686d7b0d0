//! Visibility resolver.
//!
//! Decides whether a viewer may see a content item. The decision itself is
//! a pure function over a [`ContentView`] and an [`AudienceCtx`]; the
//! service gathers the context from the social graph and block filter and
//! never writes anything.

use daybook_common::AppResult;
use daybook_db::{
    entities::{check_in, content_report::ContentKind, moment, note, note::Visibility, response},
    repositories::{FriendGroupRepository, FriendshipRepository, ModerationRepository},
};

fn json_ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// The visibility-relevant shape of a content item.
#[derive(Debug, Clone)]
pub struct ContentView {
    /// Author user ID.
    pub author_id: String,
    /// Sharing scope of the item.
    pub visibility: Visibility,
    /// Explicit friend share list (empty = no restriction).
    pub share_friend_ids: Vec<String>,
    /// Explicit friend-group share list (empty = no restriction).
    pub share_group_ids: Vec<String>,
}

impl From<&note::Model> for ContentView {
    fn from(note: &note::Model) -> Self {
        Self {
            author_id: note.author_id.clone(),
            visibility: note.visibility,
            share_friend_ids: json_ids(&note.share_friend_ids),
            share_group_ids: json_ids(&note.share_group_ids),
        }
    }
}

impl From<&response::Model> for ContentView {
    fn from(response: &response::Model) -> Self {
        Self {
            author_id: response.author_id.clone(),
            visibility: response.visibility,
            share_friend_ids: json_ids(&response.share_friend_ids),
            share_group_ids: json_ids(&response.share_group_ids),
        }
    }
}

impl From<&check_in::Model> for ContentView {
    fn from(check_in: &check_in::Model) -> Self {
        Self {
            author_id: check_in.author_id.clone(),
            visibility: check_in.visibility,
            share_friend_ids: json_ids(&check_in.share_friend_ids),
            share_group_ids: json_ids(&check_in.share_group_ids),
        }
    }
}

impl From<&moment::Model> for ContentView {
    fn from(moment: &moment::Model) -> Self {
        // Moments are always friends-scoped with no explicit share lists.
        Self {
            author_id: moment.author_id.clone(),
            visibility: Visibility::Friends,
            share_friend_ids: Vec::new(),
            share_group_ids: Vec::new(),
        }
    }
}

/// Facts about the viewer gathered from the graph and block filter.
#[derive(Debug, Clone, Default)]
pub struct AudienceCtx {
    /// The viewer's user ID.
    pub viewer_id: String,
    /// Is the viewer a friend of the author?
    pub is_friend: bool,
    /// Does a user report exist between viewer and author, either
    /// direction?
    pub blocked: bool,
    /// Has the viewer reported this specific content item?
    pub content_reported: bool,
    /// Is the viewer a member of any group on the item's share list?
    pub in_share_group: bool,
}

/// Decide whether the viewer may see the content item.
///
/// Decision order:
/// 1. The author always sees their own content.
/// 2. Blocking (either direction) and content reports suppress everything
///    else.
/// 3. Anonymous content is visible to anyone not blocked.
/// 4. Friends content requires friendship and, when a share list is set,
///    membership in it.
#[must_use]
pub fn is_audience(content: &ContentView, ctx: &AudienceCtx) -> bool {
    if ctx.viewer_id == content.author_id {
        return true;
    }
    if ctx.blocked || ctx.content_reported {
        return false;
    }
    match content.visibility {
        Visibility::Anonymous => true,
        Visibility::Friends => {
            if !ctx.is_friend {
                return false;
            }
            let unrestricted =
                content.share_friend_ids.is_empty() && content.share_group_ids.is_empty();
            unrestricted
                || content
                    .share_friend_ids
                    .iter()
                    .any(|id| id == &ctx.viewer_id)
                || ctx.in_share_group
        }
    }
}

/// Visibility service: assembles audience contexts from repositories.
#[derive(Clone)]
pub struct VisibilityService {
    friendship_repo: FriendshipRepository,
    moderation_repo: ModerationRepository,
    friend_group_repo: FriendGroupRepository,
}

impl VisibilityService {
    /// Create a new visibility service.
    #[must_use]
    pub const fn new(
        friendship_repo: FriendshipRepository,
        moderation_repo: ModerationRepository,
        friend_group_repo: FriendGroupRepository,
    ) -> Self {
        Self {
            friendship_repo,
            moderation_repo,
            friend_group_repo,
        }
    }

    /// Gather the audience context for a viewer and a content item.
    pub async fn audience_ctx(
        &self,
        viewer_id: &str,
        content: &ContentView,
        content_kind: ContentKind,
        content_id: &str,
    ) -> AppResult<AudienceCtx> {
        // The author path never needs the graph
        if viewer_id == content.author_id {
            return Ok(AudienceCtx {
                viewer_id: viewer_id.to_string(),
                ..AudienceCtx::default()
            });
        }

        let is_friend = self
            .friendship_repo
            .are_friends(viewer_id, &content.author_id)
            .await?;
        let blocked = self
            .moderation_repo
            .is_reported_between(viewer_id, &content.author_id)
            .await?;
        let content_reported = self
            .moderation_repo
            .has_reported_content(viewer_id, content_kind, content_id)
            .await?;
        let in_share_group = if content.share_group_ids.is_empty() {
            false
        } else {
            !self
                .friend_group_repo
                .find_groups_containing(&content.share_group_ids, viewer_id)
                .await?
                .is_empty()
        };

        Ok(AudienceCtx {
            viewer_id: viewer_id.to_string(),
            is_friend,
            blocked,
            content_reported,
            in_share_group,
        })
    }

    /// Check whether the viewer may see a note.
    pub async fn can_view_note(&self, viewer_id: &str, note: &note::Model) -> AppResult<bool> {
        let view = ContentView::from(note);
        let ctx = self
            .audience_ctx(viewer_id, &view, ContentKind::Note, &note.id)
            .await?;
        Ok(is_audience(&view, &ctx))
    }

    /// Check whether the viewer may see a response.
    pub async fn can_view_response(
        &self,
        viewer_id: &str,
        response: &response::Model,
    ) -> AppResult<bool> {
        let view = ContentView::from(response);
        let ctx = self
            .audience_ctx(viewer_id, &view, ContentKind::Response, &response.id)
            .await?;
        Ok(is_audience(&view, &ctx))
    }

    /// Check whether the viewer may see a check-in.
    pub async fn can_view_check_in(
        &self,
        viewer_id: &str,
        check_in: &check_in::Model,
    ) -> AppResult<bool> {
        let view = ContentView::from(check_in);
        let ctx = self
            .audience_ctx(viewer_id, &view, ContentKind::CheckIn, &check_in.id)
            .await?;
        Ok(is_audience(&view, &ctx))
    }

    /// Check whether the viewer may see a moment.
    pub async fn can_view_moment(
        &self,
        viewer_id: &str,
        moment: &moment::Model,
    ) -> AppResult<bool> {
        let view = ContentView::from(moment);
        let ctx = self
            .audience_ctx(viewer_id, &view, ContentKind::Moment, &moment.id)
            .await?;
        Ok(is_audience(&view, &ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(author: &str, visibility: Visibility) -> ContentView {
        ContentView {
            author_id: author.to_string(),
            visibility,
            share_friend_ids: Vec::new(),
            share_group_ids: Vec::new(),
        }
    }

    fn ctx(viewer: &str) -> AudienceCtx {
        AudienceCtx {
            viewer_id: viewer.to_string(),
            ..AudienceCtx::default()
        }
    }

    #[test]
    fn test_author_always_sees_own_content() {
        let c = content("alice", Visibility::Friends);
        let mut a = ctx("alice");
        assert!(is_audience(&c, &a));

        // Even a (nonsensical) blocked flag does not hide it from the author
        a.blocked = true;
        assert!(is_audience(&c, &a));
    }

    #[test]
    fn test_anonymous_visible_to_strangers() {
        let c = content("alice", Visibility::Anonymous);
        let a = ctx("dave");
        assert!(is_audience(&c, &a));
    }

    #[test]
    fn test_anonymous_hidden_when_blocked() {
        let c = content("alice", Visibility::Anonymous);
        let mut a = ctx("dave");
        a.blocked = true;
        assert!(!is_audience(&c, &a));
    }

    #[test]
    fn test_friends_content_requires_friendship() {
        let c = content("alice", Visibility::Friends);

        let mut friend = ctx("carol");
        friend.is_friend = true;
        assert!(is_audience(&c, &friend));

        let stranger = ctx("dave");
        assert!(!is_audience(&c, &stranger));
    }

    #[test]
    fn test_block_overrides_friendship() {
        let c = content("alice", Visibility::Friends);
        let mut a = ctx("erin");
        a.is_friend = true;
        a.blocked = true;
        assert!(!is_audience(&c, &a));
    }

    #[test]
    fn test_content_report_suppresses() {
        let c = content("alice", Visibility::Friends);
        let mut a = ctx("carol");
        a.is_friend = true;
        a.content_reported = true;
        assert!(!is_audience(&c, &a));
    }

    #[test]
    fn test_share_friend_list_narrows_audience() {
        let mut c = content("alice", Visibility::Friends);
        c.share_friend_ids = vec!["carol".to_string()];

        let mut carol = ctx("carol");
        carol.is_friend = true;
        assert!(is_audience(&c, &carol));

        // A friend not on the list is excluded
        let mut erin = ctx("erin");
        erin.is_friend = true;
        assert!(!is_audience(&c, &erin));
    }

    #[test]
    fn test_share_group_membership_grants_access() {
        let mut c = content("alice", Visibility::Friends);
        c.share_group_ids = vec!["g1".to_string()];

        let mut member = ctx("carol");
        member.is_friend = true;
        member.in_share_group = true;
        assert!(is_audience(&c, &member));

        let mut outsider = ctx("erin");
        outsider.is_friend = true;
        assert!(!is_audience(&c, &outsider));
    }

    #[test]
    fn test_share_lists_do_not_bypass_friendship() {
        let mut c = content("alice", Visibility::Friends);
        c.share_friend_ids = vec!["dave".to_string()];

        // On the list but no longer a friend
        let dave = ctx("dave");
        assert!(!is_audience(&c, &dave));
    }

    #[test]
    fn test_empty_share_lists_mean_all_friends() {
        let c = content("alice", Visibility::Friends);
        let mut a = ctx("carol");
        a.is_friend = true;
        assert!(is_audience(&c, &a));
    }
}
