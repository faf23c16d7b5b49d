use crate::alert::VisibilityRule;
use crate::shared::entity::ID;
use crate::user::User;
use std::collections::HashSet;

/// Resolves the audience of an alert against a membership snapshot.
///
/// Pure and deterministic: the same rule and snapshot always produce the
/// same audience, in snapshot order. Users referenced by a `Users` rule
/// that are no longer in the snapshot are dropped silently, since
/// membership may have changed after the alert was created.
pub fn resolve_audience(rule: &VisibilityRule, users: &[User]) -> Vec<ID> {
    match rule {
        VisibilityRule::Organization => users.iter().map(|u| u.id.clone()).collect(),
        VisibilityRule::Team(team_id) => users
            .iter()
            .filter(|u| u.team_id.as_ref() == Some(team_id))
            .map(|u| u.id.clone())
            .collect(),
        VisibilityRule::Users(ids) => {
            let wanted = ids.iter().collect::<HashSet<_>>();
            users
                .iter()
                .filter(|u| wanted.contains(&u.id))
                .map(|u| u.id.clone())
                .collect()
        }
    }
}

/// Single-user form of `resolve_audience`, used to validate user actions
pub fn user_can_see(rule: &VisibilityRule, user: &User) -> bool {
    match rule {
        VisibilityRule::Organization => true,
        VisibilityRule::Team(team_id) => user.team_id.as_ref() == Some(team_id),
        VisibilityRule::Users(ids) => ids.contains(&user.id),
    }
}
