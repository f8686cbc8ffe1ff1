//! Read-only aggregation over the user store for the admin view.

use chrono::{DateTime, Duration, Utc};

use crate::storage::UserRecord;

/// Counters over a trailing 24-hour window ending at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_users: usize,
    pub recent_logins: usize,
    pub new_users: usize,
}

/// Aggregate the user list. Pure: no store access, no mutation.
#[must_use]
pub fn summarize(users: &[UserRecord], now: DateTime<Utc>) -> StatsSummary {
    let window_start = now - Duration::hours(24);

    let recent_logins = users
        .iter()
        .filter(|user| user.last_login.is_some_and(|at| at > window_start))
        .count();
    let new_users = users
        .iter()
        .filter(|user| user.created_at > window_start)
        .count();

    StatsSummary {
        total_users: users.len(),
        recent_logins,
        new_users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(created_at: DateTime<Utc>, last_login: Option<DateTime<Utc>>) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            name: format!("user-{}", Uuid::new_v4()),
            password_hash: "hash".to_string(),
            created_at,
            last_login,
        }
    }

    #[test]
    fn empty_store_is_all_zero() {
        let summary = summarize(&[], Utc::now());
        assert_eq!(
            summary,
            StatsSummary {
                total_users: 0,
                recent_logins: 0,
                new_users: 0
            }
        );
    }

    #[test]
    fn trailing_window_excludes_old_creations() {
        // Users created at t0 and t0+25h, evaluated at t0+25h+1s: only the
        // second creation falls inside the trailing 24 hours.
        let t0 = Utc::now() - Duration::hours(26);
        let later = t0 + Duration::hours(25);
        let now = later + Duration::seconds(1);

        let users = vec![user(t0, None), user(later, None)];
        let summary = summarize(&users, now);

        assert_eq!(summary.total_users, 2);
        assert_eq!(summary.new_users, 1);
        assert_eq!(summary.recent_logins, 0);
    }

    #[test]
    fn recent_logins_require_a_login_inside_the_window() {
        let now = Utc::now();
        let users = vec![
            user(now - Duration::days(30), Some(now - Duration::hours(1))),
            user(now - Duration::days(30), Some(now - Duration::hours(30))),
            user(now - Duration::days(30), None),
        ];
        let summary = summarize(&users, now);

        assert_eq!(summary.total_users, 3);
        assert_eq!(summary.recent_logins, 1);
        assert_eq!(summary.new_users, 0);
    }
}
