use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::ServiceError;
use models::todo::{self, Entity as TodoEntity};

const SECONDS_PER_DAY: i64 = 86_400;

/// Parsed list filters. `window` is a day count and may be negative
/// (overdue-only queries).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub window: Option<i64>,
}

impl TodoFilter {
    /// Parse raw query values. `completed` accepts `true`/`false` in any
    /// case; `window` must be an integer.
    pub fn parse(completed: Option<&str>, window: Option<&str>) -> Result<Self, ServiceError> {
        let completed = match completed {
            None => None,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => {
                    return Err(ServiceError::InvalidFilter(
                        "completed must be a boolean".to_string(),
                    ))
                }
            },
        };
        let window = match window {
            None => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                ServiceError::InvalidFilter("window must be an integer".to_string())
            })?),
        };
        Ok(Self { completed, window })
    }

    /// A todo without a deadline never matches an active window filter.
    fn matches(&self, todo: &todo::Model, now: NaiveDateTime) -> bool {
        if let Some(completed) = self.completed {
            if todo.completed != completed {
                return false;
            }
        }
        if let Some(window) = self.window {
            let Some(deadline) = todo.deadline_at else { return false };
            if days_until(now, deadline) > window {
                return false;
            }
        }
        true
    }
}

/// Whole days from `now` until `deadline`, floored. Negative once the
/// deadline is more than a day in the past.
fn days_until(now: NaiveDateTime, deadline: NaiveDateTime) -> i64 {
    (deadline - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// List todos matching the filter, ordered by id.
pub async fn list_todos(
    db: &DatabaseConnection,
    filter: &TodoFilter,
) -> Result<Vec<todo::Model>, ServiceError> {
    let rows = TodoEntity::find()
        .order_by_asc(todo::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let now = Utc::now().naive_utc();
    let matched: Vec<todo::Model> =
        rows.into_iter().filter(|t| filter.matches(t, now)).collect();
    tracing::debug!(count = matched.len(), ?filter, "filtered todos");
    Ok(matched)
}

/// Get a todo by id.
pub async fn get_todo(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<todo::Model>, ServiceError> {
    let found = TodoEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Create a todo with server-assigned id and timestamps.
pub async fn create_todo(
    db: &DatabaseConnection,
    title: &str,
    description: Option<String>,
    completed: bool,
    deadline_at: Option<NaiveDateTime>,
) -> Result<todo::Model, ServiceError> {
    let created = todo::create(db, title, description, completed, deadline_at).await?;
    Ok(created)
}

/// Merge the given fields into an existing todo. Outer `None` leaves a field
/// unchanged; the inner option on `description`/`deadline_at` clears it.
/// `updated_at` is refreshed on every successful update.
pub async fn update_todo(
    db: &DatabaseConnection,
    id: i32,
    title: Option<&str>,
    description: Option<Option<String>>,
    completed: Option<bool>,
    deadline_at: Option<Option<NaiveDateTime>>,
) -> Result<todo::Model, ServiceError> {
    let current = TodoEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("Todo")) };

    let mut am: todo::ActiveModel = existing.into();
    if let Some(t) = title {
        am.title = Set(t.to_string());
    }
    if let Some(d) = description {
        am.description = Set(d);
    }
    if let Some(c) = completed {
        am.completed = Set(c);
    }
    if let Some(d) = deadline_at {
        am.deadline_at = Set(d);
    }
    am.updated_at = Set(Utc::now().naive_utc());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a todo; returns the record as it existed, or `None` when the id
/// was absent (callers treat that as a no-op success).
pub async fn delete_todo(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<todo::Model>, ServiceError> {
    let existing = TodoEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(found) = existing else { return Ok(None) };
    TodoEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(Some(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn filter_parse_accepts_case_insensitive_booleans() {
        let f = TodoFilter::parse(Some("TRUE"), None).unwrap();
        assert_eq!(f.completed, Some(true));
        let f = TodoFilter::parse(Some("False"), None).unwrap();
        assert_eq!(f.completed, Some(false));
        let f = TodoFilter::parse(None, None).unwrap();
        assert_eq!(f, TodoFilter::default());
    }

    #[test]
    fn filter_parse_rejects_bad_values() {
        let err = TodoFilter::parse(Some("maybe"), None).unwrap_err();
        assert_eq!(err.to_string(), "completed must be a boolean");
        let err = TodoFilter::parse(None, Some("soon")).unwrap_err();
        assert_eq!(err.to_string(), "window must be an integer");
    }

    #[test]
    fn filter_parse_allows_negative_window() {
        let f = TodoFilter::parse(None, Some("-3")).unwrap();
        assert_eq!(f.window, Some(-3));
    }

    #[test]
    fn days_until_floors_toward_negative_infinity() {
        let now = at(2023, 2, 20, 12);
        // 36h ahead is one whole day
        assert_eq!(days_until(now, now + Duration::hours(36)), 1);
        // 12h ahead is zero whole days
        assert_eq!(days_until(now, now + Duration::hours(12)), 0);
        // 1h in the past already counts as -1
        assert_eq!(days_until(now, now - Duration::hours(1)), -1);
        assert_eq!(days_until(now, now - Duration::hours(25)), -2);
    }

    #[test]
    fn window_filter_excludes_null_deadlines() {
        let now = at(2023, 2, 20, 0);
        let todo = todo::Model {
            id: 1,
            title: "no deadline".into(),
            description: None,
            completed: false,
            deadline_at: None,
            created_at: now,
            updated_at: now,
        };
        let f = TodoFilter { completed: None, window: Some(1000) };
        assert!(!f.matches(&todo, now));
        let f = TodoFilter { completed: None, window: Some(-1000) };
        assert!(!f.matches(&todo, now));
        // Without a window the same todo matches
        assert!(TodoFilter::default().matches(&todo, now));
    }

    #[test]
    fn window_filter_bounds_are_inclusive() {
        let now = at(2023, 2, 20, 0);
        let mut todo = todo::Model {
            id: 1,
            title: "due".into(),
            description: None,
            completed: false,
            deadline_at: Some(now + Duration::days(7)),
            created_at: now,
            updated_at: now,
        };
        let week = TodoFilter { completed: None, window: Some(7) };
        assert!(week.matches(&todo, now));
        todo.deadline_at = Some(now + Duration::days(8));
        assert!(!week.matches(&todo, now));
        // Overdue todos fall inside any non-negative window
        todo.deadline_at = Some(now - Duration::days(3));
        assert!(week.matches(&todo, now));
    }

    #[test]
    fn completed_filter_matches_flag() {
        let now = at(2023, 2, 20, 0);
        let todo = todo::Model {
            id: 1,
            title: "done".into(),
            description: None,
            completed: true,
            deadline_at: None,
            created_at: now,
            updated_at: now,
        };
        assert!(TodoFilter { completed: Some(true), window: None }.matches(&todo, now));
        assert!(!TodoFilter { completed: Some(false), window: None }.matches(&todo, now));
    }

    #[tokio::test]
    async fn todo_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let deadline = at(2023, 2, 27, 0);
        let a = create_todo(&db, "svc todo", None, false, Some(deadline)).await?;
        let found = get_todo(&db, a.id).await?.unwrap();
        assert_eq!(found.title, "svc todo");
        assert_eq!(found.deadline_at, Some(deadline));

        // Partial update: only completed changes, updated_at refreshes
        let updated = update_todo(&db, a.id, None, None, Some(true), None).await?;
        assert!(updated.completed);
        assert_eq!(updated.title, "svc todo");
        assert_eq!(updated.deadline_at, Some(deadline));
        assert!(updated.updated_at >= a.updated_at);

        // Clearing a nullable field via the inner option
        let cleared = update_todo(&db, a.id, None, None, None, Some(None)).await?;
        assert!(cleared.deadline_at.is_none());

        let all = list_todos(&db, &TodoFilter::default()).await?;
        assert!(all.iter().any(|t| t.id == a.id));

        let deleted = delete_todo(&db, a.id).await?;
        assert_eq!(deleted.map(|t| t.id), Some(a.id));
        assert!(get_todo(&db, a.id).await?.is_none());

        // Deleting again is a no-op
        assert!(delete_todo(&db, a.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_todo_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let err = update_todo(&db, i32::MAX, Some("x"), None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Todo not found");
        Ok(())
    }
}
