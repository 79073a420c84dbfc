//! Repository functions for the per-owner allow and deny lists.
//!
//! Both lists share a shape: one (subject, owner) row per entry. `ListKind`
//! picks the table; callers toggle entries and fetch whole lists.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::{allow_list, deny_list};
use crate::errors::GroupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Allow,
    Deny,
}

/// Subject ids on one of an owner's lists, in subject-id order.
pub async fn entries<C: ConnectionTrait>(
    conn: &C,
    kind: ListKind,
    owner_id: i64,
) -> Result<Vec<i64>, GroupError> {
    let mut ids = match kind {
        ListKind::Allow => allow_list::Entity::find()
            .filter(allow_list::Column::OwnerId.eq(owner_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|row| row.subject_id)
            .collect::<Vec<_>>(),
        ListKind::Deny => deny_list::Entity::find()
            .filter(deny_list::Column::OwnerId.eq(owner_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|row| row.subject_id)
            .collect::<Vec<_>>(),
    };
    ids.sort_unstable();
    Ok(ids)
}

pub async fn contains<C: ConnectionTrait>(
    conn: &C,
    kind: ListKind,
    owner_id: i64,
    subject_id: i64,
) -> Result<bool, GroupError> {
    let found = match kind {
        ListKind::Allow => allow_list::Entity::find_by_id((subject_id, owner_id))
            .one(conn)
            .await?
            .is_some(),
        ListKind::Deny => deny_list::Entity::find_by_id((subject_id, owner_id))
            .one(conn)
            .await?
            .is_some(),
    };
    Ok(found)
}

/// Add an entry; re-adding an existing subject is a no-op.
pub async fn add<C: ConnectionTrait>(
    conn: &C,
    kind: ListKind,
    owner_id: i64,
    subject_id: i64,
) -> Result<(), GroupError> {
    if contains(conn, kind, owner_id, subject_id).await? {
        return Ok(());
    }
    match kind {
        ListKind::Allow => {
            let row = allow_list::ActiveModel {
                subject_id: Set(subject_id),
                owner_id: Set(owner_id),
            };
            allow_list::Entity::insert(row).exec_without_returning(conn).await?;
        }
        ListKind::Deny => {
            let row = deny_list::ActiveModel {
                subject_id: Set(subject_id),
                owner_id: Set(owner_id),
            };
            deny_list::Entity::insert(row).exec_without_returning(conn).await?;
        }
    }
    Ok(())
}

/// Remove an entry; removing an absent subject is a no-op.
pub async fn remove<C: ConnectionTrait>(
    conn: &C,
    kind: ListKind,
    owner_id: i64,
    subject_id: i64,
) -> Result<(), GroupError> {
    match kind {
        ListKind::Allow => {
            allow_list::Entity::delete_many()
                .filter(allow_list::Column::OwnerId.eq(owner_id))
                .filter(allow_list::Column::SubjectId.eq(subject_id))
                .exec(conn)
                .await?;
        }
        ListKind::Deny => {
            deny_list::Entity::delete_many()
                .filter(deny_list::Column::OwnerId.eq(owner_id))
                .filter(deny_list::Column::SubjectId.eq(subject_id))
                .exec(conn)
                .await?;
        }
    }
    Ok(())
}
