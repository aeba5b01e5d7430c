//! Organization service implementations

pub mod department;
pub mod employee;

use powerx_persistence::sea_orm::prelude::Expr;
use powerx_persistence::sea_orm::sea_query::{Asterisk, LikeExpr};
use powerx_persistence::sea_orm::*;

const LIKE_ESCAPE: char = '!';

/// Builds a `LIKE 'prefix%'` expression with the SQL wildcards in `prefix`
/// escaped. `!` is used as escape character because it needs no quoting in
/// any supported backend.
pub(crate) fn prefix_like(prefix: &str) -> LikeExpr {
    let escaped = prefix
        .replace(LIKE_ESCAPE, "!!")
        .replace('%', "!%")
        .replace('_', "!_");
    LikeExpr::new(format!("{}%", escaped)).escape(LIKE_ESCAPE)
}

/// Counts the rows matched by `select`, ignoring any paging on it.
pub(crate) async fn count_rows<E, C>(select: Select<E>, db: &C) -> Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let total = select
        .select_only()
        .column_as(Expr::col(Asterisk).count(), "count")
        .into_tuple::<i64>()
        .one(db)
        .await?
        .unwrap_or_default();

    Ok(total as u64)
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unique_violation() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
        assert!(!is_unique_violation(&DbErr::RecordNotFound(
            "employee".to_string()
        )));
    }
}
