//! Count-then-page query helper
//!
//! A search is a fixed `FROM ... WHERE <live rows>` base plus whatever
//! `AND` conditions a [`SqlFilter`] appends. The same filter is applied to
//! the COUNT query and to the LIMIT/OFFSET query so totals always match
//! the rows being paged.

use shared::pagination::PageRequest;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::repository::RepoResult;

/// Appends ` AND ...` conditions with bound parameters
pub trait SqlFilter {
    fn apply(&self, qb: &mut QueryBuilder<'_, Sqlite>);
}

/// Select clause, base FROM/WHERE and ordering of one searchable table
pub struct PagedQuery<'a> {
    pub select: &'a str,
    pub from: &'a str,
    pub order_by: &'a str,
}

/// Run COUNT and the page query; returns `(rows, total)`.
pub async fn fetch_page<T, F>(
    pool: &SqlitePool,
    query: &PagedQuery<'_>,
    filter: &F,
    page: PageRequest,
) -> RepoResult<(Vec<T>, i64)>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    F: SqlFilter,
{
    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) ");
    count_qb.push(query.from);
    filter.apply(&mut count_qb);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    if total == 0 {
        return Ok((Vec::new(), 0));
    }

    let mut qb = QueryBuilder::<Sqlite>::new(query.select);
    qb.push(" ");
    qb.push(query.from);
    filter.apply(&mut qb);
    qb.push(" ORDER BY ");
    qb.push(query.order_by);
    qb.push(" LIMIT ");
    qb.push_bind(page.limit());
    qb.push(" OFFSET ");
    qb.push_bind(page.offset());

    let rows = qb.build_query_as::<T>().fetch_all(pool).await?;
    Ok((rows, total))
}

/// `%term%` with LIKE wildcards in the term escaped (pair with `ESCAPE '\'`)
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
