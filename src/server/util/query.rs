use sea_orm::sea_query::{Expr, ExprTrait, Func, IntoColumnRef, LikeExpr, SimpleExpr};

/// `LOWER(column) LIKE '%needle%' ESCAPE '\'` with the needle lower-cased.
///
/// Behaves the same on SQLite and Postgres, unlike a bare `LIKE`. Wildcards in
/// the needle match literally.
pub fn contains_ignore_case<C: IntoColumnRef>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
