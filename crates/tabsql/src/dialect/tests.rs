use super::*;
use crate::compose::{Filter, Operator};
use crate::error::ComposeError;
use chrono::NaiveDate;
use uuid::Uuid;

#[test]
fn postgres_limit_is_trailing_line() {
    let mut q = Composer::new(Dialect::Postgres);
    q.select("*").from("T").order_by("id").limit(Some(10));
    assert_eq!(q.render().unwrap(), "SELECT *\nFROM T\nORDER BY id\nLIMIT 10");
}

#[test]
fn sqlite_shares_limit_syntax() {
    let mut q = Composer::new(Dialect::Sqlite);
    q.select("*").from("T").limit(Some(1));
    assert_eq!(q.render().unwrap(), "SELECT *\nFROM T\nLIMIT 1");
    assert_eq!(q.renderer().map(|r| r.dialect()), Some(Dialect::Sqlite));
}

#[test]
fn limit_offset_rejects_limited_dml() {
    let mut q = Composer::new(Dialect::Postgres);
    q.delete("FROM T").limit(Some(5));

    let err = q.render().unwrap_err();
    assert_eq!(
        err,
        ComposeError::UnsupportedLimit {
            dialect: Dialect::Postgres,
            kind: StatementKind::Delete,
        }
    );

    q.limit(None);
    assert_eq!(q.render().unwrap(), "DELETE FROM T");
}

#[test]
fn sqlserver_dml_uses_parenthesised_top() {
    let mut q = Composer::new(Dialect::SqlServer);
    q.delete("FROM T").limit(Some(5));
    q.where_("id < 100");
    assert_eq!(q.render().unwrap(), "DELETE TOP (5) FROM T\nWHERE\nid < 100");

    let mut q = Composer::new(Dialect::SqlServer);
    q.update("T").set("flag = 1").limit(Some(2));
    assert_eq!(q.render().unwrap(), "UPDATE TOP (2) T\nSET\nflag = 1");
}

#[test]
fn quote_ident_per_dialect() {
    let ss = SqlServerRenderer;
    assert_eq!(ss.quote_ident("dbo.users"), "[dbo].[users]");
    assert_eq!(ss.quote_ident("we]ird"), "[we]]ird]");

    let pg = LimitOffsetRenderer::new(Dialect::Postgres);
    assert_eq!(pg.quote_ident("public.users"), "\"public\".\"users\"");
    assert_eq!(pg.quote_ident("a\"b"), "\"a\"\"b\"");
}

#[test]
fn quote_part_keeps_dots_in_the_name() {
    let ss = SqlServerRenderer;
    assert_eq!(ss.quote_part("unit.price"), "[unit.price]");

    let pg = LimitOffsetRenderer::new(Dialect::Postgres);
    assert_eq!(pg.quote_part("unit.price"), "\"unit.price\"");
    assert_eq!(pg.quote_ident("unit.price"), "\"unit\".\"price\"");
}

#[test]
fn ansi_literals() {
    let pg = LimitOffsetRenderer::new(Dialect::Postgres);
    assert_eq!(pg.literal(&Value::Null), "NULL");
    assert_eq!(pg.literal(&Value::Bool(true)), "TRUE");
    assert_eq!(pg.literal(&Value::Int(-7)), "-7");
    assert_eq!(pg.literal(&Value::Float(1.5)), "1.5");
    assert_eq!(pg.literal(&Value::Float(f64::NAN)), "'NaN'");
    assert_eq!(pg.literal(&Value::Text("O'Brien".into())), "'O''Brien'");

    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert_eq!(pg.literal(&Value::Date(date)), "'2024-02-29'");
    let ts = date.and_hms_opt(13, 5, 0).unwrap();
    assert_eq!(pg.literal(&Value::Timestamp(ts)), "'2024-02-29 13:05:00'");

    let id = Uuid::nil();
    assert_eq!(
        pg.literal(&Value::Uuid(id)),
        "'00000000-0000-0000-0000-000000000000'"
    );
}

#[test]
fn sqlserver_literals() {
    let ss = SqlServerRenderer;
    assert_eq!(ss.literal(&Value::Bool(false)), "0");
    assert_eq!(ss.literal(&Value::Text("héllo".into())), "N'héllo'");
    assert_eq!(ss.literal(&Value::Int(3)), "3");

    let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let nanos = day.and_hms_nano_opt(3, 4, 5, 123_456_789).unwrap();
    assert_eq!(
        ss.literal(&Value::Timestamp(nanos)),
        "'2024-01-02 03:04:05.1234567'"
    );
    let millis = day.and_hms_milli_opt(3, 4, 5, 250).unwrap();
    assert_eq!(
        ss.literal(&Value::Timestamp(millis)),
        "'2024-01-02 03:04:05.2500000'"
    );
    let whole = day.and_hms_opt(3, 4, 5).unwrap();
    assert_eq!(ss.literal(&Value::Timestamp(whole)), "'2024-01-02 03:04:05'");
}

#[test]
fn parses_dialect_names() {
    assert_eq!("mssql".parse::<Dialect>().unwrap(), Dialect::SqlServer);
    assert_eq!(" PostgreSQL ".parse::<Dialect>().unwrap(), Dialect::Postgres);
    assert_eq!("sqlite3".parse::<Dialect>().unwrap(), Dialect::Sqlite);
    assert_eq!("oracle".parse::<Dialect>().unwrap(), Dialect::Oracle);
    assert!("db2".parse::<Dialect>().is_err());
}

#[test]
fn only_oracle_lacks_a_renderer() {
    let unsupported: Vec<_> = Dialect::ALL
        .into_iter()
        .filter(|d| !d.is_supported())
        .collect();
    assert_eq!(unsupported, vec![Dialect::Oracle]);
}

#[derive(Debug)]
struct OffsetFetch;

impl Renderer for OffsetFetch {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn limit_suffix(&self, kind: StatementKind, rows: u64) -> ComposeResult<Option<String>> {
        Ok((kind == StatementKind::Select).then(|| format!("FETCH FIRST {rows} ROWS ONLY")))
    }
}

#[test]
fn custom_renderer_plugs_into_composer() {
    let mut q = Composer::with_renderer(Arc::new(OffsetFetch));
    q.select("*").from("T").limit(Some(3));

    assert_eq!(q.dialect(), Dialect::Oracle);
    assert_eq!(q.render().unwrap(), "SELECT *\nFROM T\nFETCH FIRST 3 ROWS ONLY");
}

#[test]
fn render_chain_skips_first_operator() {
    let filters = [
        Filter::new(Operator::Or, "a", Clause::Where),
        Filter::new(Operator::And, "b", Clause::Where),
    ];
    assert_eq!(render_chain(&filters).as_deref(), Some("a\nAND b"));
    assert_eq!(render_chain(std::iter::empty()), None);
}

#[test]
fn empty_filter_text_still_opens_the_clause() {
    let only = [Filter::new(Operator::And, "", Clause::Where)];
    assert_eq!(render_chain(&only).as_deref(), Some(""));

    let mut q = Composer::new(Dialect::Postgres);
    q.select("*").from("T");
    q.where_("");
    assert_eq!(q.render().unwrap(), "SELECT *\nFROM T\nWHERE\n");
}
