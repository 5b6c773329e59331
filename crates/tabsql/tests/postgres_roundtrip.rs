//! Import rows into Postgres and export them back. Skipped without DATABASE_URL.

use chrono::NaiveDate;
use tabsql::{
    Column, ColumnType, Composer, Dialect, Executor, ImportConfig, Importer, MemorySink,
    MemorySource, TabResult, Value, export, row,
};
use tokio_postgres::NoTls;

async fn try_connect(test: &str) -> TabResult<Option<tokio_postgres::Client>> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping {test}");
            return Ok(None);
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Ok(Some(client))
}

fn people() -> MemorySource {
    let born = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    MemorySource::new(
        vec![
            Column::new("id", ColumnType::Integer).not_null(),
            Column::new("Full Name", ColumnType::Text),
            Column::new("born", ColumnType::Date),
        ],
        vec![
            row![1, "Ann O'Hara", born(1990, 4, 1)],
            row![2, "Bo", born(1985, 12, 31)],
            row![3, None::<String>, None::<NaiveDate>],
        ],
    )
}

#[tokio::test]
async fn import_then_export_roundtrip() -> TabResult<()> {
    let Some(client) = try_connect("import_then_export_roundtrip").await? else {
        return Ok(());
    };

    Executor::execute(
        &client,
        "CREATE TEMP TABLE tabsql_people (id int4 PRIMARY KEY, full_name text, born date)",
    )
    .await?;

    let config = ImportConfig::new(Dialect::Postgres, "tabsql_people")
        .batch_size(2)
        .map_column("Full Name", "full_name");
    let report = Importer::new(config)?.run(&mut people(), &client).await?;
    assert_eq!(report.rows, 3);
    assert_eq!(report.batches, 2);
    assert_eq!(report.affected, 3);

    let mut query = Composer::new(Dialect::Postgres);
    query
        .select("id, full_name, born")
        .from("tabsql_people")
        .order_by("id");
    query.where_("id < 3").or("full_name IS NULL");

    let mut sink = MemorySink::new();
    let written = export(&client, &query, &mut sink).await?;

    assert_eq!(written, 3);
    assert!(sink.finished);
    let names: Vec<&str> = sink.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["id", "full_name", "born"]);
    assert_eq!(sink.rows[0].get(1), Some(&Value::Text("Ann O'Hara".into())));
    assert_eq!(sink.rows[2].get(0), Some(&Value::Int(3)));
    assert_eq!(sink.rows[2].get(2), Some(&Value::Null));
    Ok(())
}

#[tokio::test]
async fn limited_select_runs_against_postgres() -> TabResult<()> {
    let Some(client) = try_connect("limited_select_runs_against_postgres").await? else {
        return Ok(());
    };

    let mut query = Composer::new(Dialect::Postgres);
    query
        .select("n")
        .from("generate_series(1, 10) AS n")
        .order_by("n DESC")
        .limit(Some(3));

    let rows = client.query_composed(&query).await?;
    let values: Vec<i32> = rows.iter().map(|r| r.get(0)).collect();
    assert_eq!(values, vec![10, 9, 8]);
    Ok(())
}

#[tokio::test]
async fn export_rejects_non_select() -> TabResult<()> {
    let Some(client) = try_connect("export_rejects_non_select").await? else {
        return Ok(());
    };

    let mut query = Composer::new(Dialect::Postgres);
    query.delete("FROM tabsql_nothing");

    let err = export(&client, &query, &mut MemorySink::new())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    Ok(())
}
