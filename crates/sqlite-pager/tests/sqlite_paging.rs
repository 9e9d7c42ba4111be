use pretty_assertions::assert_eq;
use rusqlite::Connection;
use serde_json::json;
use sqlite_pager::{AppError, DbRow, FetchMode, Pager, RowSource, SqliteRows};

fn people(n: i64) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL);")
        .unwrap();
    let mut stmt = conn
        .prepare("INSERT INTO people (id, name) VALUES (?1, ?2)")
        .unwrap();
    for i in 1..=n {
        stmt.execute((i, format!("person {i}"))).unwrap();
    }
    drop(stmt);
    conn
}

#[test]
fn walks_every_page_of_a_query() {
    let conn = people(95);
    let mut source = SqliteRows::new(&conn, "SELECT id FROM people ORDER BY id").unwrap();

    let mut seen = Vec::new();
    let mut from = Some(0);
    while let Some(offset) = from {
        let mut pager = Pager::new(&mut source, Some(offset), 20, None).unwrap();
        while let Some(row) = pager.next_row(FetchMode::Ordered).unwrap() {
            let DbRow::Ordered(values) = row else {
                panic!("expected positional row");
            };
            seen.push(values[0].as_i64().unwrap());
        }
        from = pager.page_info().next();
    }
    assert_eq!(seen, (1..=95).collect::<Vec<_>>());
}

#[test]
fn known_row_count_skips_the_count_query() {
    let conn = people(30);
    let mut source = SqliteRows::new(&conn, "SELECT id, name FROM people ORDER BY id").unwrap();
    let mut pager = Pager::new(&mut source, Some(10), 10, Some(30)).unwrap();
    let info = pager.page_info().clone();
    assert_eq!(info.current(), 2);
    assert_eq!(info.remain(), 10);

    let mut buf = DbRow::default();
    assert!(pager.next_row_into(&mut buf, FetchMode::Assoc).unwrap());
    assert_eq!(
        serde_json::to_value(&buf).unwrap(),
        json!({"id": 11, "name": "person 11"})
    );
    assert_eq!(pager.rows(FetchMode::Assoc).count(), 9);
    assert!(!pager.next_row_into(&mut buf, FetchMode::Assoc).unwrap());
}

#[test]
fn empty_query_has_nothing_to_paginate() {
    let conn = people(0);
    let mut source = SqliteRows::new(&conn, "SELECT * FROM people").unwrap();
    assert_eq!(source.row_count().unwrap(), 0);
    let err = Pager::new(&mut source, None, 10, None).unwrap_err();
    assert!(matches!(err, AppError::NoData));
}

#[test]
fn sql_errors_surface_from_the_source() {
    let conn = people(3);
    let err = SqliteRows::new(&conn, "SELECT nope FROM people").err().unwrap();
    assert!(matches!(err, AppError::Sql(_)));
}
