use std::sync::Arc;

use sql_query_adapter::drivers::{InMemoryConnection, RowsBuilder, SubmitMode};
use sql_query_adapter::prelude::*;
use tokio::runtime::Runtime;

fn users() -> Arc<ModelDefinition> {
    Arc::new(ModelDefinition::new("User").with_auto_increment_primary_key("id"))
}

#[test]
fn test01_insert_and_update_results() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        // insert with an attached instance gets its generated id
        let conn = Arc::new(InMemoryConnection::new("c1").with_ack(WriteAck::new(42, 1)));
        let instance = Instance::new().with("name", "jane");
        let query = Query::new(
            conn.clone(),
            QueryOptions::new(StatementKind::Insert)
                .with_model(users())
                .with_instance(instance),
        );
        let result = query
            .run(
                "INSERT INTO users (name) VALUES (?)",
                Some(&[RowValues::Text("jane".into())]),
            )
            .await?;
        let QueryResult::Write {
            result: WriteResult::Instance(saved),
            affected_rows,
        } = result
        else {
            panic!("expected instance write, got {result:?}");
        };
        assert_eq!(affected_rows, 1);
        assert_eq!(saved.get("id"), Some(&RowValues::Int(42)));

        let submitted = conn.last_submitted().unwrap();
        assert_eq!(submitted.mode, SubmitMode::Execute);
        assert_eq!(submitted.params, vec![RowValues::Text("jane".into())]);

        // bulk insert without instance synthesizes sequential keys
        let conn = Arc::new(InMemoryConnection::new("c1").with_ack(WriteAck::new(10, 3)));
        let query = Query::new(conn, QueryOptions::new(StatementKind::Insert).with_model(users()));
        let result = query
            .run("INSERT INTO users (name) VALUES ('a'), ('b'), ('c')", None)
            .await?;
        let expected: Vec<Instance> = (10..13)
            .map(|id| Instance::new().with("id", RowValues::Int(id)))
            .collect();
        assert_eq!(
            result,
            QueryResult::Write {
                result: WriteResult::Generated(expected),
                affected_rows: 3,
            }
        );

        // update hands the instance back with the affected count
        let conn = Arc::new(InMemoryConnection::new("c1").with_ack(WriteAck::new(0, 1)));
        let instance = Instance::new().with("id", RowValues::Int(3));
        let query = Query::new(
            conn,
            QueryOptions::new(StatementKind::Update).with_instance(instance.clone()),
        );
        let result = query
            .run("UPDATE users SET name = ? WHERE id = ?", Some(&["x".into(), RowValues::Int(3)]))
            .await?;
        assert_eq!(
            result,
            QueryResult::Write {
                result: WriteResult::Instance(instance),
                affected_rows: 1,
            }
        );
        Ok(())
    })
}

#[test]
fn test01_raw_insert_reports_insert_id() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let conn = Arc::new(InMemoryConnection::new("c1").with_ack(WriteAck::new(9, 1)));
        let query = Query::new(conn.clone(), QueryOptions::new(StatementKind::Raw));
        let result = query.run("  insert into t (a) values (1)", None).await?;
        assert_eq!(
            result,
            QueryResult::Write {
                result: WriteResult::InsertId(9),
                affected_rows: 1,
            }
        );
        assert_eq!(conn.last_submitted().unwrap().mode, SubmitMode::Query);

        // an insert that returned rows stays raw
        let rows = RowsBuilder::new(&["id"]).row(vec![RowValues::Int(1)]).build();
        let conn = Arc::new(InMemoryConnection::new("c1").with_rows(rows.clone()));
        let query = Query::new(conn, QueryOptions::new(StatementKind::Raw));
        let result = query.run("INSERT INTO t (a) VALUES (1) RETURNING id", None).await?;
        assert_eq!(
            result,
            QueryResult::Raw {
                rows: RawDriverResult::Rows(rows.clone()),
                metadata: RawDriverResult::Rows(rows),
            }
        );

        // unclassified statements fall back to the instance or nothing
        let conn = Arc::new(InMemoryConnection::new("c1"));
        let query = Query::new(conn, QueryOptions::default());
        assert_eq!(query.run("SET autocommit = 1", None).await?, QueryResult::Empty);
        Ok(())
    })
}

#[test]
fn test01_read_kinds() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let select = RowsBuilder::new(&["id", "name"])
            .row(vec![RowValues::Int(1), "a".into()])
            .row(vec![RowValues::Int(2), "b".into()])
            .build();
        let describe = RowsBuilder::new(&["Field", "Type", "Null", "Key", "Default", "Extra"])
            .row(vec![
                "id".into(),
                "int".into(),
                "NO".into(),
                "PRI".into(),
                RowValues::Null,
                "auto_increment".into(),
            ])
            .row(vec![
                "mood".into(),
                "enum('happy','sad')".into(),
                "YES".into(),
                "".into(),
                "happy".into(),
                "".into(),
            ])
            .build();
        let indexes = RowsBuilder::new(&[
            "Table",
            "Non_unique",
            "Key_name",
            "Seq_in_index",
            "Column_name",
            "Collation",
            "Sub_part",
            "Index_type",
        ])
        .row(vec![
            "users".into(),
            RowValues::Int(0),
            "PRIMARY".into(),
            RowValues::Int(1),
            "id".into(),
            "A".into(),
            RowValues::Null,
            "BTREE".into(),
        ])
        .row(vec![
            "users".into(),
            RowValues::Int(1),
            "name_email".into(),
            RowValues::Int(2),
            "email".into(),
            "A".into(),
            RowValues::Int(10),
            "BTREE".into(),
        ])
        .row(vec![
            "users".into(),
            RowValues::Int(1),
            "name_email".into(),
            RowValues::Int(1),
            "name".into(),
            RowValues::Null,
            RowValues::Null,
            "BTREE".into(),
        ])
        .build();
        let version = RowsBuilder::new(&["version"]).row(vec!["8.0.36".into()]).build();

        let conn = Arc::new(
            InMemoryConnection::new("c1")
                .with_rows(select)
                .with_rows(describe)
                .with_rows(indexes)
                .with_rows(version)
                .with_ack(WriteAck::new(0, 5)),
        );

        let result = Query::new(conn.clone(), QueryOptions::new(StatementKind::Select))
            .run("SELECT id, name FROM users", None)
            .await?;
        let rows = result.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.results[1].get("name"), Some(&RowValues::Text("b".into())));

        let result = Query::new(conn.clone(), QueryOptions::new(StatementKind::Describe))
            .run("DESCRIBE users", None)
            .await?;
        let QueryResult::Description(table) = result else {
            panic!("expected description, got {result:?}");
        };
        let id = table.get("id").unwrap();
        assert_eq!(id.column_type, "INT");
        assert!(id.primary_key && id.auto_increment && !id.allow_null);
        let mood = table.get("mood").unwrap();
        assert_eq!(mood.column_type, "ENUM('happy','sad')");
        assert!(mood.allow_null);
        assert_eq!(mood.default_value, RowValues::Text("happy".into()));

        let result = Query::new(conn.clone(), QueryOptions::new(StatementKind::ShowIndexes))
            .run("SHOW INDEX FROM users", None)
            .await?;
        let QueryResult::Indexes(indexes) = result else {
            panic!("expected indexes, got {result:?}");
        };
        assert_eq!(indexes.len(), 2);
        assert!(indexes[0].primary && indexes[0].unique);
        let composite = &indexes[1];
        assert!(!composite.primary && !composite.unique);
        let names: Vec<&str> = composite.fields.iter().map(|f| f.attribute.as_str()).collect();
        assert_eq!(names, ["name", "email"]);
        assert_eq!(composite.fields[0].order, None);
        assert_eq!(composite.fields[1].length, Some(10));
        assert_eq!(composite.fields[1].order.as_deref(), Some("ASC"));

        let result = Query::new(conn.clone(), QueryOptions::new(StatementKind::Version))
            .run("SELECT VERSION() as `version`", None)
            .await?;
        assert_eq!(result, QueryResult::Version(Some("8.0.36".into())));

        let result = Query::new(conn, QueryOptions::new(StatementKind::BulkDelete))
            .run("DELETE FROM users WHERE id > ?", Some(&[RowValues::Int(3)]))
            .await?;
        assert_eq!(result, QueryResult::AffectedRows(5));
        Ok(())
    })
}

#[test]
fn test01_bound_template_runs_prepared() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let values: BindValues = [
            ("name", RowValues::Text("jane".into())),
            ("age", RowValues::Int(30)),
        ]
        .into_iter()
        .collect();
        let (sql, binds) = format_bind_parameters(
            "SELECT * FROM users WHERE name = :name AND note = ':age' AND age > :age",
            &values,
        );
        assert_eq!(sql, "SELECT * FROM users WHERE name = ? AND note = ':age' AND age > ?");

        let conn = Arc::new(InMemoryConnection::new("c1").with_rows(ResultSet::default()));
        let query = Query::new(conn.clone(), QueryOptions::new(StatementKind::Select));
        query.run(&sql, binds.as_deref()).await?;

        let submitted = conn.last_submitted().unwrap();
        assert_eq!(submitted.mode, SubmitMode::Execute);
        assert_eq!(
            submitted.params,
            vec![RowValues::Text("jane".into()), RowValues::Int(30)]
        );

        // an empty parameter list takes the text path
        query.run("SELECT 1", Some(&[])).await?;
        assert_eq!(conn.last_submitted().unwrap().mode, SubmitMode::Query);
        Ok(())
    })
}

#[test]
fn test01_declared_write_counts_beat_insert_text() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let conn = Arc::new(
            InMemoryConnection::new("c1")
                .with_ack(WriteAck::new(5, 2))
                .with_ack(WriteAck::new(0, 7)),
        );

        let result = Query::new(conn.clone(), QueryOptions::new(StatementKind::Upsert))
            .run(
                "INSERT INTO t (id, a) VALUES (?, ?) ON DUPLICATE KEY UPDATE a = VALUES(a)",
                Some(&[RowValues::Int(1), "x".into()]),
            )
            .await?;
        assert_eq!(result, QueryResult::AffectedRows(2));

        let result = Query::new(conn, QueryOptions::new(StatementKind::BulkUpdate))
            .run("INSERT INTO archive SELECT * FROM t", None)
            .await?;
        assert_eq!(result, QueryResult::AffectedRows(7));
        Ok(())
    })
}
