use std::sync::Arc;

use sql_query_adapter::drivers::{InMemoryConnection, RowsBuilder};
use sql_query_adapter::prelude::*;
use tokio::runtime::Runtime;

#[test]
fn test04_deadlock_marks_transaction() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let deadlock = || {
            DriverError::new(
                1213,
                "Deadlock found when trying to get lock; try restarting transaction",
            )
        };
        let conn = Arc::new(
            InMemoryConnection::new("c1")
                .with_error(deadlock())
                .with_error(deadlock())
                .with_error(DriverError::new(1205, "Lock wait timeout exceeded")),
        );

        let tx = Arc::new(Transaction::new("tx-1"));
        let err = Query::new(
            conn.clone(),
            QueryOptions::new(StatementKind::BulkUpdate).with_transaction(tx.clone()),
        )
        .run("UPDATE accounts SET balance = balance - 1 WHERE id = ?", Some(&[RowValues::Int(1)]))
        .await
        .unwrap_err();
        assert!(matches!(err, SqlAdapterError::Database(_)));
        assert_eq!(tx.finished(), Some(TxFinished::Rollback));

        // without a transaction the error still surfaces unchanged
        let err = Query::new(conn.clone(), QueryOptions::new(StatementKind::BulkUpdate))
            .run("UPDATE accounts SET balance = 0", None)
            .await
            .unwrap_err();
        assert_eq!(
            err.driver_error().and_then(|e| e.errno),
            Some(1213)
        );

        // other errors leave the transaction alone
        let tx = Arc::new(Transaction::new("tx-2"));
        Query::new(
            conn,
            QueryOptions::new(StatementKind::BulkUpdate).with_transaction(tx.clone()),
        )
        .run("UPDATE accounts SET balance = 1", None)
        .await
        .unwrap_err();
        assert_eq!(tx.finished(), None);
        Ok(())
    })
}

#[test]
fn test04_dropped_completion_is_a_connection_error() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let conn = Arc::new(InMemoryConnection::new("c1").with_dropped_completion());
        let err = Query::new(conn, QueryOptions::new(StatementKind::Select))
            .run("SELECT SLEEP(10)", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SqlAdapterError::ConnectionError(_)), "{err:?}");
        assert_eq!(err.driver_error(), None);
        Ok(())
    })
}

#[test]
fn test04_completion_from_another_thread() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let rows = RowsBuilder::new(&["id"])
            .row(vec![RowValues::Int(1)])
            .row(vec![RowValues::Int(2)])
            .build();
        let conn = Arc::new(
            InMemoryConnection::new("c1")
                .threaded()
                .with_rows(rows)
                .with_ack(WriteAck::new(0, 2).with_warnings(1))
                .with_rows(
                    RowsBuilder::new(&["Level", "Code"])
                        .row(vec!["Note".into(), RowValues::Int(1051)])
                        .build(),
                ),
        );

        let result = Query::new(conn.clone(), QueryOptions::new(StatementKind::Call))
            .run("CALL list_ids()", None)
            .await?;
        let QueryResult::Row(Some(row)) = result else {
            panic!("expected first row, got {result:?}");
        };
        assert_eq!(row.get("id"), Some(&RowValues::Int(1)));

        let query = Query::new(
            conn.clone(),
            QueryOptions::new(StatementKind::BulkDelete).with_show_warnings(Toggle::ForceOn),
        );
        let result = query.run("DELETE FROM t", None).await?;
        assert_eq!(result, QueryResult::AffectedRows(2));
        assert_eq!(conn.submitted().len(), 3);
        Ok(())
    })
}
