use diesel::prelude::*;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct PragmaValue {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_creates_and_removes_db_files() {
    let path = {
        let test_db = common::TestDb::new("test_db_files.db");
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
        test_db.path().to_path_buf()
    };

    assert!(!path.exists());
    assert!(!std::path::Path::new(&format!("{}-shm", path.display())).exists());
    assert!(!std::path::Path::new(&format!("{}-wal", path.display())).exists());
}

#[test]
fn test_pooled_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_foreign_keys.db");
    let mut conn = test_db.pool().get().expect("connection");

    let pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaValue>(&mut conn)
        .expect("pragma");

    assert_eq!(pragma.foreign_keys, 1);
}
