#![allow(dead_code)]

use ormx::filter::kvs_from_map;
use ormx::prelude::*;
use ormx::projection::column_names_with_option;
use ormx::{OrmError, Route};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Record)]
pub struct UserAccount {
    #[orm(db = "id")]
    pub id: i64,
    #[orm(db = "name,insert")]
    pub name: String,
    #[orm(db = "email,insert")]
    pub email: Option<String>,
    #[orm(db = "created_at,insert,type:timestamp,select:-")]
    pub created_at: i64,
}

#[derive(Debug, Default, Record)]
pub struct UserQuery {
    #[orm(db = "name", op = "like")]
    pub name: Option<String>,
    #[orm(db = "id", op = "gte")]
    pub min_id: Option<i64>,
    #[orm(db = "email", op = "ne")]
    pub not_email: Option<String>,
}

#[derive(Debug, Default, Record)]
#[orm(table = "user_account")]
pub struct UserPatch {
    #[orm(db = "name")]
    pub name: Option<String>,
    #[orm(db = "email")]
    pub email: Option<String>,
    #[orm(db = "id")]
    pub id: i64,
}

#[derive(Debug, Default, Record)]
#[orm(table = "tasks")]
pub struct TaskQuery {
    #[orm(db = "deleted")]
    pub deleted: Option<bool>,
    #[orm(db = "retries", op = "gte")]
    pub min_retries: Option<i32>,
}

#[derive(Debug, Record)]
pub struct Session {
    #[orm(db = "token")]
    pub token: String,
}

fn user(name: &str) -> UserAccount {
    UserAccount {
        id: 0,
        name: name.into(),
        email: Some(format!("{name}@example.com")),
        created_at: 1_700_000_000,
    }
}

fn orm() -> Orm {
    Orm::new(OrmConfig::default().table_prefix("app_"))
}

fn tenant() -> RequestContext {
    RequestContext::new().with_namespace("tenant-A")
}

#[test]
fn read_by_struct_filter_with_namespace() {
    let query = UserQuery {
        name: Some("al%".into()),
        min_id: Some(10),
        ..Default::default()
    };
    let stmt = orm().get_where::<UserAccount>(&tenant(), "", &[], Filter::from_record(&query));
    assert_eq!(
        stmt.sql,
        "SELECT id, name, email FROM app_user_account WHERE name LIKE $1 AND id >= $2 AND namespace = $3"
    );
    assert_eq!(
        stmt.params,
        vec![
            Value::String("al%".into()),
            Value::Int(10),
            Value::String("tenant-A".into()),
        ]
    );
    assert_eq!(stmt.route, Route::Replica);
}

#[test]
fn empty_struct_filter_contributes_nothing() {
    let stmt = orm().get_where::<UserAccount>(
        &RequestContext::new(),
        "",
        &[],
        Filter::from_record(&UserQuery::default()),
    );
    assert_eq!(stmt.sql, "SELECT id, name, email FROM app_user_account");
    assert!(stmt.params.is_empty());
}

#[test]
fn set_option_holding_false_still_filters() {
    let query = TaskQuery {
        deleted: Some(false),
        min_retries: None,
    };
    let preds = Filter::from_record(&query).predicates("id");
    assert_eq!(preds.len(), 1);

    let stmt = orm().count(&RequestContext::new(), "tasks", Filter::from_record(&query));
    assert_eq!(stmt.sql, "SELECT COUNT(1) AS total FROM tasks WHERE deleted = $1");
    assert_eq!(stmt.params, vec![Value::Bool(false)]);

    let stmt = orm().delete_where(
        &RequestContext::new(),
        "tasks",
        &vec![KV::new("deleted", false)],
    );
    assert_eq!(stmt.sql, "DELETE FROM tasks WHERE deleted = $1");
}

#[test]
fn key_values_from_map() {
    let mut map = BTreeMap::new();
    map.insert("id", Value::List(vec![Value::Int(1), Value::Int(2)]));
    map.insert("name", Value::String("bob".into()));
    let kvs = kvs_from_map(KVs::new(), map);

    let stmt = orm().get_where::<UserAccount>(&RequestContext::new(), "users", &["id"], kvs);
    assert_eq!(stmt.sql, "SELECT id FROM users WHERE id IN ($1, $2) AND name = $3");
}

#[test]
fn in_with_empty_list_is_null_check() {
    let kvs = vec![KV::with_op("id", Vec::<i64>::new(), "in")];
    let stmt = orm().get_where::<UserAccount>(&RequestContext::new(), "users", &[], kvs);
    assert!(stmt.sql.ends_with("WHERE id IS NULL"));
    assert!(stmt.params.is_empty());
}

#[test]
fn unknown_operator_degrades_to_nothing() {
    let kvs = vec![
        KV::with_op("age", 30, "between"),
        KV::with_op("name", "bo%", "notlike"),
    ];
    let stmt = orm().count(&RequestContext::new(), "users", kvs);
    assert_eq!(
        stmt.sql,
        "SELECT COUNT(1) AS total FROM users WHERE name NOT LIKE $1"
    );
}

#[test]
fn primary_reads_are_routed() {
    let ctx = tenant().from_primary();
    let stmt = orm().get_by_id::<UserAccount>(&ctx, "", 5i64);
    assert!(stmt.is_primary());

    let stmt = orm().get_by_id::<UserAccount>(&ctx.from_replica(), "", 5i64);
    assert!(!stmt.is_primary());
}

#[test]
fn insert_projects_tagged_fields() {
    let users = vec![user("ann"), user("ben")];
    let stmt = orm().insert_many(&tenant(), "", &users).unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO app_user_account (name, email, created_at, namespace) VALUES ($1, $2, $3, $4), ($5, $6, $7, $8)"
    );
    assert_eq!(stmt.params.len(), 8);
    assert!(matches!(stmt.params[2], Value::Timestamp(_)));
    assert_eq!(stmt.params[3], Value::String("tenant-A".into()));
    assert!(stmt.is_primary());
}

#[test]
fn insert_of_references_matches_values() {
    let owned = [user("ann")];
    let borrowed = [&owned[0]];
    let a = orm().insert_many(&RequestContext::new(), "", &owned).unwrap();
    let b = orm().insert_many(&RequestContext::new(), "", &borrowed).unwrap();
    assert_eq!(a.sql, b.sql);
    assert_eq!(a.params, b.params);
}

#[test]
fn insert_without_insert_fields_fails() {
    let sessions = [Session {
        token: "abc".into(),
    }];
    let err = orm()
        .insert_many(&RequestContext::new(), "", &sessions)
        .unwrap_err();
    assert!(matches!(err, OrmError::NoInsertField(ref name) if name == "Session"));
}

#[test]
fn patch_assigns_only_set_options() {
    let patch = UserPatch {
        email: Some("new@example.com".into()),
        id: 99,
        ..Default::default()
    };
    let stmt = orm().patch_by_id(&tenant(), "", 7i64, &patch).unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE user_account SET email = $1 WHERE id = $2 AND namespace = $3"
    );
    assert_eq!(stmt.params[1], Value::Int(7));
}

#[test]
fn patch_with_nothing_set() {
    let patch = UserPatch {
        id: 1,
        ..Default::default()
    };
    assert!(orm().patch_by_id(&tenant(), "", 1i64, &patch).is_none());
}

#[test]
fn ignored_namespace_is_not_injected() {
    let ctx = tenant().ignore_namespace();
    let stmt = orm().delete_by_id(&ctx, "users", vec![1i64, 2, 3]);
    assert_eq!(stmt.sql, "DELETE FROM users WHERE id IN ($1, $2, $3)");

    let stmt = orm().insert_one(&ctx, "users", &user("ann")).unwrap();
    assert!(!stmt.sql.contains("namespace"));
}

#[test]
fn custom_config() {
    let config = OrmConfig::from_toml_str(
        r#"
        table_prefix = "t_"
        namespace_column = "tenant_id"
        primary_key = "uid"
        "#,
    )
    .unwrap();
    let orm = Orm::new(config);
    let stmt = orm.get_by_id::<UserAccount>(&tenant(), "", "u-1");
    assert_eq!(
        stmt.sql,
        "SELECT id, name, email FROM t_user_account WHERE uid = $1 AND tenant_id = $2"
    );
}

#[test]
fn qualified_column_names() {
    assert_eq!(
        column_names_with_option::<UserAccount>("app_", "insert"),
        vec![
            "app_user_account.name",
            "app_user_account.email",
            "app_user_account.created_at",
        ]
    );
    assert_eq!(column_names_with_option::<UserAccount>("", "").len(), 4);
}
