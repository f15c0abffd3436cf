//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Each test provisions its own database on a `pg-embed-setup-unpriv`
//! cluster and applies the embedded migrations before exercising the port.

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use users_api::domain::ports::{UserPersistenceError, UserRepository};
use users_api::domain::{NewUser, UserChanges, UserId};
use users_api::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use uuid::Uuid;

mod support;

use support::handle_cluster_setup_failure;
use support::pg_embed::test_cluster;

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselUserRepository,
}

fn create_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("users_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut conn = PgConnection::establish(&admin_url).map_err(|err| err.to_string())?;
    diesel::sql_query(format!("CREATE DATABASE \"{name}\""))
        .execute(&mut conn)
        .map_err(|err| err.to_string())?;
    Ok(cluster.connection().database_url(&name))
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = create_database(&cluster)?;
    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(&database_url).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselUserRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn draft(id: Option<i64>, name: &str, bio: &str) -> NewUser {
    NewUser {
        id: id.map(|value| UserId::new(value).expect("positive id")),
        changes: UserChanges::new(name, bio).expect("valid changes"),
    }
}

fn user_id(value: i64) -> UserId {
    UserId::new(value).expect("positive id")
}

#[rstest]
fn insert_assigns_increasing_ids_and_find_orders_them(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_assigns_increasing_ids_and_find_orders_them skipped");
        return;
    };
    let repository = &context.repository;

    context.runtime.block_on(async {
        let ana = repository
            .insert(draft(None, "Ana", "Engineer"))
            .await
            .expect("insert ana");
        let bo = repository
            .insert(draft(None, "Bo", "Designer"))
            .await
            .expect("insert bo");
        assert_eq!(ana.id().value(), 1);
        assert_eq!(bo.id().value(), 2);

        let listed = repository.find().await.expect("find").expect("collection");
        assert_eq!(listed, vec![ana, bo]);
    });
}

#[rstest]
fn explicit_id_does_not_block_later_assigned_ids(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: explicit_id_does_not_block_later_assigned_ids skipped");
        return;
    };
    let repository = &context.repository;

    context.runtime.block_on(async {
        let pinned = repository
            .insert(draft(Some(1), "Ana", "Engineer"))
            .await
            .expect("insert with explicit id");
        assert_eq!(pinned.id().value(), 1);

        let assigned = repository
            .insert(draft(None, "Bo", "Designer"))
            .await
            .expect("sequence moved past the explicit id");
        assert_eq!(assigned.id().value(), 2);

        let far = repository
            .insert(draft(Some(10), "Cy", "Writer"))
            .await
            .expect("insert far ahead");
        let next = repository
            .insert(draft(None, "Di", "Tester"))
            .await
            .expect("insert after jump");
        assert_eq!(far.id().value(), 10);
        assert_eq!(next.id().value(), 11);
    });
}

#[rstest]
fn duplicate_id_is_a_conflict(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_id_is_a_conflict skipped");
        return;
    };
    let repository = &context.repository;

    context.runtime.block_on(async {
        repository
            .insert(draft(Some(5), "Ana", "Engineer"))
            .await
            .expect("first insert");
        let err = repository
            .insert(draft(Some(5), "Bo", "Designer"))
            .await
            .expect_err("duplicate id");
        assert!(
            matches!(err, UserPersistenceError::Conflict { .. }),
            "unexpected error: {err}"
        );

        let listed = repository.find().await.expect("find").expect("collection");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name(), "Ana");
    });
}

#[rstest]
fn find_by_id_distinguishes_present_and_missing(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: find_by_id_distinguishes_present_and_missing skipped");
        return;
    };
    let repository = &context.repository;

    context.runtime.block_on(async {
        let stored = repository
            .insert(draft(None, "Ana", "Engineer"))
            .await
            .expect("insert");

        let found = repository.find_by_id(stored.id()).await.expect("lookup");
        assert_eq!(found, Some(stored));

        let missing = repository.find_by_id(user_id(99)).await.expect("lookup");
        assert_eq!(missing, None);
    });
}

#[rstest]
fn update_replaces_fields_of_existing_rows_only(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_fields_of_existing_rows_only skipped");
        return;
    };
    let repository = &context.repository;

    context.runtime.block_on(async {
        let stored = repository
            .insert(draft(None, "Ana", "Engineer"))
            .await
            .expect("insert");
        let changes = UserChanges::new("Ana", "Architect").expect("valid changes");

        let updated = repository
            .update(stored.id(), changes.clone())
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(updated.id(), stored.id());
        assert_eq!(updated.bio(), "Architect");

        let refetched = repository.find_by_id(stored.id()).await.expect("lookup");
        assert_eq!(refetched, Some(updated));

        let missing = repository.update(user_id(99), changes).await.expect("update");
        assert_eq!(missing, None);
    });
}

#[rstest]
fn remove_returns_the_row_once(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: remove_returns_the_row_once skipped");
        return;
    };
    let repository = &context.repository;

    context.runtime.block_on(async {
        let stored = repository
            .insert(draft(None, "Ana", "Engineer"))
            .await
            .expect("insert");

        let removed = repository.remove(stored.id()).await.expect("remove");
        assert_eq!(removed, Some(stored.clone()));

        let again = repository.remove(stored.id()).await.expect("remove");
        assert_eq!(again, None);

        let listed = repository.find().await.expect("find").expect("collection");
        assert!(listed.is_empty());
    });
}
