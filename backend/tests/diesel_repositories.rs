//! Diesel repositories against embedded PostgreSQL.
//!
//! Each test gets its own cluster and a migrated temporary database, so the
//! owner filters, ordering and unique constraint run against the real schema.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use daily_diet::domain::ports::{
    MealRepository, UserAccounts, UserPersistenceError, UserRepository,
};
use daily_diet::domain::{
    EmailAddress, ErrorCode, Meal, MealPatch, NewMeal, SessionToken, User, UserAccountsService,
    UserDraft, UserId, UserRegistration,
};
use daily_diet::outbound::persistence::{
    DbPool, DieselMealRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{handle_cluster_setup_failure, test_cluster};

// The database must drop before the cluster hosting it.
struct TestContext {
    runtime: Runtime,
    users: DieselUserRepository,
    meals: DieselMealRepository,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database = cluster
        .temporary_database(format!("diet_{}", Uuid::new_v4().simple()).as_str())
        .map_err(|err| format!("{err:?}"))?;
    let url = database.url().to_owned();

    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        users: DieselUserRepository::new(pool.clone()),
        meals: DieselMealRepository::new(pool),
        _database: database,
        _cluster: cluster,
    })
}

#[fixture]
fn diesel_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 22, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn user(email: &str, token: &str, created_at: DateTime<Utc>) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        session_token: SessionToken::new(token).expect("valid token"),
        name: "Diesel Diner".to_owned(),
        email: EmailAddress::new(email).expect("valid email"),
        created_at,
    })
}

fn meal(owner: &User, name: &str, on_diet: bool, time: DateTime<Utc>) -> Meal {
    Meal::create(
        *owner.id(),
        NewMeal {
            name: name.to_owned(),
            description: format!("{name} description"),
            on_diet,
            time,
        },
    )
}

fn persisted_user(ctx: &TestContext, email: &str) -> User {
    let user = user(email, &Uuid::new_v4().to_string(), base_time());
    ctx.block_on(ctx.users.insert(&user)).expect("insert user");
    user
}

#[rstest]
fn meals_are_scoped_to_their_owner(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        return;
    };
    let owner = persisted_user(&ctx, "owner@example.com");
    let intruder = persisted_user(&ctx, "intruder@example.com");
    let salad = meal(&owner, "Salad", true, base_time());
    ctx.block_on(ctx.meals.insert(&salad)).expect("insert meal");

    ctx.block_on(async {
        assert!(
            ctx.meals
                .list_for_user(intruder.id())
                .await
                .expect("list")
                .is_empty()
        );
        assert_eq!(
            ctx.meals
                .find_for_user(intruder.id(), salad.id())
                .await
                .expect("find"),
            None
        );

        let patch = MealPatch {
            name: Some("Hijacked".to_owned()),
            ..MealPatch::default()
        };
        let updated = ctx
            .meals
            .update_for_user(intruder.id(), salad.id(), &patch)
            .await
            .expect("update");
        assert!(updated.is_empty());

        let removed = ctx
            .meals
            .delete_for_user(intruder.id(), salad.id())
            .await
            .expect("delete");
        assert_eq!(removed, 0);

        let stored = ctx
            .meals
            .find_for_user(owner.id(), salad.id())
            .await
            .expect("find")
            .expect("owner still has the meal");
        assert_eq!(stored, salad);
    });
}

#[rstest]
fn meals_list_by_time_then_id(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        return;
    };
    let owner = persisted_user(&ctx, "order@example.com");
    let late = meal(&owner, "late", true, base_time() + Duration::hours(5));
    let tied_a = meal(&owner, "tied-a", false, base_time());
    let tied_b = meal(&owner, "tied-b", true, base_time());
    let early = meal(&owner, "early", true, base_time() - Duration::hours(2));

    let listed = ctx.block_on(async {
        for meal in [&late, &tied_a, &tied_b, &early] {
            ctx.meals.insert(meal).await.expect("insert meal");
        }
        ctx.meals.list_for_user(owner.id()).await.expect("list")
    });

    let mut tied = [tied_a.id(), tied_b.id()];
    tied.sort();
    let ids: Vec<Uuid> = listed.iter().map(Meal::id).collect();
    assert_eq!(ids, vec![early.id(), tied[0], tied[1], late.id()]);
}

#[rstest]
fn update_returns_the_patched_row(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        return;
    };
    let owner = persisted_user(&ctx, "patch@example.com");
    let original = meal(&owner, "Oats", true, base_time());
    ctx.block_on(ctx.meals.insert(&original))
        .expect("insert meal");

    let patch = MealPatch {
        on_diet: Some(false),
        time: Some(base_time() + Duration::minutes(30)),
        ..MealPatch::default()
    };
    let updated = ctx
        .block_on(ctx.meals.update_for_user(owner.id(), original.id(), &patch))
        .expect("update");

    let mut expected = original.clone();
    expected.apply(&patch);
    assert_eq!(updated, vec![expected.clone()]);

    let stored = ctx
        .block_on(ctx.meals.find_for_user(owner.id(), original.id()))
        .expect("find");
    assert_eq!(stored, Some(expected));
}

#[rstest]
fn duplicate_email_hits_the_unique_constraint(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        return;
    };
    let first = user("taken@example.com", "first", base_time());
    let second = user("taken@example.com", "second", base_time());

    let result = ctx.block_on(async {
        ctx.users.insert(&first).await.expect("first insert");
        ctx.users.insert(&second).await
    });

    assert_eq!(
        result,
        Err(UserPersistenceError::duplicate_email("taken@example.com"))
    );
}

#[rstest]
fn shared_token_resolves_to_earliest_user(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        return;
    };
    let later = user("later@example.com", "shared", base_time() + Duration::minutes(1));
    let earlier = user("earlier@example.com", "shared", base_time());
    let token = SessionToken::new("shared").expect("valid token");

    let found = ctx.block_on(async {
        ctx.users.insert(&later).await.expect("insert later");
        ctx.users.insert(&earlier).await.expect("insert earlier");
        ctx.users.find_by_session_token(&token).await
    });

    assert_eq!(found.expect("lookup").map(|u| *u.id()), Some(*earlier.id()));
}

/// Repository whose email lookup always misses, as when two registrations
/// race past the pre-insert check.
struct LookupMisses(DieselUserRepository);

#[async_trait]
impl UserRepository for LookupMisses {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.0.insert(user).await
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.0.find_by_session_token(token).await
    }
}

#[rstest]
fn racing_registration_reports_email_in_use(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        return;
    };
    let service = UserAccountsService::new(
        Arc::new(LookupMisses(ctx.users.clone())),
        Arc::new(DefaultClock),
    );
    let registration = |token: &str| UserRegistration {
        name: "Racer".to_owned(),
        email: EmailAddress::new("race@example.com").expect("valid email"),
        session_token: SessionToken::new(token).expect("valid token"),
    };

    let error = ctx.block_on(async {
        service
            .register(registration("first"))
            .await
            .expect("first registration");
        service
            .register(registration("second"))
            .await
            .expect_err("second registration collides")
    });

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "Email already in use");
}
