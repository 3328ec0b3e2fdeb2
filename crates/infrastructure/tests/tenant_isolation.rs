//! Isolation guarantees of the SQLite stores, exercised end to end
//!
//! Every test seeds two tenants and verifies that reads, writes, searches
//! and aggregates from one tenant's context can neither see nor touch the
//! other tenant's rows.

use std::sync::Arc;

use application::ApplicationError;
use application::ports::{
    InvoiceRepository, OrderRepository, PlanningRepository, ProjectRepository, ScopedRepository,
    TaskRepository, TenantDirectory, TimesheetRepository,
};
use application::services::{run_for_each_tenant, switch_to_slug};
use chrono::NaiveDate;
use domain::tenant::{SystemGrant, TenantContext};
use domain::{
    Client, ContributorId, Invoice, Order, OrderLine, OrderSection, Planning, Principal, Project,
    ProjectStatus, ProjectTask, Role, Slug, Tenant, Timesheet,
};
use infrastructure::config::DatabaseConfig;
use infrastructure::persistence::{
    ConnectionPool, SqliteClientStore, SqliteInvoiceStore, SqliteOrderLineStore,
    SqliteOrderSectionStore, SqliteOrderStore, SqlitePlanningStore, SqliteProjectStore,
    SqliteTaskStore, SqliteTenantDirectory, SqliteTimesheetStore, create_pool,
};

fn test_pool() -> Arc<ConnectionPool> {
    let config = DatabaseConfig {
        path: ":memory:".to_string(),
        max_connections: 1,
        run_migrations: true,
    };
    Arc::new(create_pool(&config).unwrap())
}

async fn seed_tenant(directory: &SqliteTenantDirectory, slug: &str) -> Tenant {
    let tenant = Tenant::new(slug.to_uppercase(), Slug::new(slug).unwrap());
    directory.create(&tenant).await.unwrap();
    tenant
}

fn ctx_for(tenant: &Tenant) -> TenantContext {
    let principal = Principal::new("manager", tenant.id(), [Role::Manager]);
    TenantContext::bind(&principal)
}

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, d).unwrap()
}

#[tokio::test]
async fn find_all_returns_only_the_contexts_tenant() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let alpha_ctx = ctx_for(&alpha);
    let beta_ctx = ctx_for(&beta);

    store
        .insert(&alpha_ctx, &Project::new(alpha.id(), "Revamp"))
        .await
        .unwrap();
    store
        .insert(&alpha_ctx, &Project::new(alpha.id(), "Audit"))
        .await
        .unwrap();
    store
        .insert(&beta_ctx, &Project::new(beta.id(), "Migration"))
        .await
        .unwrap();

    let alpha_projects = store.find_all(&alpha_ctx).await.unwrap();
    let beta_projects = store.find_all(&beta_ctx).await.unwrap();

    assert_eq!(alpha_projects.len(), 2);
    assert_eq!(beta_projects.len(), 1);
    assert_eq!(beta_projects[0].name, "Migration");
}

#[tokio::test]
async fn foreign_id_lookup_is_indistinguishable_from_absent() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let alpha_ctx = ctx_for(&alpha);
    let beta_ctx = ctx_for(&beta);

    let project = Project::new(alpha.id(), "Revamp");
    store.insert(&alpha_ctx, &project).await.unwrap();

    // The owner sees it; the other tenant gets the same None an absent id
    // would produce.
    assert!(
        store
            .find_by_id(&alpha_ctx, project.id())
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        store
            .find_by_id(&beta_ctx, project.id())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn count_is_scoped_per_tenant() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteClientStore::new(Arc::clone(&pool));
    let alpha_ctx = ctx_for(&alpha);
    let beta_ctx = ctx_for(&beta);

    store
        .insert(&alpha_ctx, &Client::new(alpha.id(), "Globex"))
        .await
        .unwrap();
    store
        .insert(&alpha_ctx, &Client::new(alpha.id(), "Initech"))
        .await
        .unwrap();
    store
        .insert(&beta_ctx, &Client::new(beta.id(), "Umbrella"))
        .await
        .unwrap();

    assert_eq!(store.count(&alpha_ctx).await.unwrap(), 2);
    assert_eq!(store.count(&beta_ctx).await.unwrap(), 1);
}

#[tokio::test]
async fn search_never_crosses_tenants() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteClientStore::new(Arc::clone(&pool));
    let alpha_ctx = ctx_for(&alpha);
    let beta_ctx = ctx_for(&beta);

    store
        .insert(&alpha_ctx, &Client::new(alpha.id(), "Acme Industries"))
        .await
        .unwrap();
    store
        .insert(&beta_ctx, &Client::new(beta.id(), "Acme Logistics"))
        .await
        .unwrap();

    let hits = store.search(&beta_ctx, "acme").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Acme Logistics");
}

#[tokio::test]
async fn insert_of_foreign_entity_is_an_isolation_violation() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let alpha_ctx = ctx_for(&alpha);

    // Entity constructed under beta, handed to a context bound to alpha.
    let stray = Project::new(beta.id(), "Stray");
    let err = store.insert(&alpha_ctx, &stray).await.unwrap_err();
    assert!(matches!(err, ApplicationError::IsolationViolation(_)));

    // Nothing was written for either tenant.
    assert_eq!(store.count(&alpha_ctx).await.unwrap(), 0);
    assert_eq!(store.count(&ctx_for(&beta)).await.unwrap(), 0);
}

#[tokio::test]
async fn update_of_foreign_entity_is_rejected_before_storage() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let beta_ctx = ctx_for(&beta);

    let mut project = Project::new(beta.id(), "Migration");
    store.insert(&beta_ctx, &project).await.unwrap();

    project.name = "Hijacked".to_string();
    let err = store.update(&ctx_for(&alpha), &project).await.unwrap_err();
    assert!(matches!(err, ApplicationError::IsolationViolation(_)));

    let unchanged = store
        .find_by_id(&beta_ctx, project.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Migration");
}

#[tokio::test]
async fn update_of_absent_row_reports_false() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let ctx = ctx_for(&alpha);

    let never_inserted = Project::new(alpha.id(), "Ghost");
    assert!(!store.update(&ctx, &never_inserted).await.unwrap());
}

#[tokio::test]
async fn delete_by_foreign_id_reports_false_and_keeps_the_row() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let beta_ctx = ctx_for(&beta);

    let project = Project::new(beta.id(), "Migration");
    store.insert(&beta_ctx, &project).await.unwrap();

    assert!(!store.delete(&ctx_for(&alpha), project.id()).await.unwrap());
    assert!(
        store
            .find_by_id(&beta_ctx, project.id())
            .await
            .unwrap()
            .is_some()
    );

    // The owner can delete it.
    assert!(store.delete(&beta_ctx, project.id()).await.unwrap());
}

#[tokio::test]
async fn unbound_context_fails_every_operation() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let unbound = TenantContext::unbound();

    let err = store.find_all(&unbound).await.unwrap_err();
    assert!(matches!(err, ApplicationError::UnboundContext));

    let err = store
        .insert(&unbound, &Project::new(alpha.id(), "Nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::UnboundContext));

    let err = store.count(&unbound).await.unwrap_err();
    assert!(matches!(err, ApplicationError::UnboundContext));
}

#[tokio::test]
async fn children_inherit_tenancy_through_the_whole_order_chain() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;

    let projects = SqliteProjectStore::new(Arc::clone(&pool));
    let orders = SqliteOrderStore::new(Arc::clone(&pool));
    let sections = SqliteOrderSectionStore::new(Arc::clone(&pool));
    let lines = SqliteOrderLineStore::new(Arc::clone(&pool));
    let ctx = ctx_for(&alpha);

    let project = Project::new(alpha.id(), "Revamp");
    let order = Order::new(&project, "PO-2026-001");
    let section = OrderSection::new(&order, "Phase 1", 0);
    let line = OrderLine::new(&section, "Discovery", 2, 120_000);

    projects.insert(&ctx, &project).await.unwrap();
    orders.insert(&ctx, &order).await.unwrap();
    sections.insert(&ctx, &section).await.unwrap();
    lines.insert(&ctx, &line).await.unwrap();

    let found = orders.find_for_project(&ctx, project.id()).await.unwrap();
    assert_eq!(found.len(), 1);
    let found = orders.sections(&ctx, order.id()).await.unwrap();
    assert_eq!(found.len(), 1);
    let found = orders.lines(&ctx, section.id()).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn order_total_joins_stay_within_the_tenant() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let projects = SqliteProjectStore::new(Arc::clone(&pool));
    let orders = SqliteOrderStore::new(Arc::clone(&pool));
    let sections = SqliteOrderSectionStore::new(Arc::clone(&pool));
    let lines = SqliteOrderLineStore::new(Arc::clone(&pool));

    let alpha_ctx = ctx_for(&alpha);
    let alpha_project = Project::new(alpha.id(), "Revamp");
    let alpha_order = Order::new(&alpha_project, "PO-A");
    let alpha_section = OrderSection::new(&alpha_order, "Phase 1", 0);
    projects.insert(&alpha_ctx, &alpha_project).await.unwrap();
    orders.insert(&alpha_ctx, &alpha_order).await.unwrap();
    sections.insert(&alpha_ctx, &alpha_section).await.unwrap();
    lines
        .insert(&alpha_ctx, &OrderLine::new(&alpha_section, "Dev", 3, 80_000))
        .await
        .unwrap();
    lines
        .insert(&alpha_ctx, &OrderLine::new(&alpha_section, "QA", 1, 50_000))
        .await
        .unwrap();

    let beta_ctx = ctx_for(&beta);
    let beta_project = Project::new(beta.id(), "Migration");
    let beta_order = Order::new(&beta_project, "PO-B");
    let beta_section = OrderSection::new(&beta_order, "All", 0);
    projects.insert(&beta_ctx, &beta_project).await.unwrap();
    orders.insert(&beta_ctx, &beta_order).await.unwrap();
    sections.insert(&beta_ctx, &beta_section).await.unwrap();
    lines
        .insert(&beta_ctx, &OrderLine::new(&beta_section, "Ops", 10, 99_000))
        .await
        .unwrap();

    let total = orders
        .order_total_cents(&alpha_ctx, alpha_order.id())
        .await
        .unwrap();
    assert_eq!(total, 3 * 80_000 + 50_000);

    // Asking for the other tenant's order yields the empty aggregate.
    let foreign = orders
        .order_total_cents(&alpha_ctx, beta_order.id())
        .await
        .unwrap();
    assert_eq!(foreign, 0);
}

#[tokio::test]
async fn project_status_filter_is_anded_with_the_tenant_predicate() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let alpha_ctx = ctx_for(&alpha);
    let beta_ctx = ctx_for(&beta);

    store
        .insert(&alpha_ctx, &Project::new(alpha.id(), "Live").activated())
        .await
        .unwrap();
    store
        .insert(&alpha_ctx, &Project::new(alpha.id(), "Pitch"))
        .await
        .unwrap();
    store
        .insert(&beta_ctx, &Project::new(beta.id(), "Rollout").activated())
        .await
        .unwrap();

    let active = store
        .find_by_status(&alpha_ctx, ProjectStatus::Active)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Live");
}

#[tokio::test]
async fn timesheet_aggregates_are_scoped() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let projects = SqliteProjectStore::new(Arc::clone(&pool));
    let sheets = SqliteTimesheetStore::new(Arc::clone(&pool));

    let alpha_ctx = ctx_for(&alpha);
    let alpha_project = Project::new(alpha.id(), "Revamp");
    projects.insert(&alpha_ctx, &alpha_project).await.unwrap();
    sheets
        .insert(
            &alpha_ctx,
            &Timesheet::new(&alpha_project, ContributorId::new(), day(3, 2), 420),
        )
        .await
        .unwrap();
    sheets
        .insert(
            &alpha_ctx,
            &Timesheet::new(&alpha_project, ContributorId::new(), day(3, 3), 180),
        )
        .await
        .unwrap();

    let beta_ctx = ctx_for(&beta);
    let beta_project = Project::new(beta.id(), "Migration");
    projects.insert(&beta_ctx, &beta_project).await.unwrap();
    sheets
        .insert(
            &beta_ctx,
            &Timesheet::new(&beta_project, ContributorId::new(), day(3, 2), 480),
        )
        .await
        .unwrap();

    let minutes = sheets
        .minutes_for_project(&alpha_ctx, alpha_project.id())
        .await
        .unwrap();
    assert_eq!(minutes, 600);

    let march = sheets
        .find_between(&alpha_ctx, day(3, 1), day(3, 31))
        .await
        .unwrap();
    assert_eq!(march.len(), 2);
}

#[tokio::test]
async fn planning_overlap_query_is_scoped() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;

    let projects = SqliteProjectStore::new(Arc::clone(&pool));
    let plannings = SqlitePlanningStore::new(Arc::clone(&pool));
    let ctx = ctx_for(&alpha);

    let project = Project::new(alpha.id(), "Revamp");
    projects.insert(&ctx, &project).await.unwrap();

    let contributor = ContributorId::new();
    plannings
        .insert(
            &ctx,
            &Planning::new(&project, contributor, day(4, 1), day(4, 10)).unwrap(),
        )
        .await
        .unwrap();
    plannings
        .insert(
            &ctx,
            &Planning::new(&project, contributor, day(4, 20), day(4, 25)).unwrap(),
        )
        .await
        .unwrap();

    let hits = plannings
        .overlapping(&ctx, contributor, day(4, 8), day(4, 12))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].start_day, day(4, 1));

    let all = plannings.find_for_contributor(&ctx, contributor).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn invoice_revenue_is_scoped_per_tenant() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let projects = SqliteProjectStore::new(Arc::clone(&pool));
    let invoices = SqliteInvoiceStore::new(Arc::clone(&pool));

    let alpha_ctx = ctx_for(&alpha);
    let alpha_project = Project::new(alpha.id(), "Revamp");
    projects.insert(&alpha_ctx, &alpha_project).await.unwrap();
    invoices
        .insert(
            &alpha_ctx,
            &Invoice::new(&alpha_project, "2026-0001", day(5, 10), 500_000).mark_issued(),
        )
        .await
        .unwrap();
    // Still a draft; must not show up as issued revenue.
    invoices
        .insert(
            &alpha_ctx,
            &Invoice::new(&alpha_project, "2026-0002", day(5, 20), 250_000),
        )
        .await
        .unwrap();

    let beta_ctx = ctx_for(&beta);
    let beta_project = Project::new(beta.id(), "Migration");
    projects.insert(&beta_ctx, &beta_project).await.unwrap();
    invoices
        .insert(
            &beta_ctx,
            &Invoice::new(&beta_project, "2026-0001", day(5, 12), 900_000).mark_issued(),
        )
        .await
        .unwrap();

    let revenue = invoices
        .revenue_cents_between(&alpha_ctx, day(5, 1), day(5, 31))
        .await
        .unwrap();
    assert_eq!(revenue, 500_000);

    let issued = invoices
        .find_issued_between(&alpha_ctx, day(5, 1), day(5, 31))
        .await
        .unwrap();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].number, "2026-0001");

    let issued = invoices
        .find_issued_between(&beta_ctx, day(5, 1), day(5, 31))
        .await
        .unwrap();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].total_cents, 900_000);
}

#[tokio::test]
async fn open_tasks_exclude_done_and_foreign_rows() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let projects = SqliteProjectStore::new(Arc::clone(&pool));
    let tasks = SqliteTaskStore::new(Arc::clone(&pool));

    let alpha_ctx = ctx_for(&alpha);
    let alpha_project = Project::new(alpha.id(), "Revamp");
    projects.insert(&alpha_ctx, &alpha_project).await.unwrap();

    let mut done = ProjectTask::new(&alpha_project, "Kickoff");
    done.done = true;
    tasks.insert(&alpha_ctx, &done).await.unwrap();
    tasks
        .insert(&alpha_ctx, &ProjectTask::new(&alpha_project, "Wireframes"))
        .await
        .unwrap();

    let beta_ctx = ctx_for(&beta);
    let beta_project = Project::new(beta.id(), "Migration");
    projects.insert(&beta_ctx, &beta_project).await.unwrap();
    tasks
        .insert(&beta_ctx, &ProjectTask::new(&beta_project, "Inventory"))
        .await
        .unwrap();

    let open = tasks
        .open_for_project(&alpha_ctx, alpha_project.id())
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].title, "Wireframes");
}

#[tokio::test]
async fn administrative_switch_rebinds_reads_to_the_target_tenant() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let beta = seed_tenant(&directory, "beta").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    store
        .insert(&ctx_for(&alpha), &Project::new(alpha.id(), "Revamp"))
        .await
        .unwrap();
    store
        .insert(&ctx_for(&beta), &Project::new(beta.id(), "Migration"))
        .await
        .unwrap();

    let admin = Principal::new("root", alpha.id(), [Role::SuperAdmin]);
    let mut ctx = TenantContext::bind(&admin);

    let before = store.find_all(&ctx).await.unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].name, "Revamp");

    let switched = switch_to_slug(&directory, &mut ctx, &admin, &Slug::new("beta").unwrap())
        .await
        .unwrap();
    assert_eq!(switched, Some(beta.id()));

    let after = store.find_all(&ctx).await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "Migration");
}

#[tokio::test]
async fn children_keep_their_parents_tenant_even_under_a_switched_context() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    seed_tenant(&directory, "beta").await;

    let projects = SqliteProjectStore::new(Arc::clone(&pool));
    let tasks = SqliteTaskStore::new(Arc::clone(&pool));

    let alpha_project = Project::new(alpha.id(), "Revamp");
    projects
        .insert(&ctx_for(&alpha), &alpha_project)
        .await
        .unwrap();

    // Administrative switch to beta while holding an alpha-owned parent.
    let admin = Principal::new("root", alpha.id(), [Role::SuperAdmin]);
    let mut ctx = TenantContext::bind(&admin);
    switch_to_slug(&directory, &mut ctx, &admin, &Slug::new("beta").unwrap())
        .await
        .unwrap();

    // The child derives its tenant from the parent, not from the context,
    // so inserting it through the beta-bound context is a violation.
    let task = ProjectTask::new(&alpha_project, "Wireframes");
    let err = tasks.insert(&ctx, &task).await.unwrap_err();
    assert!(matches!(err, ApplicationError::IsolationViolation(_)));

    // Through the owner's context it persists under alpha.
    tasks.insert(&ctx_for(&alpha), &task).await.unwrap();
    let open = tasks
        .open_for_project(&ctx_for(&alpha), alpha_project.id())
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
}

#[tokio::test]
async fn suspended_tenants_are_skipped_by_system_jobs() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    seed_tenant(&directory, "beta").await;

    let gamma = Tenant::new("GAMMA", Slug::new("gamma").unwrap()).suspended();
    directory.create(&gamma).await.unwrap();

    let store = Arc::new(SqliteProjectStore::new(Arc::clone(&pool)));
    store
        .insert(&ctx_for(&alpha), &Project::new(alpha.id(), "Revamp"))
        .await
        .unwrap();

    let grant = SystemGrant::for_background_job("nightly-count");
    let processed = run_for_each_tenant(&directory, &grant, |ctx, _tenant| {
        let store = Arc::clone(&store);
        async move {
            // Each iteration reads through its own freshly bound context.
            store.count(&ctx).await.map(|_| ())
        }
    })
    .await
    .unwrap();

    assert_eq!(processed, 2);
}

#[tokio::test]
async fn directory_lookups_and_roster_listing() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;
    let trial = Tenant::new("TRIAL", Slug::new("trial").unwrap()).in_trial();
    directory.create(&trial).await.unwrap();
    let frozen = Tenant::new("FROZEN", Slug::new("frozen").unwrap()).suspended();
    directory.create(&frozen).await.unwrap();

    let by_slug = directory
        .find_by_slug(&Slug::new("alpha").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_slug.id(), alpha.id());

    let by_id = directory.find_by_id(frozen.id()).await.unwrap().unwrap();
    assert!(!by_id.status().is_operational());

    let operational = directory.list_operational().await.unwrap();
    assert_eq!(operational.len(), 2);
    assert!(operational.iter().all(|t| t.status().is_operational()));

    assert!(
        directory
            .find_by_slug(&Slug::new("ghost").unwrap())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn roundtrip_preserves_restored_field_values() {
    let pool = test_pool();
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = seed_tenant(&directory, "alpha").await;

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let ctx = ctx_for(&alpha);

    let project = Project::new(alpha.id(), "Revamp").activated();
    store.insert(&ctx, &project).await.unwrap();

    let loaded = store.find_by_id(&ctx, project.id()).await.unwrap().unwrap();
    assert_eq!(loaded.id(), project.id());
    assert_eq!(loaded.name, project.name);
    assert_eq!(loaded.status, ProjectStatus::Active);
}

#[tokio::test]
async fn file_backed_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        path: dir.path().join("tenancy.db").to_string_lossy().into_owned(),
        max_connections: 1,
        run_migrations: true,
    };

    let alpha_id = {
        let pool = Arc::new(create_pool(&config).unwrap());
        let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
        let alpha = seed_tenant(&directory, "alpha").await;

        let store = SqliteProjectStore::new(Arc::clone(&pool));
        store
            .insert(&ctx_for(&alpha), &Project::new(alpha.id(), "Revamp"))
            .await
            .unwrap();
        alpha.id()
    };

    // Reopening re-runs the migration entry point against an up-to-date file.
    let pool = Arc::new(create_pool(&config).unwrap());
    let directory = SqliteTenantDirectory::new(Arc::clone(&pool));
    let alpha = directory
        .find_by_slug(&Slug::new("alpha").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alpha.id(), alpha_id);

    let store = SqliteProjectStore::new(Arc::clone(&pool));
    let projects = store.find_all(&ctx_for(&alpha)).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Revamp");
}
