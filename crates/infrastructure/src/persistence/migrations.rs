//! Database migrations
//!
//! Schema versioning via `PRAGMA user_version`. Every tenant-owned table
//! declares `tenant_id TEXT NOT NULL REFERENCES tenants(id) ON DELETE
//! RESTRICT` and a composite index with `tenant_id` as the leading key for
//! each frequently filtered secondary attribute, so the
//! tenant-predicate-first query pattern stays cheap.

use rusqlite::Connection;
use tracing::{error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(version = 1, error = %e, "Migration V001 (tenants and order book) failed");
                return Err(e);
            }
        }

        if current_version < 2 {
            if let Err(e) = migrate_v2(conn) {
                error!(version = 2, error = %e, "Migration V002 (staffing and billing) failed");
                return Err(e);
            }
        }
    }

    Ok(())
}

fn schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version}"))?;
    Ok(())
}

/// Tenants, principals' home-tenant anchor, clients, contributors,
/// projects and the order book
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tenants (
            id                   TEXT PRIMARY KEY,
            slug                 TEXT NOT NULL UNIQUE,
            name                 TEXT NOT NULL,
            status               TEXT NOT NULL,
            tier                 TEXT NOT NULL,
            currency             TEXT NOT NULL,
            employer_charge_rate REAL NOT NULL,
            overhead_rate        REAL NOT NULL,
            target_margin        REAL NOT NULL,
            billing_anchor_day   INTEGER NOT NULL
                                 CHECK (billing_anchor_day BETWEEN 1 AND 28)
        );
        CREATE INDEX IF NOT EXISTS idx_tenants_status ON tenants (status);

        CREATE TABLE IF NOT EXISTS clients (
            id            TEXT PRIMARY KEY,
            tenant_id     TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            name          TEXT NOT NULL,
            contact_email TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_clients_tenant_name
            ON clients (tenant_id, name);

        CREATE TABLE IF NOT EXISTS contributors (
            id               TEXT PRIMARY KEY,
            tenant_id        TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            name             TEXT NOT NULL,
            daily_rate_cents INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_contributors_tenant_name
            ON contributors (tenant_id, name);

        CREATE TABLE IF NOT EXISTS projects (
            id         TEXT PRIMARY KEY,
            tenant_id  TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            name       TEXT NOT NULL,
            status     TEXT NOT NULL,
            client_id  TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_projects_tenant_status
            ON projects (tenant_id, status);
        CREATE INDEX IF NOT EXISTS idx_projects_tenant_client
            ON projects (tenant_id, client_id);

        CREATE TABLE IF NOT EXISTS orders (
            id        TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            project_id TEXT NOT NULL,
            reference TEXT NOT NULL,
            status    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_orders_tenant_project
            ON orders (tenant_id, project_id);

        CREATE TABLE IF NOT EXISTS order_sections (
            id        TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            order_id  TEXT NOT NULL,
            title     TEXT NOT NULL,
            position  INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_order_sections_tenant_order
            ON order_sections (tenant_id, order_id);

        CREATE TABLE IF NOT EXISTS order_lines (
            id               TEXT PRIMARY KEY,
            tenant_id        TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            section_id       TEXT NOT NULL,
            label            TEXT NOT NULL,
            quantity         INTEGER NOT NULL,
            unit_price_cents INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_order_lines_tenant_section
            ON order_lines (tenant_id, section_id);

        CREATE TABLE IF NOT EXISTS project_tasks (
            id         TEXT PRIMARY KEY,
            tenant_id  TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            project_id TEXT NOT NULL,
            title      TEXT NOT NULL,
            done       INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_project_tasks_tenant_project
            ON project_tasks (tenant_id, project_id);
        ",
    )?;
    set_schema_version(conn, 1)
}

/// Timesheets, plannings and invoices
fn migrate_v2(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS timesheets (
            id             TEXT PRIMARY KEY,
            tenant_id      TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            project_id     TEXT NOT NULL,
            contributor_id TEXT NOT NULL,
            day            TEXT NOT NULL,
            minutes        INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_timesheets_tenant_project
            ON timesheets (tenant_id, project_id);
        CREATE INDEX IF NOT EXISTS idx_timesheets_tenant_day
            ON timesheets (tenant_id, day);

        CREATE TABLE IF NOT EXISTS plannings (
            id             TEXT PRIMARY KEY,
            tenant_id      TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            project_id     TEXT NOT NULL,
            contributor_id TEXT NOT NULL,
            start_day      TEXT NOT NULL,
            end_day        TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_plannings_tenant_contributor
            ON plannings (tenant_id, contributor_id);

        CREATE TABLE IF NOT EXISTS invoices (
            id          TEXT PRIMARY KEY,
            tenant_id   TEXT NOT NULL REFERENCES tenants (id) ON DELETE RESTRICT,
            project_id  TEXT NOT NULL,
            number      TEXT NOT NULL,
            issued_on   TEXT NOT NULL,
            total_cents INTEGER NOT NULL,
            status      TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_invoices_tenant_issued
            ON invoices (tenant_id, issued_on);
        ",
    )?;
    set_schema_version(conn, 2)
}
