//! [`SqliteAccountStore`] — the SQLite implementation of [`AccountStore`].

use std::path::Path;

use carelink_core::{account::SubscriberAccount, store::AccountStore};
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawAccount, encode_dt, encode_token},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An account store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteAccountStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteAccountStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert or replace an account, including its full subscription set.
  ///
  /// The fan-out never calls this; it exists for account import and tests.
  pub async fn put_account(&self, account: &SubscriberAccount) -> Result<()> {
    if account.account_id.trim().is_empty() {
      return Err(Error::EmptyAccountId);
    }

    let account_id = account.account_id.clone();
    let name       = account.name.clone();
    let fcm_token  = encode_token(account.fcm_token.as_deref());
    let updated_at = encode_dt(Utc::now());
    let senior_ids: Vec<String> =
      account.connected_senior_ids.iter().cloned().collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO accounts (account_id, name, fcm_token, updated_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (account_id) DO UPDATE SET
             name       = excluded.name,
             fcm_token  = excluded.fcm_token,
             updated_at = excluded.updated_at",
          rusqlite::params![account_id, name, fcm_token, updated_at],
        )?;
        tx.execute(
          "DELETE FROM account_subscriptions WHERE account_id = ?1",
          rusqlite::params![account_id],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO account_subscriptions (account_id, senior_id)
             VALUES (?1, ?2)",
          )?;
          for senior_id in &senior_ids {
            stmt.execute(rusqlite::params![account_id, senior_id])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Load the subscription set for one account.
fn load_senior_ids(
  conn: &rusqlite::Connection,
  account_id: &str,
) -> rusqlite::Result<Vec<String>> {
  let mut stmt = conn.prepare_cached(
    "SELECT senior_id FROM account_subscriptions WHERE account_id = ?1",
  )?;
  stmt
    .query_map(rusqlite::params![account_id], |row| row.get(0))?
    .collect()
}

// ─── AccountStore impl ───────────────────────────────────────────────────────

impl AccountStore for SqliteAccountStore {
  type Error = Error;

  async fn subscribers_of(
    &self,
    senior_id: &str,
  ) -> Result<Vec<SubscriberAccount>> {
    let senior_id = senior_id.to_owned();

    let raws: Vec<RawAccount> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT a.account_id, a.name, a.fcm_token
           FROM accounts a
           JOIN account_subscriptions s ON s.account_id = a.account_id
           WHERE s.senior_id = ?1",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![senior_id], |row| {
            Ok(RawAccount {
              account_id: row.get(0)?,
              name:       row.get(1)?,
              fcm_token:  row.get(2)?,
              senior_ids: Vec::new(),
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut raws = Vec::with_capacity(rows.len());
        for mut raw in rows {
          raw.senior_ids = load_senior_ids(conn, &raw.account_id)?;
          raws.push(raw);
        }
        Ok(raws)
      })
      .await?;

    Ok(raws.into_iter().map(RawAccount::into_account).collect())
  }

  async fn get_account(
    &self,
    account_id: &str,
  ) -> Result<Option<SubscriberAccount>> {
    let account_id = account_id.to_owned();

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        let row = conn
          .query_row(
            "SELECT account_id, name, fcm_token FROM accounts
             WHERE account_id = ?1",
            rusqlite::params![account_id],
            |row| {
              Ok(RawAccount {
                account_id: row.get(0)?,
                name:       row.get(1)?,
                fcm_token:  row.get(2)?,
                senior_ids: Vec::new(),
              })
            },
          )
          .optional()?;

        match row {
          Some(mut raw) => {
            raw.senior_ids = load_senior_ids(conn, &raw.account_id)?;
            Ok(Some(raw))
          }
          None => Ok(None),
        }
      })
      .await?;

    Ok(raw.map(RawAccount::into_account))
  }
}
