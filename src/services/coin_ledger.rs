// Coin ledger - append-only record of coin gains per user

use std::sync::Arc;
use tracing::info;

use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::forms::CoinForm;
use crate::infrastructure::database::Database;
use crate::models::UserCoin;
use crate::store::coins;

#[derive(Clone)]
pub struct CoinLedger {
    db: Arc<Database>,
}

impl CoinLedger {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn record_gain(&self, form: &CoinForm, acting_user: UserId) -> AppResult<UserCoin> {
        let data = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        let coin = coins::insert(&mut conn, &data, acting_user).await?;
        info!(
            coin_id = coin.id,
            coin_user = %coin.user,
            gain_type = %coin.gain_type,
            gain_coin = coin.gain_coin,
            user = %acting_user,
            "Recorded coin gain"
        );
        Ok(coin)
    }

    pub async fn list_gains(&self, user: Option<UserId>) -> AppResult<Vec<UserCoin>> {
        let mut conn = self.db.acquire().await?;
        coins::list(&mut conn, user).await
    }
}
