#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, LedgerError, Result};
    use crate::transactions::transactions_model::*;
    use crate::transactions::{
        TransactionRepositoryTrait, TransactionService, TransactionServiceTrait,
    };
    use crate::wallets::{BalanceEffect, Wallet, WalletRepositoryTrait};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // --- Mock WalletRepository ---
    #[derive(Clone, Default)]
    struct MockWalletRepository {
        wallets: Arc<Mutex<Vec<Wallet>>>,
    }

    impl MockWalletRepository {
        fn with_wallet(id: &str, user_id: &str, balance: Decimal) -> Self {
            let repo = Self::default();
            repo.wallets.lock().unwrap().push(Wallet {
                id: id.to_string(),
                user_id: user_id.to_string(),
                title: "USDT(TRC20)".to_string(),
                wallet_address: "TTPJ".to_string(),
                balance,
            });
            repo
        }
    }

    impl WalletRepositoryTrait for MockWalletRepository {
        fn get_by_id(&self, wallet_id: &str) -> Result<Wallet> {
            self.wallets
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id == wallet_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!("wallet {wallet_id}")))
                })
        }

        fn get_for_user(&self, wallet_id: &str, user_id: &str) -> Result<Wallet> {
            self.wallets
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id == wallet_id && w.user_id == user_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!("wallet {wallet_id}")))
                })
        }

        fn list(&self) -> Result<Vec<Wallet>> {
            Ok(self.wallets.lock().unwrap().clone())
        }

        fn list_for_user(&self, user_id: &str) -> Result<Vec<Wallet>> {
            Ok(self
                .wallets
                .lock()
                .unwrap()
                .iter()
                .filter(|w| w.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    // --- Mock TransactionRepository ---
    #[derive(Clone, Default)]
    struct MockTransactionRepository {
        existing: Arc<Mutex<Vec<Transaction>>>,
        created: Arc<Mutex<Vec<(String, NewTransaction, BalanceEffect)>>>,
        updated: Arc<Mutex<Vec<(String, TransactionUpdate, BalanceEffect)>>>,
    }

    impl MockTransactionRepository {
        fn add_existing(&self, transaction: Transaction) {
            self.existing.lock().unwrap().push(transaction);
        }
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockTransactionRepository {
        async fn create(
            &self,
            user_id: &str,
            new_transaction: NewTransaction,
            effect: BalanceEffect,
        ) -> Result<Transaction> {
            let transaction = Transaction {
                id: "txn-1".to_string(),
                user_id: user_id.to_string(),
                wallet_id: new_transaction.wallet_id.clone(),
                transaction_type: new_transaction.transaction_type,
                wallet_address: new_transaction.wallet_address.clone(),
                amount: new_transaction.amount,
                status: new_transaction.status,
                created_at: Utc::now().naive_utc(),
            };
            self.created
                .lock()
                .unwrap()
                .push((user_id.to_string(), new_transaction, effect));
            Ok(transaction)
        }

        async fn update(
            &self,
            transaction_id: &str,
            update: TransactionUpdate,
            effect: BalanceEffect,
        ) -> Result<Transaction> {
            let mut existing = self.existing.lock().unwrap();
            let transaction = existing
                .iter_mut()
                .find(|t| t.id == transaction_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!(
                        "transaction {transaction_id}"
                    )))
                })?;
            if let Some(status) = update.status {
                transaction.status = status;
            }
            if let Some(amount) = update.amount {
                transaction.amount = amount;
            }
            self.updated
                .lock()
                .unwrap()
                .push((transaction_id.to_string(), update, effect));
            Ok(transaction.clone())
        }

        async fn delete(&self, _transaction_id: &str) -> Result<usize> {
            unimplemented!()
        }

        fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
            self.existing
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == transaction_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!(
                        "transaction {transaction_id}"
                    )))
                })
        }

        fn list(&self) -> Result<Vec<Transaction>> {
            Ok(self.existing.lock().unwrap().clone())
        }

        fn list_for_user(&self, _user_id: &str) -> Result<Vec<Transaction>> {
            unimplemented!()
        }
    }

    fn new_transaction(
        transaction_type: TransactionType,
        amount: Decimal,
        status: TransactionStatus,
    ) -> NewTransaction {
        NewTransaction {
            id: None,
            wallet_id: "wallet-1".to_string(),
            transaction_type,
            wallet_address: None,
            amount,
            status,
        }
    }

    fn service_with(
        balance: Decimal,
    ) -> (Arc<MockTransactionRepository>, TransactionService) {
        let repository = Arc::new(MockTransactionRepository::default());
        let wallets = Arc::new(MockWalletRepository::with_wallet("wallet-1", "user-1", balance));
        let service = TransactionService::new(repository.clone(), wallets);
        (repository, service)
    }

    #[tokio::test]
    async fn pending_deposit_persists_without_balance_effect() {
        let (repository, service) = service_with(dec!(100));

        let transaction = service
            .create_transaction(
                "user-1",
                new_transaction(TransactionType::Deposit, dec!(50), TransactionStatus::Pending),
            )
            .await
            .unwrap();
        assert_eq!(transaction.status, TransactionStatus::Pending);

        let created = repository.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].2, BalanceEffect::None);
    }

    #[tokio::test]
    async fn done_deposit_credits_wallet() {
        let (repository, service) = service_with(dec!(100));

        service
            .create_transaction(
                "user-1",
                new_transaction(TransactionType::Deposit, dec!(50), TransactionStatus::Done),
            )
            .await
            .unwrap();

        let created = repository.created.lock().unwrap();
        assert_eq!(created[0].2, BalanceEffect::Credit(dec!(50)));
    }

    #[tokio::test]
    async fn done_withdrawal_debits_wallet() {
        let (repository, service) = service_with(dec!(100));

        service
            .create_transaction(
                "user-1",
                new_transaction(TransactionType::Withdrawal, dec!(40), TransactionStatus::Done),
            )
            .await
            .unwrap();

        let created = repository.created.lock().unwrap();
        assert_eq!(created[0].2, BalanceEffect::Debit(dec!(40)));
    }

    #[tokio::test]
    async fn withdrawal_beyond_balance_is_rejected_even_when_pending() {
        let (repository, service) = service_with(dec!(30));

        let result = service
            .create_transaction(
                "user-1",
                new_transaction(
                    TransactionType::Withdrawal,
                    dec!(31),
                    TransactionStatus::Pending,
                ),
            )
            .await;

        match result {
            Err(Error::Ledger(LedgerError::InsufficientFunds {
                requested,
                available,
                ..
            })) => {
                assert_eq!(requested, dec!(31));
                assert_eq!(available, dec!(30));
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
        assert!(repository.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_non_positive_and_oversized_amounts() {
        let (_, service) = service_with(dec!(100));

        for amount in [dec!(0), dec!(-5), dec!(1.999)] {
            let result = service
                .create_transaction(
                    "user-1",
                    new_transaction(TransactionType::Deposit, amount, TransactionStatus::Pending),
                )
                .await;
            assert!(
                matches!(result, Err(Error::Ledger(LedgerError::InvalidAmount(_)))),
                "amount {amount} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn create_on_foreign_wallet_reads_as_not_found() {
        let (repository, service) = service_with(dec!(100));

        let result = service
            .create_transaction(
                "user-2",
                new_transaction(TransactionType::Deposit, dec!(10), TransactionStatus::Pending),
            )
            .await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
        assert!(repository.created.lock().unwrap().is_empty());
    }

    fn stored_transaction(
        transaction_type: TransactionType,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Transaction {
        Transaction {
            id: "txn-1".to_string(),
            user_id: "user-1".to_string(),
            wallet_id: "wallet-1".to_string(),
            transaction_type,
            wallet_address: None,
            amount,
            status,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn approving_pending_withdrawal_settles_stored_amount() {
        let (repository, service) = service_with(dec!(100));
        repository.add_existing(stored_transaction(
            TransactionType::Withdrawal,
            dec!(60),
            TransactionStatus::Pending,
        ));

        // The amount patched alongside the status must not affect settlement.
        service
            .update_transaction(
                "txn-1",
                TransactionUpdate {
                    status: Some(TransactionStatus::Done),
                    amount: Some(dec!(5)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = repository.updated.lock().unwrap();
        assert_eq!(updated[0].2, BalanceEffect::ForcedDebit(dec!(60)));
    }

    #[tokio::test]
    async fn approving_pending_deposit_credits_stored_amount() {
        let (repository, service) = service_with(dec!(0));
        repository.add_existing(stored_transaction(
            TransactionType::Deposit,
            dec!(250),
            TransactionStatus::Pending,
        ));

        service
            .update_transaction(
                "txn-1",
                TransactionUpdate {
                    status: Some(TransactionStatus::Done),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = repository.updated.lock().unwrap();
        assert_eq!(updated[0].2, BalanceEffect::Credit(dec!(250)));
    }

    #[tokio::test]
    async fn declining_settled_transaction_leaves_balance_alone() {
        let (repository, service) = service_with(dec!(100));
        repository.add_existing(stored_transaction(
            TransactionType::Deposit,
            dec!(250),
            TransactionStatus::Done,
        ));

        service
            .update_transaction(
                "txn-1",
                TransactionUpdate {
                    status: Some(TransactionStatus::Declined),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = repository.updated.lock().unwrap();
        assert_eq!(updated[0].2, BalanceEffect::None);
    }

    #[tokio::test]
    async fn repeating_current_status_has_no_effect() {
        let (repository, service) = service_with(dec!(100));
        repository.add_existing(stored_transaction(
            TransactionType::Deposit,
            dec!(250),
            TransactionStatus::Done,
        ));

        service
            .update_transaction(
                "txn-1",
                TransactionUpdate {
                    status: Some(TransactionStatus::Done),
                    wallet_address: Some("0xabc".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = repository.updated.lock().unwrap();
        assert_eq!(updated[0].2, BalanceEffect::None);
    }

    #[tokio::test]
    async fn update_of_missing_transaction_is_not_found() {
        let (_, service) = service_with(dec!(100));

        let result = service
            .update_transaction(
                "txn-404",
                TransactionUpdate {
                    status: Some(TransactionStatus::Done),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }
}
