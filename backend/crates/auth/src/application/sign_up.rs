//! Sign Up Use Case
//!
//! Creates a new account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> SignUpUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<Account> {
        // Validate username and password; violations carry the constraint
        let username = Username::new(input.username)?;
        let password = ClearTextPassword::new(input.password)?;

        // Fast-path duplicate check; the store re-checks under its write
        // lock, which is what actually guarantees uniqueness
        if self.accounts.exists_by_username(&username).await? {
            return Err(AuthError::DuplicateAccount);
        }

        let account = Account::new(
            username,
            password.digest(),
            input.first_name,
            input.last_name,
        );

        self.accounts.create(&account).await?;

        tracing::info!(username = %account.username, "Account created");

        Ok(account)
    }
}
