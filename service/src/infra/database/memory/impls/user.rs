//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, memory},
        Database, Memory,
    },
};

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.read().await.users.get(&id).cloned())
    }
}

impl Database<Select<By<Option<User>, &user::Login>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &user::Login>>,
    ) -> Result<Self::Ok, Self::Err> {
        let login = by.into_inner();
        Ok(self
            .read()
            .await
            .users
            .values()
            .find(|u| &u.login == login)
            .cloned())
    }
}

impl Database<Insert<User>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut storage = self.write().await;
        if storage.users.values().any(|u| u.login == user.login) {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::UniqueViolation {
                    constraint: "users_login_key",
                },
            )));
        }
        if storage.users.contains_key(&user.id) {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::UniqueViolation {
                    constraint: "users_pkey",
                },
            )));
        }
        drop(storage.users.insert(user.id, user));
        Ok(())
    }
}
