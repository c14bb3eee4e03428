use thiserror::Error;

use crate::model::{IdentityError, RoleError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Role(#[from] RoleError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}
