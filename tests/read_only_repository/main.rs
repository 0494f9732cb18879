//! Integration tests for the read-only repository.

use audited_repo::{OrderBy, ReadOnlyRepository, RepoError};
use entity::{customer, prelude::*, product};
use sea_orm::{ColumnTrait, Condition};
use test_utils::{builder::TestBuilder, factory};

mod get_all;
mod get_exists;
