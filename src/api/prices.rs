//! Price rate rules.

use crate::api::resource::ResourceApi;
use crate::domain::Price;

pub type PriceApi = ResourceApi<Price>;
