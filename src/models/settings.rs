use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::StoreSettings;
use crate::schema::store_settings;

/// Singleton settings row (id = 1), seeded by the initial migration.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = store_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoreSettingsRow {
    pub id: i32,
    pub service_charge: BigDecimal,
    pub tax_percent: BigDecimal,
    pub payment_window_minutes: i32,
    pub updated_at: DateTime<Utc>,
}

impl StoreSettingsRow {
    pub fn into_domain(self) -> StoreSettings {
        StoreSettings {
            service_charge: self.service_charge,
            tax_percent: self.tax_percent,
            payment_window_minutes: self.payment_window_minutes,
        }
    }
}
