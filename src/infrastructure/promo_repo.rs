use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::PromoRepository;
use crate::domain::promo::PromoCode;
use crate::models::promo_code::PromoCodeRow;
use crate::schema::promo_codes;

pub struct DieselPromoRepository {
    pool: DbPool,
}

impl DieselPromoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PromoRepository for DieselPromoRepository {
    fn find_active(&self, code: &str) -> Result<Option<PromoCode>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = promo_codes::table
            .filter(promo_codes::code.eq(code))
            .filter(promo_codes::is_active.eq(true))
            .select(PromoCodeRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(PromoCodeRow::into_domain).transpose()
    }
}
