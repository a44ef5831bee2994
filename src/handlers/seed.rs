//! One-shot demo data loader for a fresh database. Refuses to run when the
//! catalog already has rows so a stray call cannot duplicate content.

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::category::NewCategory;
use crate::models::content::{NewFaq, NewPaymentMethod, NewSocialLink};
use crate::models::product::{NewProduct, NewProductVariation};
use crate::models::review::NewReview;
use crate::schema::{
    categories, faqs, payment_methods, product_variations, products, reviews, social_links,
};

fn dec(value: &str) -> BigDecimal {
    // Literals below are valid decimals.
    value.parse().unwrap_or_else(|_| BigDecimal::from(0))
}

struct SeedVariation {
    name: &'static str,
    price: &'static str,
    original_price: Option<&'static str>,
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    category: &'static str,
    variations: &'static [SeedVariation],
}

const SEED_CATEGORIES: &[(&str, &str)] = &[
    ("Game Top-ups", "game-top-ups"),
    ("Gift Cards", "gift-cards"),
    ("Subscriptions", "subscriptions"),
    ("Game Keys", "game-keys"),
    ("Software", "software"),
];

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "PUBG Mobile UC",
        description: "Unknown Cash delivered to your PUBG Mobile player ID.",
        image_url: "/images/pubg-uc.png",
        category: "game-top-ups",
        variations: &[
            SeedVariation {
                name: "60 UC",
                price: "110",
                original_price: Some("130"),
            },
            SeedVariation {
                name: "325 UC",
                price: "550",
                original_price: Some("600"),
            },
            SeedVariation {
                name: "660 UC",
                price: "1050",
                original_price: None,
            },
        ],
    },
    SeedProduct {
        name: "Free Fire Diamonds",
        description: "Diamonds credited directly to your Free Fire account.",
        image_url: "/images/ff-diamonds.png",
        category: "game-top-ups",
        variations: &[
            SeedVariation {
                name: "100 Diamonds",
                price: "120",
                original_price: None,
            },
            SeedVariation {
                name: "310 Diamonds",
                price: "350",
                original_price: Some("400"),
            },
        ],
    },
    SeedProduct {
        name: "Netflix Gift Card",
        description: "Digital Netflix gift card code sent over WhatsApp.",
        image_url: "/images/netflix-card.png",
        category: "gift-cards",
        variations: &[
            SeedVariation {
                name: "1 Month Basic",
                price: "399",
                original_price: None,
            },
            SeedVariation {
                name: "1 Month Premium",
                price: "899",
                original_price: Some("999"),
            },
        ],
    },
];

const SEED_REVIEWS: &[(&str, i32, &str)] = &[
    ("Sujan K.", 5, "Got my UC within five minutes. Fastest shop I've used."),
    ("Anisha R.", 4, "Smooth delivery, payment QR worked first try."),
    ("Bibek T.", 5, "Legit seller, third order and never a problem."),
];

const SEED_FAQS: &[(&str, &str)] = &[
    (
        "How fast is delivery?",
        "Most orders are completed within 10 minutes of payment confirmation.",
    ),
    (
        "Which payment methods do you accept?",
        "We accept eSewa and Khalti. Scan the QR at checkout and upload your payment screenshot.",
    ),
    (
        "What if I sent payment but my order expired?",
        "Contact us on WhatsApp with your order number and payment screenshot and we will sort it out.",
    ),
];

const SEED_SOCIAL_LINKS: &[(&str, &str, &str)] = &[
    ("WhatsApp", "https://wa.me/9779800000000", "whatsapp"),
    ("Instagram", "https://instagram.com/gameshop.np", "instagram"),
    ("Facebook", "https://facebook.com/gameshop.np", "facebook"),
    ("TikTok", "https://tiktok.com/@gameshop.np", "tiktok"),
];

/// POST /api/admin/seed (admin)
#[utoipa::path(
    post,
    path = "/api/admin/seed",
    responses(
        (status = 200, description = "Demo data inserted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 409, description = "Database already has catalog data"),
    ),
    tag = "admin"
)]
pub async fn seed_demo_data(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            let existing: i64 = products::table.count().get_result(conn)?;
            if existing > 0 {
                return Err(AppError::Conflict {
                    code: "invalid_state",
                    message: "Database already has catalog data".to_string(),
                });
            }

            let mut category_ids = std::collections::HashMap::new();
            for (name, slug) in SEED_CATEGORIES {
                let id = Uuid::new_v4();
                diesel::insert_into(categories::table)
                    .values(&NewCategory {
                        id,
                        name: (*name).to_string(),
                        slug: (*slug).to_string(),
                    })
                    .execute(conn)?;
                category_ids.insert(*slug, id);
            }

            for product in SEED_PRODUCTS {
                let product_id = Uuid::new_v4();
                diesel::insert_into(products::table)
                    .values(&NewProduct {
                        id: product_id,
                        name: product.name.to_string(),
                        description: product.description.to_string(),
                        image_url: product.image_url.to_string(),
                        category_id: category_ids.get(product.category).copied(),
                        is_active: true,
                        is_sold_out: false,
                    })
                    .execute(conn)?;
                for (position, variation) in product.variations.iter().enumerate() {
                    diesel::insert_into(product_variations::table)
                        .values(&NewProductVariation {
                            id: Uuid::new_v4(),
                            product_id,
                            name: variation.name.to_string(),
                            price: dec(variation.price),
                            original_price: variation.original_price.map(dec),
                            description: None,
                            position: position as i32,
                        })
                        .execute(conn)?;
                }
            }

            for (reviewer_name, rating, comment) in SEED_REVIEWS {
                diesel::insert_into(reviews::table)
                    .values(&NewReview {
                        id: Uuid::new_v4(),
                        reviewer_name: (*reviewer_name).to_string(),
                        rating: *rating,
                        comment: (*comment).to_string(),
                        review_date: Utc::now(),
                    })
                    .execute(conn)?;
            }

            for (position, (question, answer)) in SEED_FAQS.iter().enumerate() {
                diesel::insert_into(faqs::table)
                    .values(&NewFaq {
                        id: Uuid::new_v4(),
                        question: (*question).to_string(),
                        answer: (*answer).to_string(),
                        position: position as i32,
                    })
                    .execute(conn)?;
            }

            for (platform, url, icon) in SEED_SOCIAL_LINKS {
                diesel::insert_into(social_links::table)
                    .values(&NewSocialLink {
                        id: Uuid::new_v4(),
                        platform: (*platform).to_string(),
                        url: (*url).to_string(),
                        icon: Some((*icon).to_string()),
                    })
                    .execute(conn)?;
            }

            diesel::insert_into(payment_methods::table)
                .values(&vec![
                    NewPaymentMethod {
                        id: Uuid::new_v4(),
                        name: "eSewa".to_string(),
                        instructions: Some(
                            "Scan the QR with the eSewa app and upload your payment screenshot."
                                .to_string(),
                        ),
                        qr_image_url: Some("/images/esewa-qr.png".to_string()),
                        is_active: true,
                    },
                    NewPaymentMethod {
                        id: Uuid::new_v4(),
                        name: "Khalti".to_string(),
                        instructions: Some(
                            "Scan the QR with the Khalti app and upload your payment screenshot."
                                .to_string(),
                        ),
                        qr_image_url: Some("/images/khalti-qr.png".to_string()),
                        is_active: true,
                    },
                ])
                .execute(conn)?;

            Ok(())
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Demo data inserted" })))
}
